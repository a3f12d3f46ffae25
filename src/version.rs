use std::fmt;

/// Root of the Buildkite REST API.
pub const REST_API_ROOT: &str = "https://api.buildkite.com";
/// Root of the Buildkite Agent API.
pub const AGENT_API_ROOT: &str = "https://agent.buildkite.com";

/// API version selected when a client is built. Only picks the base URL.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ApiVersion {
    #[default]
    V2,
    V3,
}

impl ApiVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V2 => "v2",
            Self::V3 => "v3",
        }
    }

    /// Base URL of the REST API for this version, without a trailing slash.
    pub fn rest_base_url(self) -> String {
        format!("{REST_API_ROOT}/{}", self.as_str())
    }

    /// Base URL of the Agent API for this version, without a trailing slash.
    pub fn agent_base_url(self) -> String {
        format!("{AGENT_API_ROOT}/{}", self.as_str())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiVersion;

    #[test]
    fn base_urls_follow_version() {
        assert_eq!(ApiVersion::V2.rest_base_url(), "https://api.buildkite.com/v2");
        assert_eq!(ApiVersion::V3.rest_base_url(), "https://api.buildkite.com/v3");
        assert_eq!(ApiVersion::V3.agent_base_url(), "https://agent.buildkite.com/v3");
    }

    #[test]
    fn default_is_v2() {
        assert_eq!(ApiVersion::default(), ApiVersion::V2);
    }
}
