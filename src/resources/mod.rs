//! Per-resource facades over [`Transport`](crate::Transport).
//!
//! Every facade borrows the transport, builds a URL from its path templates,
//! and returns the transport's [`ApiResponse`](crate::ApiResponse) untouched.

mod access_tokens;
mod agents;
mod annotations;
mod artifacts;
mod builds;
mod emojis;
mod jobs;
mod meta;
mod metrics;
mod organizations;
mod pipelines;
mod teams;
mod users;

pub use access_tokens::AccessTokens;
pub use agents::Agents;
pub use annotations::Annotations;
pub use artifacts::Artifacts;
pub use builds::{BuildFilter, BuildState, Builds, CreateBuild};
pub use emojis::Emojis;
pub use jobs::{Jobs, LogFormat};
pub use meta::Meta;
pub use metrics::Metrics;
pub use organizations::Organizations;
pub use pipelines::{PipelineUpdate, Pipelines};
pub use teams::Teams;
pub use users::Users;

use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::{BuildkiteError, Result};

/// URL template with `{}` slots filled left to right.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PathTemplate(String);

impl PathTemplate {
    /// Joins `base` and `path` with exactly one `/`.
    pub(crate) fn new(base: &str, path: &str) -> Self {
        let base = base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            Self(base.to_owned())
        } else {
            Self(format!("{base}/{path}"))
        }
    }

    /// Substitutes `slots` into the template in order.
    ///
    /// Extra slots are ignored; missing slots leave `{}` in place.
    pub(crate) fn fill(&self, slots: &[&str]) -> String {
        let mut url = String::with_capacity(self.0.len());
        let mut slots = slots.iter();
        let mut rest = self.0.as_str();
        while let Some(index) = rest.find("{}") {
            url.push_str(&rest[..index]);
            match slots.next() {
                Some(slot) => url.push_str(slot),
                None => url.push_str("{}"),
            }
            rest = &rest[index + 2..];
        }
        url.push_str(rest);
        url
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// Header map carrying a single `Accept` value.
pub(crate) fn accept(value: &str) -> Result<HeaderMap> {
    let value = HeaderValue::from_str(value)
        .map_err(|err| BuildkiteError::InvalidArgument(format!("invalid accept value '{value}': {err}")))?;
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, value);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::{accept, PathTemplate};
    use crate::BuildkiteError;

    #[test]
    fn template_joins_base_with_single_slash() {
        assert_eq!(
            PathTemplate::new("https://api.buildkite.com/v2/", "/organizations").as_str(),
            "https://api.buildkite.com/v2/organizations"
        );
        assert_eq!(PathTemplate::new("base", "user").as_str(), "base/user");
    }

    #[test]
    fn template_fills_slots_in_order() {
        let template = PathTemplate::new("base", "organizations/{}/pipelines/{}/builds/{}");
        assert_eq!(
            template.fill(&["acme", "deploy", "42"]),
            "base/organizations/acme/pipelines/deploy/builds/42"
        );
    }

    #[test]
    fn template_leaves_missing_slots() {
        let template = PathTemplate::new("base", "organizations/{}/teams/{}");
        assert_eq!(template.fill(&["acme"]), "base/organizations/acme/teams/{}");
    }

    #[test]
    fn accept_rejects_invalid_header_value() {
        let err = accept("text/plain\n").expect_err("must fail");
        assert!(matches!(err, BuildkiteError::InvalidArgument(_)));
    }
}
