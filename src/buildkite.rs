use crate::resources::{
    AccessTokens, Agents, Annotations, Artifacts, Builds, Emojis, Jobs, Meta, Metrics,
    Organizations, Pipelines, Teams, Users,
};
use crate::{ApiVersion, BuildkiteError, ClientOptions, CredentialKind, Result, Transport};

/// Fails with [`BuildkiteError::MissingToken`] unless a credential is set.
fn require_token(client: &Transport) -> Result<()> {
    if client.is_credential_set() {
        Ok(())
    } else {
        Err(BuildkiteError::MissingToken)
    }
}

fn token_from_env(name: &str) -> std::result::Result<String, String> {
    let token = std::env::var(name).map_err(|_| format!("missing {name} environment variable"))?;
    if token.trim().is_empty() {
        return Err(format!("{name} is set but empty"));
    }
    Ok(token.trim().to_owned())
}

/// Entry point for the Buildkite REST API.
///
/// ```no_run
/// use buildkite_http::{ApiVersion, Buildkite};
///
/// # async fn run() -> buildkite_http::Result<()> {
/// let mut buildkite = Buildkite::new(ApiVersion::V2);
/// buildkite.set_access_token("my-token");
/// let orgs = buildkite.organizations()?.list_all().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Buildkite {
    client: Transport,
    base_url: String,
}

impl Default for Buildkite {
    fn default() -> Self {
        Self::new(ApiVersion::default())
    }
}

impl Buildkite {
    pub fn new(api_version: ApiVersion) -> Self {
        Self {
            client: Transport::new(CredentialKind::AccessToken, api_version),
            base_url: api_version.rest_base_url(),
        }
    }

    /// Creates a v2 client authenticated with `BUILDKITE_API_TOKEN`.
    pub fn from_env() -> std::result::Result<Self, String> {
        let token = token_from_env("BUILDKITE_API_TOKEN")?;
        let mut buildkite = Self::default();
        buildkite.set_access_token(token);
        Ok(buildkite)
    }

    /// Points every facade at another base URL, e.g. a proxy or mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Applies client options such as timeout and user agent.
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.client = self.client.with_options(options);
        self
    }

    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.client.set_credential(access_token);
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The shared transport, for requests no facade covers.
    pub fn client(&self) -> &Transport {
        &self.client
    }

    pub fn organizations(&self) -> Result<Organizations<'_>> {
        require_token(&self.client)?;
        Ok(Organizations::new(&self.client, &self.base_url))
    }

    pub fn pipelines(&self) -> Result<Pipelines<'_>> {
        require_token(&self.client)?;
        Ok(Pipelines::new(&self.client, &self.base_url))
    }

    pub fn builds(&self) -> Result<Builds<'_>> {
        require_token(&self.client)?;
        Ok(Builds::new(&self.client, &self.base_url))
    }

    pub fn jobs(&self) -> Result<Jobs<'_>> {
        require_token(&self.client)?;
        Ok(Jobs::new(&self.client, &self.base_url))
    }

    pub fn agents(&self) -> Result<Agents<'_>> {
        require_token(&self.client)?;
        Ok(Agents::new(&self.client, &self.base_url))
    }

    pub fn emojis(&self) -> Result<Emojis<'_>> {
        require_token(&self.client)?;
        Ok(Emojis::new(&self.client, &self.base_url))
    }

    pub fn annotations(&self) -> Result<Annotations<'_>> {
        require_token(&self.client)?;
        Ok(Annotations::new(&self.client, &self.base_url))
    }

    pub fn artifacts(&self) -> Result<Artifacts<'_>> {
        require_token(&self.client)?;
        Ok(Artifacts::new(&self.client, &self.base_url))
    }

    pub fn teams(&self) -> Result<Teams<'_>> {
        require_token(&self.client)?;
        Ok(Teams::new(&self.client, &self.base_url))
    }

    pub fn users(&self) -> Result<Users<'_>> {
        require_token(&self.client)?;
        Ok(Users::new(&self.client, &self.base_url))
    }

    pub fn access_tokens(&self) -> Result<AccessTokens<'_>> {
        require_token(&self.client)?;
        Ok(AccessTokens::new(&self.client, &self.base_url))
    }

    /// Meta information is public; no token is needed.
    pub fn meta(&self) -> Meta<'_> {
        Meta::new(&self.client, &self.base_url)
    }
}

/// Entry point for the Buildkite Agent API.
#[derive(Clone, Debug)]
pub struct Agent {
    client: Transport,
    base_url: String,
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(ApiVersion::V3)
    }
}

impl Agent {
    pub fn new(api_version: ApiVersion) -> Self {
        Self {
            client: Transport::new(CredentialKind::AgentToken, api_version),
            base_url: api_version.agent_base_url(),
        }
    }

    /// Creates a v3 agent client authenticated with `BUILDKITE_AGENT_TOKEN`.
    pub fn from_env() -> std::result::Result<Self, String> {
        let token = token_from_env("BUILDKITE_AGENT_TOKEN")?;
        let mut agent = Self::default();
        agent.set_agent_token(token);
        Ok(agent)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.client = self.client.with_options(options);
        self
    }

    /// Sets the agent registration token.
    pub fn set_agent_token(&mut self, agent_token: impl Into<String>) {
        self.client.set_credential(agent_token);
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &Transport {
        &self.client
    }

    pub fn metrics(&self) -> Result<Metrics<'_>> {
        require_token(&self.client)?;
        Ok(Metrics::new(&self.client, &self.base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::{Agent, Buildkite};
    use crate::{ApiVersion, BuildkiteError, CredentialKind};

    #[test]
    fn facades_require_access_token() {
        let buildkite = Buildkite::default();
        assert!(matches!(
            buildkite.builds().expect_err("no token"),
            BuildkiteError::MissingToken
        ));
        assert!(matches!(
            buildkite.organizations().expect_err("no token"),
            BuildkiteError::MissingToken
        ));
    }

    #[test]
    fn meta_does_not_require_token() {
        let buildkite = Buildkite::default();
        let _meta = buildkite.meta();
    }

    #[test]
    fn setting_token_unlocks_facades() {
        let mut buildkite = Buildkite::new(ApiVersion::V3);
        assert!(!buildkite.client().is_credential_set());
        buildkite.set_access_token("token");
        assert!(buildkite.client().is_credential_set());
        assert!(buildkite.pipelines().is_ok());
        assert_eq!(buildkite.base_url(), "https://api.buildkite.com/v3");
        assert_eq!(buildkite.client().kind(), CredentialKind::AccessToken);
    }

    #[test]
    fn agent_defaults_to_v3_with_token_scheme() {
        let mut agent = Agent::default();
        assert_eq!(agent.base_url(), "https://agent.buildkite.com/v3");
        assert_eq!(agent.client().kind(), CredentialKind::AgentToken);
        assert!(matches!(
            agent.metrics().expect_err("no token"),
            BuildkiteError::MissingToken
        ));
        agent.set_agent_token("agent-token");
        assert!(agent.metrics().is_ok());
    }
}
