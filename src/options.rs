/// Configures the underlying HTTP client.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds. `None` leaves reqwest's default.
    pub timeout_ms: Option<u64>,
    /// Value of the `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: Some(30_000),
            user_agent: concat!("buildkite-http/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}
