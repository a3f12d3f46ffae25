/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum BuildkiteError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// An operation that needs a credential was called before one was set.
    #[error("no token set: call `set_access_token` or `set_agent_token` first")]
    MissingToken,
    /// A `page` value in a `Link` header entry is not a valid integer.
    #[error("pagination error: {0}")]
    Pagination(String),
    /// Response body could not be decoded as JSON.
    #[error("decode error: {0}")]
    Decode(String),
    /// Argument rejected before any request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
