//! `buildkite-http` is an async HTTP client for the Buildkite REST API and
//! Agent API.
//!
//! [`Buildkite`] and [`Agent`] own one [`Transport`] each and hand out
//! resource facades that borrow it:
//! - [`Buildkite::builds`], [`Buildkite::pipelines`], [`Buildkite::jobs`], ...
//! - [`Agent::metrics`]
//!
//! Every call resolves to an [`ApiResponse`] whose shape depends on the
//! request's `Accept` header, the pagination and streaming flags, and the
//! response status.

mod buildkite;
mod error;
mod options;
mod pagination;
mod params;
mod response;
mod transport;
mod value;
mod version;

pub mod resources;

pub use buildkite::{Agent, Buildkite};
pub use error::BuildkiteError;
pub use options::ClientOptions;
pub use pagination::Paginated;
pub use params::{Body, QueryParams};
pub use response::{ApiResponse, ByteStream};
pub use transport::{ApiRequest, CredentialKind, Transport};
pub use value::QueryValue;
pub use version::{ApiVersion, AGENT_API_ROOT, REST_API_ROOT};

pub use reqwest::header::HeaderMap;
pub use reqwest::Method;

pub type Result<T> = std::result::Result<T, BuildkiteError>;
