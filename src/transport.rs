use std::fmt;
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, Response, StatusCode, Url};
use serde_json::Value;

use crate::{
    ApiResponse, ApiVersion, Body, BuildkiteError, ByteStream, ClientOptions, Paginated,
    QueryParams, Result,
};

/// Page size sent with every request. Callers cannot change it.
const PER_PAGE: i64 = 100;

/// Which kind of secret a [`Transport`] carries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CredentialKind {
    /// User API access token, sent as `Authorization: Bearer <token>`.
    AccessToken,
    /// Agent registration token, sent as `Authorization: Token <token>`.
    AgentToken,
}

impl CredentialKind {
    pub fn scheme(self) -> &'static str {
        match self {
            Self::AccessToken => "Bearer",
            Self::AgentToken => "Token",
        }
    }
}

/// Everything needed to send one request.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Option<QueryParams>,
    pub body: Option<Body>,
    pub headers: Option<HeaderMap>,
    pub with_pagination: bool,
    pub as_stream: bool,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: None,
            body: None,
            headers: None,
            with_pagination: false,
            as_stream: false,
        }
    }

    pub fn query(mut self, query: impl Into<Option<QueryParams>>) -> Self {
        self.query = query.into();
        self
    }

    pub fn body(mut self, body: impl Into<Option<Body>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn headers(mut self, headers: impl Into<Option<HeaderMap>>) -> Self {
        self.headers = headers.into();
        self
    }

    pub fn with_pagination(mut self, with_pagination: bool) -> Self {
        self.with_pagination = with_pagination;
        self
    }

    pub fn as_stream(mut self, as_stream: bool) -> Self {
        self.as_stream = as_stream;
        self
    }
}

/// Shared HTTP core used by every resource facade.
///
/// Holds the credential and API version. Facades borrow it; the credential
/// can only change through [`Transport::set_credential`], which needs
/// exclusive access.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    kind: CredentialKind,
    token: String,
    api_version: ApiVersion,
    options: ClientOptions,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("kind", &self.kind)
            .field("token", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("options", &self.options)
            .finish()
    }
}

impl Transport {
    /// Creates a transport with no credential set.
    pub fn new(kind: CredentialKind, api_version: ApiVersion) -> Self {
        Self {
            http: reqwest::Client::new(),
            kind,
            token: String::new(),
            api_version,
            options: ClientOptions::default(),
        }
    }

    /// Applies client options such as timeout and user agent.
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn kind(&self) -> CredentialKind {
        self.kind
    }

    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    pub fn is_credential_set(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn set_credential(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    /// Sends one request and shapes the response.
    ///
    /// Decoding rules, first match wins:
    /// 1. `with_pagination`: JSON body plus `Link` cursors.
    /// 2. DELETE, `204`, or no `content-type`: `Success(status is 2xx)`.
    /// 3. `Accept` absent or `application/json`: JSON body.
    /// 4. `as_stream`: chunk stream.
    /// 5. Otherwise the raw body bytes.
    ///
    /// Non-2xx responses are [`BuildkiteError::Http`] except in rule 2.
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse> {
        let ApiRequest {
            method,
            url,
            query,
            body,
            headers,
            with_pagination,
            as_stream,
        } = request;

        let headers = self.prepare_headers(headers.unwrap_or_default())?;
        let wants_json = headers
            .get(header::ACCEPT)
            .map_or(true, |accept| accept == "application/json");

        let mut query = query.unwrap_or_default().clean();
        query.insert("per_page", PER_PAGE);
        let url = build_url(&url, &query)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(method = %method, url = %url, "sending buildkite request");

        let mut builder = self.http.request(method.clone(), url).headers(headers);
        if let Some(timeout_ms) = self.options.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        if let Some(body) = body {
            builder = builder.json(&body.clean());
        }

        let response = builder.send().await.map_err(BuildkiteError::Transport)?;
        let status = response.status();

        #[cfg(feature = "tracing")]
        tracing::debug!(status = status.as_u16(), "received buildkite response");

        if with_pagination {
            let response = ensure_success(response).await?;
            let link = link_header(response.headers());
            let body = read_json(response).await?;
            return Paginated::from_link_header(body, link.as_deref()).map(ApiResponse::Paginated);
        }

        if method == Method::DELETE
            || status == StatusCode::NO_CONTENT
            || !response.headers().contains_key(header::CONTENT_TYPE)
        {
            return Ok(ApiResponse::Success(status.is_success()));
        }

        let response = ensure_success(response).await?;
        if wants_json {
            read_json(response).await.map(ApiResponse::Json)
        } else if as_stream {
            Ok(ApiResponse::Stream(ByteStream::new(response)))
        } else {
            response
                .bytes()
                .await
                .map(ApiResponse::Bytes)
                .map_err(BuildkiteError::Transport)
        }
    }

    pub async fn get(
        &self,
        url: &str,
        query: Option<QueryParams>,
        headers: Option<HeaderMap>,
        with_pagination: bool,
        as_stream: bool,
    ) -> Result<ApiResponse> {
        self.request(
            ApiRequest::new(Method::GET, url)
                .query(query)
                .headers(headers)
                .with_pagination(with_pagination)
                .as_stream(as_stream),
        )
        .await
    }

    pub async fn post(
        &self,
        url: &str,
        body: Option<Body>,
        headers: Option<HeaderMap>,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse> {
        self.send_mutation(Method::POST, url, body, headers, query)
            .await
    }

    pub async fn put(
        &self,
        url: &str,
        body: Option<Body>,
        headers: Option<HeaderMap>,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse> {
        self.send_mutation(Method::PUT, url, body, headers, query)
            .await
    }

    pub async fn patch(
        &self,
        url: &str,
        body: Option<Body>,
        headers: Option<HeaderMap>,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse> {
        self.send_mutation(Method::PATCH, url, body, headers, query)
            .await
    }

    pub async fn delete(
        &self,
        url: &str,
        body: Option<Body>,
        headers: Option<HeaderMap>,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse> {
        self.send_mutation(Method::DELETE, url, body, headers, query)
            .await
    }

    async fn send_mutation(
        &self,
        method: Method,
        url: &str,
        body: Option<Body>,
        headers: Option<HeaderMap>,
        query: Option<QueryParams>,
    ) -> Result<ApiResponse> {
        self.request(
            ApiRequest::new(method, url)
                .query(query)
                .body(body)
                .headers(headers),
        )
        .await
    }

    /// Adds the user agent (unless the caller set one) and the
    /// `Authorization` header when a credential is set.
    fn prepare_headers(&self, mut headers: HeaderMap) -> Result<HeaderMap> {
        if !headers.contains_key(header::USER_AGENT) {
            let user_agent = HeaderValue::from_str(&self.options.user_agent).map_err(|err| {
                BuildkiteError::InvalidArgument(format!("invalid user agent: {err}"))
            })?;
            headers.insert(header::USER_AGENT, user_agent);
        }
        if let Some(authorization) = self.authorization()? {
            headers.insert(header::AUTHORIZATION, authorization);
        }
        Ok(headers)
    }

    fn authorization(&self) -> Result<Option<HeaderValue>> {
        if !self.is_credential_set() {
            return Ok(None);
        }
        let mut value = HeaderValue::from_str(&format!("{} {}", self.kind.scheme(), self.token))
            .map_err(|_| {
                BuildkiteError::InvalidArgument("token contains invalid header characters".to_owned())
            })?;
        value.set_sensitive(true);
        Ok(Some(value))
    }
}

/// Appends the rendered query to `url` as its raw query string.
fn build_url(url: &str, query: &QueryParams) -> Result<Url> {
    let rendered = query.render();
    let full = if rendered.is_empty() {
        url.to_owned()
    } else if url.contains('?') {
        format!("{url}&{rendered}")
    } else {
        format!("{url}?{rendered}")
    };
    Url::parse(&full)
        .map_err(|err| BuildkiteError::InvalidArgument(format!("invalid url '{full}': {err}")))
}

/// Joins every `Link` header value; servers may split cursors across lines.
fn link_header(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(header::LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    (!values.is_empty()).then(|| values.join(", "))
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    // A body that fails to read still reports the status, with an empty body.
    let body = response.text().await.unwrap_or_default();
    Err(BuildkiteError::Http {
        status: status.as_u16(),
        body,
    })
}

async fn read_json(response: Response) -> Result<Value> {
    let body = response.text().await.map_err(BuildkiteError::Transport)?;
    serde_json::from_str(&body)
        .map_err(|err| BuildkiteError::Decode(format!("invalid JSON response: {err}; body: {body}")))
}
