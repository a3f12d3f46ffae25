use std::fmt;

use bytes::{Bytes, BytesMut};
use serde_json::Value;

use crate::{BuildkiteError, Paginated, Result};

/// Result of a single API call, shaped by the request and the response
/// headers.
#[derive(Debug)]
pub enum ApiResponse {
    /// Parsed JSON body.
    Json(Value),
    /// Success flag for DELETE calls, `204 No Content` and bodies without a
    /// `content-type`.
    Success(bool),
    /// Raw body for non-JSON `Accept` headers.
    Bytes(Bytes),
    /// Raw body pulled chunk by chunk from the open connection.
    Stream(ByteStream),
    /// JSON body with page cursors from the `Link` header.
    Paginated(Paginated),
}

impl ApiResponse {
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Paginated(paginated) => Some(paginated.body),
            _ => None,
        }
    }

    pub fn into_paginated(self) -> Option<Paginated> {
        match self {
            Self::Paginated(paginated) => Some(paginated),
            _ => None,
        }
    }

    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn into_stream(self) -> Option<ByteStream> {
        match self {
            Self::Stream(stream) => Some(stream),
            _ => None,
        }
    }

    pub fn as_success(&self) -> Option<bool> {
        match self {
            Self::Success(ok) => Some(*ok),
            _ => None,
        }
    }
}

/// Lazy sequence of raw body chunks.
///
/// Chunk boundaries are whatever the connection delivers. The sequence is
/// consumed once; reading it again means sending the request again.
pub struct ByteStream {
    response: reqwest::Response,
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStream")
            .field("url", &self.response.url().as_str())
            .field("status", &self.response.status().as_u16())
            .finish()
    }
}

impl ByteStream {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self { response }
    }

    /// Returns the next chunk, or `None` once the body is exhausted.
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        self.response
            .chunk()
            .await
            .map_err(BuildkiteError::Transport)
    }

    /// Drains the remaining chunks into one buffer.
    pub async fn collect(mut self) -> Result<Bytes> {
        let mut buffer = BytesMut::new();
        while let Some(chunk) = self.next_chunk().await? {
            buffer.extend_from_slice(&chunk);
        }
        Ok(buffer.freeze())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{ApiResponse, Paginated};

    #[test]
    fn into_json_unwraps_paginated_body() {
        let response = ApiResponse::Paginated(Paginated::new(json!([1, 2])));
        assert_eq!(response.into_json(), Some(json!([1, 2])));
    }

    #[test]
    fn accessors_reject_other_shapes() {
        let response = ApiResponse::Success(true);
        assert_eq!(response.as_success(), Some(true));
        assert!(response.into_bytes().is_none());
        assert!(ApiResponse::Json(json!({})).into_paginated().is_none());
    }
}
