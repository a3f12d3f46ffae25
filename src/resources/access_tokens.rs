use crate::resources::PathTemplate;
use crate::{ApiResponse, Result, Transport};

/// Operations on the access token used for the request itself.
#[derive(Debug)]
pub struct AccessTokens<'a> {
    client: &'a Transport,
    path: PathTemplate,
}

impl<'a> AccessTokens<'a> {
    pub fn new(client: &'a Transport, base_url: &str) -> Self {
        Self {
            client,
            path: PathTemplate::new(base_url, "access-token"),
        }
    }

    /// Returns the token's UUID and scopes.
    pub async fn get_token(&self) -> Result<ApiResponse> {
        self.client
            .get(self.path.as_str(), None, None, false, false)
            .await
    }

    /// Revokes the token. Resolves to [`ApiResponse::Success`].
    pub async fn revoke_token(&self) -> Result<ApiResponse> {
        self.client
            .delete(self.path.as_str(), None, None, None)
            .await
    }
}
