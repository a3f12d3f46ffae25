use crate::resources::PathTemplate;
use crate::{ApiResponse, Result, Transport};

/// User operations.
#[derive(Debug)]
pub struct Users<'a> {
    client: &'a Transport,
    path: PathTemplate,
}

impl<'a> Users<'a> {
    pub fn new(client: &'a Transport, base_url: &str) -> Self {
        Self {
            client,
            path: PathTemplate::new(base_url, "user"),
        }
    }

    /// Returns the user that owns the access token.
    pub async fn get_current_user(&self) -> Result<ApiResponse> {
        self.client
            .get(self.path.as_str(), None, None, false, false)
            .await
    }
}
