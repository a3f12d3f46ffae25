use crate::resources::PathTemplate;
use crate::{ApiResponse, Result, Transport};

/// Organization operations.
#[derive(Debug)]
pub struct Organizations<'a> {
    client: &'a Transport,
    path: PathTemplate,
}

impl<'a> Organizations<'a> {
    pub fn new(client: &'a Transport, base_url: &str) -> Self {
        Self {
            client,
            path: PathTemplate::new(base_url, "organizations"),
        }
    }

    /// Lists the organizations the token can access.
    pub async fn list_all(&self) -> Result<ApiResponse> {
        self.client
            .get(self.path.as_str(), None, None, false, false)
            .await
    }

    pub async fn get_org(&self, organization: &str) -> Result<ApiResponse> {
        let url = format!("{}/{organization}", self.path.as_str());
        self.client.get(&url, None, None, false, false).await
    }
}
