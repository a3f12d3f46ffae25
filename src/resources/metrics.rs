use crate::resources::PathTemplate;
use crate::{ApiResponse, Result, Transport};

/// Agent API metrics: queue and job counts for the agent token's
/// organization.
#[derive(Debug)]
pub struct Metrics<'a> {
    client: &'a Transport,
    path: PathTemplate,
}

impl<'a> Metrics<'a> {
    pub fn new(client: &'a Transport, base_url: &str) -> Self {
        Self {
            client,
            path: PathTemplate::new(base_url, "metrics"),
        }
    }

    pub async fn get_metrics(&self) -> Result<ApiResponse> {
        self.client
            .get(self.path.as_str(), None, None, false, false)
            .await
    }
}
