use crate::resources::PathTemplate;
use crate::{ApiResponse, Result, Transport};

/// Meta information about Buildkite itself, such as webhook source IPs.
#[derive(Debug)]
pub struct Meta<'a> {
    client: &'a Transport,
    path: PathTemplate,
}

impl<'a> Meta<'a> {
    pub fn new(client: &'a Transport, base_url: &str) -> Self {
        Self {
            client,
            path: PathTemplate::new(base_url, "meta"),
        }
    }

    pub async fn get_meta_information(&self) -> Result<ApiResponse> {
        self.client
            .get(self.path.as_str(), None, None, false, false)
            .await
    }
}
