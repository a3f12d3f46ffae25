use crate::resources::PathTemplate;
use crate::{ApiResponse, Result, Transport};

#[derive(Debug)]
pub struct Emojis<'a> {
    client: &'a Transport,
    path: PathTemplate,
}

impl<'a> Emojis<'a> {
    pub fn new(client: &'a Transport, base_url: &str) -> Self {
        Self {
            client,
            path: PathTemplate::new(base_url, "organizations/{}/emojis"),
        }
    }

    pub async fn list_emojis(&self, organization: &str) -> Result<ApiResponse> {
        self.client
            .get(&self.path.fill(&[organization]), None, None, false, false)
            .await
    }
}
