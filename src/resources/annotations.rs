use crate::resources::PathTemplate;
use crate::{ApiResponse, Result, Transport};

#[derive(Debug)]
pub struct Annotations<'a> {
    client: &'a Transport,
    path: PathTemplate,
}

impl<'a> Annotations<'a> {
    pub fn new(client: &'a Transport, base_url: &str) -> Self {
        Self {
            client,
            path: PathTemplate::new(
                base_url,
                "organizations/{}/pipelines/{}/builds/{}/annotations",
            ),
        }
    }

    /// Lists the annotations attached to a build.
    pub async fn list_annotations(
        &self,
        organization: &str,
        pipeline: &str,
        build: u64,
    ) -> Result<ApiResponse> {
        let url = self
            .path
            .fill(&[organization, pipeline, &build.to_string()]);
        self.client.get(&url, None, None, false, false).await
    }
}
