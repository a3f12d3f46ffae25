use crate::resources::PathTemplate;
use crate::{ApiResponse, Body, QueryParams, Result, Transport};

/// Agent operations on the REST API.
#[derive(Debug)]
pub struct Agents<'a> {
    client: &'a Transport,
    path: PathTemplate,
}

impl<'a> Agents<'a> {
    pub fn new(client: &'a Transport, base_url: &str) -> Self {
        Self {
            client,
            path: PathTemplate::new(base_url, "organizations/{}/agents"),
        }
    }

    /// Lists an organization's connected agents.
    ///
    /// `version` must match exactly; `name` and `hostname` filter the same way.
    pub async fn list_all(
        &self,
        organization: &str,
        name: Option<&str>,
        hostname: Option<&str>,
        version: Option<&str>,
        page: u32,
        with_pagination: bool,
    ) -> Result<ApiResponse> {
        let query = QueryParams::new()
            .with_opt("name", name)
            .with_opt("hostname", hostname)
            .with_opt("version", version)
            .with("page", page);
        self.client
            .get(
                &self.path.fill(&[organization]),
                Some(query),
                None,
                with_pagination,
                false,
            )
            .await
    }

    pub async fn get_agent(&self, organization: &str, agent_id: &str) -> Result<ApiResponse> {
        let url = format!("{}/{agent_id}", self.path.fill(&[organization]));
        self.client.get(&url, None, None, false, false).await
    }

    /// Stops an agent. With `force` it abandons a running job.
    pub async fn stop_agent(
        &self,
        organization: &str,
        agent_id: &str,
        force: bool,
    ) -> Result<ApiResponse> {
        let url = format!("{}/{agent_id}/stop", self.path.fill(&[organization]));
        let body = Body::new().with("force", force);
        self.client.put(&url, Some(body), None, None).await
    }
}
