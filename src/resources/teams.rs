use crate::resources::PathTemplate;
use crate::{ApiResponse, QueryParams, Result, Transport};

/// Team operations.
#[derive(Debug)]
pub struct Teams<'a> {
    client: &'a Transport,
    path: PathTemplate,
}

impl<'a> Teams<'a> {
    pub fn new(client: &'a Transport, base_url: &str) -> Self {
        Self {
            client,
            path: PathTemplate::new(base_url, "organizations/{}/teams"),
        }
    }

    /// Lists the organization's teams, optionally only those `user_id`
    /// belongs to.
    pub async fn list_teams(
        &self,
        organization: &str,
        user_id: Option<&str>,
        page: u32,
        with_pagination: bool,
    ) -> Result<ApiResponse> {
        let query = QueryParams::new()
            .with("page", page)
            .with_opt("user_id", user_id);
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
}
