use serde_json::{json, Map, Value};

use crate::resources::PathTemplate;
use crate::{ApiResponse, Body, BuildkiteError, QueryParams, Result, Transport};

/// Fields accepted when updating a pipeline. Unset fields are left alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PipelineUpdate {
    pub branch_configuration: Option<String>,
    pub cancel_running_branch_builds: Option<bool>,
    pub cancel_running_branch_builds_filter: Option<String>,
    pub default_branch: Option<String>,
    pub description: Option<String>,
    pub env: Option<Map<String, Value>>,
    pub name: Option<String>,
    pub provider_settings: Option<Map<String, Value>>,
    pub repository: Option<String>,
    /// YAML steps. Mutually exclusive with `steps`.
    pub configuration: Option<String>,
    /// Web visual steps. Mutually exclusive with `configuration`.
    pub steps: Option<Vec<Value>>,
    pub skip_queued_branch_builds: Option<bool>,
    pub skip_queued_branch_builds_filter: Option<String>,
    pub visibility: Option<String>,
}

impl PipelineUpdate {
    fn into_body(self) -> Result<Body> {
        if self.configuration.is_some() && self.steps.is_some() {
            return Err(BuildkiteError::InvalidArgument(
                "cannot set both `configuration` and `steps`; use `configuration` for YAML steps"
                    .to_owned(),
            ));
        }
        Ok(Body::new()
            .with("branch_configuration", self.branch_configuration)
            .with(
                "cancel_running_branch_builds",
                self.cancel_running_branch_builds,
            )
            .with(
                "cancel_running_branch_builds_filter",
                self.cancel_running_branch_builds_filter,
            )
            .with("default_branch", self.default_branch)
            .with("description", self.description)
            .with("env", self.env.map(Value::Object))
            .with("name", self.name)
            .with(
                "provider_settings",
                self.provider_settings.map(Value::Object),
            )
            .with("repository", self.repository)
            .with("configuration", self.configuration)
            .with("steps", self.steps)
            .with("skip_queued_branch_builds", self.skip_queued_branch_builds)
            .with(
                "skip_queued_branch_builds_filter",
                self.skip_queued_branch_builds_filter,
            )
            .with("visibility", self.visibility))
    }
}

/// The single step used when a pipeline is created without explicit steps:
/// upload the pipeline definition from the repository.
fn default_steps() -> Vec<Value> {
    vec![json!({
        "type": "script",
        "name": ":pipeline:",
        "command": "buildkite-agent pipeline upload",
    })]
}

/// Pipeline operations.
#[derive(Debug)]
pub struct Pipelines<'a> {
    client: &'a Transport,
    path: PathTemplate,
}

impl<'a> Pipelines<'a> {
    pub fn new(client: &'a Transport, base_url: &str) -> Self {
        Self {
            client,
            path: PathTemplate::new(base_url, "organizations/{}/pipelines"),
        }
    }

    pub async fn list_pipelines(
        &self,
        organization: &str,
        page: u32,
        with_pagination: bool,
    ) -> Result<ApiResponse> {
        let query = QueryParams::new().with("page", page);
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

    pub async fn get_pipeline(&self, organization: &str, pipeline: &str) -> Result<ApiResponse> {
        self.client
            .get(&self.pipeline_url(organization, pipeline), None, None, false, false)
            .await
    }

    /// Creates a pipeline defined with web visual steps.
    ///
    /// `None` steps installs a single `buildkite-agent pipeline upload` step.
    pub async fn create_pipeline(
        &self,
        organization: &str,
        name: &str,
        repository: &str,
        steps: Option<Vec<Value>>,
        team_uuids: Option<Vec<String>>,
    ) -> Result<ApiResponse> {
        let body = Body::new()
            .with("name", name)
            .with("repository", repository)
            .with("steps", steps.unwrap_or_else(default_steps))
            .with("team_uuids", team_uuids);
        self.client
            .post(&self.path.fill(&[organization]), Some(body), None, None)
            .await
    }

    /// Creates a pipeline whose steps are a YAML `configuration`.
    pub async fn create_yaml_pipeline(
        &self,
        organization: &str,
        name: &str,
        repository: &str,
        configuration: &str,
        team_uuids: Option<Vec<String>>,
    ) -> Result<ApiResponse> {
        let body = Body::new()
            .with("name", name)
            .with("repository", repository)
            .with("configuration", configuration)
            .with("team_uuids", team_uuids);
        self.client
            .post(&self.path.fill(&[organization]), Some(body), None, None)
            .await
    }

    /// Patches a pipeline.
    ///
    /// Fails with [`BuildkiteError::InvalidArgument`] before sending when both
    /// `configuration` and `steps` are set.
    pub async fn update_pipeline(
        &self,
        organization: &str,
        pipeline: &str,
        update: PipelineUpdate,
    ) -> Result<ApiResponse> {
        let body = update.into_body()?;
        self.client
            .patch(&self.pipeline_url(organization, pipeline), Some(body), None, None)
            .await
    }

    pub async fn delete_pipeline(&self, organization: &str, pipeline: &str) -> Result<ApiResponse> {
        self.client
            .delete(&self.pipeline_url(organization, pipeline), None, None, None)
            .await
    }

    fn pipeline_url(&self, organization: &str, pipeline: &str) -> String {
        format!("{}/{pipeline}", self.path.fill(&[organization]))
    }
}
