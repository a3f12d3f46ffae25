use crate::resources::{accept, PathTemplate};
use crate::{ApiResponse, QueryParams, Result, Transport};

/// Artifact operations.
#[derive(Debug)]
pub struct Artifacts<'a> {
    client: &'a Transport,
    build_path: PathTemplate,
    job_path: PathTemplate,
}

impl<'a> Artifacts<'a> {
    pub fn new(client: &'a Transport, base_url: &str) -> Self {
        Self {
            client,
            build_path: PathTemplate::new(base_url, "organizations/{}/pipelines/{}/builds/{}"),
            job_path: PathTemplate::new(
                base_url,
                "organizations/{}/pipelines/{}/builds/{}/jobs/{}/artifacts",
            ),
        }
    }

    /// Lists a build's artifacts across all of its jobs.
    pub async fn list_artifacts_for_build(
        &self,
        organization: &str,
        pipeline: &str,
        build: u64,
        page: u32,
        with_pagination: bool,
    ) -> Result<ApiResponse> {
        let url = format!(
            "{}/artifacts",
            self.build_path
                .fill(&[organization, pipeline, &build.to_string()])
        );
        let query = QueryParams::new().with("page", page);
        self.client
            .get(&url, Some(query), None, with_pagination, false)
            .await
    }

    pub async fn list_artifacts_for_job(
        &self,
        organization: &str,
        pipeline: &str,
        build: u64,
        job: &str,
        page: u32,
        with_pagination: bool,
    ) -> Result<ApiResponse> {
        let url = self
            .job_path
            .fill(&[organization, pipeline, &build.to_string(), job]);
        let query = QueryParams::new().with("page", page);
        self.client
            .get(&url, Some(query), None, with_pagination, false)
            .await
    }

    pub async fn get_artifact(
        &self,
        organization: &str,
        pipeline: &str,
        build: u64,
        job: &str,
        artifact: &str,
    ) -> Result<ApiResponse> {
        let url = self.artifact_url(organization, pipeline, build, job, artifact);
        self.client.get(&url, None, None, false, false).await
    }

    /// Downloads an artifact's content.
    ///
    /// Resolves to [`ApiResponse::Bytes`], or [`ApiResponse::Stream`] when
    /// `as_stream` is set.
    pub async fn download_artifact(
        &self,
        organization: &str,
        pipeline: &str,
        build: u64,
        job: &str,
        artifact: &str,
        as_stream: bool,
    ) -> Result<ApiResponse> {
        let url = format!(
            "{}/download",
            self.artifact_url(organization, pipeline, build, job, artifact)
        );
        let headers = accept("application/octet-stream")?;
        self.client
            .get(&url, None, Some(headers), false, as_stream)
            .await
    }

    pub async fn delete_artifact(
        &self,
        organization: &str,
        pipeline: &str,
        build: u64,
        job: &str,
        artifact: &str,
    ) -> Result<ApiResponse> {
        let url = self.artifact_url(organization, pipeline, build, job, artifact);
        self.client.delete(&url, None, None, None).await
    }

    fn artifact_url(
        &self,
        organization: &str,
        pipeline: &str,
        build: u64,
        job: &str,
        artifact: &str,
    ) -> String {
        format!(
            "{}/{artifact}",
            self.job_path
                .fill(&[organization, pipeline, &build.to_string(), job])
        )
    }
}
