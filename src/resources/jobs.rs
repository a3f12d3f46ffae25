use std::fmt;

use serde_json::{Map, Value};

use crate::resources::{accept, PathTemplate};
use crate::{ApiResponse, Body, Result, Transport};

/// MIME type a job log is requested in.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    Text,
    #[default]
    Html,
    /// Any other `Accept` value, sent as given.
    Custom(String),
}

impl LogFormat {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text/plain",
            Self::Html => "text/html",
            Self::Custom(mime) => mime,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for LogFormat {
    fn from(value: &str) -> Self {
        match value {
            "text/plain" => Self::Text,
            "text/html" => Self::Html,
            other => Self::Custom(other.to_owned()),
        }
    }
}

/// Job operations.
#[derive(Debug)]
pub struct Jobs<'a> {
    client: &'a Transport,
    path: PathTemplate,
}

impl<'a> Jobs<'a> {
    pub fn new(client: &'a Transport, base_url: &str) -> Self {
        Self {
            client,
            path: PathTemplate::new(base_url, "organizations/{}/pipelines/{}/builds/{}/jobs/{}"),
        }
    }

    /// Fetches a job's log output in `log_format`.
    ///
    /// Any format other than JSON comes back as [`ApiResponse::Bytes`].
    pub async fn get_job_log(
        &self,
        organization: &str,
        pipeline: &str,
        build: u64,
        job: &str,
        log_format: LogFormat,
    ) -> Result<ApiResponse> {
        let url = self.job_url(organization, pipeline, build, job, "log");
        let headers = accept(log_format.as_str())?;
        self.client
            .get(&url, None, Some(headers), false, false)
            .await
    }

    pub async fn get_job_environment_variables(
        &self,
        organization: &str,
        pipeline: &str,
        build: u64,
        job: &str,
    ) -> Result<ApiResponse> {
        let url = self.job_url(organization, pipeline, build, job, "env");
        self.client.get(&url, None, None, false, false).await
    }

    /// Retries a failed or timed out job.
    pub async fn retry_job(
        &self,
        organization: &str,
        pipeline: &str,
        build: u64,
        job: &str,
    ) -> Result<ApiResponse> {
        let url = self.job_url(organization, pipeline, build, job, "retry");
        self.client.put(&url, None, None, None).await
    }

    /// Unblocks a block step, submitting `fields` for its form when given.
    pub async fn unblock_job(
        &self,
        organization: &str,
        pipeline: &str,
        build: u64,
        job: &str,
        fields: Option<Map<String, Value>>,
    ) -> Result<ApiResponse> {
        let url = self.job_url(organization, pipeline, build, job, "unblock");
        let body = Body::new().with("fields", fields.map(Value::Object));
        self.client.put(&url, Some(body), None, None).await
    }

    fn job_url(
        &self,
        organization: &str,
        pipeline: &str,
        build: u64,
        job: &str,
        action: &str,
    ) -> String {
        format!(
            "{}/{action}",
            self.path
                .fill(&[organization, pipeline, &build.to_string(), job])
        )
    }
}

#[cfg(test)]
mod tests {
    use super::LogFormat;

    #[test]
    fn log_format_renders_mime_type() {
        assert_eq!(LogFormat::default().to_string(), "text/html");
        assert_eq!(LogFormat::Text.to_string(), "text/plain");
        assert_eq!(LogFormat::Custom("some/thing".to_owned()).as_str(), "some/thing");
    }

    #[test]
    fn log_format_parses_known_types() {
        assert_eq!(LogFormat::from("text/plain"), LogFormat::Text);
        assert_eq!(LogFormat::from("text/html"), LogFormat::Html);
        assert_eq!(
            LogFormat::from("application/x-ansi"),
            LogFormat::Custom("application/x-ansi".to_owned())
        );
    }
}
