use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use crate::resources::PathTemplate;
use crate::{ApiResponse, Body, BuildkiteError, QueryParams, QueryValue, Result, Transport};

/// Build states accepted by the `state` filter.
///
/// `Finished` is a server-side shortcut for passed, failed, blocked and
/// canceled builds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BuildState {
    Running,
    Scheduled,
    Passed,
    Failed,
    Blocked,
    Canceled,
    Canceling,
    Skipped,
    NotRun,
    Finished,
}

impl BuildState {
    pub const ALL: [BuildState; 10] = [
        Self::Running,
        Self::Scheduled,
        Self::Passed,
        Self::Failed,
        Self::Blocked,
        Self::Canceled,
        Self::Canceling,
        Self::Skipped,
        Self::NotRun,
        Self::Finished,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Scheduled => "scheduled",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Blocked => "blocked",
            Self::Canceled => "canceled",
            Self::Canceling => "canceling",
            Self::Skipped => "skipped",
            Self::NotRun => "not_run",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BuildState {
    type Err = BuildkiteError;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == value)
            .ok_or_else(|| BuildkiteError::InvalidArgument(format!("unknown build state '{value}'")))
    }
}

/// Filters shared by the build list endpoints. Unset filters are not sent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildFilter {
    /// User ID of the build creator.
    pub creator: Option<String>,
    /// Builds created on or after this date.
    pub created_from: Option<NaiveDate>,
    /// Builds created before this date.
    pub created_to: Option<NaiveDate>,
    /// Builds finished on or after this date.
    pub finished_from: Option<NaiveDate>,
    pub states: Vec<BuildState>,
    /// Sent as `meta_data[key]=value`.
    pub meta_data: BTreeMap<String, String>,
    pub branches: Vec<String>,
    /// Full commit SHA; short SHAs do not match.
    pub commit: Option<String>,
    pub page: Option<u32>,
}

impl BuildFilter {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with_opt("creator", self.creator.as_ref())
            .with_opt("created_from", self.created_from)
            .with_opt("created_to", self.created_to)
            .with_opt("finished_from", self.finished_from)
            .with_opt(
                "state",
                QueryValue::repeated("state", self.states.iter().map(|state| state.as_str())),
            );
        for (key, value) in &self.meta_data {
            query.insert(format!("meta_data[{key}]"), value);
        }
        query
            .with_opt("branch", QueryValue::repeated("branch", &self.branches))
            .with_opt("commit", self.commit.as_ref())
            .with_opt("page", self.page)
    }
}

/// Parameters of a new build.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateBuild {
    pub commit: String,
    pub branch: String,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub clean_checkout: Option<bool>,
    pub env: Option<Map<String, Value>>,
    pub ignore_pipeline_branch_filters: Option<bool>,
    pub message: Option<String>,
    pub meta_data: Option<Map<String, Value>>,
    pub pull_request_base_branch: Option<String>,
    pub pull_request_id: Option<u64>,
    pub pull_request_repository: Option<String>,
}

impl CreateBuild {
    pub fn new(commit: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            commit: commit.into(),
            branch: branch.into(),
            ..Self::default()
        }
    }

    fn into_body(self) -> Body {
        let author = match (self.author_name, self.author_email) {
            (None, None) => None,
            (name, email) => Some(json!({ "name": name, "email": email })),
        };
        Body::new()
            .with("commit", self.commit)
            .with("branch", self.branch)
            .with("author", author)
            .with("clean_checkout", self.clean_checkout)
            .with("env", self.env.map(Value::Object))
            .with(
                "ignore_pipeline_branch_filters",
                self.ignore_pipeline_branch_filters,
            )
            .with("message", self.message)
            .with("meta_data", self.meta_data.map(Value::Object))
            .with("pull_request_base_branch", self.pull_request_base_branch)
            .with("pull_request_id", self.pull_request_id)
            .with("pull_request_repository", self.pull_request_repository)
    }
}

/// Build operations.
#[derive(Debug)]
pub struct Builds<'a> {
    client: &'a Transport,
    all_path: PathTemplate,
    org_path: PathTemplate,
    pipeline_path: PathTemplate,
}

impl<'a> Builds<'a> {
    pub fn new(client: &'a Transport, base_url: &str) -> Self {
        Self {
            client,
            all_path: PathTemplate::new(base_url, "builds"),
            org_path: PathTemplate::new(base_url, "organizations/{}/builds"),
            pipeline_path: PathTemplate::new(base_url, "organizations/{}/pipelines/{}/builds"),
        }
    }

    /// Lists builds across every organization the token can access, newest
    /// first.
    pub async fn list_all(&self, filter: &BuildFilter, with_pagination: bool) -> Result<ApiResponse> {
        self.list(self.all_path.as_str(), filter, with_pagination)
            .await
    }

    /// Lists an organization's builds across all of its pipelines.
    pub async fn list_all_for_org(
        &self,
        organization: &str,
        filter: &BuildFilter,
        with_pagination: bool,
    ) -> Result<ApiResponse> {
        self.list(&self.org_path.fill(&[organization]), filter, with_pagination)
            .await
    }

    /// Lists a pipeline's builds.
    pub async fn list_all_for_pipeline(
        &self,
        organization: &str,
        pipeline: &str,
        filter: &BuildFilter,
        with_pagination: bool,
    ) -> Result<ApiResponse> {
        let url = self.pipeline_path.fill(&[organization, pipeline]);
        self.list(&url, filter, with_pagination).await
    }

    pub async fn get_build_by_number(
        &self,
        organization: &str,
        pipeline: &str,
        build_number: u64,
    ) -> Result<ApiResponse> {
        let url = self.build_url(organization, pipeline, build_number);
        self.client.get(&url, None, None, false, false).await
    }

    pub async fn create_build(
        &self,
        organization: &str,
        pipeline: &str,
        build: CreateBuild,
    ) -> Result<ApiResponse> {
        let url = self.pipeline_path.fill(&[organization, pipeline]);
        self.client
            .post(&url, Some(build.into_body()), None, None)
            .await
    }

    /// Cancels a scheduled or running build.
    pub async fn cancel_build(
        &self,
        organization: &str,
        pipeline: &str,
        build_number: u64,
    ) -> Result<ApiResponse> {
        let url = format!(
            "{}/cancel",
            self.build_url(organization, pipeline, build_number)
        );
        self.client.put(&url, None, None, None).await
    }

    /// Starts a new build from the same commit, branch and settings.
    pub async fn rebuild_build(
        &self,
        organization: &str,
        pipeline: &str,
        build_number: u64,
    ) -> Result<ApiResponse> {
        let url = format!(
            "{}/rebuild",
            self.build_url(organization, pipeline, build_number)
        );
        self.client.put(&url, None, None, None).await
    }

    async fn list(&self, url: &str, filter: &BuildFilter, with_pagination: bool) -> Result<ApiResponse> {
        self.client
            .get(url, Some(filter.to_query()), None, with_pagination, false)
            .await
    }

    fn build_url(&self, organization: &str, pipeline: &str, build_number: u64) -> String {
        format!(
            "{}/{build_number}",
            self.pipeline_path.fill(&[organization, pipeline])
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use serde_json::json;

    use super::{BuildFilter, BuildState, CreateBuild};
    use crate::{BuildkiteError, QueryValue};

    #[test]
    fn single_state_renders_plain_key() {
        let filter = BuildFilter {
            states: vec![BuildState::Running],
            ..BuildFilter::default()
        };
        assert_eq!(filter.to_query().render(), "state=running");
    }

    #[test]
    fn multiple_states_render_bracket_syntax_in_order() {
        let filter = BuildFilter {
            states: vec![BuildState::Running, BuildState::Finished],
            ..BuildFilter::default()
        };
        assert_eq!(
            filter.to_query().render(),
            "state[]=running&state[]=finished"
        );
    }

    #[test]
    fn empty_filter_sends_nothing() {
        assert_eq!(BuildFilter::default().to_query().clean().len(), 0);
    }

    #[test]
    fn meta_data_uses_bracketed_keys() {
        let filter = BuildFilter {
            meta_data: BTreeMap::from([
                ("key1".to_owned(), "1".to_owned()),
                ("key2".to_owned(), "2".to_owned()),
            ]),
            ..BuildFilter::default()
        };
        let query = filter.to_query();
        assert_eq!(query.get("meta_data[key1]"), Some(&QueryValue::text("1")));
        assert_eq!(query.get("meta_data[key2]"), Some(&QueryValue::text("2")));
    }

    #[test]
    fn full_filter_renders_in_declared_order() {
        let filter = BuildFilter {
            creator: Some("user-1".to_owned()),
            created_from: NaiveDate::from_ymd_opt(2024, 1, 2),
            finished_from: NaiveDate::from_ymd_opt(2024, 2, 3),
            states: vec![BuildState::Passed],
            branches: vec!["main".to_owned(), "release".to_owned()],
            commit: Some("abc123".to_owned()),
            page: Some(2),
            ..BuildFilter::default()
        };
        assert_eq!(
            filter.to_query().render(),
            "creator=user-1&created_from=2024-01-02&finished_from=2024-02-03&state=passed&branch[]=main&branch[]=release&commit=abc123&page=2"
        );
    }

    #[test]
    fn build_state_round_trips_through_strings() {
        for state in BuildState::ALL {
            assert_eq!(state.as_str().parse::<BuildState>().expect("known"), state);
        }
        assert_eq!(BuildState::NotRun.to_string(), "not_run");
        let err = "exploded".parse::<BuildState>().expect_err("unknown");
        assert!(matches!(err, BuildkiteError::InvalidArgument(_)));
    }

    #[test]
    fn create_build_body_drops_unset_fields() {
        let build = CreateBuild {
            message: Some("Deploy".to_owned()),
            author_name: Some("Kit".to_owned()),
            ..CreateBuild::new("HEAD", "main")
        };
        let body = build.into_body().clean();
        assert_eq!(
            serde_json::to_value(&body).expect("must serialize"),
            json!({
                "commit": "HEAD",
                "branch": "main",
                "author": {"name": "Kit", "email": null},
                "message": "Deploy"
            })
        );
    }
}
