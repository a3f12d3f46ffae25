use std::fs;

use buildkite_http::{resources::BuildFilter, ApiResponse, Buildkite};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SecretsFile {
    #[serde(rename = "BUILDKITE_API_TOKEN")]
    buildkite_api_token: Option<String>,
    #[serde(rename = "BUILDKITE_ORGANIZATION")]
    buildkite_organization: Option<String>,
}

fn load_live_credentials() -> Result<(String, String), String> {
    if let (Ok(token), Ok(organization)) = (
        std::env::var("BUILDKITE_API_TOKEN"),
        std::env::var("BUILDKITE_ORGANIZATION"),
    ) {
        return Ok((token, organization));
    }

    let content = fs::read_to_string("secrets.json").map_err(|_| {
        "BUILDKITE_API_TOKEN/BUILDKITE_ORGANIZATION env or secrets.json is required".to_owned()
    })?;
    let parsed: SecretsFile = serde_json::from_str(&content)
        .map_err(|err| format!("secrets.json could not be parsed: {err}"))?;

    let token = parsed
        .buildkite_api_token
        .ok_or_else(|| "missing BUILDKITE_API_TOKEN in secrets.json".to_owned())?;
    let organization = parsed
        .buildkite_organization
        .ok_or_else(|| "missing BUILDKITE_ORGANIZATION in secrets.json".to_owned())?;

    Ok((token, organization))
}

#[tokio::test]
async fn live_read_only_walkthrough() {
    let (token, organization) = match load_live_credentials() {
        Ok(values) => values,
        Err(_) => {
            eprintln!("skipping live test: credentials not found in env or secrets.json");
            return;
        }
    };

    let mut buildkite = Buildkite::default();
    buildkite.set_access_token(token);

    let token_info = buildkite
        .access_tokens()
        .expect("token is set")
        .get_token()
        .await
        .expect("access token lookup must succeed");
    assert!(matches!(token_info, ApiResponse::Json(_)));

    let org = buildkite
        .organizations()
        .expect("token is set")
        .get_org(&organization)
        .await
        .expect("organization lookup must succeed")
        .into_json()
        .expect("organization must be JSON");
    assert_eq!(org["slug"], organization.as_str());

    let pipelines = buildkite
        .pipelines()
        .expect("token is set")
        .list_pipelines(&organization, 1, true)
        .await
        .expect("pipeline listing must succeed")
        .into_paginated()
        .expect("listing must be paginated");
    assert!(pipelines.body.is_array());

    let builds = buildkite
        .builds()
        .expect("token is set")
        .list_all_for_org(&organization, &BuildFilter::default(), false)
        .await
        .expect("build listing must succeed");
    assert!(matches!(builds, ApiResponse::Json(_)));
}
