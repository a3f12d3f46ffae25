use buildkite_http::resources::{BuildFilter, BuildState};
use buildkite_http::{ApiResponse, Buildkite};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let organization = std::env::var("BUILDKITE_ORGANIZATION")?;
    let buildkite = Buildkite::from_env().map_err(anyhow::Error::msg)?;

    let filter = BuildFilter {
        states: vec![BuildState::Running, BuildState::Scheduled],
        ..BuildFilter::default()
    };

    let mut page = 1;
    loop {
        let page_filter = BuildFilter {
            page: Some(page),
            ..filter.clone()
        };
        let response = buildkite
            .builds()?
            .list_all_for_org(&organization, &page_filter, true)
            .await?;
        let ApiResponse::Paginated(paginated) = response else {
            anyhow::bail!("expected a paginated response");
        };

        for build in paginated.body.as_array().into_iter().flatten() {
            println!(
                "{} #{} {}",
                build["pipeline"]["slug"].as_str().unwrap_or("?"),
                build["number"],
                build["state"].as_str().unwrap_or("?")
            );
        }

        match paginated.next_page {
            Some(next) => page = next as u32,
            None => break,
        }
    }

    Ok(())
}
