use std::io::Write;

use buildkite_http::Buildkite;

/// Usage: download_artifact <org> <pipeline> <build> <job> <artifact> <output>
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [org, pipeline, build, job, artifact, output] = args.as_slice() else {
        anyhow::bail!("usage: download_artifact <org> <pipeline> <build> <job> <artifact> <output>");
    };

    let buildkite = Buildkite::from_env().map_err(anyhow::Error::msg)?;
    let mut stream = buildkite
        .artifacts()?
        .download_artifact(org, pipeline, build.parse()?, job, artifact, true)
        .await?
        .into_stream()
        .ok_or_else(|| anyhow::anyhow!("artifact response was not a byte stream"))?;

    let mut file = std::fs::File::create(output)?;
    let mut written = 0usize;
    while let Some(chunk) = stream.next_chunk().await? {
        file.write_all(&chunk)?;
        written += chunk.len();
    }
    println!("wrote {written} bytes to {output}");

    Ok(())
}
