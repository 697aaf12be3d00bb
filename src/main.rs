use anyhow::Context;
use apodview::ApodConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("apodview=info")),
        )
        .init();

    let config = ApodConfig::from_env().context("failed to load configuration")?;
    apodview::server::serve(config)
        .await
        .context("server exited with an error")?;

    Ok(())
}
