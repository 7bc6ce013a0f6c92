use anyhow::Result;
use tracing::info;

use locale_datagen::build::BuildContext;
use locale_datagen::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when the variables come from the environment)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_datagen=info".parse()?),
        )
        .init();

    info!("Starting locale data build");

    // Load configuration from environment
    let config = Config::from_env();

    // Step 1: Validate and load all inputs (fatal on any bad input)
    let context = BuildContext::from_config(&config)?;

    // Step 2: Fetch, dedup, and emit
    let summary = context.run().await;

    if !summary.succeeded() {
        anyhow::bail!(
            "build finished with {} failed artifact writes",
            summary.failed_writes
        );
    }

    info!(
        "Build complete: {} locales emitted, {} artifacts written",
        summary.locales_emitted, summary.artifacts_written
    );
    Ok(())
}
