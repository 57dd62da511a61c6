//! Scroll a source index and bulk-write every hit into a target index.

use tracing::{error, info};

use search_helpers::{telemetry, Dependencies, ReindexError, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    info!("Starting search reindex");

    let settings = Settings::from_env()?;
    let dependencies = Dependencies::new(settings)?;
    let mut reindexer = dependencies.reindexer();

    let outcome = tokio::select! {
        result = reindexer.run() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
            Err(ReindexError::Cancelled)
        }
    };

    if matches!(outcome, Err(ReindexError::Cancelled)) {
        if let Err(e) = reindexer.release().await {
            error!(error = %e, "Failed to release scroll context");
        }
    }

    match outcome {
        Ok(summary) => {
            info!(
                copied = summary.copied,
                skipped = summary.skipped,
                "Search reindex finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Search reindex failed");
            Err(e.into())
        }
    }
}
