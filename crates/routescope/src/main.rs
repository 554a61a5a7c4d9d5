//! Routescope CLI binary.

use anyhow::Result;
use routescope::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the routescope CLI.
///
/// Uses tokio's `current_thread` runtime; the only I/O is reading the config
/// and graph files once.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // RUST_LOG wins over --log-level / ROUTESCOPE_LOG.
    // Example: RUST_LOG=routescope=debug routescope paths -s A -e B
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&cli.log_level))
                .unwrap_or_else(|_| EnvFilter::new(routescope::cli::DEFAULT_LOG_LEVEL)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting routescope CLI");

    cli.execute().await?;

    tracing::debug!("Routescope CLI completed successfully");
    Ok(())
}
