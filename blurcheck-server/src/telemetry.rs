use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence; otherwise the level follows the CLI flags.
/// `log` records from the core crate are forwarded through `tracing-log`.
pub fn setup_logging(verbose: bool, quiet: bool) -> Result<()> {
    if quiet {
        return Ok(());
    }

    let default_directives = if verbose {
        "info,blurcheck=debug,blurcheck_server=debug,tower_http=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter);

    tracing_log::LogTracer::init().context("Failed to forward `log` records to `tracing`")?;
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set a `tracing` global subscriber")?;

    Ok(())
}
