use anyhow::{Context, Result};
use clap::Parser;

use blurcheck_server::cli::Args;
use blurcheck_server::telemetry::setup_logging;
use blurcheck_server::{router, serve, shutdown_signal, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose, args.quiet)?;

    let blur = args.blur_config()?;
    let listener = args.bind().await?;
    let address = listener
        .local_addr()
        .context("Listener has no local address")?;

    tracing::info!(
        %address,
        threshold = blur.threshold,
        max_body_bytes = args.max_body_bytes,
        "Blur detection API listening"
    );

    let app = router(AppState { blur }, args.max_body_bytes);
    serve(listener, app, shutdown_signal())
        .await
        .context("Server terminated unexpectedly")?;

    tracing::info!("Server stopped");
    Ok(())
}
