use anyhow::Context;
use sphere_grid::{app, cli};
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVE: &str = "sphere_grid=info";

/// Sends logs to the requested file; without one, logging stays off so the
/// terminal is left to the renderer.
fn init_logging(args: &cli::Args) -> anyhow::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let directive = args.log_level.as_deref().unwrap_or(DEFAULT_LOG_DIRECTIVE);
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("invalid log level {directive:?} ({e}), using {DEFAULT_LOG_DIRECTIVE}");
        EnvFilter::new(DEFAULT_LOG_DIRECTIVE)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Main function
fn main() -> anyhow::Result<()> {
    let args = cli::parse();
    init_logging(&args)?;

    tracing::info!("{} v{} starting", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let options = app::LoopOptions::new(args.fps, args.debug);
    app::run(options).inspect_err(|e| tracing::error!("{e:#}"))
}
