use anyhow::{Context, Result};
use clap::Parser;
use syscall_tally::{cli::Cli, diagnostics::TracingDiagnostics, pipeline, report};
use tracing_subscriber::EnvFilter;

/// Initialize the stderr subscriber; warnings are always shown
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    // Configuration errors abort before the log is touched
    args.validate()?;
    let log_path = args.log_path()?;

    let parsed = pipeline::parse_log_file(log_path, args.chunk_size, &mut TracingDiagnostics)?;

    report::print_report(&parsed.syscalls).context("Failed to write report")?;

    Ok(())
}
