//! trade-ta command-line interface
//!
//! Computes chart indicators on CSV price files. Logs go to stderr and are
//! filtered by `RUST_LOG` (default `warn`), so stdout carries only the CSV.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use trade_ta_cli::args::Args;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse_args();
    match trade_ta_cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
