//! CLI entrypoint for `cargo-buildconfig`.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use cargo_buildconfig::cli::{Args, normalise_args};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "buildconfig=info,cargo_buildconfig=info";

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse_from(normalise_args(std::env::args_os()));
    match cargo_buildconfig::run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "cargo-buildconfig failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
