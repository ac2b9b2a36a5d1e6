//! Marquee CLI binary.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use marquee::cli::args::MarqueeArgs;
use marquee::cli::commands::execute_command;

fn main() {
    let args = MarqueeArgs::parse();

    // Verbosity picks the default filter; an explicit RUST_LOG still wins.
    let default_directive = match args.verbosity() {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
