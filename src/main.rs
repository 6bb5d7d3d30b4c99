//! The main entry point to the application.

#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

mod commands;

use std::io::{self, Write as _};
use std::process::ExitCode;

use clap::{ArgAction, Parser as _};
use colored::Colorize as _;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Parser)]
#[clap(about = "Extract raster frames from GIF images", version)]
struct Parser {
    #[clap(subcommand)]
    subcommand: commands::Subcommand,

    #[clap(
        short,
        long,
        action = ArgAction::Count,
        help = "Use verbose output (or `-vv` and `-vvv` for more verbose output)",
        global = true,
    )]
    verbose: u8,
}

fn main() -> ExitCode {
    try_main().unwrap_or_else(|err| {
        let mut stderr = io::stderr().lock();
        _ = writeln!(stderr, "{}", "gif-to-frames failed".bold().red());

        for cause in err.chain() {
            _ = writeln!(stderr, "  {}: {}", "Cause".bold(), cause);
        }

        ExitCode::FAILURE
    })
}

fn try_main() -> anyhow::Result<ExitCode> {
    let args = Parser::parse();
    setup_tracing(args.verbose);

    args.subcommand.run().map(|()| ExitCode::SUCCESS)
}

fn setup_tracing(verbose: u8) {
    use tracing_subscriber::prelude::*;

    let level_filter = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::default()
        .add_directive(format!("gifdec={level_filter}").parse().unwrap())
        .add_directive(
            format!("{}={level_filter}", env!("CARGO_CRATE_NAME"))
                .parse()
                .unwrap(),
        );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
