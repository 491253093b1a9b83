// Entrypoint: parse arguments, set up logging, hand over to the library.

use anyhow::Result;
use blinko_capture::cli::{log_directive, Args};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_directive(args.verbose)?))
        .init();

    blinko_capture::run(args)
}
