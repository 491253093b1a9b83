// src/cli.rs
use crate::api::DEFAULT_TIMEOUT;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Save notes to a Blinko instance", long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Args {
    /// Path of the configuration store (default: ~/.blinko_capture.json)
    #[arg(long, value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT.as_secs(), global = true)]
    pub timeout: u64,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Screen to open; without one the popup flow runs
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Configure from a pasted curl snippet of the Blinko open API
    Setup {
        /// Snippet text; read interactively when omitted
        #[arg(long, value_name = "TEXT")]
        snippet: Option<String>,
    },

    /// Edit instance address and access token
    Settings {
        /// Instance address, e.g. https://blinko.example.com
        #[arg(long, value_name = "URL")]
        instance: Option<String>,

        /// Access token
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,
    },

    /// Save a note without prompting
    Save {
        /// Note text; may be empty when tags are given
        #[arg(value_name = "BODY", default_value = "")]
        body: String,

        /// Tag to attach; repeatable
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },

    /// Show whether an instance is configured
    Status,
}

/// Log directive for the crate at the requested verbosity.
pub fn log_directive(
    verbose: u8,
) -> Result<tracing_subscriber::filter::Directive, tracing_subscriber::filter::ParseError> {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    format!("blinko_capture={}", level).parse()
}
