//! stash - command line front end for the stash storage adapter
//!
//! Runs the storage operations (normalize, exists, mkdir, put, append, cat)
//! against the bucket named in the configuration file.

mod commands;
mod exit_code;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::{Commands, Context};
use crate::output::OutputConfig;

/// Storage adapter for S3-compatible object storage
#[derive(Parser, Debug)]
#[command(name = "stash", version, about, long_about = None)]
pub struct Cli {
    /// Config file (JSON or TOML); defaults to config.toml in the stash config directory
    #[arg(short, long, global = true, env = "STASH_CONFIG")]
    config: Option<PathBuf>,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context {
        config_path: cli.config,
        output: OutputConfig {
            json: cli.json,
            no_color: cli.no_color,
            quiet: cli.quiet,
        },
    };

    let code = commands::execute(cli.command, &ctx).await;
    std::process::exit(code.as_i32());
}
