//! Command implementations
//!
//! Each command lives in its own module and returns an [`ExitCode`].

mod append;
mod cat;
mod completions;
mod exists;
mod mkdir;
mod path;
mod put;

use std::path::PathBuf;

use clap::Subcommand;
use stash_core::{StorageAdapter, StorageConfig};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub output: OutputConfig,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the normalized form of a path
    Path(path::PathArgs),

    /// Check whether an object or directory exists
    Exists(exists::ExistsArgs),

    /// Create a directory prefix
    Mkdir(mkdir::MkdirArgs),

    /// Upload a local file, replacing the object
    Put(put::PutArgs),

    /// Append a local file to an existing object
    Append(append::AppendArgs),

    /// Print the content of an object
    Cat(cat::CatArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute a command
pub async fn execute(cmd: Commands, ctx: &Context) -> ExitCode {
    match cmd {
        Commands::Path(args) => path::execute(args, ctx),
        Commands::Exists(args) => exists::execute(args, ctx).await,
        Commands::Mkdir(args) => mkdir::execute(args, ctx).await,
        Commands::Put(args) => put::execute(args, ctx).await,
        Commands::Append(args) => append::execute(args, ctx).await,
        Commands::Cat(args) => cat::execute(args, ctx).await,
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Load the configuration and connect the S3 adapter
pub async fn open_storage(
    ctx: &Context,
    formatter: &Formatter,
) -> Result<StorageAdapter, ExitCode> {
    let loaded = match &ctx.config_path {
        Some(path) => StorageConfig::load(path),
        None => StorageConfig::load_default(),
    };

    let config = match loaded {
        Ok(config) => {
            tracing::debug!(
                bucket = %config.bucket,
                region = %config.client.region,
                "Loaded configuration"
            );
            config
        }
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return Err(ExitCode::from(&e));
        }
    };

    match stash_s3::connect(&config).await {
        Ok(adapter) => Ok(adapter),
        Err(e) => {
            formatter.error(&format!("Failed to create storage client: {e}"));
            Err(ExitCode::from(&e))
        }
    }
}

/// Report an operation failure and map it to an exit code
pub fn report_error(formatter: &Formatter, action: &str, error: &stash_core::Error) -> ExitCode {
    formatter.error(&format!("{action}: {error}"));
    ExitCode::from(error)
}
