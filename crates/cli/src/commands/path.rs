//! path command - Show how a path is normalized
//!
//! Works offline; no configuration is loaded.

use clap::Args;
use serde::Serialize;

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Path to normalize (backslashes become forward slashes)
    pub path: String,
}

#[derive(Debug, Serialize)]
struct PathOutput {
    input: String,
    normalized: String,
}

impl std::fmt::Display for PathOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.normalized)
    }
}

pub fn execute(args: PathArgs, ctx: &Context) -> ExitCode {
    let formatter = Formatter::new(ctx.output.clone());
    let normalized = stash_core::normalize(&args.path);

    formatter.output(&PathOutput {
        input: args.path,
        normalized,
    });
    ExitCode::Success
}
