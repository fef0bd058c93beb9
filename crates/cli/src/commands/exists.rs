//! exists command - Check for an object or directory
//!
//! Exits with 0 when the path exists and with the not-found code otherwise,
//! so it can be used directly in shell conditions.

use clap::Args;
use serde::Serialize;

use super::{Context, open_storage, report_error};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Args, Debug)]
pub struct ExistsArgs {
    /// Object or directory path
    pub path: String,
}

#[derive(Debug, Serialize)]
struct ExistsOutput {
    path: String,
    exists: bool,
}

pub async fn execute(args: ExistsArgs, ctx: &Context) -> ExitCode {
    let formatter = Formatter::new(ctx.output.clone());
    let storage = match open_storage(ctx, &formatter).await {
        Ok(s) => s,
        Err(code) => return code,
    };

    let path = storage.normalize(&args.path);
    let exists = match storage.exists(&args.path).await {
        Ok(found) => found,
        Err(e) => return report_error(&formatter, "Failed to check path", &e),
    };

    if formatter.is_json() {
        formatter.json(&ExistsOutput {
            path: path.to_string(),
            exists,
        });
    } else if exists {
        formatter.success(&format!("{} exists", formatter.style_path(path.as_str())));
    } else {
        formatter.warning(&format!(
            "{} does not exist",
            formatter.style_path(path.as_str())
        ));
    }

    if exists {
        ExitCode::Success
    } else {
        ExitCode::NotFound
    }
}
