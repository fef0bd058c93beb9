//! put command - Upload a local file
//!
//! Replaces any existing object at the target path.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use super::{Context, open_storage, report_error};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local source file
    pub file: PathBuf,

    /// Target object path
    pub path: String,
}

/// JSON output shared by put and append
#[derive(Debug, Serialize)]
pub(super) struct TransferOutput {
    pub source: String,
    pub target: String,
    pub size_bytes: Option<u64>,
}

pub async fn execute(args: PutArgs, ctx: &Context) -> ExitCode {
    let formatter = Formatter::new(ctx.output.clone());
    let storage = match open_storage(ctx, &formatter).await {
        Ok(s) => s,
        Err(code) => return code,
    };

    if let Err(e) = storage.put(&args.file, &args.path).await {
        return report_error(&formatter, "Failed to upload", &e);
    }

    let size = tokio::fs::metadata(&args.file).await.ok().map(|m| m.len());
    let target = storage.normalize(&args.path);

    if formatter.is_json() {
        formatter.json(&TransferOutput {
            source: args.file.display().to_string(),
            target: target.to_string(),
            size_bytes: size,
        });
    } else {
        let size = size.map(|s| formatter.style_size(s)).unwrap_or_default();
        formatter.success(&format!(
            "{} -> {} {size}",
            args.file.display(),
            formatter.style_path(target.as_str())
        ));
    }
    ExitCode::Success
}
