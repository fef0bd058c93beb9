//! append command - Append a local file to an existing object
//!
//! Reads the object, concatenates the file and writes the result back.
//! Not safe against concurrent appends to the same object.

use std::path::PathBuf;

use clap::Args;

use super::put::TransferOutput;
use super::{Context, open_storage, report_error};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Args, Debug)]
pub struct AppendArgs {
    /// Local file whose content is appended
    pub file: PathBuf,

    /// Existing object path
    pub path: String,
}

pub async fn execute(args: AppendArgs, ctx: &Context) -> ExitCode {
    let formatter = Formatter::new(ctx.output.clone());
    let storage = match open_storage(ctx, &formatter).await {
        Ok(s) => s,
        Err(code) => return code,
    };

    if let Err(e) = storage.append(&args.file, &args.path).await {
        return report_error(&formatter, "Failed to append", &e);
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
            "{} >> {} {size}",
            args.file.display(),
            formatter.style_path(target.as_str())
        ));
    }
    ExitCode::Success
}
