//! cat command - Print object content to stdout

use std::io::Write;

use clap::Args;
use serde::Serialize;

use super::{Context, open_storage, report_error};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Args, Debug)]
pub struct CatArgs {
    /// Object path
    pub path: String,
}

#[derive(Debug, Serialize)]
struct CatOutput {
    path: String,
    size_bytes: usize,
    content: String,
}

pub async fn execute(args: CatArgs, ctx: &Context) -> ExitCode {
    let formatter = Formatter::new(ctx.output.clone());
    let storage = match open_storage(ctx, &formatter).await {
        Ok(s) => s,
        Err(code) => return code,
    };

    let data = match storage.read(&args.path).await {
        Ok(data) => data,
        Err(e) => return report_error(&formatter, "Failed to read object", &e),
    };

    if formatter.is_json() {
        formatter.json(&CatOutput {
            path: storage.normalize(&args.path).into_string(),
            size_bytes: data.len(),
            content: String::from_utf8_lossy(&data).into_owned(),
        });
        return ExitCode::Success;
    }

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(&data).and_then(|_| stdout.flush()) {
        formatter.error(&format!("Failed to write output: {e}"));
        return ExitCode::GeneralError;
    }
    ExitCode::Success
}
