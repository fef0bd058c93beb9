//! mkdir command - Create a directory prefix

use clap::Args;
use serde::Serialize;

use super::{Context, open_storage, report_error};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Args, Debug)]
pub struct MkdirArgs {
    /// Directory path
    pub path: String,

    /// Do not request parent creation
    #[arg(long)]
    pub no_recursive: bool,
}

#[derive(Debug, Serialize)]
struct MkdirOutput {
    path: String,
    created: bool,
}

pub async fn execute(args: MkdirArgs, ctx: &Context) -> ExitCode {
    let formatter = Formatter::new(ctx.output.clone());
    let storage = match open_storage(ctx, &formatter).await {
        Ok(s) => s,
        Err(code) => return code,
    };

    if args.no_recursive {
        formatter.warning("Object stores have no parent directories; --no-recursive has no effect");
    }

    if let Err(e) = storage.mkdir(&args.path, !args.no_recursive).await {
        return report_error(&formatter, "Failed to create directory", &e);
    }

    let path = storage.normalize(&args.path);
    if formatter.is_json() {
        formatter.json(&MkdirOutput {
            path: path.to_string(),
            created: true,
        });
    } else {
        formatter.success(&format!(
            "Created directory {}",
            formatter.style_path(path.as_str())
        ));
    }
    ExitCode::Success
}
