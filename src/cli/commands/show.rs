//! `foiadesk show` command - Composite view of a request and its records

use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::reporting;

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Request ID or tracking number
    pub request: String,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = super::utils::open_store(global)?;
    let details =
        reporting::details(&store, &args.request).map_err(|e| miette::miette!("{}", e))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&details).into_diagnostic()?
            );
        }
        _ => {
            print!("{}", serde_yml::to_string(&details).into_diagnostic()?);
        }
    }

    Ok(())
}
