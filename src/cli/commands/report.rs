//! `foiadesk report` command - Print the fixed-width case report

use chrono::Utc;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::reporting;

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Request ID or tracking number
    pub request: String,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let store = super::utils::open_store(global)?;
    let details =
        reporting::details(&store, &args.request).map_err(|e| miette::miette!("{}", e))?;
    let report = reporting::render_report(&details, Utc::now());
    super::utils::write_output(&report, args.output)
}
