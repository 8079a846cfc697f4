//! `foiadesk letter` command - Render a response letter

use chrono::Utc;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::reporting;
use crate::core::{LetterGenerator, LetterKind};

#[derive(clap::Args, Debug)]
pub struct LetterArgs {
    /// Request ID or tracking number
    pub request: String,

    /// Letter kind: acknowledgement, fulfillment, or denial
    /// (default: implied by the request's status)
    #[arg(long)]
    pub kind: Option<LetterKind>,

    /// Write the letter to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: LetterArgs, global: &GlobalOpts) -> Result<()> {
    let store = super::utils::open_store(global)?;
    let details =
        reporting::details(&store, &args.request).map_err(|e| miette::miette!("{}", e))?;

    let kind = args
        .kind
        .unwrap_or_else(|| LetterKind::for_status(details.request.status));
    let generator = LetterGenerator::new().map_err(|e| miette::miette!("{}", e))?;
    let letter = generator
        .render(kind, &details, Utc::now())
        .map_err(|e| miette::miette!("{}", e))?;

    super::utils::write_output(&letter, args.output)
}
