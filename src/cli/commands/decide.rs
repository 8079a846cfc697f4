//! `foiadesk decide` command - Decide a pending appeal

use chrono::Utc;
use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::entities::RequestStatus;

#[derive(clap::Args, Debug)]
pub struct DecideArgs {
    /// Appeal ID
    pub appeal: String,

    /// Decision text; exactly "granted" reopens the parent request
    #[arg(long)]
    pub decision: String,
}

pub fn run(args: DecideArgs, global: &GlobalOpts) -> Result<()> {
    let mut engine = super::utils::open_engine(global)?;
    let appeal = engine
        .decide_appeal(&args.appeal, &args.decision, Utc::now())
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Appeal {} decided: {}",
            style("✓").green(),
            style(appeal.appeal_id.to_string()).cyan(),
            style(&args.decision).yellow()
        );
        let request = engine
            .store()
            .get_request(&appeal.request_id)
            .map_err(|e| miette::miette!("{}", e))?;
        if request.status == RequestStatus::Processing {
            println!(
                "  Request {} reopened for processing",
                style(&request.tracking_number).cyan()
            );
        } else {
            println!("  Request status : {}", request.status);
        }
    }

    Ok(())
}
