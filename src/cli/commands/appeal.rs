//! `foiadesk appeal` command - File an appeal against a denial

use chrono::Utc;
use console::style;
use miette::Result;

use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct AppealArgs {
    /// Request ID or tracking number
    pub request: String,

    /// Who is filing the appeal
    #[arg(long)]
    pub appellant: String,

    /// Argument for overturning the denial
    #[arg(long)]
    pub grounds: String,
}

pub fn run(args: AppealArgs, global: &GlobalOpts) -> Result<()> {
    let mut engine = super::utils::open_engine(global)?;
    let appeal = engine
        .appeal(&args.request, &args.appellant, &args.grounds, Utc::now())
        .map_err(|e| miette::miette!("{}", e))?;

    if global.quiet {
        println!("{}", appeal.appeal_id);
    } else {
        println!(
            "{} Appeal filed on {} by {}",
            style("✓").green(),
            style(&args.request).cyan(),
            style(&appeal.appellant).yellow()
        );
        println!("  Appeal ID : {}", style(appeal.appeal_id.to_string()).dim());
        println!("  Status    : {}", appeal.status);
    }

    Ok(())
}
