//! `foiadesk deny` command - Deny a request with a stated reason

use chrono::Utc;
use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct DenyArgs {
    /// Request ID or tracking number
    pub request: String,

    /// Stated reason for the denial
    #[arg(long)]
    pub reason: String,

    /// Statutory exemption cited (repeatable)
    #[arg(long = "exemption", value_name = "CITATION")]
    pub exemptions: Vec<String>,

    /// Officer recording the denial (default: configured actor)
    #[arg(long)]
    pub by: Option<String>,
}

pub fn run(args: DenyArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let denied_by = super::utils::actor_or_default(args.by.clone(), &config);

    let mut engine = super::utils::open_engine(global)?;
    let (request, denial) = engine
        .deny(
            &args.request,
            &args.reason,
            args.exemptions.clone(),
            &denied_by,
            Utc::now(),
        )
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Denied {}",
            style("✗").red(),
            style(&request.tracking_number).cyan()
        );
        println!("  Reason     : {}", denial.reason);
        if !denial.exemptions.is_empty() {
            println!("  Exemptions : {}", denial.exemptions.join(", "));
        }
    }

    Ok(())
}
