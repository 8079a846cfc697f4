//! `foiadesk close` command - Administratively close a request

use chrono::Utc;
use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct CloseArgs {
    /// Request ID or tracking number
    pub request: String,

    /// Closure reason, recorded as an internal note
    #[arg(long)]
    pub note: Option<String>,

    /// Officer closing the request (default: configured actor)
    #[arg(long)]
    pub by: Option<String>,
}

pub fn run(args: CloseArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let actor = super::utils::actor_or_default(args.by.clone(), &config);

    let mut engine = super::utils::open_engine(global)?;
    let request = engine
        .close(&args.request, args.note.as_deref(), &actor, Utc::now())
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Closed {}",
            style("✓").green(),
            style(&request.tracking_number).cyan()
        );
        if let Some(ref note) = args.note {
            println!("  Reason : {}", note);
        }
    }

    Ok(())
}
