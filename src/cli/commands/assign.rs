//! `foiadesk assign` command - Route a request to a processing officer

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct AssignArgs {
    /// Request ID or tracking number
    pub request: String,

    /// Officer to assign the request to
    #[arg(long)]
    pub officer: String,
}

pub fn run(args: AssignArgs, global: &GlobalOpts) -> Result<()> {
    let mut engine = super::utils::open_engine(global)?;
    let request = engine
        .assign(&args.request, &args.officer)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Assigned {} to {}",
            style("✓").green(),
            style(&request.tracking_number).cyan(),
            style(&args.officer).yellow()
        );
        println!("  Status : {}", request.status);
    }

    Ok(())
}
