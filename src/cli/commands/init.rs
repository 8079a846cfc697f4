//! `foiadesk init` command - Create the request database

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::{Config, Store};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Recreate the schema even if the database already exists, discarding all data
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let path = super::utils::resolve_db_path(global, &config);

    let mut store = Store::open_unchecked(&path).map_err(|e| miette::miette!("{}", e))?;
    let initialized = store.is_initialized().map_err(|e| miette::miette!("{}", e))?;

    if initialized && !args.force {
        println!(
            "{} Request database already exists at {}",
            style("!").yellow(),
            style(store.path()).cyan()
        );
        println!();
        println!(
            "Use {} to recreate it from scratch",
            style("foiadesk init --force").yellow()
        );
        return Ok(());
    }

    if initialized {
        store.reinitialize().map_err(|e| miette::miette!("{}", e))?;
    } else {
        store.initialize().map_err(|e| miette::miette!("{}", e))?;
    }

    if !global.quiet {
        println!(
            "{} Initialized request database at {}",
            style("✓").green(),
            style(store.path()).cyan()
        );
        println!();
        println!("Next steps:");
        println!(
            "  {} File your first request",
            style("foiadesk submit").yellow()
        );
        println!("  {} List requests", style("foiadesk list").yellow());
        println!("  {} Check deadlines", style("foiadesk overdue").yellow());
    }

    Ok(())
}
