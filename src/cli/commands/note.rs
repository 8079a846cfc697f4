//! `foiadesk note` command - Attach an internal case note

use chrono::Utc;
use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct NoteArgs {
    /// Request ID or tracking number
    pub request: String,

    /// Note text
    #[arg(long)]
    pub content: String,

    /// Note author (default: configured actor)
    #[arg(long)]
    pub author: Option<String>,
}

pub fn run(args: NoteArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let author = super::utils::actor_or_default(args.author.clone(), &config);

    let mut engine = super::utils::open_engine(global)?;
    let note = engine
        .add_note(&args.request, &author, &args.content, Utc::now())
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Noted on {} by {}",
            style("✓").green(),
            style(&args.request).cyan(),
            style(&author).yellow()
        );
        if global.verbose {
            println!("  Note ID : {}", style(note.note_id.to_string()).dim());
        }
    }

    Ok(())
}
