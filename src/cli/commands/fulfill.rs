//! `foiadesk fulfill` command - Release records and complete a request

use chrono::Utc;
use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::Config;
use crate::entities::FulfillmentInput;

#[derive(clap::Args, Debug)]
pub struct FulfillArgs {
    /// Request ID or tracking number
    pub request: String,

    /// Released document reference (repeatable)
    #[arg(long = "doc", value_name = "NAME")]
    pub documents: Vec<String>,

    /// Redaction applied to the release (repeatable)
    #[arg(long = "redaction", value_name = "TEXT")]
    pub redactions: Vec<String>,

    /// Statutory exemption cited (repeatable)
    #[arg(long = "exemption", value_name = "CITATION")]
    pub exemptions: Vec<String>,

    /// Cover letter text accompanying the release
    #[arg(long)]
    pub letter: Option<String>,

    /// Officer completing the release (default: configured actor)
    #[arg(long)]
    pub by: Option<String>,
}

pub fn run(args: FulfillArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let fulfilled_by = super::utils::actor_or_default(args.by.clone(), &config);

    let input = FulfillmentInput {
        documents: args.documents.clone(),
        redactions: args.redactions.clone(),
        exemptions_cited: args.exemptions.clone(),
        response_letter: args.letter.clone().unwrap_or_default(),
        fulfilled_by,
    };

    let mut engine = super::utils::open_engine(global)?;
    let (request, package) = engine
        .fulfill(&args.request, input, Utc::now())
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Fulfilled {} with {} document(s)",
            style("✓").green(),
            style(&request.tracking_number).cyan(),
            style(package.documents.len()).cyan()
        );
        if !package.exemptions_cited.is_empty() {
            println!("  Exemptions : {}", package.exemptions_cited.join(", "));
        }
        if global.verbose {
            println!(
                "  Package ID : {}",
                style(package.package_id.to_string()).dim()
            );
        }
    }

    Ok(())
}
