//! `foiadesk stats` command - Aggregate statistics per agency or desk-wide

use chrono::Utc;
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::reporting;
use crate::entities::RequestStatus;

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// Restrict figures to one agency
    #[arg(long)]
    pub agency: Option<String>,
}

pub fn run(args: StatsArgs, global: &GlobalOpts) -> Result<()> {
    let store = super::utils::open_store(global)?;
    let stats = reporting::agency_stats(&store, args.agency.as_deref(), Utc::now())
        .map_err(|e| miette::miette!("{}", e))?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&stats).into_diagnostic()?);
        }
        _ => {
            println!(
                "{} {}",
                style("FOIA request statistics:").bold(),
                style(&stats.agency).cyan()
            );
            println!();
            println!("  Total requests   : {}", style(stats.total_requests).cyan());
            println!(
                "  Overdue          : {}",
                if stats.overdue > 0 {
                    style(stats.overdue).red().bold()
                } else {
                    style(stats.overdue).green()
                }
            );
            println!("  Fulfillment rate : {:.2}%", stats.fulfillment_rate);
            println!("  Denial rate      : {:.2}%", stats.denial_rate);
            println!();

            let mut builder = Builder::default();
            builder.push_record(["Status", "Count"]);
            for status in RequestStatus::all() {
                builder.push_record([
                    status.to_string(),
                    stats.by_status.count(*status).to_string(),
                ]);
            }
            println!("{}", builder.build().with(Style::sharp()));
        }
    }

    Ok(())
}
