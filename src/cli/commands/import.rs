//! `foiadesk import` command - Bulk-file requests from CSV

use chrono::Utc;
use console::style;
use csv::ReaderBuilder;
use miette::{IntoDiagnostic, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::entities::RequestIntake;

const HEADERS: [&str; 6] = [
    "requester_name",
    "requester_email",
    "agency",
    "subject",
    "description",
    "fee_waived",
];

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file to import
    #[arg(required_unless_present = "template")]
    pub file: Option<PathBuf>,

    /// Parse and report without filing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Keep going past rows that fail to parse or file
    #[arg(long)]
    pub skip_errors: bool,

    /// Print a CSV header template and exit
    #[arg(long)]
    pub template: bool,
}

#[derive(Debug, Default)]
struct ImportStats {
    rows_processed: usize,
    created: usize,
    errors: usize,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if args.template {
        println!("{}", HEADERS.join(","));
        println!("John Doe,john@example.com,EPA,Air quality reports,All 2025 air quality reports for Region 5,false");
        return Ok(());
    }

    let Some(file_path) = args.file.clone() else {
        return Err(miette::miette!("FILE is required unless --template is given"));
    };
    let file = File::open(&file_path).into_diagnostic()?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = rdr.headers().into_diagnostic()?.clone();
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase(), i))
        .collect();

    let mut engine = super::utils::open_engine(global)?;
    let mut stats = ImportStats::default();

    for (row_idx, result) in rdr.records().enumerate() {
        let row_num = row_idx + 2; // 1-indexed plus the header row
        stats.rows_processed += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                eprintln!(
                    "{} Row {}: CSV parse error: {}",
                    style("✗").red(),
                    row_num,
                    e
                );
                stats.errors += 1;
                if !args.skip_errors {
                    return Err(miette::miette!("CSV parse error at row {}: {}", row_num, e));
                }
                continue;
            }
        };

        let get = |field: &str| -> String {
            header_map
                .get(field)
                .and_then(|&i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };

        let intake = RequestIntake {
            requester_name: get("requester_name"),
            requester_email: get("requester_email"),
            agency: get("agency"),
            subject: get("subject"),
            description: get("description"),
            fee_waived: matches!(
                get("fee_waived").to_lowercase().as_str(),
                "true" | "yes" | "1"
            ),
        };

        if intake.requester_name.is_empty() || intake.agency.is_empty() {
            eprintln!(
                "{} Row {}: Missing required field 'requester_name' or 'agency'",
                style("✗").red(),
                row_num
            );
            stats.errors += 1;
            if !args.skip_errors {
                return Err(miette::miette!("Missing required field at row {}", row_num));
            }
            continue;
        }

        if args.dry_run {
            println!(
                "{} Row {}: Would file request to {} - {}",
                style("○").dim(),
                row_num,
                style(&intake.agency).yellow(),
                crate::cli::helpers::truncate_str(&intake.subject, 40)
            );
            stats.created += 1;
            continue;
        }

        match engine.submit(intake, Utc::now()) {
            Ok(request) => {
                stats.created += 1;
                if !global.quiet {
                    println!(
                        "{} Row {}: Filed {} with {}",
                        style("✓").green(),
                        row_num,
                        style(&request.tracking_number).cyan(),
                        style(&request.agency).yellow()
                    );
                }
            }
            Err(e) => {
                eprintln!("{} Row {}: {}", style("✗").red(), row_num, e);
                stats.errors += 1;
                if !args.skip_errors {
                    return Err(miette::miette!("Import failed at row {}: {}", row_num, e));
                }
            }
        }
    }

    if !global.quiet {
        println!();
        println!(
            "{} {} row(s) processed: {} {}, {} error(s)",
            style("Import complete.").bold(),
            stats.rows_processed,
            stats.created,
            if args.dry_run { "would be filed" } else { "filed" },
            stats.errors
        );
    }

    Ok(())
}
