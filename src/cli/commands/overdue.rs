//! `foiadesk overdue` command - Unresolved requests past their deadline

use chrono::Utc;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::reporting::{self, OverdueRequest};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("agency", "AGENCY", 16),
    ColumnDef::new("subject", "SUBJECT", 32),
    ColumnDef::new("status", "STATUS", 10),
    ColumnDef::new("due", "DUE", 10),
    ColumnDef::new("days_overdue", "DAYS OVERDUE", 12),
    ColumnDef::new("assigned", "ASSIGNED", 18),
];

#[derive(clap::Args, Debug)]
pub struct OverdueArgs {}

pub fn run(_args: OverdueArgs, global: &GlobalOpts) -> Result<()> {
    let store = super::utils::open_store(global)?;
    let overdue = reporting::overdue(&store, Utc::now()).map_err(|e| miette::miette!("{}", e))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&overdue).into_diagnostic()?
            );
        }
        format => {
            if overdue.is_empty() {
                println!("{} No overdue requests.", style("✓").green());
                return Ok(());
            }
            let rows = overdue.iter().map(to_row);
            TableFormatter::new(COLUMNS, "overdue request").output(rows, format);
        }
    }

    Ok(())
}

fn to_row(row: &OverdueRequest) -> TableRow {
    let request = &row.request;
    TableRow::new(
        request.tracking_number.to_string(),
        request.request_id.to_string(),
    )
    .cell("agency", CellValue::Text(request.agency.clone()))
    .cell("subject", CellValue::Text(request.subject.clone()))
    .cell("status", CellValue::Status(request.status))
    .cell("due", CellValue::Date(request.due_at))
    .cell("days_overdue", CellValue::DaysOverdue(row.days_overdue))
    .cell(
        "assigned",
        match request.assigned_to {
            Some(ref officer) if !officer.is_empty() => CellValue::Text(officer.clone()),
            _ => CellValue::Empty,
        },
    )
}
