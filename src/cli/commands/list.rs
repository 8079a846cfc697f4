//! `foiadesk list` command - List requests with optional filters

use miette::{IntoDiagnostic, Result};

use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::store::RequestFilter;
use crate::entities::{Request, RequestStatus};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("agency", "AGENCY", 16),
    ColumnDef::new("subject", "SUBJECT", 32),
    ColumnDef::new("status", "STATUS", 10),
    ColumnDef::new("submitted", "SUBMITTED", 10),
    ColumnDef::new("due", "DUE", 10),
    ColumnDef::new("assigned", "ASSIGNED", 18),
    ColumnDef::new("fee_waived", "FEE WAIVED", 10),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only requests with this status
    #[arg(long)]
    pub status: Option<RequestStatus>,

    /// Only requests directed to this agency
    #[arg(long)]
    pub agency: Option<String>,

    /// Show at most this many requests
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = super::utils::open_store(global)?;
    let filter = RequestFilter {
        status: args.status,
        agency: args.agency.clone(),
        limit: args.limit,
    };
    let requests = store
        .list_requests(&filter)
        .map_err(|e| miette::miette!("{}", e))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&requests).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&requests).into_diagnostic()?);
        }
        format => {
            let rows = requests.iter().map(to_row);
            TableFormatter::new(COLUMNS, "request").output(rows, format);
        }
    }

    Ok(())
}

fn to_row(request: &Request) -> TableRow {
    TableRow::new(
        request.tracking_number.to_string(),
        request.request_id.to_string(),
    )
    .cell("agency", CellValue::Text(request.agency.clone()))
    .cell("subject", CellValue::Text(request.subject.clone()))
    .cell("status", CellValue::Status(request.status))
    .cell("submitted", CellValue::Date(request.submitted_at))
    .cell("due", CellValue::Date(request.due_at))
    .cell(
        "assigned",
        match request.assigned_to {
            Some(ref officer) if !officer.is_empty() => CellValue::Text(officer.clone()),
            _ => CellValue::Empty,
        },
    )
    .cell("fee_waived", CellValue::FeeWaived(request.fee_waived))
}
