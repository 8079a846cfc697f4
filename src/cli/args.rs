//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    appeal::AppealArgs,
    assign::AssignArgs,
    close::CloseArgs,
    completions::CompletionsArgs,
    decide::DecideArgs,
    deny::DenyArgs,
    fulfill::FulfillArgs,
    import::ImportArgs,
    init::InitArgs,
    letter::LetterArgs,
    list::ListArgs,
    note::NoteArgs,
    overdue::OverdueArgs,
    report::ReportArgs,
    show::ShowArgs,
    stats::StatsArgs,
    submit::SubmitArgs,
};

#[derive(Parser)]
#[command(name = "foiadesk")]
#[command(author, version, about = "FOIA Desk - public-records request tracker")]
#[command(
    long_about = "Tracks public-records requests against their statutory deadline: submission, assignment, fulfillment or denial, appeal, and closure, backed by SQLite."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Database file (default: configured path, or foiadesk.db)
    #[arg(long, global = true, env = "FOIADESK_DB")]
    pub db: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the request database and schema
    Init(InitArgs),

    /// File a new request
    Submit(SubmitArgs),

    /// Route a request to a processing officer
    Assign(AssignArgs),

    /// Attach an internal case note to a request
    Note(NoteArgs),

    /// Release records and complete a request
    Fulfill(FulfillArgs),

    /// Deny a request with a stated reason
    Deny(DenyArgs),

    /// File an appeal against a denial
    Appeal(AppealArgs),

    /// Decide a pending appeal
    Decide(DecideArgs),

    /// Administratively close a request
    Close(CloseArgs),

    /// List requests, optionally filtered by status or agency
    List(ListArgs),

    /// List unresolved requests past their deadline
    Overdue(OverdueArgs),

    /// Aggregate statistics, desk-wide or for one agency
    Stats(StatsArgs),

    /// Print the full case report for a request
    Report(ReportArgs),

    /// Show a request with every dependent record
    #[command(alias = "details")]
    Show(ShowArgs),

    /// Render a response letter for a request
    Letter(LetterArgs),

    /// Bulk-file requests from a CSV file
    Import(ImportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
