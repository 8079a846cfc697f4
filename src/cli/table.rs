//! Table formatting utilities for CLI list commands
//!
//! This module provides a unified table output system shared by the
//! `list` and `overdue` commands: typed cell values with status styling,
//! dynamic column widths, and TSV/CSV/markdown/id emitters.

use chrono::{DateTime, Utc};
use console::style;

use crate::cli::helpers::{escape_csv, format_record_id, truncate_str};
use crate::cli::OutputFormat;
use crate::entities::RequestStatus;

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Record ID (truncated for terminal display, cyan colored)
    Id(String),
    /// Plain text, truncated to the column width
    Text(String),
    /// Request status with color coding
    Status(RequestStatus),
    /// Fee waiver flag (yes/no)
    FeeWaived(bool),
    /// Days past the deadline (red, bold)
    DaysOverdue(i64),
    /// DateTime displayed as date only
    Date(DateTime<Utc>),
    /// Numeric value
    Number(i64),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => {
                let display = format_record_id(id);
                format!("{:<width$}", style(&display).cyan(), width = width)
            }
            CellValue::Text(s) => {
                let truncated = truncate_str(s, width.saturating_sub(2));
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Status(status) => {
                let s = status.to_string();
                let styled = match status {
                    RequestStatus::Submitted => style(&s).yellow(),
                    RequestStatus::Processing => style(&s).cyan(),
                    RequestStatus::Fulfilled => style(&s).green(),
                    RequestStatus::Denied => style(&s).red(),
                    RequestStatus::Appealed => style(&s).magenta(),
                    RequestStatus::Closed => style(&s).dim(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::FeeWaived(waived) => {
                let styled = if *waived {
                    style("yes").green()
                } else {
                    style("no").dim()
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::DaysOverdue(days) => {
                format!("{:>width$}", style(days).red().bold(), width = width)
            }
            CellValue::Date(dt) => {
                format!("{:<width$}", dt.format("%Y-%m-%d"), width = width)
            }
            CellValue::Number(n) => {
                format!("{:>width$}", n, width = width)
            }
            CellValue::Empty => format!("{:<width$}", "-", width = width),
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        match self {
            CellValue::Id(id) => escape_csv(id),
            CellValue::Text(s) => escape_csv(s),
            CellValue::Status(status) => status.to_string(),
            CellValue::FeeWaived(waived) => {
                if *waived {
                    "yes".to_string()
                } else {
                    "no".to_string()
                }
            }
            CellValue::DaysOverdue(days) => days.to_string(),
            CellValue::Date(dt) => dt.format("%Y-%m-%d").to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Id(id) => id.clone(),
            CellValue::Text(s) => s.clone(),
            CellValue::Status(status) => status.to_string(),
            CellValue::FeeWaived(waived) => {
                if *waived {
                    "yes".to_string()
                } else {
                    "no".to_string()
                }
            }
            CellValue::DaysOverdue(days) => days.to_string(),
            CellValue::Date(dt) => dt.format("%Y-%m-%d").to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => "-".to_string(),
        };
        // Escape pipe characters for markdown tables
        raw.replace('|', "\\|")
    }

    /// Get the display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Id(id) => id.len().min(16), // IDs are truncated to 16
            CellValue::Text(s) => s.len(),
            CellValue::Status(status) => status.to_string().len(),
            CellValue::FeeWaived(_) => 3, // "yes" or "no"
            CellValue::DaysOverdue(days) => days.to_string().len(),
            CellValue::Date(_) => 10, // "YYYY-MM-DD"
            CellValue::Number(n) => n.to_string().len(),
            CellValue::Empty => 1,
        }
    }
}

/// Column definition with header label and maximum width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub tracking: String,
    pub full_id: String,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(tracking: String, full_id: String) -> Self {
        Self {
            tracking,
            full_id,
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that outputs rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    noun: &'static str,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], noun: &'static str) -> Self {
        Self { columns, noun }
    }

    /// Output rows in the specified format
    pub fn output<I>(&self, rows: I, format: OutputFormat)
    where
        I: IntoIterator<Item = TableRow>,
    {
        let rows: Vec<TableRow> = rows.into_iter().collect();

        match format {
            OutputFormat::Csv => self.output_csv(&rows),
            OutputFormat::Md => self.output_md(&rows),
            OutputFormat::Id => self.output_ids(&rows),
            _ => self.output_tsv(&rows),
        }
    }

    /// Calculate dynamic column widths based on actual content
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        let mut widths = Vec::new();

        // TRACKING column - find max tracking number length, min 8 for header
        let tracking_width = rows
            .iter()
            .map(|r| r.tracking.len())
            .max()
            .unwrap_or(8)
            .max(8); // "TRACKING" header
        widths.push(tracking_width);

        for col in self.columns {
            let header_len = col.header.len();
            let max_content = rows
                .iter()
                .filter_map(|r| r.get(col.key))
                .map(|v| v.display_width())
                .max()
                .unwrap_or(0);

            // +2 truncation buffer so truncate_str(width - 2) never clips
            // content that would have fit
            let content_with_buffer = max_content.saturating_add(2);
            let natural_width = header_len.max(content_with_buffer);
            // Cap at defined width to prevent excessive expansion
            let width = natural_width.min(col.width);
            widths.push(width);
        }

        widths
    }

    fn output_tsv(&self, rows: &[TableRow]) {
        let widths = self.calculate_widths(rows);

        // Header row - always start with TRACKING
        let mut header_parts = vec![format!(
            "{:<width$}",
            style("TRACKING").bold().dim(),
            width = widths[0]
        )];
        for (col, width) in self.columns.iter().zip(widths.iter().skip(1)) {
            header_parts.push(format!(
                "{:<width$}",
                style(col.header).bold(),
                width = width
            ));
        }
        println!("{}", header_parts.join(" "));

        // Separator
        let total_width: usize = widths.iter().sum::<usize>() + widths.len() - 1;
        println!("{}", "-".repeat(total_width));

        // Data rows
        for row in rows {
            let mut row_parts = vec![format!(
                "{:<width$}",
                style(&row.tracking).cyan(),
                width = widths[0]
            )];
            for (col, width) in self.columns.iter().zip(widths.iter().skip(1)) {
                if let Some(value) = row.get(col.key) {
                    row_parts.push(value.format_tsv(*width));
                } else {
                    row_parts.push(format!("{:<width$}", "-", width = width));
                }
            }
            println!("{}", row_parts.join(" "));
        }

        // Summary
        println!();
        println!("{} {}(s) found.", style(rows.len()).cyan(), self.noun);
    }

    fn output_csv(&self, rows: &[TableRow]) {
        // Header row
        let mut headers = vec!["tracking_number".to_string(), "request_id".to_string()];
        for col in self.columns {
            headers.push(col.key.to_string());
        }
        println!("{}", headers.join(","));

        // Data rows
        for row in rows {
            let mut values = vec![escape_csv(&row.tracking), escape_csv(&row.full_id)];
            for col in self.columns {
                if let Some(value) = row.get(col.key) {
                    values.push(value.format_csv());
                } else {
                    values.push(String::new());
                }
            }
            println!("{}", values.join(","));
        }
    }

    fn output_md(&self, rows: &[TableRow]) {
        // Header row
        let mut headers = vec!["Tracking".to_string(), "ID".to_string()];
        for col in self.columns {
            headers.push(col.header.to_string());
        }
        println!("| {} |", headers.join(" | "));

        // Separator
        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        println!("|{}|", separators.join("|"));

        // Data rows
        for row in rows {
            let mut values = vec![row.tracking.clone(), row.full_id.clone()];
            for col in self.columns {
                if let Some(value) = row.get(col.key) {
                    values.push(value.format_md());
                } else {
                    values.push("-".to_string());
                }
            }
            println!("| {} |", values.join(" | "));
        }
    }

    fn output_ids(&self, rows: &[TableRow]) {
        for row in rows {
            println!("{}", row.full_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_text_format() {
        let cell = CellValue::Text("Hello World".to_string());
        let tsv = cell.format_tsv(20);
        assert!(tsv.contains("Hello World"));

        let csv = cell.format_csv();
        assert_eq!(csv, "Hello World");

        let md = cell.format_md();
        assert_eq!(md, "Hello World");
    }

    #[test]
    fn test_cell_value_status_format() {
        let cell = CellValue::Status(RequestStatus::Fulfilled);
        assert_eq!(cell.format_csv(), "fulfilled");
        assert_eq!(cell.format_md(), "fulfilled");
    }

    #[test]
    fn test_cell_value_fee_waived() {
        assert_eq!(CellValue::FeeWaived(true).format_csv(), "yes");
        assert_eq!(CellValue::FeeWaived(false).format_csv(), "no");
    }

    #[test]
    fn test_cell_value_days_overdue() {
        let cell = CellValue::DaysOverdue(9);
        assert_eq!(cell.format_csv(), "9");
        assert_eq!(cell.format_md(), "9");
    }

    #[test]
    fn test_cell_value_md_escapes_pipes() {
        let cell = CellValue::Text("a|b|c".to_string());
        assert_eq!(cell.format_md(), "a\\|b\\|c");
    }

    #[test]
    fn test_column_def() {
        let col = ColumnDef::new("subject", "SUBJECT", 30);
        assert_eq!(col.key, "subject");
        assert_eq!(col.header, "SUBJECT");
        assert_eq!(col.width, 30);
    }

    #[test]
    fn test_table_row_builder() {
        let row = TableRow::new(
            "FOIA-2026-1A2B3C".to_string(),
            "REQ-01JMKF8QPRV3Z5X0D2N4T6W8YA".to_string(),
        )
        .cell("subject", CellValue::Text("Water reports".to_string()))
        .cell("status", CellValue::Status(RequestStatus::Submitted));

        assert_eq!(row.tracking, "FOIA-2026-1A2B3C");
        assert!(row.get("subject").is_some());
        assert!(row.get("status").is_some());
        assert!(row.get("missing").is_none());
    }
}
