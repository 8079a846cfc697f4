//! Read-side reporting over the request store
//!
//! Overdue scans, per-request detail assembly, per-agency statistics, and the
//! printable case report.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::error::Result;
use crate::core::store::{queries, Store};
use crate::entities::{Appeal, Denial, FulfillmentPackage, Note, Request, RequestStatus};

/// An unresolved request past its deadline
#[derive(Debug, Clone, Serialize)]
pub struct OverdueRequest {
    #[serde(flatten)]
    pub request: Request,

    /// Whole days elapsed past the deadline at scan time
    pub days_overdue: i64,
}

/// A request joined with every dependent record
#[derive(Debug, Clone, Serialize)]
pub struct RequestDetails {
    #[serde(flatten)]
    pub request: Request,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment: Option<FulfillmentPackage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub denial: Option<Denial>,

    pub appeals: Vec<Appeal>,
    pub notes: Vec<Note>,
}

/// Request counts for every status, including zeroes
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusBreakdown {
    pub submitted: i64,
    pub processing: i64,
    pub fulfilled: i64,
    pub denied: i64,
    pub appealed: i64,
    pub closed: i64,
}

impl StatusBreakdown {
    pub fn count(&self, status: RequestStatus) -> i64 {
        match status {
            RequestStatus::Submitted => self.submitted,
            RequestStatus::Processing => self.processing,
            RequestStatus::Fulfilled => self.fulfilled,
            RequestStatus::Denied => self.denied,
            RequestStatus::Appealed => self.appealed,
            RequestStatus::Closed => self.closed,
        }
    }

    fn set(&mut self, status: RequestStatus, count: i64) {
        match status {
            RequestStatus::Submitted => self.submitted = count,
            RequestStatus::Processing => self.processing = count,
            RequestStatus::Fulfilled => self.fulfilled = count,
            RequestStatus::Denied => self.denied = count,
            RequestStatus::Appealed => self.appealed = count,
            RequestStatus::Closed => self.closed = count,
        }
    }
}

/// Aggregate figures for one agency, or the whole desk
#[derive(Debug, Clone, Serialize)]
pub struct AgencyStats {
    /// Agency name, or `all`
    pub agency: String,
    pub total_requests: i64,
    pub by_status: StatusBreakdown,

    /// Unresolved requests past their deadline
    pub overdue: usize,

    /// Percent of requests fulfilled, to two decimals
    pub fulfillment_rate: f64,

    /// Percent of requests denied, to two decimals
    pub denial_rate: f64,
}

/// Scan for unresolved requests past their deadline, most overdue first
pub fn overdue(store: &Store, now: DateTime<Utc>) -> Result<Vec<OverdueRequest>> {
    let requests = queries::overdue_requests(store.conn(), now)?;
    Ok(requests
        .into_iter()
        .map(|request| {
            let days_overdue = request.days_overdue(now);
            OverdueRequest {
                request,
                days_overdue,
            }
        })
        .collect())
}

/// Assemble a request with its fulfillment, denial, appeals, and notes
pub fn details(store: &Store, key: &str) -> Result<RequestDetails> {
    let conn = store.conn();
    let request = queries::find_request(conn, key)?;
    let fulfillment = queries::fulfillment_for_request(conn, &request.request_id)?;
    let denial = queries::denial_for_request(conn, &request.request_id)?;
    let appeals = queries::appeals_for_request(conn, &request.request_id)?;
    let notes = queries::notes_for_request(conn, &request.request_id)?;
    Ok(RequestDetails {
        request,
        fulfillment,
        denial,
        appeals,
        notes,
    })
}

/// Aggregate statistics, desk-wide or for one agency
pub fn agency_stats(
    store: &Store,
    agency: Option<&str>,
    now: DateTime<Utc>,
) -> Result<AgencyStats> {
    let conn = store.conn();
    let total = queries::count_requests(conn, agency)?;
    let mut by_status = StatusBreakdown::default();
    for (status, count) in queries::status_counts(conn, agency)? {
        by_status.set(status, count);
    }
    let overdue = queries::overdue_requests(conn, now)?
        .into_iter()
        .filter(|r| agency.map_or(true, |a| r.agency == a))
        .count();
    Ok(AgencyStats {
        agency: agency.unwrap_or("all").to_string(),
        total_requests: total,
        by_status,
        overdue,
        fulfillment_rate: rate(by_status.fulfilled, total),
        denial_rate: rate(by_status.denied, total),
    })
}

/// Render the printable case report
pub fn render_report(details: &RequestDetails, now: DateTime<Utc>) -> String {
    let request = &details.request;
    let overdue_str = if request.is_overdue(now) {
        format!(" (OVERDUE by {} days)", request.days_overdue(now))
    } else {
        String::new()
    };

    let mut lines = vec![
        "=".repeat(65),
        "FOIA REQUEST REPORT".to_string(),
        "=".repeat(65),
        format!("Tracking #    : {}", request.tracking_number),
        format!("Request ID    : {}", request.request_id),
        format!(
            "Requester     : {} <{}>",
            request.requester_name, request.requester_email
        ),
        format!("Agency        : {}", request.agency),
        format!("Subject       : {}", request.subject),
        format!("Status        : {}", request.status.to_string().to_uppercase()),
        format!("Submitted     : {}", request.submitted_at.format("%Y-%m-%d")),
        format!(
            "Due Date      : {}{}",
            request.due_at.format("%Y-%m-%d"),
            overdue_str
        ),
        format!(
            "Assigned To   : {}",
            request
                .assigned_to
                .as_deref()
                .filter(|a| !a.is_empty())
                .unwrap_or("Unassigned")
        ),
        format!(
            "Fee Waived    : {}",
            if request.fee_waived { "Yes" } else { "No" }
        ),
        String::new(),
        "DESCRIPTION".to_string(),
        "-".repeat(40),
        request.description.clone(),
        String::new(),
    ];

    if let Some(ref fulfillment) = details.fulfillment {
        lines.push("FULFILLMENT".to_string());
        lines.push("-".repeat(40));
        lines.push(format!(
            "  Documents : {}",
            join_or_none(&fulfillment.documents)
        ));
        lines.push(format!("  Redactions: {} items", fulfillment.redactions.len()));
        lines.push(format!(
            "  Exemptions: {}",
            join_or_none(&fulfillment.exemptions_cited)
        ));
    }

    if let Some(ref denial) = details.denial {
        lines.push("DENIAL".to_string());
        lines.push("-".repeat(40));
        lines.push(format!("  Reason    : {}", denial.reason));
        lines.push(format!("  Exemptions: {}", join_or_none(&denial.exemptions)));
    }

    if !details.appeals.is_empty() {
        lines.push(String::new());
        lines.push(format!("APPEALS ({}):", details.appeals.len()));
        lines.push("-".repeat(40));
        for appeal in &details.appeals {
            lines.push(format!(
                "  [{}] {}",
                appeal.status.to_string().to_uppercase(),
                clip(&appeal.grounds, 80)
            ));
        }
    }

    if !details.notes.is_empty() {
        lines.push(String::new());
        lines.push(format!("INTERNAL NOTES ({})", details.notes.len()));
        lines.push("-".repeat(40));
        // Only the three most recent notes appear on the report
        let start = details.notes.len().saturating_sub(3);
        for note in &details.notes[start..] {
            lines.push(format!(
                "  {} [{}]: {}",
                note.created_at.format("%Y-%m-%d"),
                note.author,
                clip(&note.content, 100)
            ));
        }
    }

    lines.push("=".repeat(65));
    lines.join("\n")
}

fn rate(count: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = count as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

fn join_or_none(items: &[String]) -> String {
    let joined = items.join(", ");
    if joined.is_empty() {
        "None".to_string()
    } else {
        joined
    }
}

/// First `max` characters, no ellipsis
fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
