//! FOIA request entity type

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::{RecordId, RecordPrefix, TrackingNumber};
use crate::core::store::trunc_to_micros;

/// Request status values
///
/// Phase flow: submitted → processing → fulfilled | denied → appealed →
/// processing (on a granted appeal) | closed. `fulfilled` and `closed` are
/// terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum RequestStatus {
    #[default]
    Submitted,
    Processing,
    Fulfilled,
    Denied,
    Appealed,
    Closed,
}

impl RequestStatus {
    /// All status values in phase order
    pub fn all() -> &'static [RequestStatus] {
        &[
            RequestStatus::Submitted,
            RequestStatus::Processing,
            RequestStatus::Fulfilled,
            RequestStatus::Denied,
            RequestStatus::Appealed,
            RequestStatus::Closed,
        ]
    }

    /// Statuses no operation transitions out of
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Fulfilled | RequestStatus::Closed)
    }

    /// Statuses that stop the deadline clock; resolved requests are never
    /// counted as overdue
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            RequestStatus::Fulfilled | RequestStatus::Denied | RequestStatus::Closed
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Submitted => write!(f, "submitted"),
            RequestStatus::Processing => write!(f, "processing"),
            RequestStatus::Fulfilled => write!(f, "fulfilled"),
            RequestStatus::Denied => write!(f, "denied"),
            RequestStatus::Appealed => write!(f, "appealed"),
            RequestStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "submitted" => Ok(RequestStatus::Submitted),
            "processing" => Ok(RequestStatus::Processing),
            "fulfilled" => Ok(RequestStatus::Fulfilled),
            "denied" => Ok(RequestStatus::Denied),
            "appealed" => Ok(RequestStatus::Appealed),
            "closed" => Ok(RequestStatus::Closed),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// Intake fields supplied by the requester at submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestIntake {
    pub requester_name: String,
    pub requester_email: String,
    pub agency: String,
    pub subject: String,
    pub description: String,

    /// Whether processing fees are waived for this request
    #[serde(default)]
    pub fee_waived: bool,
}

/// A public-records request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Unique identifier
    pub request_id: RecordId,

    /// Human-facing tracking number (unique)
    pub tracking_number: TrackingNumber,

    pub requester_name: String,
    pub requester_email: String,

    /// Agency the records are requested from
    pub agency: String,

    pub subject: String,
    pub description: String,

    #[serde(default)]
    pub fee_waived: bool,

    /// Current status
    #[serde(default)]
    pub status: RequestStatus,

    /// Submission timestamp
    pub submitted_at: DateTime<Utc>,

    /// Response deadline, fixed at submission and never recomputed
    pub due_at: DateTime<Utc>,

    /// Set once, when the request is fulfilled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfilled_at: Option<DateTime<Utc>>,

    /// Processing officer, if assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

impl Request {
    /// Create a new request from intake fields, due after the given response
    /// window
    pub fn new(intake: RequestIntake, now: DateTime<Utc>, response_window: Duration) -> Self {
        // Clamp to stored precision so this snapshot equals later reads
        let now = trunc_to_micros(now);
        Self {
            request_id: RecordId::new(RecordPrefix::Req),
            tracking_number: TrackingNumber::generate(now),
            requester_name: intake.requester_name,
            requester_email: intake.requester_email,
            agency: intake.agency,
            subject: intake.subject,
            description: intake.description,
            fee_waived: intake.fee_waived,
            status: RequestStatus::default(),
            submitted_at: now,
            due_at: now + response_window,
            fulfilled_at: None,
            assigned_to: None,
        }
    }

    /// Whether the deadline has passed and the request is still unresolved
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        now > self.due_at && !self.status.is_resolved()
    }

    /// Whole days elapsed past the deadline
    pub fn days_overdue(&self, now: DateTime<Utc>) -> i64 {
        (now - self.due_at).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn intake() -> RequestIntake {
        RequestIntake {
            requester_name: "John Doe".to_string(),
            requester_email: "john@example.com".to_string(),
            agency: "EPA".to_string(),
            subject: "Air Quality Reports".to_string(),
            description: "Request for annual air quality data.".to_string(),
            fee_waived: false,
        }
    }

    #[test]
    fn test_due_date_fixed_at_submission() {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let req = Request::new(intake(), now, Duration::days(20));
        assert_eq!(req.due_at - req.submitted_at, Duration::days(20));
        assert_eq!(req.submitted_at, now);
    }

    #[test]
    fn test_new_request_starts_submitted() {
        let req = Request::new(intake(), Utc::now(), Duration::days(20));
        assert_eq!(req.status, RequestStatus::Submitted);
        assert!(req.fulfilled_at.is_none());
        assert!(req.assigned_to.is_none());
    }

    #[test]
    fn test_overdue_only_when_past_due_and_unresolved() {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let mut req = Request::new(intake(), now, Duration::days(20));

        assert!(!req.is_overdue(now + Duration::days(19)));
        assert!(req.is_overdue(now + Duration::days(25)));
        assert_eq!(req.days_overdue(now + Duration::days(25)), 5);

        req.status = RequestStatus::Fulfilled;
        assert!(!req.is_overdue(now + Duration::days(25)));
        req.status = RequestStatus::Denied;
        assert!(!req.is_overdue(now + Duration::days(25)));
        req.status = RequestStatus::Closed;
        assert!(!req.is_overdue(now + Duration::days(25)));
        req.status = RequestStatus::Appealed;
        assert!(req.is_overdue(now + Duration::days(25)));
    }

    #[test]
    fn test_status_display_parse_roundtrip() {
        for status in RequestStatus::all() {
            let parsed: RequestStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, *status);
        }
        assert!("pending".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn test_request_json_roundtrip() {
        let req = Request::new(intake(), Utc::now(), Duration::days(20));
        let json = serde_json::to_string(&req).unwrap();
        let parsed: Request = serde_json::from_str(&json).unwrap();
        assert_eq!(req.request_id, parsed.request_id);
        assert_eq!(req.tracking_number, parsed.tracking_number);
        assert_eq!(req.due_at, parsed.due_at);
        assert_eq!(req.status, parsed.status);
    }
}
