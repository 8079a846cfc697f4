//! Appeal entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::{RecordId, RecordPrefix};
use crate::core::store::trunc_to_micros;

/// Appeal disposition.
///
/// Decisions are free-form strings; `granted` (exact match) is the one value
/// with lifecycle significance, reopening the parent request. Unrecognized
/// decisions round-trip verbatim through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppealStatus {
    /// Filed, not yet decided
    Pending,
    /// Denial overturned; parent request reopens for processing
    Granted,
    /// Denial upheld
    Denied,
    /// Any other decision string, preserved verbatim
    Other(String),
}

impl AppealStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, AppealStatus::Pending)
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, AppealStatus::Granted)
    }
}

impl From<&str> for AppealStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => AppealStatus::Pending,
            "granted" => AppealStatus::Granted,
            "denied" => AppealStatus::Denied,
            _ => AppealStatus::Other(s.to_string()),
        }
    }
}

impl From<String> for AppealStatus {
    fn from(s: String) -> Self {
        AppealStatus::from(s.as_str())
    }
}

impl std::fmt::Display for AppealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppealStatus::Pending => write!(f, "pending"),
            AppealStatus::Granted => write!(f, "granted"),
            AppealStatus::Denied => write!(f, "denied"),
            AppealStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for AppealStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AppealStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AppealStatus::from(s))
    }
}

/// An appeal against a denial. Filed pending; decided exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appeal {
    /// Unique identifier
    pub appeal_id: RecordId,

    /// Request whose denial is appealed
    pub request_id: RecordId,

    /// Argument for overturning the denial
    pub grounds: String,

    /// Who filed the appeal
    pub appellant: String,

    pub submitted_at: DateTime<Utc>,

    /// Current disposition; the decision verbatim once decided
    pub status: AppealStatus,

    /// Decision string, set once when the appeal is decided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

impl Appeal {
    pub fn new(
        request_id: RecordId,
        appellant: String,
        grounds: String,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            appeal_id: RecordId::new(RecordPrefix::Apl),
            request_id,
            grounds,
            appellant,
            submitted_at: trunc_to_micros(submitted_at),
            status: AppealStatus::Pending,
            decision: None,
            decided_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_exact_match_only() {
        assert_eq!(AppealStatus::from("granted"), AppealStatus::Granted);
        assert_eq!(
            AppealStatus::from("Granted"),
            AppealStatus::Other("Granted".to_string())
        );
        assert_eq!(
            AppealStatus::from("remanded"),
            AppealStatus::Other("remanded".to_string())
        );
        assert!(!AppealStatus::from("GRANTED").is_granted());
    }

    #[test]
    fn test_status_display_roundtrip() {
        for s in ["pending", "granted", "denied", "remanded for review"] {
            assert_eq!(AppealStatus::from(s).to_string(), s);
        }
    }

    #[test]
    fn test_new_appeal_is_pending() {
        let appeal = Appeal::new(
            RecordId::new(RecordPrefix::Req),
            "John Doe".to_string(),
            "The request is specific enough.".to_string(),
            Utc::now(),
        );
        assert!(appeal.status.is_pending());
        assert!(appeal.decision.is_none());
        assert!(appeal.decided_at.is_none());
    }
}
