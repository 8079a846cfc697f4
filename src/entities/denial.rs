//! Denial entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::{RecordId, RecordPrefix};
use crate::core::store::trunc_to_micros;

/// A denial decision on a request. Created on denial; immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Denial {
    /// Unique identifier
    pub denial_id: RecordId,

    /// Request denied
    pub request_id: RecordId,

    /// Stated reason for the denial
    pub reason: String,

    /// Statutory exemptions cited
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exemptions: Vec<String>,

    pub denied_by: String,
    pub denied_at: DateTime<Utc>,
}

impl Denial {
    pub fn new(
        request_id: RecordId,
        reason: String,
        exemptions: Vec<String>,
        denied_by: String,
        denied_at: DateTime<Utc>,
    ) -> Self {
        Self {
            denial_id: RecordId::new(RecordPrefix::Den),
            request_id,
            reason,
            exemptions,
            denied_by,
            denied_at: trunc_to_micros(denied_at),
        }
    }
}
