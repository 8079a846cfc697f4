//! Internal note entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::{RecordId, RecordPrefix};
use crate::core::store::trunc_to_micros;

/// An internal case note on a request. Append-only, ordered by creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub note_id: RecordId,

    /// Request the note is attached to
    pub request_id: RecordId,

    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(
        request_id: RecordId,
        author: String,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            note_id: RecordId::new(RecordPrefix::Note),
            request_id,
            author,
            content,
            created_at: trunc_to_micros(created_at),
        }
    }
}
