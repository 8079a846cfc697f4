//! Fulfillment package entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::{RecordId, RecordPrefix};
use crate::core::store::trunc_to_micros;

/// Release fields supplied by the processing officer at fulfillment
#[derive(Debug, Clone, Default)]
pub struct FulfillmentInput {
    pub documents: Vec<String>,
    pub redactions: Vec<String>,
    pub exemptions_cited: Vec<String>,
    pub response_letter: String,
    pub fulfilled_by: String,
}

/// Records released to the requester in response to a request.
///
/// Created exactly once, when the request is fulfilled; immutable afterwards.
/// Documents are referenced by name only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentPackage {
    /// Unique identifier
    pub package_id: RecordId,

    /// Request this package fulfills
    pub request_id: RecordId,

    /// Released document references, in release order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<String>,

    /// Redactions applied to the released documents
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redactions: Vec<String>,

    /// Statutory exemptions cited for withheld or redacted material
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exemptions_cited: Vec<String>,

    /// Cover letter text accompanying the release
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub response_letter: String,

    pub created_at: DateTime<Utc>,

    /// Officer who assembled the package
    pub fulfilled_by: String,
}

impl FulfillmentPackage {
    pub fn new(
        request_id: RecordId,
        documents: Vec<String>,
        redactions: Vec<String>,
        exemptions_cited: Vec<String>,
        response_letter: String,
        fulfilled_by: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            package_id: RecordId::new(RecordPrefix::Pkg),
            request_id,
            documents,
            redactions,
            exemptions_cited,
            response_letter,
            created_at: trunc_to_micros(created_at),
            fulfilled_by,
        }
    }
}
