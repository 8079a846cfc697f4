//! Record identity: type-prefixed ULIDs plus human-facing tracking numbers

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Record type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordPrefix {
    /// FOIA request
    Req,
    /// Fulfillment package
    Pkg,
    /// Denial record
    Den,
    /// Appeal
    Apl,
    /// Internal note
    Note,
}

impl RecordPrefix {
    /// Get the string representation of the prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordPrefix::Req => "REQ",
            RecordPrefix::Pkg => "PKG",
            RecordPrefix::Den => "DEN",
            RecordPrefix::Apl => "APL",
            RecordPrefix::Note => "NOTE",
        }
    }

    /// Get all valid prefixes
    pub fn all() -> &'static [RecordPrefix] {
        &[
            RecordPrefix::Req,
            RecordPrefix::Pkg,
            RecordPrefix::Den,
            RecordPrefix::Apl,
            RecordPrefix::Note,
        ]
    }
}

impl fmt::Display for RecordPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "REQ" => Ok(RecordPrefix::Req),
            "PKG" => Ok(RecordPrefix::Pkg),
            "DEN" => Ok(RecordPrefix::Den),
            "APL" => Ok(RecordPrefix::Apl),
            "NOTE" => Ok(RecordPrefix::Note),
            _ => Err(IdParseError::InvalidPrefix(s.to_string())),
        }
    }
}

/// A unique record identifier combining a type prefix and ULID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId {
    prefix: RecordPrefix,
    ulid: Ulid,
}

impl RecordId {
    /// Create a new RecordId with the given prefix
    pub fn new(prefix: RecordPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    /// Create a RecordId from a prefix and existing ULID
    pub fn from_parts(prefix: RecordPrefix, ulid: Ulid) -> Self {
        Self { prefix, ulid }
    }

    /// Get the record prefix
    pub fn prefix(&self) -> RecordPrefix {
        self.prefix
    }

    /// Get the ULID component
    pub fn ulid(&self) -> Ulid {
        self.ulid
    }

    /// Parse a RecordId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for RecordId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        let prefix = prefix_str.parse()?;
        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { prefix, ulid })
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing record IDs or tracking numbers
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid record prefix: '{0}' (valid: REQ, PKG, DEN, APL, NOTE)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in record ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),

    #[error("invalid tracking number: '{0}' (expected FOIA-<year>-<6 hex chars>)")]
    InvalidTrackingNumber(String),
}

/// Human-facing tracking number in the form `FOIA-<year>-<6 uppercase hex>`.
///
/// The random suffix carries 24 bits of entropy, fine for the volumes a
/// records desk sees but not guaranteed unique; the requests table enforces
/// uniqueness and submission regenerates on a detected collision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackingNumber {
    year: i32,
    suffix: String,
}

impl TrackingNumber {
    /// Generate a fresh tracking number for the given submission time
    pub fn generate(submitted_at: DateTime<Utc>) -> Self {
        let suffix = format!("{:06X}", rand::rng().random_range(0..=0xFF_FFFFu32));
        Self {
            year: submitted_at.year(),
            suffix,
        }
    }

    /// Submission year embedded in the number
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Parse a TrackingNumber from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FOIA-{}-{}", self.year, self.suffix)
    }
}

impl FromStr for TrackingNumber {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IdParseError::InvalidTrackingNumber(s.to_string());

        let mut parts = s.split('-');
        let (tag, year_str, suffix) = match (parts.next(), parts.next(), parts.next(), parts.next())
        {
            (Some(tag), Some(year), Some(suffix), None) => (tag, year, suffix),
            _ => return Err(invalid()),
        };

        if tag != "FOIA" {
            return Err(invalid());
        }
        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        if year_str.len() != 4 {
            return Err(invalid());
        }
        if suffix.len() != 6
            || !suffix
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase())
        {
            return Err(invalid());
        }

        Ok(Self {
            year,
            suffix: suffix.to_string(),
        })
    }
}

impl Serialize for TrackingNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TrackingNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_id_generation() {
        let id = RecordId::new(RecordPrefix::Req);
        assert!(id.to_string().starts_with("REQ-"));
        assert_eq!(id.to_string().len(), 30); // REQ- (4) + ULID (26) = 30
    }

    #[test]
    fn test_record_id_parsing() {
        let original = RecordId::new(RecordPrefix::Apl);
        let id_str = original.to_string();
        let parsed = RecordId::parse(&id_str).unwrap();
        assert_eq!(parsed.prefix(), RecordPrefix::Apl);
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_record_id_invalid_prefix() {
        let err = RecordId::parse("XXX-01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_record_id_missing_delimiter() {
        let err = RecordId::parse("REQ01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::MissingDelimiter(_)));
    }

    #[test]
    fn test_record_id_invalid_ulid() {
        let err = RecordId::parse("REQ-notaulid").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidUlid(_, _)));
    }

    #[test]
    fn test_all_prefixes_parse() {
        for prefix in RecordPrefix::all() {
            let id = RecordId::new(*prefix);
            let parsed = RecordId::parse(&id.to_string()).unwrap();
            assert_eq!(parsed.prefix(), *prefix);
        }
    }

    #[test]
    fn test_tracking_number_format() {
        let submitted = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        let tn = TrackingNumber::generate(submitted);
        let s = tn.to_string();
        assert!(s.starts_with("FOIA-2026-"));
        assert_eq!(s.len(), 16); // FOIA- (5) + year (4) + - (1) + suffix (6)
        let suffix = &s[10..];
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(suffix, suffix.to_uppercase());
    }

    #[test]
    fn test_tracking_number_roundtrip() {
        let tn = TrackingNumber::generate(Utc::now());
        let parsed = TrackingNumber::parse(&tn.to_string()).unwrap();
        assert_eq!(tn, parsed);
    }

    #[test]
    fn test_tracking_number_rejects_bad_input() {
        for bad in [
            "FOIA-2026",
            "FOIA-2026-",
            "FOIA-2026-XYZPDQ",
            "FOIA-2026-abc123",
            "FOIA-26-1A2B3C",
            "GODA-2026-1A2B3C",
            "FOIA-2026-1A2B3C-extra",
            "",
        ] {
            assert!(
                TrackingNumber::parse(bad).is_err(),
                "expected rejection: {bad}"
            );
        }
    }

    #[test]
    fn test_tracking_number_embeds_submission_year() {
        let submitted = Utc.with_ymd_and_hms(2031, 12, 31, 23, 59, 59).unwrap();
        let tn = TrackingNumber::generate(submitted);
        assert_eq!(tn.year(), 2031);
    }
}
