//! List-column encoding
//!
//! Document lists, redaction logs, and exemption citations are stored as
//! JSON arrays in TEXT columns.

use crate::core::error::Result;

pub(crate) fn encode_list(items: &[String]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

/// Decode a stored list column, reporting the column index on failure
pub(crate) fn decode_list(idx: usize, raw: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_encodes_to_empty_array() {
        assert_eq!(encode_list(&[]).unwrap(), "[]");
        assert!(decode_list(0, "[]").unwrap().is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let items = vec![
            "report_2023.pdf".to_string(),
            "appendix.pdf".to_string(),
            "cover_letter.pdf".to_string(),
        ];
        let encoded = encode_list(&items).unwrap();
        assert_eq!(decode_list(0, &encoded).unwrap(), items);
    }

    #[test]
    fn test_special_characters_survive() {
        let items = vec!["Exemption 7(C)".to_string(), "names, \"quoted\"".to_string()];
        let encoded = encode_list(&items).unwrap();
        assert_eq!(decode_list(0, &encoded).unwrap(), items);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(decode_list(0, "not json").is_err());
        assert!(decode_list(0, "{\"a\": 1}").is_err());
    }
}
