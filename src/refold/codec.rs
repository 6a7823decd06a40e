//! # Range Codec
//!
//! Converts a file's folds to and from the text stored in `<id>.json`.
//!
//! The document is a JSON array; each element has `start` and `end` objects
//! with integer `row`/`column` fields:
//!
//! ```text
//! [{"start":{"row":3,"column":0},"end":{"row":9,"column":1}}]
//! ```
//!
//! Decoding validates the shape (missing fields, negative or non-integer
//! coordinates, `start` after `end`) instead of trusting the file.

use crate::error::{FoldsError, Result};
use crate::model::{FoldRange, RecordId};

pub fn encode(ranges: &[FoldRange]) -> Result<String> {
    serde_json::to_string(ranges).map_err(FoldsError::Serialization)
}

/// Decode the record stored for `id`. Ranges come back in the order they were written.
pub fn decode(id: &RecordId, text: &str) -> Result<Vec<FoldRange>> {
    let ranges: Vec<FoldRange> =
        serde_json::from_str(text).map_err(|e| FoldsError::MalformedRecord {
            id: id.clone(),
            reason: e.to_string(),
        })?;

    if let Some(bad) = ranges.iter().find(|r| !r.is_ordered()) {
        return Err(FoldsError::MalformedRecord {
            id: id.clone(),
            reason: format!("fold {} ends before it starts", bad),
        });
    }

    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> RecordId {
        RecordId::from("ab12cd34")
    }

    #[test]
    fn empty_encodes_to_empty_array() {
        assert_eq!(encode(&[]).unwrap(), "[]");
        assert!(decode(&id(), "[]").unwrap().is_empty());
    }

    #[test]
    fn encoding_uses_start_end_row_column() {
        let text = encode(&[FoldRange::from_coords(3, 0, 9, 1)]).unwrap();
        assert_eq!(
            text,
            r#"[{"start":{"row":3,"column":0},"end":{"row":9,"column":1}}]"#
        );
    }

    #[test]
    fn roundtrip_preserves_order() {
        let ranges = vec![
            FoldRange::from_coords(10, 2, 20, 0),
            FoldRange::from_coords(0, 0, 1, 0),
            FoldRange::from_coords(0, 0, 1, 0),
            FoldRange::from_coords(4, 4, 4, 8),
        ];
        let text = encode(&ranges).unwrap();
        assert_eq!(decode(&id(), &text).unwrap(), ranges);
    }

    #[test]
    fn decodes_legacy_spacing() {
        // Older writers put a space after the row separator
        let text = r#"[{"start":{"row":1, "column":2},"end":{"row":3, "column":4}}]"#;
        assert_eq!(
            decode(&id(), text).unwrap(),
            vec![FoldRange::from_coords(1, 2, 3, 4)]
        );
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = decode(&id(), "[{not json").unwrap_err();
        assert!(
            matches!(err, FoldsError::MalformedRecord { id: ref bad, .. } if bad.as_str() == "ab12cd34")
        );
    }

    #[test]
    fn missing_field_is_malformed() {
        let err = decode(&id(), r#"[{"start":{"row":1,"column":0}}]"#).unwrap_err();
        assert!(matches!(err, FoldsError::MalformedRecord { .. }));
    }

    #[test]
    fn negative_coordinate_is_malformed() {
        let text = r#"[{"start":{"row":-1,"column":0},"end":{"row":1,"column":0}}]"#;
        assert!(matches!(
            decode(&id(), text),
            Err(FoldsError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn reversed_range_is_malformed() {
        let text = r#"[{"start":{"row":5,"column":0},"end":{"row":1,"column":0}}]"#;
        let err = decode(&id(), text).unwrap_err();
        assert!(err.to_string().contains("ends before it starts"));
    }

    #[test]
    fn object_instead_of_array_is_malformed() {
        assert!(decode(&id(), "{}").is_err());
    }
}
