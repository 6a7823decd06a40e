use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of a generated record identifier.
pub const RECORD_ID_LEN: usize = 8;

/// A (row, column) position in a text buffer. Ordering is document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: u32,
    pub column: u32,
}

impl Point {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A collapsed region of a buffer, `start` at or before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoldRange {
    pub start: Point,
    pub end: Point,
}

impl FoldRange {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Shorthand for `FoldRange::new(Point::new(..), Point::new(..))`.
    pub fn from_coords(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self::new(Point::new(start_row, start_col), Point::new(end_row, end_col))
    }

    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

impl fmt::Display for FoldRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Opaque token naming one file's fold record, independent of the file's path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// A fresh random id: the first hex characters of a v4 UUID.
    ///
    /// With 8 hex characters the chance of two files in one project sharing an
    /// id is negligible for realistic project sizes; callers that hold a
    /// registry still check for collisions and regenerate.
    pub fn generate() -> Self {
        let simple = Uuid::new_v4().simple().to_string();
        Self(simple[..RECORD_ID_LEN].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ids are bare alphanumeric tokens. Older stores hold base-36 ids that
    /// can be shorter than [`RECORD_ID_LEN`], so only the alphabet is checked.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_alphanumeric())
    }

    /// Name of the document holding this record.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_short_alphanumeric() {
        let id = RecordId::generate();
        assert_eq!(id.as_str().len(), RECORD_ID_LEN);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn points_compare_in_document_order() {
        assert!(Point::new(1, 9) < Point::new(2, 0));
        assert!(Point::new(3, 1) < Point::new(3, 4));
        assert!(FoldRange::from_coords(2, 0, 2, 0).is_ordered());
        assert!(!FoldRange::from_coords(4, 0, 3, 9).is_ordered());
    }

    #[test]
    fn id_validity() {
        assert!(RecordId::generate().is_valid());
        assert!(RecordId::from("k3x9q").is_valid());
        assert!(!RecordId::from("").is_valid());
        assert!(!RecordId::from("../package").is_valid());
        assert!(!RecordId::from("/etc/x").is_valid());
        assert!(!RecordId::from("ab.cd").is_valid());
    }

    #[test]
    fn record_file_name() {
        assert_eq!(RecordId::from("ab12cd34").file_name(), "ab12cd34.json");
    }
}
