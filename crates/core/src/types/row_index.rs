//! Spreadsheet row index type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// 1-based position of a record in the backing spreadsheet.
///
/// Row 1 is the header, so the first catalog item lives at row 2. The index
/// doubles as the record's mutation key for updates and deletes.
///
/// # Stability
///
/// A `RowIndex` is **not** stable across deletes: removing a row shifts every
/// later row down by one, silently invalidating any index captured before the
/// delete. Callers must refetch the catalog after any mutation before issuing
/// another one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u32", into = "u32")]
pub struct RowIndex(u32);

/// Error for a row index of 0, which does not exist in the 1-based sheet
/// coordinate space.
#[derive(thiserror::Error, Debug, Clone)]
#[error("row index must be at least 1")]
pub struct InvalidRowIndex;

impl RowIndex {
    /// The row holding the first catalog item (row 1 is the header).
    pub const FIRST_ITEM: Self = Self(2);

    /// Create a `RowIndex`. Returns `None` for 0.
    #[must_use]
    pub const fn new(index: u32) -> Option<Self> {
        if index == 0 { None } else { Some(Self(index)) }
    }

    /// The 1-based row number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The 0-based index used by structural sheet operations
    /// (`deleteDimension` takes `startIndex = row - 1`).
    #[must_use]
    pub const fn zero_based(self) -> u32 {
        self.0 - 1
    }
}

impl TryFrom<u32> for RowIndex {
    type Error = InvalidRowIndex;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(InvalidRowIndex)
    }
}

impl From<RowIndex> for u32 {
    fn from(index: RowIndex) -> Self {
        index.0
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_rejected() {
        assert!(RowIndex::new(0).is_none());
        assert!(RowIndex::new(1).is_some());
        assert!(RowIndex::try_from(0_u32).is_err());
    }

    #[test]
    fn test_zero_based_conversion() {
        let row = RowIndex::new(2).unwrap();
        assert_eq!(row.zero_based(), 1);
        assert_eq!(RowIndex::FIRST_ITEM.get(), 2);
    }

    #[test]
    fn test_serde_is_transparent_and_validated() {
        let row = RowIndex::new(7).unwrap();
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, "7");

        let parsed: RowIndex = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, row);

        // 0 is rejected at the wire
        assert!(serde_json::from_str::<RowIndex>("0").is_err());
    }
}
