//! Ordering types for the sort step.

use serde::Deserialize;
use serde::Serialize;

/// Sort direction for the active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns `true` for descending order.
    pub fn is_descending(self) -> bool {
        matches!(self, Direction::Desc)
    }

    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}
