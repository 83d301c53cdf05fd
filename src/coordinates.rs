use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::error::RangeError;

/// A 1-based `(position, length)` range into a string, rendered as `@N` or
/// `@NxL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coordinates {
    pub at: usize,
    pub run: usize,
}

impl Coordinates {
    pub fn new(at: usize, run: usize) -> Self {
        Self { at, run }
    }

    /// Zero-based, end-exclusive character range.
    pub fn span(&self) -> std::ops::Range<usize> {
        let start = self.at.saturating_sub(1);
        start..start.saturating_add(self.run)
    }

    /// Whether the two ranges share at least one position. Equal starts
    /// always count as overlapping.
    pub fn overlaps(&self, other: &Coordinates) -> bool {
        self.at == other.at
            || (self.at < other.at && self.at.saturating_add(self.run) > other.at)
            || (other.at < self.at && other.at.saturating_add(other.run) > self.at)
    }
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.at)?;
        if self.run > 1 {
            write!(f, "x{}", self.run)?;
        }
        Ok(())
    }
}

/// Checks that `1 <= at <= len(input)` and `at + run - 1 <= len(input)`,
/// counting characters.
pub fn validate_range(input: &str, at: usize, run: usize) -> Result<(), RangeError> {
    check_range(input.chars().count(), at, run)
}

pub(crate) fn check_range(len: usize, at: usize, run: usize) -> Result<(), RangeError> {
    if at < 1 || at > len {
        return Err(RangeError::Position { at, len });
    }
    if at.saturating_add(run) - 1 > len {
        return Err(RangeError::Length { at, run, len });
    }
    Ok(())
}
