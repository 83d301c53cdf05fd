use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::diff::{diff_with, DiffOptions};
use crate::error::EditError;
use crate::operations::{parse_operation, EditOperation};

/// An ordered list of operations, as stored alongside an annotated word.
///
/// Each operation applies to the output of the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EditScript {
    operations: Vec<EditOperation>,
}

impl EditScript {
    pub fn new(operations: Vec<EditOperation>) -> Self {
        Self { operations }
    }

    /// Parses every text, failing on the first one that is not a valid
    /// operation.
    pub fn parse<I, S>(texts: I) -> Result<Self, EditError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                parse_operation(text.as_ref()).map_err(|source| EditError::Parse { index, source })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Parses what can be parsed, logging and skipping the rest.
    pub fn parse_lenient<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let operations = texts
            .into_iter()
            .enumerate()
            .filter_map(|(index, text)| match parse_operation(text.as_ref()) {
                Ok(operation) => Some(operation),
                Err(e) => {
                    log::warn!("skipping operation #{index}: {e}");
                    None
                }
            })
            .collect();
        Self::new(operations)
    }

    /// The script [`diff_with`] derives from `source` to `target`.
    pub fn from_diff(source: &str, target: &str, options: DiffOptions) -> Self {
        Self::new(diff_with(source, target, options))
    }

    pub fn operations(&self) -> &[EditOperation] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<EditOperation> {
        self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOperation> {
        self.operations.iter()
    }

    /// Runs every operation in order against the previous output.
    pub fn execute(&self, input: &str) -> Result<String, EditError> {
        self.operations
            .iter()
            .enumerate()
            .try_fold(input.to_string(), |text, (index, operation)| {
                operation
                    .execute(&text)
                    .map_err(|source| EditError::Execute {
                        index,
                        operation: operation.to_string(),
                        source,
                    })
            })
    }

    /// Number of occurrences of each tag, sorted by tag.
    pub fn tag_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for tag in self.operations.iter().flat_map(|operation| operation.tags()) {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// The canonical notation of every operation.
    pub fn to_strings(&self) -> Vec<String> {
        self.operations.iter().map(ToString::to_string).collect()
    }
}

impl Display for EditScript {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, operation) in self.operations.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{operation}")?;
        }
        Ok(())
    }
}

impl FromIterator<EditOperation> for EditScript {
    fn from_iter<T: IntoIterator<Item = EditOperation>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for EditScript {
    type Item = EditOperation;
    type IntoIter = std::vec::IntoIter<EditOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a EditOperation;
    type IntoIter = std::slice::Iter<'a, EditOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}
