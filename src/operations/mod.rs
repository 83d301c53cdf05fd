mod display;
mod execute;
mod grammar;

use fieldwork::Fieldwork;
use serde::Serialize;
use strum::{Display, EnumString, IntoStaticStr, VariantNames};

use crate::coordinates::Coordinates;
use crate::error::{AnnotationError, RangeError};

pub use grammar::{parse_as, parse_operation};

/// The closed set of edit operation kinds.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Delete,
    InsertBefore,
    InsertAfter,
    Replace,
    MoveBefore,
    MoveAfter,
    Swap,
}

impl OperationType {
    /// Human-readable name, as used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            OperationType::Delete => "delete",
            OperationType::InsertBefore => "insert-before",
            OperationType::InsertAfter => "insert-after",
            OperationType::Replace => "replace",
            OperationType::MoveBefore => "move-before",
            OperationType::MoveAfter => "move-after",
            OperationType::Swap => "swap",
        }
    }
}

/// Variant-specific payload of an [`EditOperation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Variant {
    Delete,
    InsertBefore {
        text: String,
    },
    InsertAfter {
        text: String,
    },
    Replace {
        replacement_text: String,
    },
    MoveBefore {
        to: usize,
    },
    MoveAfter {
        to: usize,
    },
    Swap {
        at2: usize,
        run2: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        input_text2: Option<String>,
    },
}

impl Variant {
    pub fn operation_type(&self) -> OperationType {
        match self {
            Variant::Delete => OperationType::Delete,
            Variant::InsertBefore { .. } => OperationType::InsertBefore,
            Variant::InsertAfter { .. } => OperationType::InsertAfter,
            Variant::Replace { .. } => OperationType::Replace,
            Variant::MoveBefore { .. } => OperationType::MoveBefore,
            Variant::MoveAfter { .. } => OperationType::MoveAfter,
            Variant::Swap { .. } => OperationType::Swap,
        }
    }
}

/// A single validated edit operation.
///
/// Values are only produced by the checked constructors below, by
/// [`parse_operation`], or by the diff engine, so the invariants of each
/// variant (`at >= 1` for everything but insertions, `run >= 1`, `to >= 1`)
/// hold for every instance. Bounds against a concrete string are checked by
/// [`EditOperation::execute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Fieldwork)]
#[fieldwork(get)]
pub struct EditOperation {
    /// The text the operation claims to affect. Descriptive only.
    #[fieldwork(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    input_text: Option<String>,

    /// 1-based start position. Insertions use 0 for the string edges.
    #[fieldwork(get(copy))]
    at: usize,

    /// Number of characters affected, starting at `at`.
    #[fieldwork(get(copy))]
    run: usize,

    /// Free text note.
    #[fieldwork(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,

    /// Short identifiers attached to the operation.
    #[fieldwork(skip)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,

    /// Variant tag and payload.
    #[serde(flatten)]
    variant: Variant,
}

fn at_least(field: &'static str, value: usize, min: usize) -> Result<(), RangeError> {
    if value < min {
        Err(RangeError::Invalid { field, value, min })
    } else {
        Ok(())
    }
}

impl EditOperation {
    /// Builds an operation from values already known to be valid.
    pub(crate) fn new_unchecked(at: usize, run: usize, variant: Variant) -> Self {
        Self {
            input_text: None,
            at,
            run,
            note: None,
            tags: Vec::new(),
            variant,
        }
    }

    pub fn delete(at: usize, run: usize) -> Result<Self, RangeError> {
        at_least("at", at, 1)?;
        at_least("run", run, 1)?;
        Ok(Self::new_unchecked(at, run, Variant::Delete))
    }

    /// Inserts `text` before the `at`-th character, or at the start when
    /// `at` is 0.
    pub fn insert_before(at: usize, text: impl Into<String>) -> Self {
        Self::new_unchecked(at, 1, Variant::InsertBefore { text: text.into() })
    }

    /// Inserts `text` after the `at`-th character, or at the end when `at`
    /// is 0.
    pub fn insert_after(at: usize, text: impl Into<String>) -> Self {
        Self::new_unchecked(at, 1, Variant::InsertAfter { text: text.into() })
    }

    pub fn replace(
        at: usize,
        run: usize,
        replacement_text: impl Into<String>,
    ) -> Result<Self, RangeError> {
        at_least("at", at, 1)?;
        at_least("run", run, 1)?;
        Ok(Self::new_unchecked(
            at,
            run,
            Variant::Replace {
                replacement_text: replacement_text.into(),
            },
        ))
    }

    pub fn move_before(at: usize, run: usize, to: usize) -> Result<Self, RangeError> {
        at_least("at", at, 1)?;
        at_least("run", run, 1)?;
        at_least("to", to, 1)?;
        Ok(Self::new_unchecked(at, run, Variant::MoveBefore { to }))
    }

    pub fn move_after(at: usize, run: usize, to: usize) -> Result<Self, RangeError> {
        at_least("at", at, 1)?;
        at_least("run", run, 1)?;
        at_least("to", to, 1)?;
        Ok(Self::new_unchecked(at, run, Variant::MoveAfter { to }))
    }

    /// Exchanges `[at, at + run)` with `[at2, at2 + run2)`. Overlap is
    /// checked when the swap is executed.
    pub fn swap(at: usize, run: usize, at2: usize, run2: usize) -> Result<Self, RangeError> {
        at_least("at", at, 1)?;
        at_least("run", run, 1)?;
        at_least("at2", at2, 1)?;
        at_least("run2", run2, 1)?;
        Ok(Self::new_unchecked(
            at,
            run,
            Variant::Swap {
                at2,
                run2,
                input_text2: None,
            },
        ))
    }

    /// Sets the descriptive input text. An empty text clears it.
    pub fn with_input_text(mut self, input_text: impl Into<String>) -> Self {
        self.input_text = non_empty(input_text.into());
        self
    }

    /// Sets the descriptive text of a swap's second range. An empty text
    /// clears it; other variants have no second range and are returned
    /// unchanged.
    pub fn with_input_text2(mut self, input_text: impl Into<String>) -> Self {
        if let Variant::Swap { input_text2, .. } = &mut self.variant {
            *input_text2 = non_empty(input_text.into());
        }
        self
    }

    /// Sets the note, trimmed. A blank note clears it.
    ///
    /// Notes may not contain `(`, `)`, `[` or `]`, which delimit notes and
    /// tags in the notation.
    pub fn with_note(mut self, note: impl Into<String>) -> Result<Self, AnnotationError> {
        let note = note.into();
        reject_delimiters("note", &note)?;
        self.note = non_empty(note.trim().to_string());
        Ok(self)
    }

    /// Replaces the tags. Tags are whitespace-free tokens, so each item is
    /// split on whitespace. The note and tag delimiters are rejected as in
    /// [`EditOperation::with_note`].
    pub fn with_tags<I, S>(mut self, tags: I) -> Result<Self, AnnotationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut split = Vec::new();
        for tag in tags {
            reject_delimiters("tag", tag.as_ref())?;
            split.extend(tag.as_ref().split_whitespace().map(String::from));
        }
        self.tags = split;
        Ok(self)
    }

    /// Copies a note and tags taken from another operation, where they were
    /// already checked.
    pub(crate) fn with_annotations_of(mut self, note: Option<&str>, tags: &[String]) -> Self {
        self.note = note.map(String::from);
        self.tags = tags.to_vec();
        self
    }

    pub fn operation_type(&self) -> OperationType {
        self.variant.operation_type()
    }

    pub fn input_text(&self) -> Option<&str> {
        self.input_text.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.at, self.run)
    }

    /// The text brought in by an insertion or replacement.
    pub fn text(&self) -> Option<&str> {
        match &self.variant {
            Variant::InsertBefore { text } | Variant::InsertAfter { text } => Some(text),
            Variant::Replace { replacement_text } => Some(replacement_text),
            _ => None,
        }
    }

    /// Destination of a move.
    pub fn to(&self) -> Option<usize> {
        match self.variant {
            Variant::MoveBefore { to } | Variant::MoveAfter { to } => Some(to),
            _ => None,
        }
    }

    /// Second range of a swap.
    pub fn second(&self) -> Option<Coordinates> {
        match self.variant {
            Variant::Swap { at2, run2, .. } => Some(Coordinates::new(at2, run2)),
            _ => None,
        }
    }

    pub fn input_text2(&self) -> Option<&str> {
        match &self.variant {
            Variant::Swap { input_text2, .. } => input_text2.as_deref(),
            _ => None,
        }
    }
}

fn reject_delimiters(field: &'static str, text: &str) -> Result<(), AnnotationError> {
    match text.chars().find(|c| matches!(c, '(' | ')' | '[' | ']')) {
        Some(found) => Err(AnnotationError { field, found }),
        None => Ok(()),
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
