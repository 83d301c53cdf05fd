//! Error types for parsing and executing edit operations.

use thiserror::Error;

/// A DSL string could not be turned into an operation.
///
/// `input` holds the offending substring (the whole DSL text when the
/// grammar did not match at all, the numeric group otherwise) and
/// `position` its byte offset in the parsed text when known.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}: `{input}`")]
pub struct ParseError {
    pub message: String,
    pub input: String,
    pub position: Option<usize>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            input: input.into(),
            position: None,
        }
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

/// A coordinate does not fit the operation or the string it is applied to.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("position {at} is out of range for input of length {len}")]
    Position { at: usize, len: usize },

    #[error("length {run} at position {at} exceeds input length {len}")]
    Length { at: usize, run: usize, len: usize },

    #[error("target position {to} is out of range once the moved text is removed (length {len})")]
    Target { to: usize, len: usize },

    #[error("swap ranges @{at}x{run} and @{at2}x{run2} overlap")]
    Overlap {
        at: usize,
        run: usize,
        at2: usize,
        run2: usize,
    },

    #[error("{field} must be at least {min}, got {value}")]
    Invalid {
        field: &'static str,
        value: usize,
        min: usize,
    },
}

/// A note or tag holds a character the notation uses to delimit notes and
/// tags.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{field} cannot contain `{found}`")]
pub struct AnnotationError {
    pub field: &'static str,
    pub found: char,
}

/// Failure while handling a list of operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("operation #{index}: {source}")]
    Parse {
        index: usize,
        #[source]
        source: ParseError,
    },

    #[error("operation #{index} ({operation}): {source}")]
    Execute {
        index: usize,
        operation: String,
        #[source]
        source: RangeError,
    },
}
