//! Edit operations describing how one word form becomes another: a compact
//! notation, its execution against a string, a greedy diff that derives an
//! operation script from two strings, and a pass that recognises moved text.
//!
//! ```
//! use philology_edit::{diff, parse_operation};
//!
//! let op = parse_operation("\"b\"@2=\"z\"").unwrap();
//! assert_eq!(op.execute("abc").unwrap(), "azc");
//!
//! let ops = diff("abcdef", "azced");
//! assert_eq!(ops[1].to_string(), "\"d\"@4>@6");
//! ```

#![deny(dead_code)]

pub mod adjust;
pub mod coordinates;
pub mod diff;
pub mod error;
pub mod operations;
pub mod script;

pub use adjust::adjust;
pub use coordinates::{validate_range, Coordinates};
pub use diff::{diff, diff_with, DiffOptions};
pub use error::{AnnotationError, EditError, ParseError, RangeError};
pub use operations::{parse_as, parse_operation, EditOperation, OperationType, Variant};
pub use script::EditScript;
