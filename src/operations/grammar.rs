//! The compact operation notation.
//!
//! | Operation     | Notation               |
//! |---------------|------------------------|
//! | delete        | `"A"@NxL!`             |
//! | insert before | `@N+="B"`              |
//! | insert after  | `@N=+"B"`              |
//! | replace       | `"A"@NxL="B"`          |
//! | move before   | `"A"@NxL>@M`           |
//! | move after    | `"A"@NxL->@M`          |
//! | swap          | `"A"@NxL<>"B"@MxL2`    |
//!
//! Descriptive `"A"` texts and the `xL` length are optional everywhere they
//! appear, `×` may stand for `x`, and any operation may be followed by a
//! `(note)` and a `[tag tag ...]` list in either order. Inside quotes `\"`
//! stands for `"` and `\\` for `\`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{EditOperation, OperationType, Variant};
use crate::error::ParseError;

const SOURCE: &str = r#"(?:"(?P<a>(?:[^"\\]|\\.)*)")?\s*@(?P<at>[0-9]+)(?:[xX×](?P<run>[0-9]+))?"#;
const ANCHOR: &str = r#"(?:"(?P<a>(?:[^"\\]|\\.)*)")?\s*@(?P<at>[0-9]+)"#;
// notes and tags may precede the operation
const LEADING: &str = r"(?:\s*(?:\([^)]*\)|\[[^\]]*\]))*\s*";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("operation pattern should compile")
}

/// Quoted segments escape `"` and `\` with a backslash.
fn operation_pattern(body: &str) -> Regex {
    compile(&format!(r"(?s)^{LEADING}(?P<op>{body})"))
}

static DELETE: Lazy<Regex> = Lazy::new(|| operation_pattern(&format!(r"{SOURCE}\s*!")));
static INSERT_BEFORE: Lazy<Regex> =
    Lazy::new(|| operation_pattern(&format!(r#"{ANCHOR}\s*\+=\s*"(?P<b>(?:[^"\\]|\\.)*)""#)));
static INSERT_AFTER: Lazy<Regex> =
    Lazy::new(|| operation_pattern(&format!(r#"{ANCHOR}\s*=\+\s*"(?P<b>(?:[^"\\]|\\.)*)""#)));
static REPLACE: Lazy<Regex> =
    Lazy::new(|| operation_pattern(&format!(r#"{SOURCE}\s*=\s*"(?P<b>(?:[^"\\]|\\.)*)""#)));
static MOVE_BEFORE: Lazy<Regex> =
    Lazy::new(|| operation_pattern(&format!(r"{SOURCE}\s*>\s*@(?P<to>[0-9]+)")));
static MOVE_AFTER: Lazy<Regex> =
    Lazy::new(|| operation_pattern(&format!(r"{SOURCE}\s*->\s*@(?P<to>[0-9]+)")));
static SWAP: Lazy<Regex> = Lazy::new(|| {
    operation_pattern(&format!(
        r#"{SOURCE}\s*<>\s*(?:"(?P<a2>(?:[^"\\]|\\.)*)")?\s*@(?P<at2>[0-9]+)(?:[xX×](?P<run2>[0-9]+))?"#
    ))
});

static NOTE: Lazy<Regex> = Lazy::new(|| compile(r"\(([^)]*)\)"));
static TAGS: Lazy<Regex> = Lazy::new(|| compile(r"\[([^\]]*)\]"));

/// Variant-distinguishing tokens, most specific first.
const TOKENS: [(&str, OperationType); 7] = [
    ("!", OperationType::Delete),
    ("+=", OperationType::InsertBefore),
    ("=+", OperationType::InsertAfter),
    ("<>", OperationType::Swap),
    ("->", OperationType::MoveAfter),
    (">", OperationType::MoveBefore),
    ("=", OperationType::Replace),
];

impl OperationType {
    fn pattern(&self) -> &'static Regex {
        match self {
            OperationType::Delete => &DELETE,
            OperationType::InsertBefore => &INSERT_BEFORE,
            OperationType::InsertAfter => &INSERT_AFTER,
            OperationType::Replace => &REPLACE,
            OperationType::MoveBefore => &MOVE_BEFORE,
            OperationType::MoveAfter => &MOVE_AFTER,
            OperationType::Swap => &SWAP,
        }
    }

    fn notation(&self) -> &'static str {
        match self {
            OperationType::Delete => "\"text\"@position! or @position!",
            OperationType::InsertBefore => "@position+=\"text\"",
            OperationType::InsertAfter => "@position=+\"text\"",
            OperationType::Replace => "\"oldtext\"@position=\"newtext\" or @position=\"newtext\"",
            OperationType::MoveBefore => "\"text\"@position>@target or @position>@target",
            OperationType::MoveAfter => "\"text\"@position->@target or @position->@target",
            OperationType::Swap => "\"text1\"@position1<>\"text2\"@position2",
        }
    }
}

/// Parses a DSL string into an operation.
///
/// The operation must open the text, optionally after a note or tag list.
/// The variant is chosen by the first token of the priority list `!`, `+=`,
/// `=+`, `<>`, `->`, `>`, `=` found in the text. When that variant's grammar
/// does not match, the next token present is tried, so texts quoting a
/// higher-priority token (e.g. `@2="!"`) still parse. This also accepts
/// strings a parser committed to the first token would reject, such as
/// `@2->@5 (!)`. If no variant matches, the most specific error is returned.
///
/// Notes and tags containing `(`, `)`, `[` or `]` are rejected, as they could
/// not be written back unambiguously.
pub fn parse_operation(text: &str) -> Result<EditOperation, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::new("DSL text cannot be empty", text));
    }

    let mut error: Option<ParseError> = None;
    for (_, operation_type) in TOKENS.iter().filter(|(token, _)| text.contains(token)) {
        match parse_as(*operation_type, text) {
            Ok(operation) => return Ok(operation),
            Err(e) => {
                log::trace!("{text:?} is not a {}: {e}", operation_type.label());
                // a numeric failure (carrying a position) beats a format mismatch
                let replace = match &error {
                    None => true,
                    Some(kept) => kept.position.is_none() && e.position.is_some(),
                };
                if replace {
                    error = Some(e);
                }
            }
        }
    }

    Err(error.unwrap_or_else(|| ParseError::new("Unknown operation type", text)))
}

/// Parses `text` as an operation of the given type.
pub fn parse_as(operation_type: OperationType, text: &str) -> Result<EditOperation, ParseError> {
    let captures = operation_type.pattern().captures(text).ok_or_else(|| {
        ParseError::new(
            format!(
                "Invalid {} operation format. Expected: {}",
                operation_type.label(),
                operation_type.notation()
            ),
            text,
        )
    })?;

    // insertions anchor on 0 for the string edges
    let min_at = match operation_type {
        OperationType::InsertBefore | OperationType::InsertAfter => 0,
        _ => 1,
    };
    let at = number(&captures, "at", min_at, "Position")?;
    let run = optional_number(&captures, "run", "Length")?.unwrap_or(1);
    let b = quoted(&captures, "b").unwrap_or_default();

    let variant = match operation_type {
        OperationType::Delete => Variant::Delete,
        OperationType::InsertBefore => Variant::InsertBefore { text: b },
        OperationType::InsertAfter => Variant::InsertAfter { text: b },
        OperationType::Replace => Variant::Replace {
            replacement_text: b,
        },
        OperationType::MoveBefore => Variant::MoveBefore {
            to: number(&captures, "to", 1, "Target position")?,
        },
        OperationType::MoveAfter => Variant::MoveAfter {
            to: number(&captures, "to", 1, "Target position")?,
        },
        OperationType::Swap => Variant::Swap {
            at2: number(&captures, "at2", 1, "Second position")?,
            run2: optional_number(&captures, "run2", "Second length")?.unwrap_or(1),
            input_text2: quoted(&captures, "a2").filter(|a2| !a2.is_empty()),
        },
    };

    // everything outside the operation itself may hold the note and tags
    let matched = captures.name("op").map_or(0..0, |m| m.range());
    let rest = format!("{} {}", &text[..matched.start], &text[matched.end..]);

    let mut operation = EditOperation::new_unchecked(at, run, variant);
    operation.input_text = quoted(&captures, "a").filter(|a| !a.is_empty());

    let note = NOTE.captures(&rest).and_then(|c| c.get(0).zip(c.get(1)));
    let tags = TAGS.captures(&rest).and_then(|c| c.get(0).zip(c.get(1)));
    if let (Some((note, _)), Some((tags, _))) = (note, tags) {
        if note.start() < tags.end() && tags.start() < note.end() {
            return Err(ParseError::new("Note and tags overlap", rest.trim()));
        }
    }
    if let Some((_, note)) = note {
        operation = operation
            .with_note(note.as_str())
            .map_err(|e| ParseError::new(e.to_string(), note.as_str()))?;
    }
    if let Some((_, tags)) = tags {
        operation = operation
            .with_tags(tags.as_str().split_whitespace())
            .map_err(|e| ParseError::new(e.to_string(), tags.as_str()))?;
    }
    Ok(operation)
}

fn quoted(captures: &Captures<'_>, group: &str) -> Option<String> {
    captures.name(group).map(|m| unescape(m.as_str()))
}

/// Undoes the escaping of quoted segments. A backslash before anything but
/// `"` or `\` is kept as it is.
fn unescape(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('"' | '\\')) => unescaped.push(next),
            Some(next) => {
                unescaped.push('\\');
                unescaped.push(next);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

fn optional_number(
    captures: &Captures<'_>,
    group: &str,
    what: &str,
) -> Result<Option<usize>, ParseError> {
    captures
        .name(group)
        .map(|m| match m.as_str().parse::<usize>() {
            Ok(value) if value >= 1 => Ok(value),
            _ => Err(
                ParseError::new(format!("{what} must be a positive integer"), m.as_str())
                    .at(m.start()),
            ),
        })
        .transpose()
}

fn number(
    captures: &Captures<'_>,
    group: &str,
    min: usize,
    what: &str,
) -> Result<usize, ParseError> {
    let requirement = if min == 0 {
        "a non-negative integer"
    } else {
        "a positive integer"
    };
    let m = captures
        .name(group)
        .ok_or_else(|| ParseError::new(format!("{what} is missing"), ""))?;
    match m.as_str().parse::<usize>() {
        Ok(value) if value >= min => Ok(value),
        _ => Err(
            ParseError::new(format!("{what} must be {requirement}"), m.as_str()).at(m.start()),
        ),
    }
}

impl std::str::FromStr for EditOperation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_operation(s)
    }
}
