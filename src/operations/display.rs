use std::fmt::{self, Display, Formatter, Write};

use super::{EditOperation, Variant};
use crate::coordinates::Coordinates;

/// Writes `text` between double quotes, escaping `"` and `\` with a
/// backslash.
fn write_quoted(f: &mut Formatter<'_>, text: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}

/// Canonical notation, the inverse of
/// [`parse_operation`](super::parse_operation).
impl Display for EditOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(input_text) = &self.input_text {
            write_quoted(f, input_text)?;
        }

        let coordinates = self.coordinates();
        match &self.variant {
            Variant::Delete => write!(f, "{coordinates}!")?,
            Variant::InsertBefore { text } => {
                write!(f, "@{}+=", self.at)?;
                write_quoted(f, text)?;
            }
            Variant::InsertAfter { text } => {
                write!(f, "@{}=+", self.at)?;
                write_quoted(f, text)?;
            }
            Variant::Replace { replacement_text } => {
                write!(f, "{coordinates}=")?;
                write_quoted(f, replacement_text)?;
            }
            Variant::MoveBefore { to } => write!(f, "{coordinates}>@{to}")?,
            Variant::MoveAfter { to } => write!(f, "{coordinates}->@{to}")?,
            Variant::Swap {
                at2,
                run2,
                input_text2,
            } => {
                write!(f, "{coordinates}<>")?;
                if let Some(input_text2) = input_text2 {
                    write_quoted(f, input_text2)?;
                }
                write!(f, "{}", Coordinates::new(*at2, *run2))?;
            }
        }

        if let Some(note) = &self.note {
            write!(f, " ({note})")?;
        }
        if !self.tags.is_empty() {
            write!(f, " [{}]", self.tags.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete() {
        let op = EditOperation::delete(2, 1).unwrap();
        assert_eq!(op.to_string(), "@2!");

        let op = EditOperation::delete(2, 3).unwrap().with_input_text("abc");
        assert_eq!(op.to_string(), "\"abc\"@2x3!");
    }

    #[test]
    fn insertions() {
        assert_eq!(EditOperation::insert_before(2, "b").to_string(), "@2+=\"b\"");
        assert_eq!(EditOperation::insert_after(0, "b").to_string(), "@0=+\"b\"");
    }

    #[test]
    fn replace() {
        let op = EditOperation::replace(2, 1, "z")
            .unwrap()
            .with_input_text("b");
        assert_eq!(op.to_string(), "\"b\"@2=\"z\"");
    }

    #[test]
    fn moves() {
        let op = EditOperation::move_before(4, 1, 6)
            .unwrap()
            .with_input_text("d");
        assert_eq!(op.to_string(), "\"d\"@4>@6");

        let op = EditOperation::move_after(2, 2, 5).unwrap();
        assert_eq!(op.to_string(), "@2x2->@5");
    }

    #[test]
    fn swap() {
        let op = EditOperation::swap(2, 2, 5, 1)
            .unwrap()
            .with_input_text("bc")
            .with_input_text2("e");
        assert_eq!(op.to_string(), "\"bc\"@2x2<>\"e\"@5");
    }

    #[test]
    fn note_then_tags() {
        let op = EditOperation::delete(2, 1)
            .unwrap()
            .with_note("typo")
            .unwrap()
            .with_tags(["orth", "lat"])
            .unwrap();
        assert_eq!(op.to_string(), "@2! (typo) [orth lat]");

        let op = EditOperation::swap(1, 1, 3, 1)
            .unwrap()
            .with_note("metathesis")
            .unwrap()
            .with_tags(["x"])
            .unwrap();
        assert_eq!(op.to_string(), "@1<>@3 (metathesis) [x]");
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        let op = EditOperation::replace(1, 1, "\"").unwrap();
        assert_eq!(op.to_string(), r#"@1="\"""#);

        let op = EditOperation::delete(2, 2).unwrap().with_input_text("a\\");
        assert_eq!(op.to_string(), r#""a\\"@2x2!"#);

        let op = EditOperation::swap(1, 1, 3, 1)
            .unwrap()
            .with_input_text("'")
            .with_input_text2("\"");
        assert_eq!(op.to_string(), r#""'"@1<>"\""@3"#);
    }
}
