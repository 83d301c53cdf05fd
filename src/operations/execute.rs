use std::ops::Range;

use super::{EditOperation, Variant};
use crate::coordinates::{check_range, Coordinates};
use crate::error::RangeError;

fn splice(chars: &mut Vec<char>, range: Range<usize>, with: impl IntoIterator<Item = char>) {
    let tail = chars.split_off(range.end);
    chars.truncate(range.start);
    chars.extend(with);
    chars.extend(tail);
}

/// Removes `coordinates` and reinserts the removed text next to `to`,
/// which is expressed in the coordinates of the original string.
fn relocate(
    chars: &mut Vec<char>,
    coordinates: Coordinates,
    to: usize,
    after: bool,
) -> Result<(), RangeError> {
    let Coordinates { at, run } = coordinates;
    check_range(chars.len(), at, run)?;
    check_range(chars.len(), to, 1)?;

    let moved: Vec<char> = chars.drain(coordinates.span()).collect();

    let adjusted = if to > at { to.checked_sub(run) } else { Some(to) };
    let index = if after {
        adjusted
    } else {
        adjusted.and_then(|adjusted| adjusted.checked_sub(1))
    };

    match index {
        Some(index) if index <= chars.len() => {
            splice(chars, index..index, moved);
            Ok(())
        }
        _ => Err(RangeError::Target {
            to,
            len: chars.len(),
        }),
    }
}

impl EditOperation {
    /// Applies this operation to `input`, returning the transformed string.
    ///
    /// Positions count characters. The input is never partially modified: on
    /// error nothing is returned but the error.
    pub fn execute(&self, input: &str) -> Result<String, RangeError> {
        let mut chars: Vec<char> = input.chars().collect();
        let coordinates = self.coordinates();

        match &self.variant {
            Variant::Delete => {
                check_range(chars.len(), self.at, self.run)?;
                splice(&mut chars, coordinates.span(), None);
            }

            Variant::InsertBefore { text } => {
                let index = if self.at == 0 {
                    0
                } else {
                    check_range(chars.len(), self.at, 1)?;
                    self.at - 1
                };
                splice(&mut chars, index..index, text.chars());
            }

            Variant::InsertAfter { text } => {
                let index = if self.at == 0 {
                    chars.len()
                } else {
                    check_range(chars.len(), self.at, 1)?;
                    self.at
                };
                splice(&mut chars, index..index, text.chars());
            }

            Variant::Replace { replacement_text } => {
                check_range(chars.len(), self.at, self.run)?;
                splice(&mut chars, coordinates.span(), replacement_text.chars());
            }

            Variant::MoveBefore { to } => relocate(&mut chars, coordinates, *to, false)?,

            Variant::MoveAfter { to } => relocate(&mut chars, coordinates, *to, true)?,

            Variant::Swap { at2, run2, .. } => {
                let second = Coordinates::new(*at2, *run2);
                check_range(chars.len(), self.at, self.run)?;
                check_range(chars.len(), second.at, second.run)?;
                if coordinates.overlaps(&second) {
                    return Err(RangeError::Overlap {
                        at: self.at,
                        run: self.run,
                        at2: second.at,
                        run2: second.run,
                    });
                }

                let first_text = chars[coordinates.span()].to_vec();
                let second_text = chars[second.span()].to_vec();

                // the later range goes first so the earlier one keeps its index
                if coordinates.at > second.at {
                    splice(&mut chars, coordinates.span(), second_text);
                    splice(&mut chars, second.span(), first_text);
                } else {
                    splice(&mut chars, second.span(), first_text);
                    splice(&mut chars, coordinates.span(), second_text);
                }
            }
        }

        Ok(chars.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete() {
        let op = EditOperation::delete(2, 1).unwrap();
        assert_eq!(op.execute("abc").unwrap(), "ac");

        let op = EditOperation::delete(2, 2).unwrap();
        assert_eq!(op.execute("abcd").unwrap(), "ad");

        let op = EditOperation::delete(1, 3).unwrap();
        assert_eq!(op.execute("abc").unwrap(), "");
    }

    #[test]
    fn delete_out_of_range() {
        let op = EditOperation::delete(4, 1).unwrap();
        assert_eq!(
            op.execute("abc"),
            Err(RangeError::Position { at: 4, len: 3 })
        );

        let op = EditOperation::delete(2, 3).unwrap();
        assert_eq!(
            op.execute("abc"),
            Err(RangeError::Length {
                at: 2,
                run: 3,
                len: 3
            })
        );
    }

    #[test]
    fn insert_before() {
        assert_eq!(
            EditOperation::insert_before(2, "x").execute("abc").unwrap(),
            "axbc"
        );
        assert_eq!(
            EditOperation::insert_before(1, "xy").execute("abc").unwrap(),
            "xyabc"
        );
        assert_eq!(
            EditOperation::insert_before(0, "x").execute("abc").unwrap(),
            "xabc"
        );
        assert_eq!(
            EditOperation::insert_before(0, "x").execute("").unwrap(),
            "x"
        );
        assert!(EditOperation::insert_before(4, "x").execute("abc").is_err());
    }

    #[test]
    fn insert_after() {
        assert_eq!(
            EditOperation::insert_after(2, "x").execute("abc").unwrap(),
            "abxc"
        );
        assert_eq!(
            EditOperation::insert_after(3, "x").execute("abc").unwrap(),
            "abcx"
        );
        assert_eq!(
            EditOperation::insert_after(0, "x").execute("abc").unwrap(),
            "abcx"
        );
        assert!(EditOperation::insert_after(4, "x").execute("abc").is_err());
    }

    #[test]
    fn replace() {
        let op = EditOperation::replace(2, 1, "z").unwrap();
        assert_eq!(op.execute("abc").unwrap(), "azc");

        let op = EditOperation::replace(2, 2, "xyz").unwrap();
        assert_eq!(op.execute("abcd").unwrap(), "axyzd");

        let op = EditOperation::replace(2, 2, "").unwrap();
        assert_eq!(op.execute("abcd").unwrap(), "ad");

        let op = EditOperation::replace(3, 2, "x").unwrap();
        assert!(op.execute("abc").is_err());
    }

    #[test]
    fn move_before_forward_and_backward() {
        // "b" before "e": a c d b e
        let op = EditOperation::move_before(2, 1, 5).unwrap();
        assert_eq!(op.execute("abcde").unwrap(), "acdbe");

        // "de" before "b": a d e b c
        let op = EditOperation::move_before(4, 2, 2).unwrap();
        assert_eq!(op.execute("abcde").unwrap(), "adebc");

        // "bc" before "e": a d b c e
        let op = EditOperation::move_before(2, 2, 5).unwrap();
        assert_eq!(op.execute("abcde").unwrap(), "adbce");
    }

    #[test]
    fn move_after_forward_and_backward() {
        // "b" after "e": a c d e b
        let op = EditOperation::move_after(2, 1, 5).unwrap();
        assert_eq!(op.execute("abcde").unwrap(), "acdeb");

        // "d" after "a": a d b c e
        let op = EditOperation::move_after(4, 1, 1).unwrap();
        assert_eq!(op.execute("abcde").unwrap(), "adbce");
    }

    #[test]
    fn move_out_of_range() {
        let op = EditOperation::move_before(2, 1, 6).unwrap();
        assert_eq!(
            op.execute("abcde"),
            Err(RangeError::Position { at: 6, len: 5 })
        );

        let op = EditOperation::move_before(5, 2, 1).unwrap();
        assert!(op.execute("abcde").is_err());
    }

    #[test]
    fn move_target_inside_moved_text() {
        // "bcd" before its own second character: nowhere to go
        let op = EditOperation::move_before(2, 3, 3).unwrap();
        assert_eq!(op.execute("abcde"), Err(RangeError::Target { to: 3, len: 2 }));

        // after the last character, from the last position
        let op = EditOperation::move_after(3, 1, 3).unwrap();
        assert_eq!(op.execute("abc"), Err(RangeError::Target { to: 3, len: 2 }));
    }

    #[test]
    fn swap_single_chars() {
        let op = EditOperation::swap(2, 1, 4, 1).unwrap();
        assert_eq!(op.execute("abcde").unwrap(), "adcbe");

        let op = EditOperation::swap(4, 1, 2, 1).unwrap();
        assert_eq!(op.execute("abcde").unwrap(), "adcbe");
    }

    #[test]
    fn swap_uneven_runs() {
        let op = EditOperation::swap(2, 2, 5, 2).unwrap();
        assert_eq!(op.execute("abcdefg").unwrap(), "aefdbcg");

        let op = EditOperation::swap(1, 1, 3, 3).unwrap();
        assert_eq!(op.execute("abcdef").unwrap(), "cdebaf");
    }

    #[test]
    fn swap_overlapping() {
        let op = EditOperation::swap(2, 3, 4, 2).unwrap();
        assert_eq!(
            op.execute("abcdefg"),
            Err(RangeError::Overlap {
                at: 2,
                run: 3,
                at2: 4,
                run2: 2
            })
        );

        let op = EditOperation::swap(2, 1, 2, 1).unwrap();
        assert!(op.execute("abc").is_err());
    }

    #[test]
    fn swap_out_of_range() {
        let op = EditOperation::swap(1, 1, 4, 1).unwrap();
        assert_eq!(
            op.execute("abc"),
            Err(RangeError::Position { at: 4, len: 3 })
        );
    }

    #[test]
    fn multibyte_characters() {
        let op = EditOperation::replace(2, 1, "ö").unwrap();
        assert_eq!(op.execute("aèc").unwrap(), "aöc");

        let op = EditOperation::swap(1, 1, 3, 1).unwrap();
        assert_eq!(op.execute("àbç").unwrap(), "çbà");
    }
}
