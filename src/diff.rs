//! Greedy edit-script derivation between two strings.
//!
//! The walk is single-pass and deterministic: on a mismatch it looks ahead
//! for the nearest resynchronisation point and prefers deleting source text
//! over inserting target text when both are equally near. It does not
//! search for a minimal script.

use crate::adjust::adjust;
use crate::operations::{EditOperation, Variant};

/// Options for [`diff_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Record the affected source text on each operation.
    pub include_input_text: bool,
    /// Merge relocations into moves (see [`adjust`]).
    pub adjust: bool,
    /// When adjusting, only insertions may pair with deletions.
    pub insert_only: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            include_input_text: true,
            adjust: true,
            insert_only: false,
        }
    }
}

/// Derives the operations transforming `source` into `target` with the
/// default options.
pub fn diff(source: &str, target: &str) -> Vec<EditOperation> {
    diff_with(source, target, DiffOptions::default())
}

pub fn diff_with(source: &str, target: &str, options: DiffOptions) -> Vec<EditOperation> {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();

    let operations = Walk::new(&source, &target, options.include_input_text).run();
    log::trace!("diff produced {} operation(s)", operations.len());

    if options.adjust {
        adjust(operations, options.insert_only)
    } else {
        operations
    }
}

fn find_next(text: &[char], from: usize, wanted: char) -> Option<usize> {
    text[from..]
        .iter()
        .position(|c| *c == wanted)
        .map(|offset| from + offset)
}

struct Walk<'a> {
    source: &'a [char],
    target: &'a [char],
    include_input_text: bool,
    operations: Vec<EditOperation>,
}

impl<'a> Walk<'a> {
    fn new(source: &'a [char], target: &'a [char], include_input_text: bool) -> Self {
        Self {
            source,
            target,
            include_input_text,
            operations: Vec::new(),
        }
    }

    fn push(&mut self, at: usize, run: usize, variant: Variant, input_text: &[char]) {
        let mut operation = EditOperation::new_unchecked(at, run, variant);
        if self.include_input_text {
            operation = operation.with_input_text(input_text.iter().collect::<String>());
        }
        log::trace!("diff: {operation}");
        self.operations.push(operation);
    }

    fn delete(&mut self, at: usize, deleted: &'a [char]) {
        self.push(at, deleted.len(), Variant::Delete, deleted);
    }

    fn run(mut self) -> Vec<EditOperation> {
        let (source, target) = (self.source, self.target);

        if source.is_empty() && target.is_empty() {
            return self.operations;
        }
        if source.is_empty() {
            let text = target.iter().collect();
            self.push(0, 1, Variant::InsertAfter { text }, &[]);
            return self.operations;
        }
        if target.is_empty() {
            self.delete(1, source);
            return self.operations;
        }

        let (mut i, mut j) = (0, 0);
        // 1-based position in the partially rewritten string; deletions
        // leave it where it is
        let mut position = 1;

        while i < source.len() && j < target.len() {
            if source[i] == target[j] {
                i += 1;
                j += 1;
                position += 1;
                continue;
            }

            let in_source = find_next(source, i, target[j]);
            let in_target = find_next(target, j, source[i]);

            match (in_source, in_target) {
                (Some(m_s), m_t) if m_t.map_or(true, |m_t| m_s <= m_t) => {
                    self.delete(position, &source[i..m_s]);
                    i = m_s;
                }
                (_, Some(m_t)) => {
                    let text = target[j..m_t].iter().collect();
                    self.push(position, 1, Variant::InsertBefore { text }, &[]);
                    position += m_t - j;
                    j = m_t;
                }
                _ => {
                    let replacement_text = target[j].to_string();
                    self.push(
                        position,
                        1,
                        Variant::Replace { replacement_text },
                        &source[i..=i],
                    );
                    i += 1;
                    j += 1;
                    position += 1;
                }
            }
        }

        if i < source.len() {
            self.delete(position, &source[i..]);
        }
        if j < target.len() {
            let text = target[j..].iter().collect();
            self.push(position - 1, 1, Variant::InsertAfter { text }, &[]);
        }

        self.operations
    }
}
