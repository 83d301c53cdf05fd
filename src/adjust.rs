//! Recognition of relocated text in a diff result.
//!
//! A deletion of some text paired with an insertion (or replacement) that
//! introduces exactly the same text elsewhere is a move. Pairs are only
//! merged when a single operation in the whole script introduces that text,
//! so repeated material is never guessed at.

use crate::operations::{EditOperation, Variant};

/// The text `operation` brings into the string, if it may pair with a
/// deletion. Replacements only qualify when `insert_only` is false.
fn introduced_text(operation: &EditOperation, insert_only: bool) -> Option<&str> {
    match operation.variant() {
        Variant::InsertBefore { text } | Variant::InsertAfter { text } => Some(text),
        Variant::Replace { replacement_text } if !insert_only => Some(replacement_text),
        _ => None,
    }
}

fn merge(deletion: &EditOperation, candidate: &EditOperation) -> EditOperation {
    let to = candidate.at() + 1;
    let merged = EditOperation::new_unchecked(
        deletion.at(),
        deletion.run(),
        Variant::MoveBefore { to },
    );
    let merged = match deletion.input_text() {
        Some(input_text) => merged.with_input_text(input_text),
        None => merged,
    };
    let tags = if deletion.tags().is_empty() {
        candidate.tags()
    } else {
        deletion.tags()
    };
    merged.with_annotations_of(deletion.note().or(candidate.note()), tags)
}

/// Merges each deletion whose text is introduced by exactly one
/// insertion/replacement into a [`Variant::MoveBefore`] placed where the
/// deletion was. The paired insertion/replacement is dropped; every other
/// operation keeps its relative order.
///
/// Only insertions/replacements after the deletion are paired with it, but
/// every operation in the list counts towards uniqueness. The move targets
/// the character after the candidate's anchor (`candidate.at + 1`).
/// Deletions only pair when they carry their input text.
pub fn adjust(operations: Vec<EditOperation>, insert_only: bool) -> Vec<EditOperation> {
    let mut consumed = vec![false; operations.len()];
    let mut moves: Vec<Option<EditOperation>> = vec![None; operations.len()];

    for (index, deletion) in operations.iter().enumerate() {
        if consumed[index] || !matches!(deletion.variant(), Variant::Delete) {
            continue;
        }
        let Some(deleted) = deletion.input_text() else {
            continue;
        };

        let candidate = operations.iter().enumerate().find(|(other, operation)| {
            *other > index
                && !consumed[*other]
                && introduced_text(operation, insert_only) == Some(deleted)
        });
        let Some((candidate_index, candidate)) = candidate else {
            continue;
        };

        let producers = operations
            .iter()
            .filter(|operation| introduced_text(operation, insert_only) == Some(deleted))
            .count();
        if producers != 1 {
            log::trace!("{deleted:?} is introduced {producers} times, not a move");
            continue;
        }

        let merged = merge(deletion, candidate);
        log::debug!("merged {deletion} and {candidate} into {merged}");
        moves[index] = Some(merged);
        consumed[index] = true;
        consumed[candidate_index] = true;
    }

    operations
        .into_iter()
        .zip(moves)
        .zip(consumed)
        .filter_map(|((operation, merged), consumed)| match merged {
            Some(merged) => Some(merged),
            None if consumed => None,
            None => Some(operation),
        })
        .collect()
}
