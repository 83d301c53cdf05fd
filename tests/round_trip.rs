use philology_edit::{diff_with, parse_operation, DiffOptions, EditOperation, OperationType};

const CORPUS: &str = include_str!("corpus/operations.txt");

fn corpus() -> impl Iterator<Item = &'static str> {
    CORPUS
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

#[test]
fn corpus_is_canonical() {
    for line in corpus() {
        let op = parse_operation(line).unwrap_or_else(|e| panic!("{line}: {e}"));
        assert_eq!(op.to_string(), line);
    }
}

#[test]
fn corpus_round_trips() {
    for line in corpus() {
        let op = parse_operation(line).unwrap();
        let again = parse_operation(&op.to_string()).unwrap();
        assert_eq!(again, op, "{line}");
    }
}

#[test]
fn corpus_covers_every_variant() {
    let mut seen: Vec<OperationType> = corpus()
        .map(|line| parse_operation(line).unwrap().operation_type())
        .collect();
    seen.sort_by_key(|t| *t as u8);
    seen.dedup();
    assert_eq!(seen.len(), 7);
}

#[test]
fn constructed_operations_round_trip() {
    let ops = [
        EditOperation::delete(3, 1).unwrap(),
        EditOperation::delete(3, 2)
            .unwrap()
            .with_input_text("xy")
            .with_note("dittography")
            .unwrap()
            .with_tags(["dit"])
            .unwrap(),
        EditOperation::insert_before(0, "h")
            .with_tags(["asp", "init"])
            .unwrap(),
        EditOperation::insert_after(7, "e")
            .with_note("paragogic")
            .unwrap(),
        EditOperation::replace(1, 1, "v")
            .unwrap()
            .with_input_text("u"),
        EditOperation::replace(2, 3, "").unwrap(),
        EditOperation::move_before(5, 2, 1)
            .unwrap()
            .with_input_text("que"),
        EditOperation::move_after(1, 1, 4)
            .unwrap()
            .with_note("n")
            .unwrap(),
        EditOperation::swap(1, 2, 6, 1)
            .unwrap()
            .with_input_text("ab")
            .with_input_text2("f")
            .with_tags(["met"])
            .unwrap(),
        EditOperation::swap(4, 1, 1, 1).unwrap(),
    ];

    for op in ops {
        let text = op.to_string();
        let parsed = parse_operation(&text).unwrap_or_else(|e| panic!("{text}: {e}"));
        assert_eq!(parsed, op, "{text}");
    }
}

#[test]
fn alternative_spellings_normalise() {
    let op = parse_operation("  \"bc\" @2×2 = \"z\"  [b  a]   (note) ").unwrap();
    assert_eq!(op.to_string(), "\"bc\"@2x2=\"z\" (note) [b a]");

    let op = parse_operation("\"\"@2!").unwrap();
    assert_eq!(op.input_text(), None);
    assert_eq!(op.to_string(), "@2!");

    let op = parse_operation("@2! ()").unwrap();
    assert_eq!(op.note(), None);
}

#[test]
fn quotes_and_backslashes_round_trip() {
    let ops = [
        EditOperation::replace(1, 1, "\"").unwrap(),
        EditOperation::replace(2, 1, "\\").unwrap().with_input_text("\""),
        EditOperation::insert_before(3, "a\"b\\"),
        EditOperation::insert_after(0, "\\\""),
        EditOperation::delete(1, 3).unwrap().with_input_text("\"x\""),
        EditOperation::move_before(1, 1, 3)
            .unwrap()
            .with_input_text("\\"),
        EditOperation::swap(1, 1, 3, 1)
            .unwrap()
            .with_input_text("\"")
            .with_input_text2("\\"),
        EditOperation::delete(2, 1)
            .unwrap()
            .with_input_text("@3!")
            .with_note("quoted \"@3!\"")
            .unwrap(),
    ];

    for op in ops {
        let text = op.to_string();
        let parsed = parse_operation(&text).unwrap_or_else(|e| panic!("{text}: {e}"));
        assert_eq!(parsed, op, "{text}");
    }
}

#[test]
fn diffed_quotes_round_trip() {
    let options = DiffOptions {
        adjust: false,
        ..DiffOptions::default()
    };
    for (source, target) in [("a\"b", "ab"), ("x\\y", "x\"y"), ("ab", "a\"b")] {
        for op in diff_with(source, target, options) {
            let text = op.to_string();
            assert_eq!(parse_operation(&text).unwrap(), op, "{text}");
        }
    }
}

#[test]
fn delimiters_cannot_enter_notes_or_tags() {
    let op = EditOperation::delete(2, 1).unwrap();
    assert!(op.clone().with_note("see [x]").is_err());
    assert!(op.clone().with_note("a (b)").is_err());
    assert!(op.clone().with_tags(["x]"]).is_err());
    assert!(op.with_tags(["(x"]).is_err());

    assert!(parse_operation("@2! (see [x])").is_err());
}
