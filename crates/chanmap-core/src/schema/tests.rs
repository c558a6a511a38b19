use crate::{
    error::LoadError,
    schema::{ColumnSchema, HeaderSection, SchemaError, parse_header},
    source::LogicalLines,
    value::ValueKind,
};

// ---- helpers -----------------------------------------------------------

fn parse(text: &str) -> Result<ColumnSchema, LoadError> {
    parse_header(&mut LogicalLines::new(text.as_bytes()))
}

fn schema_err(text: &str) -> SchemaError {
    match parse(text) {
        Err(LoadError::Schema(err)) => err,
        other => panic!("expected schema error, got {other:?}"),
    }
}

// ---- accepted headers --------------------------------------------------

#[test]
fn parses_four_header_lines() {
    let schema = parse("4\ncrate slot stream chan\nI I I I\n1 1 1 1\n").expect("header");

    assert_eq!(schema.len(), 4);
    assert_eq!(schema.key_arity(), 4);
    assert_eq!(schema.key_names(), vec!["crate", "slot", "stream", "chan"]);
    assert_eq!(schema.position("stream"), Some(2));
    assert_eq!(schema.position("offlchan"), None);
}

#[test]
fn key_ordinals_follow_file_order_among_flagged_columns() {
    let schema = parse("5\nofflchan crate apa slot femb\nI I S I I\n0 1 0 2 1\n").expect("header");

    let ordinals: Vec<_> = schema
        .columns()
        .iter()
        .map(|column| column.key_ordinal)
        .collect();
    assert_eq!(ordinals, vec![None, Some(0), None, Some(1), Some(2)]);
    assert_eq!(schema.key_names(), vec!["crate", "slot", "femb"]);
}

#[test]
fn text_and_float_columns_are_typed() {
    let schema = parse("3\nname gain offlchan\nC F I\n0 0 0\n").expect("header");

    let kinds: Vec<_> = schema.columns().iter().map(|column| column.kind).collect();
    assert_eq!(kinds, vec![ValueKind::Text, ValueKind::Float, ValueKind::Int]);
    assert_eq!(schema.key_arity(), 0);
}

#[test]
fn comments_and_blanks_between_header_lines_are_ignored() {
    let plain = parse("2\na b\nI I\n1 0\n").expect("plain header");
    let noisy = parse("# map\n\n2 # columns\n# names next\na b\n\n\nI I # types\n1 0\n")
        .expect("noisy header");

    assert_eq!(plain.columns(), noisy.columns());
}

#[test]
fn header_stops_before_data_lines() {
    let mut lines = LogicalLines::new("1\nx\nI\n1\n7\n8\n".as_bytes());
    parse_header(&mut lines).expect("header");

    let next = lines.next().expect("data line").expect("in-memory read");
    assert_eq!(next.text, "7");
    assert_eq!(next.number, 5);
}

#[test]
fn more_than_four_keys_is_not_a_header_error() {
    let schema = parse("5\na b c d e\nI I I I I\n1 1 1 1 1\n").expect("header");

    assert_eq!(schema.key_arity(), 5);
}

// ---- rejected headers --------------------------------------------------

#[test]
fn rejects_bad_column_count() {
    assert_eq!(
        schema_err("four\n"),
        SchemaError::ColumnCount {
            line: 1,
            token: "four".to_string(),
        }
    );
    assert_eq!(
        schema_err("0\n"),
        SchemaError::ColumnCount {
            line: 1,
            token: "0".to_string(),
        }
    );
    assert!(matches!(
        schema_err("2 3\n"),
        SchemaError::TokenCount {
            section: HeaderSection::ColumnCount,
            expected: 1,
            found: 2,
            ..
        }
    ));
}

#[test]
fn rejects_wrong_token_counts() {
    assert!(matches!(
        schema_err("3\na b\n"),
        SchemaError::TokenCount {
            line: 2,
            section: HeaderSection::Names,
            expected: 3,
            found: 2,
        }
    ));
    assert!(matches!(
        schema_err("2\na b\nI I I\n"),
        SchemaError::TokenCount {
            section: HeaderSection::Types,
            ..
        }
    ));
    assert!(matches!(
        schema_err("2\na b\nI I\n1\n"),
        SchemaError::TokenCount {
            section: HeaderSection::KeyFlags,
            ..
        }
    ));
}

#[test]
fn rejects_unknown_type_token() {
    assert_eq!(
        schema_err("2\na b\nI X\n0 0\n"),
        SchemaError::UnknownType {
            line: 3,
            name: "b".to_string(),
            token: "X".to_string(),
        }
    );
}

#[test]
fn rejects_non_integer_key_column() {
    assert_eq!(
        schema_err("2\na b\nI C\n1 1\n"),
        SchemaError::KeyKind {
            line: 4,
            name: "b".to_string(),
            kind: ValueKind::Text,
        }
    );
    assert!(matches!(
        schema_err("1\ngain\nF\n2\n"),
        SchemaError::KeyKind {
            kind: ValueKind::Float,
            ..
        }
    ));
}

#[test]
fn rejects_unparseable_key_flag() {
    assert_eq!(
        schema_err("2\na b\nI I\n1 yes\n"),
        SchemaError::KeyFlag {
            line: 4,
            name: "b".to_string(),
            token: "yes".to_string(),
        }
    );
}

#[test]
fn rejects_duplicate_column_names() {
    assert_eq!(
        schema_err("3\na b a\n"),
        SchemaError::DuplicateColumn {
            line: 2,
            name: "a".to_string(),
        }
    );
}

#[test]
fn rejects_truncated_header() {
    assert_eq!(
        schema_err(""),
        SchemaError::TruncatedHeader {
            missing: HeaderSection::ColumnCount,
        }
    );
    assert_eq!(
        schema_err("# only comments\n2\na b\nI I\n"),
        SchemaError::TruncatedHeader {
            missing: HeaderSection::KeyFlags,
        }
    );
}

#[test]
fn schema_error_messages_name_the_line() {
    let err = schema_err("2\na b\nI I\n1 yes\n");

    assert_eq!(err.to_string(), "line 4: invalid key flag 'yes' for column 'b'");
}
