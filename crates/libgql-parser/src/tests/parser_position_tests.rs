//! Tests for the source positions recorded on AST nodes.

use crate::SourcePosition;
use crate::ast;
use crate::tests::utils::field_at;
use crate::tests::utils::only_operation;
use crate::tests::utils::parse_ok;
use proptest::prelude::*;

/// Verifies that a field's position is its alias when one is present.
#[test]
fn field_position_starts_at_alias() {
    let doc = parse_ok("{ alias: name plain }");
    let selections = &only_operation(&doc).selection_set;
    assert_eq!(field_at(selections, 0).pos.byte_offset(), 2);
    assert_eq!(field_at(selections, 1).pos.byte_offset(), 14);
}

/// Verifies positions of variable definitions and wrapped types.
#[test]
fn variable_and_type_positions() {
    let source = "query Q($v: [Int]!) { a }";
    let doc = parse_ok(source);
    let var = &only_operation(&doc).variable_definitions[0];
    assert_eq!(var.pos.byte_offset(), 8);
    // A non-null type is positioned at the type it wraps.
    let ast::TypeRef::NonNull(inner, pos) = &var.var_type else {
        panic!("expected a non-null type");
    };
    assert_eq!(pos.byte_offset(), 12);
    assert_eq!(inner.pos().byte_offset(), 12);
    assert_eq!(inner.innermost_name().pos.byte_offset(), 13);
}

/// Verifies line/column conversion across line terminators.
#[test]
fn positions_convert_to_lines_and_columns() {
    let source = "query Q {\n  first\r\n  second\r  third\n}";
    let doc = parse_ok(source);
    let selections = &only_operation(&doc).selection_set;
    let positions: Vec<_> = (0..3)
        .map(|idx| field_at(selections, idx).pos.to_position(source))
        .collect();
    assert_eq!(
        positions,
        vec![
            SourcePosition::new(2, 3),
            SourcePosition::new(3, 3),
            SourcePosition::new(4, 3),
        ],
    );
}

/// Verifies that columns count characters rather than bytes.
#[test]
fn columns_count_characters() {
    let source = "# héllo wörld\n{ a(s: \"ü\") b }";
    let doc = parse_ok(source);
    let b = field_at(&only_operation(&doc).selection_set, 1);
    assert_eq!(b.pos.to_position(source), SourcePosition::new(2, 13));
}

mod properties {
    use super::*;
    use crate::parse;

    proptest! {
        /// Every field's position points at its own name in the source.
        #[test]
        fn field_positions_point_at_names(
            names in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..12),
            separator in "[ ,\n\t]{1,3}",
        ) {
            let source = format!("{{ {} }}", names.join(&separator));
            let doc = parse_ok(&source);
            let selections = &only_operation(&doc).selection_set;
            prop_assert_eq!(selections.selections.len(), names.len());
            let mut last = 0;
            for (idx, name) in names.iter().enumerate() {
                let offset = field_at(selections, idx).pos.byte_offset();
                prop_assert!(offset > last);
                prop_assert!(source[offset..].starts_with(name.as_str()));
                last = offset;
            }
        }

        /// The parser never panics, whatever the input.
        #[test]
        fn arbitrary_input_never_panics(source in "\\PC{0,128}") {
            let _ = parse(&source);
        }

        /// Error positions always fall within the source.
        #[test]
        fn error_positions_are_in_bounds(source in "[{}()\\[\\]a-z:$!@. \"]{0,64}") {
            for error in parse(&source).errors {
                prop_assert!(error.pos().byte_offset() <= source.len());
            }
        }
    }
}
