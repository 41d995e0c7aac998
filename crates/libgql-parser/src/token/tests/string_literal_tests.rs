//! Tests for [`crate::token::cook_string_literal()`].

use crate::token::StringLiteralError;
use crate::token::cook_string_literal;

/// Standard escapes are decoded.
#[test]
fn cooks_escape_sequences() {
    assert_eq!(
        cook_string_literal(r#""a\nb\t\"c\"\\\/""#),
        Ok("a\nb\t\"c\"\\/".to_string()),
    );
}

/// Both fixed-width and braced unicode escapes are supported.
#[test]
fn cooks_unicode_escapes() {
    assert_eq!(cook_string_literal(r#""\u0041\u{1F600}""#), Ok("A😀".to_string()));
}

/// A surrogate pair in two `\uXXXX` escapes decodes to one character.
#[test]
fn cooks_surrogate_pairs() {
    assert_eq!(cook_string_literal(r#""\uD83D\uDE00""#), Ok("😀".to_string()));
}

/// A lone surrogate is not a valid character.
#[test]
fn rejects_lone_surrogate() {
    assert!(matches!(
        cook_string_literal(r#""\uD800""#),
        Err(StringLiteralError::InvalidUnicodeEscape(_)),
    ));
}

/// Unknown escapes are errors.
#[test]
fn rejects_invalid_escape() {
    assert_eq!(
        cook_string_literal(r#""\q""#),
        Err(StringLiteralError::InvalidEscapeSequence("\\q".to_string())),
    );
}

/// A string without its closing quote is unterminated.
#[test]
fn rejects_unterminated() {
    assert_eq!(cook_string_literal("\"abc"), Err(StringLiteralError::Unterminated));
    assert_eq!(cook_string_literal("\"abc\\\""), Err(StringLiteralError::Unterminated));
    assert_eq!(cook_string_literal("\"\"\"abc"), Err(StringLiteralError::Unterminated));
}

/// Control characters other than tab are rejected.
#[test]
fn rejects_control_characters() {
    assert_eq!(
        cook_string_literal("\"a\u{0007}\""),
        Err(StringLiteralError::InvalidCharacter('\u{0007}')),
    );
}

/// Block strings strip common indentation and blank leading/trailing lines.
#[test]
fn cooks_block_string_indentation() {
    let raw = "\"\"\"\n    Hello,\n      World!\n\n    Yours,\n      GraphQL.\n  \"\"\"";
    assert_eq!(
        cook_string_literal(raw),
        Ok("Hello,\n  World!\n\nYours,\n  GraphQL.".to_string()),
    );
}

/// Block strings keep backslashes literally but unescape `\"""`.
#[test]
fn cooks_block_string_escapes() {
    assert_eq!(
        cook_string_literal("\"\"\"a \\n \\\"\"\" b\"\"\""),
        Ok("a \\n \"\"\" b".to_string()),
    );
}

/// `\r\n` and lone `\r` both break block string lines.
#[test]
fn cooks_block_string_line_terminators() {
    assert_eq!(
        cook_string_literal("\"\"\"a\r\n  b\r  c\"\"\""),
        Ok("a\nb\nc".to_string()),
    );
}
