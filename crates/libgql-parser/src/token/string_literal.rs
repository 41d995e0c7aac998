use crate::token::StringLiteralError;
use std::iter::Peekable;
use std::str::Chars;

/// Cooks the raw source text of a string or block string token (including
/// its surrounding quotes) into the string value it denotes.
///
/// Single-line strings process escape sequences (`\n`, `\uXXXX`, `\u{...}`,
/// surrogate pairs, ...). Block strings only unescape `\"""` and then apply
/// the GraphQL block string indentation algorithm.
pub fn cook_string_literal(raw: &str) -> Result<String, StringLiteralError> {
    if raw.starts_with("\"\"\"") {
        cook_block_string(raw)
    } else {
        cook_single_line_string(raw)
    }
}

fn cook_single_line_string(raw: &str) -> Result<String, StringLiteralError> {
    let Some(content) = raw.strip_prefix('"') else {
        return Err(StringLiteralError::Unterminated);
    };

    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut terminated = false;

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                terminated = true;
                break;
            },
            '\\' => match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('/') => result.push('/'),
                Some('b') => result.push('\u{0008}'),
                Some('f') => result.push('\u{000C}'),
                Some('u') => result.push(cook_unicode_escape(&mut chars)?),
                Some(other) => {
                    return Err(StringLiteralError::InvalidEscapeSequence(
                        format!("\\{other}"),
                    ));
                },
                None => {
                    return Err(StringLiteralError::InvalidEscapeSequence(
                        "\\".to_string(),
                    ));
                },
            },
            c if is_disallowed_control(c) => {
                return Err(StringLiteralError::InvalidCharacter(c));
            },
            c => result.push(c),
        }
    }

    if !terminated || chars.next().is_some() {
        return Err(StringLiteralError::Unterminated);
    }
    Ok(result)
}

/// Cooks a unicode escape after the `\u` has been consumed.
fn cook_unicode_escape(
    chars: &mut Peekable<Chars<'_>>,
) -> Result<char, StringLiteralError> {
    let code_point = read_code_point(chars)?;

    // A leading surrogate must be followed by `\uXXXX` holding a trailing
    // surrogate.
    if (0xD800..=0xDBFF).contains(&code_point) {
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
            let trailing = read_code_point(&mut lookahead)?;
            if (0xDC00..=0xDFFF).contains(&trailing) {
                *chars = lookahead;
                let combined =
                    0x10000 + ((code_point - 0xD800) << 10) + (trailing - 0xDC00);
                return char::from_u32(combined).ok_or_else(|| {
                    StringLiteralError::InvalidUnicodeEscape(format!(
                        "\\u{code_point:04X}\\u{trailing:04X}"
                    ))
                });
            }
        }
    }

    char::from_u32(code_point).ok_or_else(|| {
        StringLiteralError::InvalidUnicodeEscape(format!("\\u{code_point:04X}"))
    })
}

/// Reads either `{hex+}` or exactly four hex digits.
fn read_code_point(
    chars: &mut Peekable<Chars<'_>>,
) -> Result<u32, StringLiteralError> {
    if chars.peek() == Some(&'{') {
        chars.next();
        let mut hex = String::new();
        loop {
            match chars.next() {
                Some('}') => break,
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                Some(c) => {
                    return Err(StringLiteralError::InvalidUnicodeEscape(
                        format!("\\u{{{hex}{c}"),
                    ));
                },
                None => {
                    return Err(StringLiteralError::InvalidUnicodeEscape(
                        format!("\\u{{{hex}"),
                    ));
                },
            }
        }
        if hex.is_empty() {
            return Err(StringLiteralError::InvalidUnicodeEscape(
                "\\u{}".to_string(),
            ));
        }
        u32::from_str_radix(&hex, 16).map_err(|_| {
            StringLiteralError::InvalidUnicodeEscape(format!("\\u{{{hex}}}"))
        })
    } else {
        let mut hex = String::with_capacity(4);
        for _ in 0..4 {
            match chars.next() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                Some(c) => {
                    return Err(StringLiteralError::InvalidUnicodeEscape(
                        format!("\\u{hex}{c}"),
                    ));
                },
                None => {
                    return Err(StringLiteralError::InvalidUnicodeEscape(
                        format!("\\u{hex}"),
                    ));
                },
            }
        }
        u32::from_str_radix(&hex, 16).map_err(|_| {
            StringLiteralError::InvalidUnicodeEscape(format!("\\u{hex}"))
        })
    }
}

fn cook_block_string(raw: &str) -> Result<String, StringLiteralError> {
    if raw.len() < 6 || !raw.ends_with("\"\"\"") || raw.ends_with("\\\"\"\"") {
        return Err(StringLiteralError::Unterminated);
    }
    let content = raw[3..raw.len() - 3].replace("\\\"\"\"", "\"\"\"");

    if let Some(c) = content.chars().find(|c| is_disallowed_control(*c)) {
        return Err(StringLiteralError::InvalidCharacter(c));
    }

    let lines = split_block_lines(&content);

    // Common indentation ignores the first line and whitespace-only lines.
    let common_indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let indent = leading_whitespace_len(line);
            (indent < line.len()).then_some(indent)
        })
        .min()
        .unwrap_or(0);

    let mut result_lines: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            if idx == 0 || line.len() < common_indent {
                *line
            } else {
                &line[common_indent..]
            }
        })
        .collect();

    while result_lines
        .first()
        .is_some_and(|l| leading_whitespace_len(l) == l.len())
    {
        result_lines.remove(0);
    }
    while result_lines
        .last()
        .is_some_and(|l| leading_whitespace_len(l) == l.len())
    {
        result_lines.pop();
    }

    Ok(result_lines.join("\n"))
}

/// Splits on `\r\n`, `\n`, and lone `\r`.
fn split_block_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = content.as_bytes();
    let mut line_start = 0;
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\n' => {
                lines.push(&content[line_start..idx]);
                line_start = idx + 1;
            },
            b'\r' => {
                lines.push(&content[line_start..idx]);
                if bytes.get(idx + 1) == Some(&b'\n') {
                    idx += 1;
                }
                line_start = idx + 1;
            },
            _ => {},
        }
        idx += 1;
    }
    lines.push(&content[line_start..]);
    lines
}

fn leading_whitespace_len(line: &str) -> usize {
    line.bytes().take_while(|b| matches!(b, b' ' | b'\t')).count()
}

/// Source characters below U+0020 other than tab and line terminators.
fn is_disallowed_control(c: char) -> bool {
    c < '\u{0020}' && !matches!(c, '\t' | '\n' | '\r')
}
