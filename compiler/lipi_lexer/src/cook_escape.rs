//! Escape processing for string literals.
//!
//! The scheme grammar allows `\"` `\\` `\n` `\t`. Invalid escapes push
//! errors into the accumulator rather than stopping the lexer.

use lipi_ir::Span;

use crate::lex_error::LexError;

/// Unescape a string literal's content (between the `"`s).
///
/// Fast path: if no backslashes, returns `None` to signal the caller can
/// reuse the source slice directly.
#[allow(
    clippy::cast_possible_truncation,
    reason = "source offsets bounded by u32; scheme files are tiny"
)]
pub(crate) fn unescape_string(
    content: &str,
    base_offset: u32,
    errors: &mut Vec<LexError>,
) -> Option<String> {
    if !content.contains('\\') {
        return None;
    }

    let mut result = String::with_capacity(content.len());
    let mut chars = content.char_indices();

    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some((_, '"')) => result.push('"'),
                Some((_, '\\')) => result.push('\\'),
                Some((_, 'n')) => result.push('\n'),
                Some((_, 't')) => result.push('\t'),
                Some((j, esc)) => {
                    let esc_start = base_offset + i as u32;
                    let esc_end = base_offset + j as u32 + esc.len_utf8() as u32;
                    errors.push(LexError::invalid_escape(
                        Span::new(esc_start, esc_end),
                        esc,
                    ));
                    // Use replacement character for invalid escapes
                    result.push('\u{FFFD}');
                }
                None => {
                    // Trailing backslash; unreachable for closed literals
                    // since `\"` would have escaped the closing quote
                    let esc_start = base_offset + i as u32;
                    errors.push(LexError::invalid_escape(
                        Span::new(esc_start, esc_start + 1),
                        '\\',
                    ));
                    result.push('\\');
                }
            }
        } else {
            result.push(c);
        }
    }

    Some(result)
}
