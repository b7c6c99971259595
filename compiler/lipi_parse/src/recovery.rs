//! Error recovery for the parser.
//!
//! After a parse error the cursor is left somewhere inside a broken
//! statement. Recovery skips forward to a safe boundary so one mistake
//! produces one diagnostic instead of a cascade.

use lipi_lexer::TokenKind;

use crate::cursor::Cursor;

/// Skip to the start of the next statement.
///
/// Statements begin with an identifier at nesting depth zero. A closing
/// brace at depth zero also stops recovery, without being consumed, so a
/// block whose last statement broke still closes cleanly. Otherwise at
/// least one token is consumed; the statement loops rely on that for
/// progress.
pub(crate) fn synchronize_stmt(cursor: &mut Cursor<'_>) {
    if cursor.is_at_end() || matches!(cursor.current_kind(), TokenKind::RBrace) {
        return;
    }
    let mut depth = track_depth(cursor.current_kind(), 0);
    cursor.advance();

    while !cursor.is_at_end() {
        match cursor.current_kind() {
            TokenKind::Ident(_) | TokenKind::RBrace if depth == 0 => return,
            kind => {
                depth = track_depth(kind, depth);
                cursor.advance();
            }
        }
    }
}

/// Skip to the next entry boundary inside a `{ ... }` block.
///
/// Stops after a comma at depth zero (ready for the next entry) or
/// before the closing brace (the block loop consumes it).
pub(crate) fn synchronize_in_block(cursor: &mut Cursor<'_>) {
    let mut depth: u32 = 0;

    while !cursor.is_at_end() {
        match cursor.current_kind() {
            TokenKind::Comma if depth == 0 => {
                cursor.advance();
                return;
            }
            TokenKind::RBrace if depth == 0 => return,
            kind => {
                depth = track_depth(kind, depth);
                cursor.advance();
            }
        }
    }
}

/// Fold a token into the running delimiter depth.
///
/// Saturates at zero so a stray closer cannot underflow and mask a later
/// real boundary.
fn track_depth(kind: &TokenKind, depth: u32) -> u32 {
    match kind {
        TokenKind::LBrace | TokenKind::LBracket | TokenKind::LParen => depth + 1,
        TokenKind::RBrace | TokenKind::RBracket | TokenKind::RParen => depth.saturating_sub(1),
        _ => depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipi_lexer::TokenList;

    fn tokens(source: &str) -> TokenList {
        lipi_lexer::lex(source).tokens
    }

    #[test]
    fn test_synchronize_stmt_skips_to_next_ident() {
        let toks = tokens(r#"language_code 42 stable true"#);
        let mut cursor = Cursor::new(&toks);
        cursor.advance(); // language_code
        // cursor sits on the bad token `42`
        synchronize_stmt(&mut cursor);
        assert!(matches!(cursor.current_kind(), TokenKind::Ident(name) if name == "stable"));
    }

    #[test]
    fn test_synchronize_stmt_skips_delimited_groups() {
        let toks = tokens(r#"vowels { "a" => "b" } stable true"#);
        let mut cursor = Cursor::new(&toks);
        // recover from the very first token: the block's identifiers and
        // strings must not be mistaken for a statement start
        synchronize_stmt(&mut cursor);
        assert!(matches!(cursor.current_kind(), TokenKind::Ident(name) if name == "stable"));
    }

    #[test]
    fn test_synchronize_stmt_stops_before_closing_brace() {
        let toks = tokens(r#"42 "x" } stable true"#);
        let mut cursor = Cursor::new(&toks);
        synchronize_stmt(&mut cursor);
        assert!(matches!(cursor.current_kind(), TokenKind::RBrace));
    }

    #[test]
    fn test_synchronize_stmt_at_closing_brace_stays_put() {
        let toks = tokens(r#"} stable true"#);
        let mut cursor = Cursor::new(&toks);
        synchronize_stmt(&mut cursor);
        assert!(matches!(cursor.current_kind(), TokenKind::RBrace));
    }

    #[test]
    fn test_synchronize_stmt_stops_at_eof() {
        let toks = tokens("{ { {");
        let mut cursor = Cursor::new(&toks);
        synchronize_stmt(&mut cursor);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_synchronize_in_block_consumes_comma() {
        let toks = tokens(r#"] , "ka" }"#);
        let mut cursor = Cursor::new(&toks);
        synchronize_in_block(&mut cursor);
        assert!(cursor.check_str());
    }

    #[test]
    fn test_synchronize_in_block_stops_before_rbrace() {
        let toks = tokens(r#"[ "a" , "b" ] }"#);
        let mut cursor = Cursor::new(&toks);
        synchronize_in_block(&mut cursor);
        assert!(matches!(cursor.current_kind(), TokenKind::RBrace));
    }
}
