//! Mapping and value grammar.
//!
//! A mapping is `{ pattern => value, ... }` with an optional trailing
//! comma. Values are strings, integers, or bracketed groups; groups may
//! nest, and the validator decides later which shapes are meaningful.

use lipi_diagnostic::ErrorCode;
use lipi_ir::{Mapping, Value};
use lipi_lexer::TokenKind;
use tracing::trace;

use crate::error::ParseError;
use crate::Parser;

impl Parser<'_> {
    /// Parse `{ pair ("," pair)* ","? }`.
    ///
    /// A broken pair is recorded and skipped so the rest of the mapping
    /// still parses.
    pub(crate) fn parse_mapping(&mut self) -> Result<Mapping, ParseError> {
        let open_span = self.current_span();
        self.expect(&TokenKind::LBrace)?;
        let mut mapping = Mapping::new();

        loop {
            if self.check(&TokenKind::RBrace) {
                break;
            }
            if self.is_at_end() {
                return Err(self.unclosed_delimiter_error(open_span, '{'));
            }
            match self.parse_pair() {
                Ok((key, value)) => mapping.push(key, value),
                Err(e) => {
                    self.push_error(e);
                    self.recover_in_block();
                    continue;
                }
            }
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else if !self.check(&TokenKind::RBrace) && !self.is_at_end() {
                // missing comma: report once and keep reading pairs
                let err = self.missing_comma_error();
                self.push_error(err);
            }
        }

        self.expect(&TokenKind::RBrace)?;
        trace!(pairs = mapping.len(), "parse_mapping");
        Ok(mapping)
    }

    /// Parse one `pattern => value` pair.
    fn parse_pair(&mut self) -> Result<(Value, Value), ParseError> {
        let key = self.parse_value()?;
        self.expect(&TokenKind::FatArrow)?;
        let value = self.parse_value()?;
        Ok((key, value))
    }

    /// Parse a value: string, integer, or `[ ... ]` group.
    pub(crate) fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.current_kind() {
            TokenKind::Str(text) => {
                let text = text.clone();
                self.advance();
                Ok(Value::Str(text))
            }
            TokenKind::Int(n) => {
                let n = *n;
                self.advance();
                Ok(Value::Int(n))
            }
            TokenKind::LBracket => self.parse_group(),
            other => Err(ParseError::new(
                ErrorCode::E1011,
                format!(
                    "expected a string, number, or group, found {}",
                    other.display_name()
                ),
                self.current_span(),
            )),
        }
    }

    /// Parse `[ value ("," value)* ","? ]`.
    ///
    /// An empty group parses fine; the validator rejects it with its own
    /// diagnostic.
    fn parse_group(&mut self) -> Result<Value, ParseError> {
        let open_span = self.current_span();
        self.expect(&TokenKind::LBracket)?;
        let mut items = Vec::new();

        loop {
            if self.check(&TokenKind::RBracket) {
                break;
            }
            if self.is_at_end() {
                return Err(self.unclosed_delimiter_error(open_span, '['));
            }
            items.push(self.parse_value()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        self.expect(&TokenKind::RBracket)?;
        Ok(Value::Group(items))
    }

    #[cold]
    fn missing_comma_error(&self) -> ParseError {
        ParseError::new(
            ErrorCode::E1001,
            format!(
                "expected `,` or `}}`, found {}",
                self.current_kind().display_name()
            ),
            self.current_span(),
        )
        .with_context("expected `,` between mapping pairs")
    }
}
