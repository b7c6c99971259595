//! Statement grammar.
//!
//! Every statement starts with an identifier keyword, so dispatch happens
//! on the keyword text. Unknown keywords produce a diagnostic carrying the
//! name instead of a generic token error.

use lipi_diagnostic::ErrorCode;
use lipi_ir::{
    AcceptCondition, CategoryArg, Priority, Span, Stmt, TokenCategory, TokenOptions, Value,
};
use lipi_lexer::TokenKind;
use tracing::debug;

use crate::error::ParseError;
use crate::Parser;

mod combine;
mod mapping;


/// Resolve a statement keyword to the token category it declares.
fn category_keyword(name: &str) -> Option<TokenCategory> {
    match name {
        "vowels" => Some(TokenCategory::Vowel),
        "consonants" => Some(TokenCategory::Consonant),
        "consonant_vowel_combinations" => Some(TokenCategory::ConsonantVowel),
        "anusvara" => Some(TokenCategory::Anusvara),
        "visarga" => Some(TokenCategory::Visarga),
        "virama" => Some(TokenCategory::Virama),
        "symbols" => Some(TokenCategory::Symbol),
        "numbers" => Some(TokenCategory::Number),
        "others" => Some(TokenCategory::Other),
        "non_joiner" => Some(TokenCategory::NonJoiner),
        "joiner" => Some(TokenCategory::Joiner),
        "period" => Some(TokenCategory::Period),
        _ => None,
    }
}

impl Parser<'_> {
    /// Parse one statement. The cursor must sit on the keyword identifier.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let (name, span) = self.expect_ident()?;
        debug!(keyword = %name, pos = self.position(), "parse_stmt");

        match name.as_str() {
            "language_code" => {
                let (value, span) = self.parse_str_value(span)?;
                Ok(Stmt::LanguageCode { value, span })
            }
            "identifier" => {
                let (value, span) = self.parse_str_value(span)?;
                Ok(Stmt::Identifier { value, span })
            }
            "display_name" => {
                let (value, span) = self.parse_str_value(span)?;
                Ok(Stmt::DisplayName { value, span })
            }
            "author" => {
                let (value, span) = self.parse_str_value(span)?;
                Ok(Stmt::Author { value, span })
            }
            "stable" => {
                let (value, span) = self.parse_bool_value(span)?;
                Ok(Stmt::Stable { value, span })
            }
            "infer_dead_consonants" => {
                let (value, span) = self.parse_bool_value(span)?;
                Ok(Stmt::InferDeadConsonants { value, span })
            }
            "ignore_duplicates" => {
                let (value, span) = self.parse_bool_value(span)?;
                Ok(Stmt::IgnoreDuplicates { value, span })
            }
            "tag" => self.parse_tag(span),
            "list" => self.parse_list(span),
            "generate_cv" => Ok(Stmt::GenerateCv { span }),
            "stemrules" => {
                let mapping = self.parse_mapping()?;
                let span = span.merge(self.previous_span());
                Ok(Stmt::StemRules { mapping, span })
            }
            "exceptions_stem" => {
                let mapping = self.parse_mapping()?;
                let span = span.merge(self.previous_span());
                Ok(Stmt::StemExceptions { mapping, span })
            }
            other => {
                if let Some(category) = category_keyword(other) {
                    self.parse_category(category, span)
                } else {
                    Err(ParseError::new(
                        ErrorCode::E1005,
                        format!("`{name}` is not a known scheme statement"),
                        span,
                    )
                    .with_context("unknown statement"))
                }
            }
        }
    }

    /// Parse the string argument of a metadata statement.
    fn parse_str_value(&mut self, kw_span: Span) -> Result<(String, Span), ParseError> {
        let (value, value_span) = self.expect_str()?;
        Ok((value, kw_span.merge(value_span)))
    }

    /// Parse the boolean argument of a flag statement.
    fn parse_bool_value(&mut self, kw_span: Span) -> Result<(bool, Span), ParseError> {
        let span = self.current_span();
        let value = match self.current_kind() {
            TokenKind::True => true,
            TokenKind::False => false,
            other => {
                return Err(ParseError::new(
                    ErrorCode::E1001,
                    format!("expected `true` or `false`, found {}", other.display_name()),
                    span,
                )
                .with_context("expected `true` or `false`"));
            }
        };
        self.advance();
        Ok((value, kw_span.merge(span)))
    }

    /// Parse a category declaration: `cat-name opts? (mapping | combine)`.
    fn parse_category(&mut self, category: TokenCategory, kw_span: Span) -> Result<Stmt, ParseError> {
        let options = if self.check(&TokenKind::LParen) {
            self.parse_options()?
        } else {
            TokenOptions::default()
        };
        let arg = self.parse_category_arg(category)?;
        let span = kw_span.merge(self.previous_span());
        Ok(Stmt::Category {
            category,
            options,
            arg,
            span,
        })
    }

    fn parse_category_arg(&mut self, category: TokenCategory) -> Result<CategoryArg, ParseError> {
        if matches!(self.current_kind(), TokenKind::Ident(name) if name == "combine") {
            return Ok(CategoryArg::Combine(self.parse_combine()?));
        }
        if self.check(&TokenKind::LBrace) {
            return Ok(CategoryArg::Mapping(self.parse_mapping()?));
        }
        // `period "."` declares a single scalar
        if category == TokenCategory::Period && self.check_str() {
            let (text, _) = self.expect_str()?;
            return Ok(CategoryArg::Scalar(Value::Str(text)));
        }
        Err(self.expected_mapping_error())
    }

    #[cold]
    fn expected_mapping_error(&self) -> ParseError {
        ParseError::new(
            ErrorCode::E1002,
            format!(
                "expected a mapping, but got {}",
                self.current_kind().display_name()
            ),
            self.current_span(),
        )
        .with_context("expected `{ pattern => value, ... }`")
    }

    /// Parse `( opt ("," opt)* )` into resolved token options.
    ///
    /// Later occurrences of the same key overwrite earlier ones, matching
    /// keyword-argument behavior.
    fn parse_options(&mut self) -> Result<TokenOptions, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut options = TokenOptions::default();
        loop {
            let (key, key_span) = self.expect_ident()?;
            self.expect(&TokenKind::Colon)?;
            match key.as_str() {
                "priority" => options.priority = self.parse_priority()?,
                "accept_if" => options.accept_condition = self.parse_accept_condition()?,
                _ => {
                    return Err(ParseError::new(
                        ErrorCode::E1006,
                        format!("unknown option `{key}`"),
                        key_span,
                    )
                    .with_help("valid options are: `priority`, `accept_if`"));
                }
            }
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(options)
    }

    /// Parse a priority value: `low`, `normal`, `high`, or an integer.
    fn parse_priority(&mut self) -> Result<Priority, ParseError> {
        let span = self.current_span();
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let priority = match name.as_str() {
                    "low" => Priority::LOW,
                    "normal" => Priority::NORMAL,
                    "high" => Priority::HIGH,
                    _ => {
                        return Err(ParseError::new(
                            ErrorCode::E1007,
                            format!("`{name}` is not a valid priority"),
                            span,
                        )
                        .with_help("use `low`, `normal`, `high`, or an integer"));
                    }
                };
                self.advance();
                Ok(priority)
            }
            TokenKind::Int(n) => {
                let value = i32::try_from(*n).map_err(|_| {
                    ParseError::new(
                        ErrorCode::E1007,
                        format!("priority `{n}` is out of range"),
                        span,
                    )
                })?;
                self.advance();
                Ok(Priority::new(value))
            }
            other => Err(ParseError::new(
                ErrorCode::E1007,
                format!("priority should be a number, found {}", other.display_name()),
                span,
            )
            .with_help("use `low`, `normal`, `high`, or an integer")),
        }
    }

    /// Parse an accept condition: a named position or its numeric code.
    fn parse_accept_condition(&mut self) -> Result<AcceptCondition, ParseError> {
        let span = self.current_span();
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let condition = match name.as_str() {
                    "all" => AcceptCondition::All,
                    "starts_with" => AcceptCondition::StartsWith,
                    "in_between" => AcceptCondition::InBetween,
                    "ends_with" => AcceptCondition::EndsWith,
                    _ => {
                        return Err(ParseError::new(
                            ErrorCode::E1008,
                            format!("`{name}` is not a valid accept condition"),
                            span,
                        )
                        .with_help("use `all`, `starts_with`, `in_between`, or `ends_with`"));
                    }
                };
                self.advance();
                Ok(condition)
            }
            TokenKind::Int(n) => {
                let condition = u8::try_from(*n)
                    .ok()
                    .and_then(AcceptCondition::from_code)
                    .ok_or_else(|| {
                        ParseError::new(
                            ErrorCode::E1008,
                            format!("`{n}` is not a valid accept condition code"),
                            span,
                        )
                        .with_help(
                            "codes are 0 (all), 1 (starts_with), 2 (in_between), 3 (ends_with)",
                        )
                    })?;
                self.advance();
                Ok(condition)
            }
            other => Err(ParseError::new(
                ErrorCode::E1008,
                format!("accept_if should be a number, found {}", other.display_name()),
                span,
            )
            .with_help("use `all`, `starts_with`, `in_between`, or `ends_with`")),
        }
    }

    /// Parse `tag <name> { stmt* }`.
    fn parse_tag(&mut self, kw_span: Span) -> Result<Stmt, ParseError> {
        let (name, _) = self.expect_str()?;
        let body = self.parse_block()?;
        let span = kw_span.merge(self.previous_span());
        Ok(Stmt::Tag { name, body, span })
    }

    /// Parse `list <name> ("," <name>)* { stmt* }`.
    fn parse_list(&mut self, kw_span: Span) -> Result<Stmt, ParseError> {
        let mut names = vec![self.expect_str()?.0];
        while self.check(&TokenKind::Comma) {
            self.advance();
            names.push(self.expect_str()?.0);
        }
        let body = self.parse_block()?;
        let span = kw_span.merge(self.previous_span());
        Ok(Stmt::List { names, body, span })
    }

    /// Parse a `{ stmt* }` block body.
    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let open_span = self.current_span();
        self.expect(&TokenKind::LBrace)?;
        let mut body = Vec::new();
        loop {
            if self.check(&TokenKind::RBrace) {
                break;
            }
            if self.is_at_end() {
                return Err(self.unclosed_delimiter_error(open_span, '{'));
            }
            if self.check_ident() {
                match self.parse_stmt() {
                    Ok(stmt) => body.push(stmt),
                    Err(e) => {
                        self.push_error(e);
                        self.recover_to_next_stmt();
                    }
                }
            } else {
                let err = self.stray_token_error();
                self.push_error(err);
                self.advance();
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(body)
    }

    #[cold]
    pub(crate) fn unclosed_delimiter_error(&self, open_span: Span, delimiter: char) -> ParseError {
        ParseError::new(
            ErrorCode::E1003,
            format!("unclosed delimiter `{delimiter}`"),
            open_span,
        )
        .with_context(format!("this `{delimiter}` is never closed"))
    }
}
