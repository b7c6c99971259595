//! The evaluator: drives parsed statements against a token store.
//!
//! Statements execute in order. Soft problems (bad mappings, store
//! rejections) are recorded on the reporter and the run continues;
//! structural misuse of the scheme language is a [`Fatal`] that aborts
//! evaluation immediately.

use tracing::debug;

use lipi_diagnostic::{Diagnostic, ErrorCode, Fatal, Reporter};
use lipi_ir::{
    CategoryArg, Mapping, SchemeDetails, Span, Stmt, TokenCategory, TokenOptions, Value,
};

use crate::lists::ListRegistry;
use crate::registry::TokenRegistry;
use crate::store::TokenStore;

/// Evaluates scheme statements against a store and a reporter.
///
/// The registry and custom lists are owned here and queried by the
/// combine machinery; the store and reporter are borrowed so the caller
/// keeps them after evaluation for flushing and for the final summary.
pub struct Evaluator<'a, S: TokenStore> {
    pub(crate) store: &'a mut S,
    pub(crate) reporter: &'a mut Reporter,
    pub(crate) registry: TokenRegistry,
    pub(crate) lists: ListRegistry,
    details: SchemeDetails,
    non_joiner_declared: bool,
    joiner_declared: bool,
}

impl<'a, S: TokenStore> Evaluator<'a, S> {
    /// Create an evaluator over the given store and reporter.
    pub fn new(store: &'a mut S, reporter: &'a mut Reporter) -> Self {
        Evaluator {
            store,
            reporter,
            registry: TokenRegistry::new(),
            lists: ListRegistry::new(),
            details: SchemeDetails::new(),
            non_joiner_declared: false,
            joiner_declared: false,
        }
    }

    /// Execute a parsed scheme.
    ///
    /// Soft errors land on the reporter; a `Fatal` stops evaluation at the
    /// offending statement.
    pub fn evaluate(&mut self, stmts: &[Stmt]) -> Result<(), Fatal> {
        debug!(stmts = stmts.len(), "evaluate scheme");
        self.eval_stmts(stmts)
    }

    pub(crate) fn eval_stmts(&mut self, stmts: &[Stmt]) -> Result<(), Fatal> {
        for stmt in stmts {
            self.eval_stmt(stmt)?;
        }
        Ok(())
    }

    fn eval_stmt(&mut self, stmt: &Stmt) -> Result<(), Fatal> {
        match stmt {
            Stmt::LanguageCode { value, .. } => self.details.lang_code = Some(value.clone()),
            Stmt::Identifier { value, .. } => self.details.identifier = Some(value.clone()),
            Stmt::DisplayName { value, .. } => self.details.display_name = Some(value.clone()),
            Stmt::Author { value, .. } => self.details.author = Some(value.clone()),
            Stmt::Stable { value, .. } => self.details.is_stable = Some(*value),
            Stmt::InferDeadConsonants { value, .. } => {
                self.store.set_infer_dead_consonants(*value);
            }
            Stmt::IgnoreDuplicates { value, .. } => self.store.set_ignore_duplicates(*value),
            Stmt::Category {
                category,
                options,
                arg,
                ..
            } => self.eval_category(*category, *options, arg)?,
            Stmt::Tag { name, body, .. } => self.eval_tag(name, body)?,
            Stmt::List { names, body, span } => self.eval_list(names, body, *span)?,
            Stmt::GenerateCv { .. } => self.generate_cv(),
            Stmt::StemRules { mapping, .. } => self.eval_stem_rules(mapping),
            Stmt::StemExceptions { mapping, .. } => self.eval_stem_exceptions(mapping),
        }
        Ok(())
    }

    fn eval_category(
        &mut self,
        category: TokenCategory,
        options: TokenOptions,
        arg: &CategoryArg,
    ) -> Result<(), Fatal> {
        debug!(category = %category, "eval category");
        match category {
            TokenCategory::NonJoiner => self.non_joiner_declared = true,
            TokenCategory::Joiner => self.joiner_declared = true,
            _ => {}
        }

        match arg {
            CategoryArg::Mapping(mapping) => self.declare(mapping, category, options),
            // A bare scalar is shorthand for mapping it from ".".
            CategoryArg::Scalar(value) => {
                let mapping = Mapping::from_pairs(vec![(Value::from("."), value.clone())]);
                self.create_tokens(&mapping, category, options);
            }
            CategoryArg::Combine(expr) => {
                if let Some(mapping) = self.resolve_combine(expr)? {
                    self.declare(&mapping, category, options);
                }
            }
        }
        Ok(())
    }

    /// Validate a mapping and expand it into tokens.
    pub(crate) fn declare(
        &mut self,
        mapping: &Mapping,
        category: TokenCategory,
        options: TokenOptions,
    ) {
        self.validate(mapping);
        self.create_tokens(mapping, category, options);
    }

    /// Run a tag block with the tag attached to every token and
    /// diagnostic produced inside.
    fn eval_tag(&mut self, name: &str, body: &[Stmt]) -> Result<(), Fatal> {
        self.reporter.set_tag(name);
        let result = self.eval_stmts(body);
        self.reporter.clear_tag();
        result
    }

    fn eval_list(&mut self, names: &[String], body: &[Stmt], span: Span) -> Result<(), Fatal> {
        if self.lists.is_recording() {
            return Err(Fatal::new(
                Diagnostic::error(ErrorCode::E4001)
                    .with_message("Can't create nested list")
                    .with_label(span, "this list is inside another list scope"),
            ));
        }
        if names.is_empty() || names.iter().any(String::is_empty) {
            return Err(Fatal::new(
                Diagnostic::error(ErrorCode::E4002)
                    .with_message("List should have a name")
                    .with_label(span, "give every list a non-empty name"),
            ));
        }

        let mut scope = self.recording_scope(names);
        scope.eval_stmts(body)
    }

    fn eval_stem_rules(&mut self, mapping: &Mapping) {
        if self.reporter.has_errors() {
            return;
        }
        for (key, value) in mapping {
            let (Some(old_ending), Some(new_ending)) = (key.scalar_text(), value.scalar_text())
            else {
                self.reporter
                    .error(ErrorCode::E3004, "stem rules expect scalar endings");
                continue;
            };
            if let Err(err) = self.store.create_stem_rule(&old_ending, &new_ending) {
                self.reporter.error(ErrorCode::E3004, err.message());
            }
        }
    }

    fn eval_stem_exceptions(&mut self, mapping: &Mapping) {
        for (key, value) in mapping {
            let (Some(word), Some(stem)) = (key.scalar_text(), value.scalar_text()) else {
                self.reporter
                    .error(ErrorCode::E3004, "stem exceptions expect scalar words");
                continue;
            };
            if let Err(err) = self.store.create_stem_exception(&word, &stem) {
                self.reporter.error(ErrorCode::E3004, err.message());
            }
        }
    }

    /// Insert the standard symbols a scheme gets for free: the joiner pair
    /// unless the scheme declared its own, and the dash separator always.
    pub fn insert_default_symbols(&mut self) {
        if !self.non_joiner_declared {
            self.declare(
                &pair_mapping("_", "_"),
                TokenCategory::NonJoiner,
                TokenOptions::default(),
            );
        }
        if !self.joiner_declared {
            self.declare(
                &pair_mapping("__", "__"),
                TokenCategory::Joiner,
                TokenOptions::default(),
            );
        }
        self.declare(
            &pair_mapping("-", "-"),
            TokenCategory::Symbol,
            TokenOptions::default(),
        );
    }

    /// The metadata the scheme declared.
    pub fn details(&self) -> &SchemeDetails {
        &self.details
    }

    /// Consume the evaluator, keeping the declared metadata.
    pub fn into_details(self) -> SchemeDetails {
        self.details
    }

    /// Tokens registered so far.
    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// Custom lists recorded so far.
    pub fn lists(&self) -> &ListRegistry {
        &self.lists
    }
}

fn pair_mapping(key: &str, value: &str) -> Mapping {
    Mapping::from_pairs(vec![(Value::from(key), Value::from(value))])
}
