//! Reporter for collecting diagnostics across a compile run.
//!
//! Scheme evaluation never aborts on a data error: bad mappings are
//! recorded here and the run keeps going, so the author sees every problem
//! in one pass. The final counts decide the exit status.
//!
//! The reporter also owns the evaluation context that gets stamped onto
//! each diagnostic as it is recorded: the `pattern => value` expression
//! currently being processed and the active tag block. Evaluation sets and
//! clears both around the relevant scopes; nothing reads them from ambient
//! state.

use crate::{Diagnostic, ErrorCode, Severity};

/// Collects diagnostics and evaluation context for one compile run.
#[derive(Clone, Debug, Default)]
pub struct Reporter {
    /// Diagnostics in the order they were recorded.
    diagnostics: Vec<Diagnostic>,
    /// Count of error-severity diagnostics.
    error_count: usize,
    /// Count of warning-severity diagnostics.
    warning_count: usize,
    /// The `pattern => value` expression currently being evaluated.
    current_expression: Option<String>,
    /// The name of the tag block currently in scope.
    current_tag: Option<String>,
}

impl Reporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Reporter::default()
    }

    /// Record a fully built diagnostic, counting it by severity.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    /// Record an error with the current expression and tag attached.
    pub fn error(&mut self, code: ErrorCode, message: impl Into<String>) {
        let diagnostic = self.attach_context(Diagnostic::error(code).with_message(message));
        self.report(diagnostic);
    }

    /// Record a warning with the current expression and tag attached.
    pub fn warn(&mut self, code: ErrorCode, message: impl Into<String>) {
        let diagnostic = self.attach_context(Diagnostic::warning(code).with_message(message));
        self.report(diagnostic);
    }

    /// Stamp the current evaluation context onto a diagnostic.
    ///
    /// Context already present on the diagnostic wins; the reporter only
    /// fills in the blanks.
    fn attach_context(&self, mut diagnostic: Diagnostic) -> Diagnostic {
        if diagnostic.expression.is_none() {
            diagnostic.expression.clone_from(&self.current_expression);
        }
        if diagnostic.tag.is_none() {
            diagnostic.tag.clone_from(&self.current_tag);
        }
        diagnostic
    }

    /// Set the expression context for subsequent diagnostics.
    pub fn set_expression(&mut self, expression: impl Into<String>) {
        self.current_expression = Some(expression.into());
    }

    /// Clear the expression context.
    pub fn clear_expression(&mut self) {
        self.current_expression = None;
    }

    /// Set the tag context for subsequent diagnostics.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.current_tag = Some(tag.into());
    }

    /// Clear the tag context.
    pub fn clear_tag(&mut self) {
        self.current_tag = None;
    }

    /// The name of the tag block currently in scope, if any.
    pub fn current_tag(&self) -> Option<&str> {
        self.current_tag.as_deref()
    }

    /// Number of errors recorded so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Number of warnings recorded so far.
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Check if any errors were recorded.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// All diagnostics in the order they were recorded.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
