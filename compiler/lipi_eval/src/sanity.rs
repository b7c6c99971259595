//! Mapping checks that run before expansion.

use lipi_diagnostic::ErrorCode;
use lipi_ir::{expression, Mapping, Value};

use crate::session::Evaluator;
use crate::store::TokenStore;

impl<S: TokenStore> Evaluator<'_, S> {
    /// Check every pair of a mapping.
    ///
    /// Problems carry the offending `key => value` expression. Validation
    /// reports and keeps going so one compile surfaces every mistake.
    pub(crate) fn validate(&mut self, mapping: &Mapping) {
        for (key, value) in mapping {
            self.reporter.set_expression(expression(key, value));
            self.validate_element(key);
            self.validate_element(value);
            if let Value::Group(elements) = value {
                if elements.len() > 3 {
                    self.reporter.warn(
                        ErrorCode::W2001,
                        format!(
                            "{value} has more than three elements. \
                             Additional elements specified will be ignored"
                        ),
                    );
                }
            }
        }
        self.reporter.clear_expression();
    }

    fn validate_element(&mut self, value: &Value) {
        match value {
            Value::Str(text) if text.is_empty() => {
                self.reporter
                    .error(ErrorCode::E2001, "Empty values are not allowed");
            }
            Value::Str(_) | Value::Int(_) => {}
            Value::Group(elements) => {
                if elements.is_empty() {
                    self.reporter
                        .error(ErrorCode::E2002, "An empty array won't workout");
                }
                for element in elements {
                    self.validate_element(element);
                }
            }
        }
    }
}
