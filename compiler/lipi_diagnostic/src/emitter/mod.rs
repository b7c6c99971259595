//! Diagnostic emitters.
//!
//! Rendering is decoupled from collection: the compiler phases fill a
//! [`Reporter`](crate::Reporter) and the CLI drains it through an emitter.
//! Terminal output is the only format today; the trait keeps the seam open.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit the end-of-run summary of errors and warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}
