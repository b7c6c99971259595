//! Command handlers for the Lipi compiler CLI.
//!
//! Each submodule implements one CLI command. Shared plumbing like
//! `read_file` and the parse-evaluate pipeline lives here in the module
//! root so `compile` and `check` stay in lockstep.

mod check;
mod compile;
mod explain;

pub use check::check_file;
pub use compile::compile_file;
pub use explain::explain_error;

use lipi_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use lipi_diagnostic::{ErrorCode, Reporter};
use lipi_eval::{Evaluator, TokenStore};
use lipi_parse::parse_source;
use tracing::debug;

/// Run the full pipeline over one scheme source.
///
/// Parses, evaluates against the store, inserts the default symbols and
/// persists the result. Every problem from any phase lands in the returned
/// reporter. A structural failure stops evaluation and skips persistence,
/// but its diagnostic is reported the same way.
pub(super) fn run_scheme<S: TokenStore>(source: &str, store: &mut S) -> Reporter {
    let mut reporter = Reporter::new();

    let parsed = parse_source(source);
    for error in &parsed.errors {
        reporter.report(error.to_diagnostic());
    }

    let outcome = {
        let mut evaluator = Evaluator::new(store, &mut reporter);
        match evaluator.evaluate(&parsed.stmts) {
            Ok(()) => {
                evaluator.insert_default_symbols();
                Ok(evaluator.into_details())
            }
            Err(fatal) => Err(fatal),
        }
    };

    match outcome {
        Ok(details) => {
            if let Err(err) = store.flush() {
                reporter.error(ErrorCode::E3002, err.message());
            }
            if let Err(err) = store.set_scheme_metadata(&details) {
                reporter.error(ErrorCode::E3003, err.message());
            }
        }
        Err(fatal) => reporter.report(fatal.diagnostic),
    }

    debug!(
        errors = reporter.error_count(),
        warnings = reporter.warning_count(),
        "scheme run finished"
    );
    reporter
}

/// Emit every collected diagnostic followed by the run summary.
pub(super) fn report_outcome(emitter: &mut TerminalEmitter<std::io::Stderr>, reporter: &Reporter) {
    emitter.emit_all(reporter.diagnostics());
    emitter.emit_summary(reporter.error_count(), reporter.warning_count());
    emitter.flush();
}

/// Read a file from disk, exiting with a user-friendly error message on failure.
pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}
