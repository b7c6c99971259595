//! The `check` command: validate a scheme without writing a table file.

use lipi_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use lipi_eval::MemoryStore;

use super::{read_file, run_scheme};

/// Run the full compile pipeline against an in-memory store.
///
/// Everything the real compile would reject is reported here, including
/// metadata problems, so a clean check means a clean build.
pub fn check_file(path: &str) {
    let source = read_file(path);

    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let mut emitter = TerminalEmitter::with_color_mode(std::io::stderr(), ColorMode::Auto, is_tty)
        .with_source(&source)
        .with_file_path(path);

    let mut store = MemoryStore::new();
    let reporter = run_scheme(&source, &mut store);

    emitter.emit_all(reporter.diagnostics());
    emitter.flush();

    if reporter.has_errors() {
        emitter.emit_summary(reporter.error_count(), reporter.warning_count());
        emitter.flush();
        std::process::exit(1);
    }

    let token_count = store.table().len();
    let warning_count = reporter.warning_count();
    println!("OK: {path} ({token_count} tokens, {warning_count} warning(s))");
}
