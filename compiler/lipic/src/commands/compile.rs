//! The `compile` command: build a symbol table file from a scheme source.

use lipi_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use lipi_diagnostic::{Diagnostic, ErrorCode};
use lipi_store::TableStore;

use super::{read_file, report_outcome, run_scheme};

/// Compile a scheme file into a `.lst` table in the current directory.
///
/// Soft errors accumulate across the whole run before exiting, giving the
/// scheme author a complete picture rather than stopping at the first bad
/// rule. The partially written table is left on disk for inspection.
pub fn compile_file(path: &str) {
    let source = read_file(path);
    let file_name = output_file_name(path);

    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let mut emitter = TerminalEmitter::with_color_mode(std::io::stderr(), ColorMode::Auto, is_tty)
        .with_source(&source)
        .with_file_path(path);

    // A stale table from an earlier run must not outlive a failed build.
    if std::path::Path::new(&file_name).exists() {
        if let Err(e) = std::fs::remove_file(&file_name) {
            emitter.emit(
                &Diagnostic::error(ErrorCode::E3005)
                    .with_message(format!("could not remove stale {file_name}: {e}")),
            );
            emitter.flush();
            std::process::exit(1);
        }
    }

    let mut store = match TableStore::create(&file_name) {
        Ok(store) => store,
        Err(err) => {
            emitter.emit(&Diagnostic::error(ErrorCode::E3005).with_message(err.message()));
            emitter.flush();
            std::process::exit(1);
        }
    };

    println!("Compiling {path}");
    println!("Building {file_name}");

    let reporter = run_scheme(&source, &mut store);
    report_outcome(&mut emitter, &reporter);

    if reporter.has_errors() {
        std::process::exit(1);
    }
}

/// Output table name for a scheme path: the file stem up to the first dot.
///
/// `ml.scheme.lipi` builds `ml.lst` in the current directory.
fn output_file_name(path: &str) -> String {
    let base = std::path::Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path);
    let stem = base.split('.').next().unwrap_or(base);
    format!("{stem}.lst")
}
