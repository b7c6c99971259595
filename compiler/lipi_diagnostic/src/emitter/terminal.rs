//! Terminal emitter.
//!
//! Human-readable diagnostic output with optional ANSI color support and
//! source snippet rendering.

use std::io::Write;

use lipi_ir::Span;

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label, Severity};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// For `Auto` mode, `is_tty` determines whether colors should be used.
    /// This parameter is ignored for `Always` and `Never` modes.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Source text with a pre-built line table for snippet rendering.
struct SourceContext {
    text: String,
    lines: LineOffsetTable,
}

/// A located source line to render beneath a diagnostic header.
struct Snippet {
    line: u32,
    col: u32,
    text: String,
    underline_pad: usize,
    underline_len: usize,
}

/// Terminal emitter with optional color support.
///
/// When source text is attached via [`with_source`](Self::with_source),
/// labels render as annotated snippets with line and column numbers.
/// Without it, labels fall back to byte offsets.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    file_path: Option<String>,
    source: Option<SourceContext>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// # Arguments
    ///
    /// * `writer` - The output writer
    /// * `mode` - Color mode selection
    /// * `is_tty` - Whether output is a TTY (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            file_path: None,
            source: None,
        }
    }

    /// Attach source text for snippet rendering.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(SourceContext {
            lines: LineOffsetTable::build(source),
            text: source.to_owned(),
        });
        self
    }

    /// Attach the file path shown in snippet location headers.
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        if self.colors {
            let color = match severity {
                Severity::Error => colors::ERROR,
                Severity::Warning => colors::WARNING,
            };
            let _ = write!(self.writer, "{color}{severity}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{severity}");
        }
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    fn write_primary(&mut self, text: &str) {
        self.write_colored(text, colors::ERROR);
    }

    fn write_secondary(&mut self, text: &str) {
        self.write_colored(text, colors::SECONDARY);
    }

    fn write_note(&mut self, text: &str) {
        let _ = write!(self.writer, "  = ");
        if self.colors {
            let _ = write!(self.writer, "{}note{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "note");
        }
        let _ = writeln!(self.writer, ": {text}");
    }

    fn write_help(&mut self, text: &str) {
        let _ = write!(self.writer, "  = ");
        if self.colors {
            let _ = write!(self.writer, "{}help{}", colors::HELP, colors::RESET);
        } else {
            let _ = write!(self.writer, "help");
        }
        let _ = writeln!(self.writer, ": {text}");
    }

    /// Locate a span in the attached source, clamped to its first line.
    fn locate(&self, span: Span) -> Option<Snippet> {
        let source = self.source.as_ref()?;
        let text = source.text.as_str();
        let (line, col) = source.lines.offset_to_line_col(text, span.start);
        let line_start = source.lines.line_start_offset(line)? as usize;
        let line_end = source
            .lines
            .line_start_offset(line + 1)
            .map_or(text.len(), |next| next as usize);
        let line_text = text[line_start..line_end]
            .trim_end_matches(['\n', '\r'])
            .to_owned();

        // Multi-line spans underline to the end of the first line; a point
        // span still gets one caret.
        let span_start = (span.start as usize).min(text.len());
        let span_end = (span.end as usize)
            .min(line_start + line_text.len())
            .max(span_start);
        let underline_len = text[span_start..span_end].chars().count().max(1);

        Some(Snippet {
            line,
            col,
            text: line_text,
            underline_pad: (col as usize) - 1,
            underline_len,
        })
    }

    fn emit_label(&mut self, label: &Label) {
        let Some(snippet) = self.locate(label.span) else {
            // No source attached: fall back to byte offsets
            let marker = if label.is_primary { "-->" } else { "   " };
            let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
            if label.is_primary {
                self.write_primary(&label.message);
            } else {
                self.write_secondary(&label.message);
            }
            let _ = writeln!(self.writer);
            return;
        };

        let location = match &self.file_path {
            Some(path) => format!("{path}:{}:{}", snippet.line, snippet.col),
            None => format!("{}:{}", snippet.line, snippet.col),
        };
        let _ = writeln!(self.writer, "  --> {location}");

        let line_str = snippet.line.to_string();
        let gutter = " ".repeat(line_str.len() + 2);

        self.write_secondary(&format!("{gutter}|"));
        let _ = writeln!(self.writer);

        self.write_secondary(&format!(" {line_str} |"));
        let _ = writeln!(self.writer, " {}", snippet.text);

        self.write_secondary(&format!("{gutter}|"));
        let _ = write!(self.writer, " {}", " ".repeat(snippet.underline_pad));
        let caret = if label.is_primary { "^" } else { "-" };
        let underline = caret.repeat(snippet.underline_len);
        if label.is_primary {
            self.write_primary(&format!("{underline} {}", label.message));
        } else {
            self.write_secondary(&format!("{underline} {}", label.message));
        }
        let _ = writeln!(self.writer);
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.emit_label(label);
        }

        if let Some(expression) = &diagnostic.expression {
            self.write_note(&format!("in expression `{expression}`"));
        }

        if let Some(tag) = &diagnostic.tag {
            self.write_note(&format!("inside tag `{tag}`"));
        }

        for note in &diagnostic.notes {
            self.write_note(note);
        }

        for suggestion in &diagnostic.suggestions {
            self.write_help(suggestion);
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let _ = write!(self.writer, "Completed with ");
        if warning_count > 0 {
            self.write_colored(&format!("'{warning_count}' warning(s)"), colors::WARNING);
        } else {
            let _ = write!(self.writer, "'{warning_count}' warning(s)");
        }
        let _ = write!(self.writer, " and ");
        if error_count > 0 {
            self.write_colored(&format!("'{error_count}' error(s)"), colors::ERROR);
        } else {
            let _ = write!(self.writer, "'{error_count}' error(s)");
        }
        let _ = writeln!(self.writer);
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::ErrorCode;

    fn sample_diagnostic() -> Diagnostic {
        Diagnostic::error(ErrorCode::E2001)
            .with_message("Empty values are not allowed")
            .with_label(Span::new(10, 15), "empty value here")
            .with_secondary_label(Span::new(0, 5), "pattern declared here")
            .with_note("every pattern needs at least one replacement")
            .with_suggestion("remove the pair or fill in a value")
    }

    #[test]
    fn test_terminal_emitter_no_color() {
        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);

        emitter.emit(&sample_diagnostic());
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("error"));
        assert!(text.contains("[E2001]"));
        assert!(text.contains("Empty values are not allowed"));
        assert!(text.contains("empty value here"));
        assert!(text.contains("note:"));
        assert!(text.contains("help:"));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_terminal_emitter_with_color() {
        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Always, false);

        emitter.emit(&sample_diagnostic());
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("\x1b["));
        assert!(text.contains("E2001"));
    }

    #[test]
    fn test_emit_all() {
        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);

        let diagnostics = vec![
            Diagnostic::error(ErrorCode::E1001).with_message("error 1"),
            Diagnostic::error(ErrorCode::E2001).with_message("error 2"),
        ];

        emitter.emit_all(&diagnostics);
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("error 1"));
        assert!(text.contains("error 2"));
    }

    #[test]
    fn test_emit_summary_format() {
        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);

        emitter.emit_summary(1, 2);
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "Completed with '2' warning(s) and '1' error(s)\n");
    }

    #[test]
    fn test_emit_summary_clean_run() {
        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);

        emitter.emit_summary(0, 0);
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "Completed with '0' warning(s) and '0' error(s)\n");
    }

    #[test]
    fn test_expression_and_tag_notes() {
        let diag = Diagnostic::error(ErrorCode::E2001)
            .with_message("Empty values are not allowed")
            .with_expression("aa => []")
            .with_tag("chill");

        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
        emitter.emit(&diag);
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("note: in expression `aa => []`"));
        assert!(text.contains("note: inside tag `chill`"));
    }

    // --- ColorMode tests ---

    #[test]
    fn test_color_mode_auto_follows_tty() {
        assert!(ColorMode::Auto.should_use_colors(true));
        assert!(!ColorMode::Auto.should_use_colors(false));
    }

    #[test]
    fn test_color_mode_always_ignores_tty() {
        assert!(ColorMode::Always.should_use_colors(false));
        assert!(ColorMode::Always.should_use_colors(true));
    }

    #[test]
    fn test_color_mode_never_ignores_tty() {
        assert!(!ColorMode::Never.should_use_colors(false));
        assert!(!ColorMode::Never.should_use_colors(true));
    }

    #[test]
    fn test_color_mode_default_is_auto() {
        assert_eq!(ColorMode::default(), ColorMode::Auto);
    }

    // --- Snippet rendering tests ---

    #[test]
    fn test_snippet_single_line() {
        // Line 1: "stable \"1\"\n"          (11 bytes: 0..11)
        // Line 2: "vowels { \"aa\" => X }"  (20 bytes: 11..31)
        //                   ^^^^            span 20..24 = "\"aa\"" (col 10)
        let source = "stable \"1\"\nvowels { \"aa\" => X }";
        let diag = Diagnostic::error(ErrorCode::E1011)
            .with_message("expected a string, number, or group")
            .with_label(Span::new(20, 24), "unexpected value");

        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false)
            .with_source(source)
            .with_file_path("demo.lipi");
        emitter.emit(&diag);
        emitter.flush();

        let text = String::from_utf8(output).unwrap();

        assert!(
            text.contains("--> demo.lipi:2:10"),
            "Expected location header, got:\n{text}"
        );
        assert!(
            text.contains("vowels { \"aa\" => X }"),
            "Expected source line, got:\n{text}"
        );
        assert!(text.contains("2 |"), "Expected line number, got:\n{text}");
        assert!(text.contains("^^^^"), "Expected underline, got:\n{text}");
        assert!(
            text.contains("unexpected value"),
            "Expected label message, got:\n{text}"
        );
        assert!(
            !text.contains("20..24"),
            "Should not contain byte offsets, got:\n{text}"
        );
    }

    #[test]
    fn test_snippet_point_span() {
        let source = "language_code \"ml\"";
        let diag = Diagnostic::error(ErrorCode::E1001)
            .with_message("unexpected")
            .with_label(Span::new(4, 4), "here");

        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false)
            .with_source(source)
            .with_file_path("test.lipi");
        emitter.emit(&diag);
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        // Point span should still render at least one caret
        assert!(
            text.contains('^'),
            "Expected at least one caret, got:\n{text}"
        );
    }

    #[test]
    fn test_snippet_labels_on_different_lines() {
        let source = "list \"x\" {\nlist \"y\" {";
        let diag = Diagnostic::error(ErrorCode::E4001)
            .with_message("Can't create nested list")
            .with_label(Span::new(11, 21), "nested list opened here")
            .with_secondary_label(Span::new(0, 10), "outer list opened here");

        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false)
            .with_source(source)
            .with_file_path("test.lipi");
        emitter.emit(&diag);
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        assert!(
            text.contains("1 |") && text.contains("2 |"),
            "Expected both line numbers, got:\n{text}"
        );
        // Primary uses ^, secondary uses -
        assert!(text.contains('^'), "Expected ^ for primary, got:\n{text}");
        assert!(text.contains('-'), "Expected - for secondary, got:\n{text}");
    }

    #[test]
    fn test_label_without_source_falls_back_to_offsets() {
        let diag = Diagnostic::error(ErrorCode::E1001)
            .with_message("unexpected token")
            .with_label(Span::new(5, 9), "here");

        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
        emitter.emit(&diag);
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("--> 5..9"), "Expected offsets, got:\n{text}");
    }

    #[test]
    fn test_snippet_multiline_span_clamps_to_first_line() {
        let source = "vowels {\n\"aa\" => X\n}";
        let diag = Diagnostic::error(ErrorCode::E1002)
            .with_message("expected a mapping")
            .with_label(Span::new(0, 20), "whole statement");

        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false)
            .with_source(source)
            .with_file_path("test.lipi");
        emitter.emit(&diag);
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("1 | vowels {"), "got:\n{text}");
        assert!(text.contains("^^^^^^^^"), "got:\n{text}");
    }
}
