use super::*;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("test error")
        .with_label(Span::new(0, 5), "here")
        .with_note("some context")
        .with_suggestion("try this");

    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.message, "test error");
    assert!(diag.is_error());
    assert_eq!(diag.labels.len(), 1);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn test_warning_severity() {
    let diag = Diagnostic::warning(ErrorCode::W2001).with_message("too many values");

    assert!(!diag.is_error());
    assert_eq!(diag.severity, Severity::Warning);
}

#[test]
fn test_diagnostic_display_format() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("test error")
        .with_label(Span::new(0, 5), "primary")
        .with_secondary_label(Span::new(10, 15), "secondary")
        .with_note("a note")
        .with_suggestion("a suggestion");

    let output = diag.to_string();
    assert!(output.contains("error [E2001]: test error"));
    assert!(output.contains("--> "));
    assert!(output.contains("primary"));
    assert!(output.contains("secondary"));
    assert!(output.contains("= note: a note"));
    assert!(output.contains("= help: a suggestion"));
}

#[test]
fn test_diagnostic_display_expression_context() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("Empty values are not allowed")
        .with_expression("aa => []")
        .with_tag("chill");

    let output = diag.to_string();
    assert!(output.contains("= note: in expression `aa => []`"));
    assert!(output.contains("= note: inside tag `chill`"));
}

#[test]
fn test_primary_span_skips_secondary() {
    let diag = Diagnostic::error(ErrorCode::E1003)
        .with_secondary_label(Span::new(0, 1), "opened here")
        .with_label(Span::new(9, 10), "expected close");

    assert_eq!(diag.primary_span(), Some(Span::new(9, 10)));
}

#[test]
fn test_diagnostic_eq_and_hash() {
    use std::collections::HashSet;

    let d1 = Diagnostic::error(ErrorCode::E1001).with_message("test");
    let d2 = Diagnostic::error(ErrorCode::E1001).with_message("test");
    let d3 = Diagnostic::error(ErrorCode::E1002).with_message("other");

    assert_eq!(d1, d2);
    assert_ne!(d1, d3);

    let mut set = HashSet::new();
    set.insert(d1.clone());
    set.insert(d2);
    set.insert(d3);
    assert_eq!(set.len(), 2);
}

#[test]
fn test_fatal_wraps_diagnostic() {
    let diag = Diagnostic::error(ErrorCode::E4001).with_message("Can't create nested list");
    let fatal = Fatal::new(diag.clone());

    assert_eq!(fatal.diagnostic, diag);
    assert!(fatal.to_string().contains("E4001"));
    assert!(fatal.to_string().contains("Can't create nested list"));
}
