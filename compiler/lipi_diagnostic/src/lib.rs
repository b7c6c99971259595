//! Diagnostic system for rich error reporting.
//!
//! Every phase of the compiler describes its failures as [`Diagnostic`]
//! values carrying a stable [`ErrorCode`]:
//! - Error codes for searchability (`lipic explain E2001`)
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Expression and tag context (which rule it came from)
//! - Suggestions (how to fix)
//!
//! # Soft vs Fatal
//!
//! Soft diagnostics accumulate in a [`Reporter`] while compilation keeps
//! going; structural failures are wrapped in [`Fatal`] and abort the run
//! through ordinary `Result` propagation. Rendering is left to a
//! [`DiagnosticEmitter`](emitter::DiagnosticEmitter) so the compiler core
//! never writes to stderr itself.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
mod reporter;
pub mod span_utils;

pub use errors::ErrorDocs;

pub use diagnostic::{Diagnostic, Fatal, Label, Severity};
pub use error_code::ErrorCode;
pub use reporter::Reporter;
