//! RAII guard for list recording scopes.
//!
//! The guard holds `&mut Evaluator` and implements `Deref`/`DerefMut`, so
//! statements inside a list block evaluate through the guard exactly as
//! they would through the evaluator itself. Dropping the guard stops
//! recording, even during unwinding.

use std::ops::{Deref, DerefMut};

use crate::session::Evaluator;
use crate::store::TokenStore;

/// Guard that ends list recording on drop.
///
/// While the guard is alive, every token the evaluator registers is also
/// appended to the lists named when the scope was opened.
pub struct RecordingScope<'guard, 'a, S: TokenStore> {
    evaluator: &'guard mut Evaluator<'a, S>,
}

impl<S: TokenStore> Drop for RecordingScope<'_, '_, S> {
    fn drop(&mut self) {
        self.evaluator.lists.stop_recording();
    }
}

impl<'a, S: TokenStore> Deref for RecordingScope<'_, 'a, S> {
    type Target = Evaluator<'a, S>;

    fn deref(&self) -> &Self::Target {
        self.evaluator
    }
}

impl<S: TokenStore> DerefMut for RecordingScope<'_, '_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.evaluator
    }
}

impl<'a, S: TokenStore> Evaluator<'a, S> {
    /// Open a recording scope over the given list names.
    ///
    /// Recording stops when the returned guard drops, also on early
    /// return from a failing list body.
    pub(crate) fn recording_scope(&mut self, names: &[String]) -> RecordingScope<'_, 'a, S> {
        self.lists.start_recording(names);
        RecordingScope { evaluator: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use lipi_diagnostic::Reporter;

    #[test]
    fn test_drop_stops_recording() {
        let mut store = MemoryStore::new();
        let mut reporter = Reporter::new();
        let mut evaluator = Evaluator::new(&mut store, &mut reporter);

        {
            let scope = evaluator.recording_scope(&["ligatures".to_owned()]);
            assert!(scope.lists.is_recording());
        }
        assert!(!evaluator.lists.is_recording());
    }
}
