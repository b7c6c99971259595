//! Custom lists: author-named token groupings orthogonal to category.
//!
//! A `list(...)` block turns on recording; every token created while
//! recording is appended to all the named lists. Lists are created
//! lazily on first mention and live for the whole run.

use rustc_hash::FxHashMap;
use tracing::trace;

use lipi_ir::TokenId;

/// Named token lists plus the recording state for the active scope.
#[derive(Default, Debug)]
pub struct ListRegistry {
    lists: FxHashMap<String, Vec<TokenId>>,
    recording: Vec<String>,
}

impl ListRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ListRegistry::default()
    }

    /// Whether a list scope is currently active.
    pub fn is_recording(&self) -> bool {
        !self.recording.is_empty()
    }

    /// Activate recording into the named lists, creating missing ones.
    ///
    /// The caller has already rejected nesting; starting twice would
    /// silently merge scopes.
    pub fn start_recording(&mut self, names: &[String]) {
        debug_assert!(!self.is_recording());
        trace!(lists = ?names, "start list recording");
        for name in names {
            self.lists.entry(name.clone()).or_default();
        }
        self.recording.extend(names.iter().cloned());
    }

    /// Deactivate recording. The lists keep their contents.
    pub fn stop_recording(&mut self) {
        self.recording.clear();
    }

    /// Append a token to every active list. Outside a scope this is a no-op.
    pub fn record(&mut self, id: TokenId) {
        for name in &self.recording {
            if let Some(list) = self.lists.get_mut(name) {
                list.push(id);
            }
        }
    }

    /// The tokens recorded under a name, or `None` for an unknown list.
    pub fn get(&self, name: &str) -> Option<&[TokenId]> {
        self.lists.get(name).map(Vec::as_slice)
    }
}
