//! Scheme-level details written to the table file once per compile.

/// Metadata describing the scheme being compiled.
///
/// Fields stay `None` until the matching metadata statement runs; the store
/// skips unset fields and stamps the compile date itself.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct SchemeDetails {
    pub lang_code: Option<String>,
    pub identifier: Option<String>,
    pub display_name: Option<String>,
    pub author: Option<String>,
    pub is_stable: Option<bool>,
}

impl SchemeDetails {
    pub fn new() -> Self {
        SchemeDetails::default()
    }
}
