//! Incoming API requests as untyped string parameters.

use std::collections::HashMap;

/// Parameter carrying the handler name.
pub const REQUEST_TYPE: &str = "requestType";

/// The parameters of one API call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiRequest {
    params: HashMap<String, String>,
}

impl ApiRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style parameter setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// The trimmed value of `name`, or `None` if it is absent or blank.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// The value of `name` exactly as sent, or `None` if absent or empty.
    ///
    /// Secret phrases are read this way; surrounding whitespace is part of
    /// the phrase.
    pub fn raw_param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn request_type(&self) -> Option<&str> {
        self.param(REQUEST_TYPE)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ApiRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ApiRequest {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl std::fmt::Debug for ApiRequest {
    // Values may hold secret phrases; only names are printed.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.params.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ApiRequest").field("params", &names).finish()
    }
}
