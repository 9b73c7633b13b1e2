//! Configuration for filter defaults.

/// Default values used when a caller omits an optional filter argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterConfig {
    /// Delimiter between key path segments (`to_map`, `map_keys`).
    pub path_delimiter: String,

    /// Separator between `key=value` tokens (`to_kv_pairs`).
    pub kv_separator: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            path_delimiter: ".".to_string(),
            kv_separator: ",".to_string(),
        }
    }
}

impl FilterConfig {
    /// Builder method to set the default key path delimiter.
    #[must_use]
    pub fn with_path_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.path_delimiter = delimiter.into();
        self
    }

    /// Builder method to set the default key/value separator.
    #[must_use]
    pub fn with_kv_separator(mut self, separator: impl Into<String>) -> Self {
        self.kv_separator = separator.into();
        self
    }
}
