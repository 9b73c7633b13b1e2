//! Delimited key paths into nested mappings.

use filtrate_foundation::Value;

/// A sequence of mapping keys parsed from a delimited string.
///
/// `"a.b.c"` with delimiter `"."` resolves `root["a"]["b"]["c"]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<Value>,
}

impl KeyPath {
    /// Splits `path` on `delimiter`.
    ///
    /// An empty delimiter yields a single segment holding the whole path.
    #[must_use]
    pub fn parse(path: &str, delimiter: &str) -> Self {
        let segments = if delimiter.is_empty() {
            vec![Value::from(path)]
        } else {
            path.split(delimiter).map(Value::from).collect()
        };
        Self { segments }
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Follows the path from `root`.
    ///
    /// Returns `None` as soon as a segment is missing or an intermediate
    /// value is falsy or not a mapping.
    #[must_use]
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            if !current.is_truthy() {
                return None;
            }
            current = current.get(segment)?;
        }
        Some(current)
    }
}
