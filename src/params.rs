//! Per-request parameter merging.
//!
//! One flat lookup table per request, merging regex path captures (stored
//! under their 1-based group index as the string keys `"1"`, `"2"`, …)
//! with named query-string and form fields. Captures are inserted first,
//! so a named field that happens to share a positional key shadows the
//! capture on plain lookup.

use smallvec::SmallVec;

/// Inline capacity for parameter storage; realistic requests carry a
/// handful of fields, so the common case never touches the heap.
pub const MAX_INLINE_PARAMS: usize = 8;

type ParamVec = SmallVec<[(String, String); MAX_INLINE_PARAMS]>;

/// The merged key/value parameters of one request.
///
/// Insertion order is preserved and duplicate keys are kept; lookup
/// returns the value inserted last, so named fields override positional
/// captures without erasing them.
#[derive(Debug, Default, Clone)]
pub struct ParamSet {
    entries: ParamVec,
}

impl ParamSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a parameter set from positional captures and named fields.
    ///
    /// Captures go in first under their group index rendered as a string;
    /// named fields follow in their original order.
    #[must_use]
    pub fn from_parts(
        captures: impl IntoIterator<Item = (usize, String)>,
        named: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let mut entries = ParamVec::new();
        for (index, text) in captures {
            entries.push((index.to_string(), text));
        }
        for (name, value) in named {
            entries.push((name, value));
        }
        ParamSet { entries }
    }

    /// Look up a parameter by key. With duplicate keys the value inserted
    /// last wins.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rfind(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a positional capture by its 1-based group index, ignoring
    /// any named field that shadows it.
    #[must_use]
    pub fn capture(&self, index: usize) -> Option<&str> {
        let key = index.to_string();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_keyed_by_group_index() {
        let params = ParamSet::from_parts(
            [(1, "abc-123".to_string()), (2, "edit".to_string())],
            std::iter::empty(),
        );
        assert_eq!(params.get("1"), Some("abc-123"));
        assert_eq!(params.get("2"), Some("edit"));
        assert_eq!(params.get("3"), None);
    }

    #[test]
    fn test_named_fields_follow_captures() {
        let params = ParamSet::from_parts(
            [(1, "42".to_string())],
            vec![("title".to_string(), "hello".to_string())],
        );
        assert_eq!(params.get("1"), Some("42"));
        assert_eq!(params.get("title"), Some("hello"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_named_field_shadows_capture_on_lookup() {
        let params = ParamSet::from_parts(
            [(1, "from-path".to_string())],
            vec![("1".to_string(), "from-form".to_string())],
        );
        assert_eq!(params.get("1"), Some("from-form"));
    }

    #[test]
    fn test_capture_accessor_ignores_shadowing() {
        let params = ParamSet::from_parts(
            [(1, "from-path".to_string())],
            vec![("1".to_string(), "from-form".to_string())],
        );
        assert_eq!(params.capture(1), Some("from-path"));
        assert_eq!(params.capture(2), None);
    }

    #[test]
    fn test_duplicate_named_keys_last_wins() {
        let params = ParamSet::from_parts(
            std::iter::empty(),
            vec![
                ("q".to_string(), "first".to_string()),
                ("q".to_string(), "second".to_string()),
            ],
        );
        assert_eq!(params.get("q"), Some("second"));
        assert_eq!(params.len(), 2);
    }
}
