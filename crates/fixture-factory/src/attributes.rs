//! Ordered attribute sets.
//!
//! An [`AttributeSet`] is an association list rather than a hash map: the
//! order in which keys are inserted is the order in which they resolve, and a
//! deferred attribute can only observe keys that precede it.

use crate::value::AttributeValue;

/// Separator splitting an attribute key into nested path segments.
pub const PATH_SEPARATOR: char = '.';

/// An ordered mapping from attribute key to [`AttributeValue`].
///
/// Keys may contain [`PATH_SEPARATOR`] to target a field inside a nested
/// object (for example `"role.name"`).
///
/// # Example
///
/// ```
/// use fixture_factory::{AttributeSet, AttributeValue};
///
/// let mut attributes = AttributeSet::new()
///     .with("id", 1_i64)
///     .with("name", "John");
/// attributes.insert("id", AttributeValue::deferred(|_, sequence| sequence));
///
/// let keys: Vec<&str> = attributes.keys().collect();
/// assert_eq!(keys, ["id", "name"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttributeSet {
    entries: Vec<(String, AttributeValue)>,
}

impl AttributeSet {
    /// Creates an empty attribute set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds or replaces an attribute, returning the updated set.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces an attribute.
    ///
    /// An existing key keeps its position and has its value replaced; a new
    /// key is appended. Returns the replaced value, if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        let name = key.into();
        let attribute = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, attribute)),
            None => {
                self.entries.push((name, attribute));
                None
            }
        }
    }

    /// Merges `overrides` into this set.
    ///
    /// Each override key replaces the value of a matching key in place or is
    /// appended after all existing keys, in the order `overrides` defines
    /// them. Values are replaced wholesale; nothing is merged deeply.
    pub fn merge(&mut self, overrides: &Self) {
        for (key, value) in &overrides.entries {
            self.insert(key.clone(), value.clone());
        }
    }

    /// Returns the value bound to `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over keys in resolution order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates over entries in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of attributes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the set holds no attributes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for AttributeSet {
    type Item = (String, AttributeValue);
    type IntoIter = std::vec::IntoIter<(String, AttributeValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K, V> Extend<(K, V)> for AttributeSet
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeSet
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Builds an [`AttributeSet`] from `key => value` pairs in source order.
///
/// Values go through `Into<AttributeValue>`, so literals can be written
/// directly and deferred attributes with [`AttributeValue::deferred`].
///
/// # Example
///
/// ```
/// use fixture_factory::{AttributeValue, attributes};
///
/// let attributes = attributes! {
///     "id" => AttributeValue::deferred(|_, sequence| sequence),
///     "name" => "John",
///     "role.name" => "editor",
/// };
///
/// assert_eq!(attributes.len(), 3);
/// ```
#[macro_export]
macro_rules! attributes {
    () => {
        $crate::AttributeSet::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut set = $crate::AttributeSet::new();
        $(
            set.insert($key, $value);
        )+
        set
    }};
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn keys(set: &AttributeSet) -> Vec<&str> {
        set.keys().collect()
    }

    #[test]
    fn preserves_insertion_order() {
        let set = AttributeSet::new()
            .with("zeta", 1_i64)
            .with("alpha", 2_i64)
            .with("mid", 3_i64);

        assert_eq!(keys(&set), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut set = AttributeSet::new()
            .with("id", 1_i64)
            .with("name", "John");

        let previous = set.insert("id", 2_i64);

        assert_eq!(keys(&set), ["id", "name"]);
        assert_eq!(previous.and_then(|v| v.as_literal().cloned()), Some(json!(1)));
        assert_eq!(set.get("id").and_then(AttributeValue::as_literal), Some(&json!(2)));
    }

    #[test]
    fn merge_replaces_existing_and_appends_new_keys() {
        let mut defaults = AttributeSet::new()
            .with("id", 1_i64)
            .with("name", "John")
            .with("email", "noreply@email.com");
        let overrides = AttributeSet::new()
            .with("role", "admin")
            .with("name", "Jane")
            .with("active", true);

        defaults.merge(&overrides);

        assert_eq!(keys(&defaults), ["id", "name", "email", "role", "active"]);
        assert_eq!(
            defaults.get("name").and_then(AttributeValue::as_literal),
            Some(&json!("Jane"))
        );
    }

    #[test]
    fn merge_can_swap_literal_for_deferred() {
        let mut defaults = AttributeSet::new().with("email", "noreply@email.com");
        let overrides =
            AttributeSet::new().with("email", AttributeValue::deferred(|_, _| "computed"));

        defaults.merge(&overrides);

        assert!(defaults.get("email").is_some_and(AttributeValue::is_deferred));
    }

    #[test]
    fn dotted_keys_are_tracked_separately() {
        let mut defaults = AttributeSet::new().with("role", json!({"name": "admin"}));
        let overrides = AttributeSet::new().with("role.name", "editor");

        defaults.merge(&overrides);

        assert_eq!(keys(&defaults), ["role", "role.name"]);
    }

    #[test]
    fn macro_builds_in_source_order() {
        let set = attributes! {
            "b" => 1_i64,
            "a" => "two",
            "b" => 3_i64,
        };

        assert_eq!(keys(&set), ["b", "a"]);
        assert_eq!(set.get("b").and_then(AttributeValue::as_literal), Some(&json!(3)));
    }

    #[test]
    fn empty_macro_builds_empty_set() {
        let set = attributes! {};
        assert!(set.is_empty());
    }

    #[test]
    fn collects_from_pairs() {
        let set: AttributeSet = [("id", 1_i64), ("count", 2_i64)].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains_key("count"));
    }
}
