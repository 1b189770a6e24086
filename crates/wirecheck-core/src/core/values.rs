// crates/wirecheck-core/src/core/values.rs
// ============================================================================
// Module: Wirecheck Observed Values
// Description: Ordered multimap of observed parameter values.
// Purpose: Carry query, header, form, and path-variable values into validation.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`Values`] maps a parameter name to one or more observed string values.
//! Names keep first-insertion order and repeats of the same name keep their
//! arrival order, so validation output is deterministic for identical input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Values
// ============================================================================

/// Ordered multimap from parameter name to observed values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values {
    /// Entries in first-insertion order of their names.
    entries: Vec<(String, Vec<String>)>,
}

impl Values {
    /// Creates an empty value map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a single value for `name`.
    pub fn add_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Appends every value in `values` for `name`.
    pub fn add_values<I, V>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        for value in values {
            self.add_value(name.clone(), value);
        }
    }

    /// Appends all entries of `other`, preserving its order.
    pub fn add_all(&mut self, other: &Self) {
        for (name, values) in &other.entries {
            self.add_values(name.clone(), values.iter().cloned());
        }
    }

    /// Returns the values observed for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Returns the first value observed for `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|values| values.first()).map(String::as_str)
    }

    /// Returns true when `name` has at least one value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of distinct names.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no names are present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates names with their values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Iterates names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Returns a copy without the names rejected by `keep`.
    #[must_use]
    pub fn filtered(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        Self {
            entries: self.entries.iter().filter(|(name, _)| keep(name)).cloned().collect(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Values
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut values = Self::new();
        for (name, value) in iter {
            values.add_value(name, value);
        }
        values
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::Values;

    #[test]
    fn repeats_keep_arrival_order() {
        let values: Values = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("a"), Some(&["1".to_string(), "3".to_string()][..]));
        assert_eq!(values.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn add_all_appends_to_existing_names() {
        let mut left: Values = [("id", "1")].into_iter().collect();
        let right: Values = [("id", "2"), ("name", "x")].into_iter().collect();
        left.add_all(&right);
        assert_eq!(left.get("id").map(<[String]>::len), Some(2));
        assert_eq!(left.first("name"), Some("x"));
    }

    #[test]
    fn filtered_drops_rejected_names() {
        let values: Values = [("X-Trace", "1"), ("Accept", "text/plain")].into_iter().collect();
        let kept = values.filtered(|name| !name.starts_with("X-"));
        assert!(!kept.contains("X-Trace"));
        assert!(kept.contains("Accept"));
    }
}
