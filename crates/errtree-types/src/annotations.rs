//! Ordered key to multi-value annotation map.
//!
//! Keys keep the order in which they were first inserted and every key maps
//! to a non-empty, ordered list of strings. Absence of a key and an empty
//! list are different things, so the empty list is rejected on insert.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Annotations attached to an error node.
///
/// Equality ignores key order but not the order of values under a key.
#[derive(Clone, Debug, Default)]
pub struct AnnotationMap {
    entries: Vec<(String, Vec<String>)>,
}

impl AnnotationMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set the values for `key`, returning the previous values if any.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        values: Vec<String>,
    ) -> Result<Option<Vec<String>>, TypeError> {
        let key = key.into();
        if values.is_empty() {
            return Err(TypeError::EmptyAnnotationValues { key });
        }

        match self.position(&key) {
            Some(i) => Ok(Some(std::mem::replace(&mut self.entries[i].1, values))),
            None => {
                self.entries.push((key, values));
                Ok(None)
            }
        }
    }

    /// Append `value` to the list under `key`, creating the key if absent.
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.position(&key) {
            Some(i) => self.entries[i].1.push(value.into()),
            None => self.entries.push((key, vec![value.into()])),
        }
    }

    /// The values under `key`.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.position(key).map(|i| self.entries[i].1.as_slice())
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl PartialEq for AnnotationMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for AnnotationMap {}

impl<K, V> FromIterator<(K, V)> for AnnotationMap
where
    K: Into<String>,
    V: Into<String>,
{
    /// Builds the map by upserting each pair, so repeated keys accumulate.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.upsert(k, v);
        }
        map
    }
}

impl TryFrom<Vec<(String, Vec<String>)>> for AnnotationMap {
    type Error = TypeError;

    fn try_from(entries: Vec<(String, Vec<String>)>) -> Result<Self, Self::Error> {
        let mut map = Self::new();
        for (key, values) in entries {
            map.insert(key, values)?;
        }
        Ok(map)
    }
}

impl Serialize for AnnotationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnnotationMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AnnotationVisitor;

        impl<'de> Visitor<'de> for AnnotationVisitor {
            type Value = AnnotationMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of string keys to non-empty string lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = AnnotationMap::new();
                while let Some((key, values)) = access.next_entry::<String, Vec<String>>()? {
                    map.insert(key, values).map_err(serde::de::Error::custom)?;
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(AnnotationVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn upsert_accumulates_values_in_order() {
        let mut map = AnnotationMap::new();
        map.upsert("Id", "Id is required");
        map.upsert("Name", "Text is required");
        map.upsert("Id", "Id is not unique");

        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("Id").unwrap(),
            strings(&["Id is required", "Id is not unique"]).as_slice()
        );
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["Id", "Name"]);
    }

    #[test]
    fn equality_ignores_key_order() {
        let left: AnnotationMap = [("a", "1"), ("b", "2")].into_iter().collect();
        let right: AnnotationMap = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(left, right);
    }

    #[test]
    fn equality_keeps_value_order() {
        let left: AnnotationMap = [("k", "a"), ("k", "b")].into_iter().collect();
        let right: AnnotationMap = [("k", "b"), ("k", "a")].into_iter().collect();
        assert_ne!(left, right);

        let shorter: AnnotationMap = [("k", "a")].into_iter().collect();
        assert_ne!(left, shorter);
        assert_ne!(shorter, AnnotationMap::new());
    }

    #[test]
    fn insert_rejects_empty_values() {
        let mut map = AnnotationMap::new();
        let err = map.insert("k", Vec::new()).unwrap_err();
        assert_eq!(err, TypeError::EmptyAnnotationValues { key: "k".into() });
        assert!(map.is_empty());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut map = AnnotationMap::new();
        map.insert("a", strings(&["1"])).unwrap();
        map.insert("b", strings(&["2"])).unwrap();

        let previous = map.insert("a", strings(&["3", "4"])).unwrap();
        assert_eq!(previous, Some(strings(&["1"])));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a").unwrap(), strings(&["3", "4"]).as_slice());
    }

    #[test]
    fn json_preserves_key_order() {
        let json = r#"{"zeta":["1"],"alpha":["2","3"],"mid":["4"]}"#;
        let map: AnnotationMap = serde_json::from_str(json).unwrap();

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(serde_json::to_string(&map).unwrap(), json);
    }

    #[test]
    fn json_rejects_empty_value_list() {
        let result = serde_json::from_str::<AnnotationMap>(r#"{"k":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn try_from_entries() {
        let map = AnnotationMap::try_from(vec![
            ("x".to_string(), strings(&["1"])),
            ("y".to_string(), strings(&["2"])),
        ])
        .unwrap();
        assert!(map.contains_key("x"));
        assert!(!map.contains_key("z"));

        let err = AnnotationMap::try_from(vec![("x".to_string(), Vec::new())]);
        assert!(err.is_err());
    }
}
