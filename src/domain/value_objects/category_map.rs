//! Insertion-ordered mapping keyed by category name
//!
//! Category order comes from the oracle response and drives the order in
//! which blocks are rendered, so a hash map is not an option here.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> CategoryMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, category: &str) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == category)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    /// Insert or replace. Replacing keeps the original position.
    pub fn insert(&mut self, category: impl Into<String>, value: V) -> Option<V> {
        let category = category.into();
        match self.get_mut(&category) {
            Some(existing) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((category, value));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<V> Default for CategoryMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for CategoryMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for CategoryMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct CategoryMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for CategoryMapVisitor<V> {
    type Value = CategoryMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map keyed by category name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = CategoryMap::new();
        while let Some((name, value)) = access.next_entry::<String, V>()? {
            map.insert(name, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for CategoryMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CategoryMapVisitor(PhantomData))
    }
}
