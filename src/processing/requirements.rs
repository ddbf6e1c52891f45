//! Explicit sets of required skill and language identifiers

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Identifiers a posting actually requires within one category.
///
/// Postings describe requirements as `{ "react": true, "nodejs": false }`.
/// Only truthy flags survive into the set, so scoring never re-filters them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet(BTreeSet<String>);

impl RequirementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            ids.into_iter()
                .filter_map(|id| normalize_id(id.as_ref()))
                .collect(),
        )
    }

    /// Keep only the entries whose flag is truthy.
    pub fn from_flags(flags: &Map<String, Value>) -> Self {
        Self::from_ids(
            flags
                .iter()
                .filter(|(_, flag)| is_truthy(flag))
                .map(|(id, _)| id),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of required identifiers present as keys in `held`.
    pub fn satisfied_by<V>(&self, held: &BTreeMap<String, V>) -> usize {
        self.0.iter().filter(|id| held.contains_key(*id)).count()
    }

    /// Required identifiers absent from `held`, in sorted order.
    pub fn missing_from<V>(&self, held: &BTreeMap<String, V>) -> Vec<String> {
        self.0
            .iter()
            .filter(|id| !held.contains_key(*id))
            .cloned()
            .collect()
    }
}

/// Truthiness of a loosely-typed flag value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(false, |v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn normalize_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Serialize for RequirementSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for id in &self.0 {
            map.serialize_entry(id, &true)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RequirementField {
    Flags(Map<String, Value>),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for RequirementSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match RequirementField::deserialize(deserializer)? {
            RequirementField::Flags(flags) => Self::from_flags(&flags),
            RequirementField::List(ids) => Self::from_ids(ids),
        })
    }
}
