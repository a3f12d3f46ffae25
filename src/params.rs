use serde::Serialize;
use serde_json::{Map, Value};

use crate::value::encode;
use crate::QueryValue;

/// Keys whose value is a pre-joined fragment (`state=a` or
/// `state[]=a&state[]=b`) and is written to the query string as-is.
const VERBATIM_KEYS: [&str; 2] = ["state", "branch"];

/// Ordered query-parameter mapping.
///
/// Entries may hold `None`; those are dropped by [`QueryParams::clean`] and
/// never reach the wire.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, Option<QueryValue>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing an existing entry in place or appending.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> &mut Self {
        self.set(key.into(), Some(value.into()));
        self
    }

    /// Sets `key` to an optional value. `None` entries are kept until cleaned.
    pub fn insert_opt<V: Into<QueryValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        self.set(key.into(), value.map(Into::into));
        self
    }

    /// Builder form of [`QueryParams::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder form of [`QueryParams::insert_opt`].
    pub fn with_opt<V: Into<QueryValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.insert_opt(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order, including unset ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&QueryValue>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    /// Drops every entry without a value.
    pub fn clean(mut self) -> Self {
        self.entries.retain(|(_, value)| value.is_some());
        self
    }

    /// Joins the set entries with `&` in insertion order.
    ///
    /// `state`, `branch` and [`QueryValue::Fragment`] values are written
    /// verbatim; everything else renders as `key=value` with the value
    /// form-encoded.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .filter_map(|(key, value)| {
                let value = value.as_ref()?;
                if VERBATIM_KEYS.contains(&key.as_str()) || matches!(value, QueryValue::Fragment(_)) {
                    Some(value.to_string())
                } else {
                    Some(format!("{key}={}", encode(&value.to_string())))
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    fn set(&mut self, key: String, value: Option<QueryValue>) {
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// JSON object sent as a request body.
///
/// `null` members are dropped by [`Body::clean`] before sending.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Body(Map<String, Value>);

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a member. `Option::None` converts to `null`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clean(mut self) -> Self {
        self.0.retain(|_, value| !value.is_null());
        self
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Body {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
