use std::fmt;

use chrono::NaiveDate;
use url::form_urlencoded;

/// Scalar value of a query-string parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
    Bool(bool),
    Date(NaiveDate),
    /// Pre-rendered `key=value` fragment(s), emitted verbatim.
    Fragment(String),
}

impl QueryValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn integer(value: i64) -> Self {
        Self::Integer(value)
    }

    /// Renders `key=a` for one value and `key[]=a&key[]=b` for several.
    /// Each value is form-encoded; the key is not.
    ///
    /// Returns `None` for an empty input so the parameter is dropped.
    pub fn repeated<I, S>(key: &str, values: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<S> = values.into_iter().collect();
        match values.as_slice() {
            [] => None,
            [single] => Some(Self::Fragment(format!("{key}={}", encode(single.as_ref())))),
            many => Some(Self::Fragment(
                many.iter()
                    .map(|value| format!("{key}[]={}", encode(value.as_ref())))
                    .collect::<Vec<_>>()
                    .join("&"),
            )),
        }
    }
}

/// Form-encodes a query value so `#`, `&`, `%`, `+` and spaces stay inside it.
pub(crate) fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) | Self::Fragment(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
        }
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for QueryValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}
