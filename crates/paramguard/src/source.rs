//! Parameter sources.
//!
//! A [`ParamSource`] is anything that can hand out a named parameter as a
//! string. The validator never parses bodies itself; it only asks a source.

use std::collections::{BTreeMap, HashMap};

/// Source of named, string-like parameter values.
///
/// ## Example
///
/// ```rust
/// use paramguard::ParamSource;
/// use std::collections::HashMap;
///
/// let mut params = HashMap::new();
/// params.insert("age".to_string(), "30".to_string());
///
/// assert_eq!(params.param("age").as_deref(), Some("30"));
/// assert_eq!(params.param("name"), None);
/// ```
pub trait ParamSource {
    /// Get a parameter by name, `None` when absent.
    fn param(&self, name: &str) -> Option<String>;
}

impl<T: ParamSource + ?Sized> ParamSource for &T {
    fn param(&self, name: &str) -> Option<String> {
        (**self).param(name)
    }
}

impl<S: std::hash::BuildHasher> ParamSource for HashMap<String, String, S> {
    fn param(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<S: std::hash::BuildHasher> ParamSource for HashMap<&str, &str, S> {
    fn param(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| v.to_string())
    }
}

impl ParamSource for BTreeMap<String, String> {
    fn param(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Reads members of a JSON object.
///
/// Strings are returned as-is, numbers and booleans in their JSON form.
/// `null`, arrays, objects and non-object roots count as absent.
impl ParamSource for serde_json::Value {
    fn param(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Decoded URL query parameters.
///
/// Repeated keys keep the last value.
///
/// ## Example
///
/// ```rust
/// use paramguard::{ParamSource, QueryParams};
///
/// let query = QueryParams::parse("name=Ada%20Lovelace&age=36").unwrap();
/// assert_eq!(query.param("name").as_deref(), Some("Ada Lovelace"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Decode a raw query string (without the leading `?`).
    pub fn parse(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        Ok(pairs.into_iter().collect())
    }

    /// Decode the query string of a request URI.
    #[cfg(feature = "http")]
    pub fn from_request<B>(req: &http::Request<B>) -> Result<Self, serde_urlencoded::de::Error> {
        Self::parse(req.uri().query().unwrap_or(""))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

impl ParamSource for QueryParams {
    fn param(&self, name: &str) -> Option<String> {
        self.params.get(name).cloned()
    }
}
