//! Ordered message collections.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Messages keyed by rule identifier, in insertion order.
///
/// Inserting an existing key replaces its message in place, so the key
/// keeps its original position. Serializes as a JSON object with the same
/// ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleMessages {
    entries: Vec<(String, String)>,
}

impl RuleMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a message, returning the one it replaced.
    pub fn insert(&mut self, rule: impl Into<String>, message: impl Into<String>) -> Option<String> {
        let rule = rule.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(r, _)| *r == rule) {
            Some((_, existing)) => Some(std::mem::replace(existing, message)),
            None => {
                self.entries.push((rule, message));
                None
            }
        }
    }

    pub fn get(&self, rule: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(r, _)| r == rule)
            .map(|(_, m)| m.as_str())
    }

    pub fn contains_key(&self, rule: &str) -> bool {
        self.get(rule).is_some()
    }

    /// Remove a message, keeping the order of the others.
    pub fn remove(&mut self, rule: &str) -> Option<String> {
        let index = self.entries.iter().position(|(r, _)| r == rule)?;
        Some(self.entries.remove(index).1)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.entries.retain(|(r, m)| keep(r, m));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(r, m)| (r.as_str(), m.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(r, _)| r.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, m)| m.as_str())
    }

    /// Drop the keys, keeping messages in order.
    pub fn into_values(self) -> Vec<String> {
        self.entries.into_iter().map(|(_, m)| m).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RuleMessages {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut messages = RuleMessages::new();
        messages.extend(iter);
        messages
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for RuleMessages {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (rule, message) in iter {
            self.insert(rule, message);
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for RuleMessages {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for RuleMessages {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for RuleMessages {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (rule, message) in &self.entries {
            map.serialize_entry(rule, message)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RuleMessages {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MessagesVisitor;

        impl<'de> Visitor<'de> for MessagesVisitor {
            type Value = RuleMessages;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of rule names to messages")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut messages = RuleMessages::new();
                while let Some((rule, message)) = map.next_entry::<String, String>()? {
                    messages.insert(rule, message);
                }
                Ok(messages)
            }
        }

        deserializer.deserialize_map(MessagesVisitor)
    }
}

/// The error collection stored for one field.
///
/// `Rules` keeps the identifier of the rule each message belongs to,
/// `List` is a plain ordered sequence. Serializes untagged: an object for
/// `Rules`, an array for `List`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldErrors {
    Rules(RuleMessages),
    List(Vec<String>),
}

impl Default for FieldErrors {
    fn default() -> Self {
        FieldErrors::List(Vec::new())
    }
}

impl FieldErrors {
    /// The first message in iteration order.
    pub fn first(&self) -> Option<&str> {
        match self {
            FieldErrors::Rules(messages) => messages.values().next(),
            FieldErrors::List(messages) => messages.first().map(String::as_str),
        }
    }

    /// The message of a specific rule. Always `None` for `List`.
    pub fn get(&self, rule: &str) -> Option<&str> {
        match self {
            FieldErrors::Rules(messages) => messages.get(rule),
            FieldErrors::List(_) => None,
        }
    }

    /// All messages in order.
    pub fn messages(&self) -> Vec<&str> {
        match self {
            FieldErrors::Rules(messages) => messages.values().collect(),
            FieldErrors::List(messages) => messages.iter().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FieldErrors::Rules(messages) => messages.len(),
            FieldErrors::List(messages) => messages.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a message.
    ///
    /// A message appended to `Rules` has no rule of its own and is keyed by
    /// the next free index: one past the largest integer key, or `0`.
    pub fn push(&mut self, message: impl Into<String>) {
        match self {
            FieldErrors::Rules(messages) => {
                let key = messages
                    .keys()
                    .filter_map(|key| key.parse::<u64>().ok())
                    .max()
                    .map_or(0, |last| last + 1);
                messages.insert(key.to_string(), message);
            }
            FieldErrors::List(messages) => messages.push(message.into()),
        }
    }

    pub fn into_messages(self) -> Vec<String> {
        match self {
            FieldErrors::Rules(messages) => messages.into_values(),
            FieldErrors::List(messages) => messages,
        }
    }
}

impl From<RuleMessages> for FieldErrors {
    fn from(messages: RuleMessages) -> Self {
        FieldErrors::Rules(messages)
    }
}

impl From<Vec<String>> for FieldErrors {
    fn from(messages: Vec<String>) -> Self {
        FieldErrors::List(messages)
    }
}

impl<S: Into<String>> FromIterator<S> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        FieldErrors::List(iter.into_iter().map(Into::into).collect())
    }
}
