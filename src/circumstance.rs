//! Partial, three-valued assignments of circumstance facts.
//!
//! A [`CircumstanceMap`] plays two roles:
//!
//! - the *world*: what is currently known to be true or false, and
//! - a *condition*: what must hold for a clause to apply.
//!
//! Because a condition may reference facts the world knows nothing about,
//! [`CircumstanceMap::satisfies`] answers with a [`Satisfaction`] rather than a
//! `bool`.
//!
//! A key may be recorded as [`Truth::Unspecified`]. In a world this reads the
//! same as a missing key. In a condition it means the clause depends on the
//! fact without fixing its value: the condition is only settled once the world
//! knows it, and while it is unknown it is taken to need `true`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ConflictError;
use crate::sentence::Sentence;

/// Three-valued truth of a single circumstance.
///
/// Serialized as an optional boolean (`null` / `None` for `Unspecified`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Truth {
    True,
    False,
    Unspecified,
}

impl Truth {
    pub fn is_definite(self) -> bool {
        !matches!(self, Truth::Unspecified)
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Truth::True => Some(true),
            Truth::False => Some(false),
            Truth::Unspecified => None,
        }
    }

    pub fn negate(self) -> Self {
        match self {
            Truth::True => Truth::False,
            Truth::False => Truth::True,
            Truth::Unspecified => Truth::Unspecified,
        }
    }
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        if value {
            Truth::True
        } else {
            Truth::False
        }
    }
}

impl From<Option<bool>> for Truth {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Truth::Unspecified, Truth::from)
    }
}

impl From<Truth> for Option<bool> {
    fn from(truth: Truth) -> Self {
        truth.as_bool()
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Truth::True => f.write_str("true"),
            Truth::False => f.write_str("false"),
            Truth::Unspecified => f.write_str("unspecified"),
        }
    }
}

/// Outcome of checking a world against a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Satisfaction {
    /// Every definite fact of the condition holds.
    Yes,
    /// At least one definite fact of the condition is contradicted.
    No,
    /// Nothing is contradicted, but some fact of the condition is unknown.
    Maybe,
}

/// Identifies one circumstance fact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CircumstanceKey {
    /// Reserved key recording whether the sentence's action has occurred.
    Performed(Sentence),
    /// Free-form fact, e.g. `"month_end"`.
    Named(String),
}

impl CircumstanceKey {
    pub fn performed(sentence: &Sentence) -> Self {
        CircumstanceKey::Performed(sentence.clone())
    }

    pub fn named(name: impl Into<String>) -> Self {
        CircumstanceKey::Named(name.into())
    }

    pub fn sentence(&self) -> Option<&Sentence> {
        match self {
            CircumstanceKey::Performed(sentence) => Some(sentence),
            CircumstanceKey::Named(_) => None,
        }
    }
}

impl From<&str> for CircumstanceKey {
    fn from(name: &str) -> Self {
        CircumstanceKey::Named(name.to_string())
    }
}

impl From<String> for CircumstanceKey {
    fn from(name: String) -> Self {
        CircumstanceKey::Named(name)
    }
}

impl fmt::Display for CircumstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircumstanceKey::Performed(sentence) => write!(f, "{} (performed)", sentence),
            CircumstanceKey::Named(name) => f.write_str(name),
        }
    }
}

/// Partial assignment of circumstance keys to truth values.
///
/// Deserializing rejects a key listed twice with opposite definite values.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<(CircumstanceKey, Truth)>",
    into = "Vec<(CircumstanceKey, Truth)>"
)]
pub struct CircumstanceMap {
    entries: BTreeMap<CircumstanceKey, Truth>,
}

impl CircumstanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect `entries`, failing on the first key given opposite definite
    /// values. Repeats that agree, or that are `Unspecified`, are absorbed.
    pub fn from_entries<I, T>(entries: I) -> Result<Self, ConflictError>
    where
        I: IntoIterator<Item = (CircumstanceKey, T)>,
        T: Into<Truth>,
    {
        let mut map = CircumstanceMap::new();
        for (key, truth) in entries {
            map.assign(key, truth.into())?;
        }
        Ok(map)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<CircumstanceKey>, truth: impl Into<Truth>) -> Self {
        self.insert(key, truth);
        self
    }

    /// Record that `sentence` was (or was not) performed.
    pub fn with_performed(self, sentence: &Sentence, truth: impl Into<Truth>) -> Self {
        self.with(CircumstanceKey::performed(sentence), truth)
    }

    /// Assign `truth` to `key`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<CircumstanceKey>, truth: impl Into<Truth>) {
        self.entries.insert(key.into(), truth.into());
    }

    /// Like `insert`, but keeps a definite value over `Unspecified` and
    /// refuses to flip one.
    fn assign(&mut self, key: CircumstanceKey, truth: Truth) -> Result<(), ConflictError> {
        let current = self.get(&key);
        match (current.as_bool(), truth.as_bool()) {
            (Some(left), Some(right)) if left != right => {
                tracing::trace!(%key, left, right, "circumstance merge conflict");
                Err(ConflictError { key, left, right })
            }
            (Some(_), _) => Ok(()),
            (None, _) => {
                self.entries.insert(key, truth);
                Ok(())
            }
        }
    }

    pub fn remove(&mut self, key: &CircumstanceKey) -> Truth {
        self.entries.remove(key).unwrap_or(Truth::Unspecified)
    }

    /// `Unspecified` for keys that are absent or recorded as unspecified.
    pub fn get(&self, key: &CircumstanceKey) -> Truth {
        self.entries.get(key).copied().unwrap_or(Truth::Unspecified)
    }

    /// Truth of the reserved "has this sentence been performed" fact.
    pub fn performed(&self, sentence: &Sentence) -> Truth {
        self.get(&CircumstanceKey::performed(sentence))
    }

    /// Number of referenced keys, definite or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &CircumstanceKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Every referenced key in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CircumstanceKey, Truth)> + '_ {
        self.entries.iter().map(|(key, truth)| (key, *truth))
    }

    /// Definite facts only, in key order.
    pub fn facts(&self) -> impl Iterator<Item = (&CircumstanceKey, bool)> + '_ {
        self.entries
            .iter()
            .filter_map(|(key, truth)| truth.as_bool().map(|value| (key, value)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &CircumstanceKey> + '_ {
        self.entries.keys()
    }

    /// Check this map, taken as the world, against `condition`.
    ///
    /// `No` wins over `Maybe`: a single contradicted fact settles the question
    /// no matter how much else is unknown. An `Unspecified` condition entry is
    /// met by either definite value.
    pub fn satisfies(&self, condition: &CircumstanceMap) -> Satisfaction {
        let mut undetermined = false;
        for (key, required) in condition.iter() {
            match (self.get(key).as_bool(), required.as_bool()) {
                (None, _) => undetermined = true,
                (Some(actual), Some(required)) if actual != required => return Satisfaction::No,
                (Some(_), _) => {}
            }
        }
        if undetermined {
            Satisfaction::Maybe
        } else {
            Satisfaction::Yes
        }
    }

    /// The facts of `condition` this map does not know yet, with the values
    /// that would make it hold. Unspecified condition entries become `true`.
    pub fn unresolved(&self, condition: &CircumstanceMap) -> CircumstanceMap {
        condition
            .iter()
            .filter(|(key, _)| !self.get(key).is_definite())
            .map(|(key, required)| (key.clone(), required.as_bool().unwrap_or(true)))
            .collect()
    }

    /// Union of both maps. A definite value wins over `Unspecified`.
    pub fn merge(&self, other: &CircumstanceMap) -> Result<CircumstanceMap, ConflictError> {
        let mut merged = self.clone();
        for (key, truth) in other.iter() {
            merged.assign(key.clone(), truth)?;
        }
        Ok(merged)
    }

    /// No key is assigned opposite definite values by the two maps.
    pub fn is_consistent_with(&self, other: &CircumstanceMap) -> bool {
        other.facts().all(|(key, value)| {
            self.get(key).as_bool().map_or(true, |own| own == value)
        })
    }

    /// Every definite fact of `other` is also a fact of this map.
    pub fn extends(&self, other: &CircumstanceMap) -> bool {
        other
            .facts()
            .all(|(key, value)| self.get(key).as_bool() == Some(value))
    }
}

/// Later entries overwrite earlier ones, as with [`CircumstanceMap::insert`].
impl FromIterator<(CircumstanceKey, bool)> for CircumstanceMap {
    fn from_iter<I: IntoIterator<Item = (CircumstanceKey, bool)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(key, value)| (key, Truth::from(value)))
            .collect()
    }
}

impl FromIterator<(CircumstanceKey, Truth)> for CircumstanceMap {
    fn from_iter<I: IntoIterator<Item = (CircumstanceKey, Truth)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<Vec<(CircumstanceKey, Truth)>> for CircumstanceMap {
    type Error = ConflictError;

    fn try_from(entries: Vec<(CircumstanceKey, Truth)>) -> Result<Self, Self::Error> {
        CircumstanceMap::from_entries(entries)
    }
}

impl From<CircumstanceMap> for Vec<(CircumstanceKey, Truth)> {
    fn from(map: CircumstanceMap) -> Self {
        map.entries.into_iter().collect()
    }
}

impl fmt::Display for CircumstanceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}
