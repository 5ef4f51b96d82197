//! Key representations for keyed resources.
//!
//! Three key shapes exist at runtime:
//!
//! - Simple keys are plain values (`i64`, `String`, ...) and need no
//!   wrapper.
//! - [`ComplexKey`] pairs a primary identifier with a params record
//!   (collections whose identifier declares a `params` type).
//! - [`CompoundKey`] is an ordered set of named parts (associations).

use std::fmt;

use thiserror::Error;

use crate::value::ParamValue;

/// A compound key: ordered, named, independently-typed parts.
///
/// ## Examples
///
/// ```
/// use restive_client::CompoundKey;
///
/// let key = CompoundKey::new()
///     .append("memberId", 17i64)
///     .append("groupId", 42i64);
///
/// assert_eq!(key.len(), 2);
/// assert_eq!(key.to_string(), "groupId=42&memberId=17");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundKey {
    parts: Vec<(String, ParamValue)>,
}

impl CompoundKey {
    /// Creates an empty compound key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a named part.
    pub fn append(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parts.push((name.into(), value.into()));
        self
    }

    /// Returns the part bound to `name`.
    ///
    /// ## Errors
    ///
    /// Returns [`KeyPartError`] when no part with that name was appended.
    pub fn part(&self, name: &str) -> Result<&ParamValue, KeyPartError> {
        self.parts
            .iter()
            .find(|(part, _)| part == name)
            .map(|(_, value)| value)
            .ok_or_else(|| KeyPartError {
                name: name.to_string(),
            })
    }

    /// Number of parts appended so far.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true when no parts have been appended.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterates parts in append order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.parts.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Renders `name=value` pairs joined by `&`, sorted by part name so equal
/// keys render identically regardless of append order.
impl fmt::Display for CompoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sorted: Vec<_> = self.parts.iter().collect();
        sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
        let rendered: Vec<String> = sorted
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        write!(f, "{}", rendered.join("&"))
    }
}

/// Lookup of a compound-key part that was never appended.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("compound key has no part named '{name}'")]
pub struct KeyPartError {
    /// The requested part name.
    pub name: String,
}

/// A composite key: primary identifier plus a params record.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexKey<K, P> {
    id: K,
    params: P,
}

impl<K, P> ComplexKey<K, P> {
    /// Creates a composite key from its two components.
    pub fn new(id: K, params: P) -> Self {
        Self { id, params }
    }

    /// The primary identifier.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// The params record.
    pub fn params(&self) -> &P {
        &self.params
    }
}
