use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use uuid::Uuid;

use crate::error::{SantaError, SantaResult};

/// Type-safe string identifier. The phantom type parameter `T` keeps
/// participant ids and gift ids from being mixed up. Generated ids are
/// UUID v4 strings, but any non-blank string parses (legacy data uses "1", "2").
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    pub value: String,
    #[serde(skip)]
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _phantom: PhantomData,
        }
    }

    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Parse a user-supplied id. Surrounding whitespace is dropped.
    pub fn parse(s: &str) -> SantaResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SantaError::BlankField { field: "id".into() });
        }
        Ok(Self::new(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// First eight characters, for compact display.
    pub fn short(&self) -> &str {
        match self.value.char_indices().nth(8) {
            Some((idx, _)) => &self.value[..idx],
            None => &self.value,
        }
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Foo;

    #[test]
    fn generate_creates_unique_ids() {
        let id1 = Id::<Foo>::generate();
        let id2 = Id::<Foo>::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn generated_ids_are_uuids() {
        let id = Id::<Foo>::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn parse_accepts_short_legacy_ids() {
        let id = Id::<Foo>::parse(" 7 ").unwrap();
        assert_eq!(id.as_str(), "7");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(Id::<Foo>::parse("   ").is_err());
    }

    #[test]
    fn short_truncates_long_ids() {
        let id = Id::<Foo>::new("0123456789abcdef");
        assert_eq!(id.short(), "01234567");
        assert_eq!(Id::<Foo>::new("abc").short(), "abc");
    }

    #[test]
    fn serde_is_a_plain_string() {
        let id = Id::<Foo>::new("42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"42\"");
        let back: Id<Foo> = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
