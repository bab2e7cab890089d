//! # Interned keys
//!
//! Channels and signals are addressed by [Key]s: small `Copy` values standing
//! in for a string. Equal strings always intern to equal keys, in every
//! registry and on every thread. The empty string is the invalid key.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{cmp::Ordering, fmt};

mod interner;

#[cfg(test)]
mod test;

/// An interned, comparable string identifier
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Key(u32);

impl Key {
    /// The invalid key, interned from the empty string
    pub const INVALID: Key = Key(0);

    /// Interns `value` and returns its key
    ///
    /// Returns [Key::INVALID] for an empty string
    pub fn new(value: &str) -> Self {
        if value.is_empty() {
            return Self::INVALID;
        }
        Self(interner::intern(value))
    }

    /// Returns true for every key except [Key::INVALID]
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }

    /// The string this key was interned from
    pub fn as_str(&self) -> &'static str {
        if !self.is_valid() {
            return "";
        }
        interner::resolve(self.0)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::new(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::new(value)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::new(&value)
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        *value
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Key({:?})", self.as_str())
        } else {
            f.write_str("Key(<invalid>)")
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Key::new(&value))
    }
}
