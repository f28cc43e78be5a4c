//! Fixed-length block hashes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// A 32-byte block hash.
///
/// The textual form is `0x`-prefixed lowercase hex (66 characters), which is
/// what peer summaries report for the announced head.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    /// The all-zero hash.
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    /// Create a hash from raw bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Hash256(bytes)
    }

    /// The raw bytes of the hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The `0x`-prefixed lowercase hex form.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse a hash from hex, with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 64 {
            return Err(CoreError::InvalidHexLength {
                expected: 64,
                actual: digits.len(),
            });
        }
        let bytes = hex::decode(digits).map_err(|_| CoreError::InvalidHexDigit)?;
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes);
        Ok(Hash256(hash))
    }

    /// Check if this is the all-zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Hash256(bytes)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Hash256Visitor;

        impl serde::de::Visitor<'_> for Hash256Visitor {
            type Value = Hash256;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 0x-prefixed 64-digit hex string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Hash256, E> {
                Hash256::from_hex(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(Hash256Visitor)
    }
}
