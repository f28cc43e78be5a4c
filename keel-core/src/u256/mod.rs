//! 256-bit unsigned integer arithmetic for cumulative chain difficulty.
//!
//! Total difficulty grows without bound over the life of a chain, so the
//! coordination layer carries it as a 256-bit integer and reports it in
//! arbitrary-precision decimal form.

// Allow clippy warnings from the uint crate's construct_uint macro
#![allow(clippy::manual_div_ceil)]
#![allow(clippy::assign_op_pattern)]

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uint::construct_uint;

use crate::error::CoreError;

construct_uint! {
    /// 256-bit unsigned integer.
    ///
    /// Used for:
    /// - Total chain difficulty announced by peers
    /// - Best-peer selection by cumulative work
    pub struct U256(4);
}

impl U256 {
    /// Create a U256 from a u64 value.
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        U256([value, 0, 0, 0])
    }

    /// Convert to u64, returning None if the value doesn't fit.
    #[inline]
    pub fn to_u64(&self) -> Option<u64> {
        if self.0[1] == 0 && self.0[2] == 0 && self.0[3] == 0 {
            Some(self.0[0])
        } else {
            None
        }
    }

    /// Parse from the decimal textual form.
    pub fn from_dec(s: &str) -> Result<Self, CoreError> {
        U256::from_dec_str(s).map_err(|_| CoreError::InvalidDecimal(s.to_string()))
    }
}

// The textual (decimal) form is authoritative: summaries are reporting-facing
// and total difficulty must survive JSON without precision loss.
impl Serialize for U256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct U256Visitor;

        impl serde::de::Visitor<'_> for U256Visitor {
            type Value = U256;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a decimal integer string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<U256, E> {
                U256::from_dec(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(U256Visitor)
    }
}
