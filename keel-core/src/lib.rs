//! # Keel Core
//!
//! Foundation types for the Keel protocol-coordination crates:
//! - Fixed-length block hashes with a hex textual form
//! - 256-bit arithmetic for cumulative chain difficulty
//! - Core error taxonomy
//!
//! Everything here is read-side plumbing: the handshake and codec layers
//! produce these values, the coordination layer carries and reports them.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;
pub mod u256;

// Re-export commonly used types at crate root
pub use error::CoreError;
pub use types::Hash256;
pub use u256::U256;
