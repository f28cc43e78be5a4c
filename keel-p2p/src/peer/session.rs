//! Session views over externally negotiated protocol connections.
//!
//! The handshake, wire codecs, and transport all live outside this crate;
//! these types carry only the capabilities the coordination layer reads.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use keel_core::{Hash256, U256};

/// Unique identifier for a peer connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId(pub u64);

impl PeerId {
    /// Create a new peer ID from a counter value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer-{}", self.0)
    }
}

/// The negotiated base-protocol session for one connection.
///
/// The external announcement handler overwrites the head via [`set_head`];
/// everything inside this crate only reads it.
///
/// [`set_head`]: ChainSession::set_head
#[derive(Debug)]
pub struct ChainSession {
    /// Peer identity, owned by the base connection.
    peer: PeerId,
    /// Negotiated base protocol version.
    version: u32,
    /// Latest announced head hash and total difficulty.
    head: RwLock<(Hash256, U256)>,
}

impl ChainSession {
    /// Create a session from the handshake results.
    pub fn new(peer: PeerId, version: u32, head: Hash256, difficulty: U256) -> Self {
        Self {
            peer,
            version,
            head: RwLock::new((head, difficulty)),
        }
    }

    /// Peer identity this session belongs to.
    pub fn peer_id(&self) -> PeerId {
        self.peer
    }

    /// Negotiated base protocol version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Latest announced head hash and total difficulty.
    pub async fn head(&self) -> (Hash256, U256) {
        *self.head.read().await
    }

    /// Record a head announcement from the peer.
    pub async fn set_head(&self, head: Hash256, difficulty: U256) {
        *self.head.write().await = (head, difficulty);
    }
}

/// Negotiated state-snapshot protocol session.
#[derive(Debug, Clone)]
pub struct SnapshotSession {
    version: u32,
}

impl SnapshotSession {
    /// Create a session with the negotiated version.
    pub fn new(version: u32) -> Self {
        Self { version }
    }

    /// Negotiated snapshot protocol version.
    pub fn version(&self) -> u32 {
        self.version
    }
}

/// Negotiated state-delta protocol session.
#[derive(Debug, Clone)]
pub struct DeltaSession {
    version: u32,
    delta_sync: bool,
}

impl DeltaSession {
    /// Create a session with the negotiated version and sync mode.
    pub fn new(version: u32, delta_sync: bool) -> Self {
        Self { version, delta_sync }
    }

    /// Negotiated delta protocol version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Whether the peer asked to sync via state deltas.
    pub fn delta_sync(&self) -> bool {
        self.delta_sync
    }
}

/// Negotiated block-witness protocol session.
#[derive(Debug, Clone)]
pub struct WitnessSession {
    version: u32,
}

impl WitnessSession {
    /// Create a session with the negotiated version.
    pub fn new(version: u32) -> Self {
        Self { version }
    }

    /// Negotiated witness protocol version.
    pub fn version(&self) -> u32 {
        self.version
    }
}
