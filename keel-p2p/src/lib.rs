//! Peer protocol coordination for Keel.
//!
//! This crate coordinates one network connection that speaks a mandatory
//! base protocol plus zero or more satellite protocols over the same
//! transport:
//!
//! - Per-connection [`PeerHandle`]s owning the base session and any
//!   satellite attachments
//! - A readiness gate that parks satellite users until base-protocol
//!   validation succeeds
//! - A validation deadline that signals the connection manager to drop
//!   peers that never produce validating evidence
//! - Shared per-protocol [`LatencyTracker`]s scoring request round trips
//!
//! # Architecture
//!
//! ```text
//! Connection manager (external)
//! ├── PeerRegistry
//! │   ├── PeerHandle (peer 1) ── satellites, readiness gate, deadline
//! │   └── PeerHandle (peer 2) ── ...
//! └── LatencyTracker (one per protocol kind, shared across peers)
//! ```
//!
//! Handshaking, wire codecs, transport, and peer discovery are external
//! collaborators; this crate only manages lifecycle metadata around already
//! connected sessions and never touches sockets itself.

pub mod config;
pub mod error;
pub mod gate;
pub mod peer;
pub mod registry;
pub mod tracker;

// Re-export main types
pub use config::P2pConfig;
pub use error::{P2pError, P2pResult};
pub use gate::{GateState, Readiness, ReadinessGate};
pub use peer::{
    ChainSession, DeltaSession, PeerHandle, PeerId, PeerInfo, PeerState, PeerSummary,
    SatelliteHandle, SatelliteKind, SatelliteSummary, SnapshotSession, WitnessSession,
};
pub use registry::PeerRegistry;
pub use tracker::{LatencyTracker, RequestId};
