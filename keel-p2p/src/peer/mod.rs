//! Peer lifecycle coordination.
//!
//! This module provides:
//! - Narrow session views over externally negotiated connections
//! - Satellite protocol attachment and summary snapshots
//! - The per-connection peer handle with its readiness gate and deadline

pub mod handle;
pub mod satellite;
pub mod session;
pub mod state;

// Re-export main types
pub use handle::{PeerHandle, PeerInfo, PeerSummary};
pub use satellite::{SatelliteHandle, SatelliteKind, SatelliteSummary};
pub use session::{ChainSession, DeltaSession, PeerId, SnapshotSession, WitnessSession};
pub use state::PeerState;
