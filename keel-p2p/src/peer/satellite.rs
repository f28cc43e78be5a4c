//! Satellite protocol attachments.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::session::{DeltaSession, SnapshotSession, WitnessSession};

/// Kinds of satellite protocols that can ride on a base connection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SatelliteKind {
    /// State-snapshot serving.
    Snapshot,
    /// State-delta streaming.
    Delta,
    /// Block-witness serving.
    Witness,
}

impl fmt::Display for SatelliteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SatelliteKind::Snapshot => write!(f, "snapshot"),
            SatelliteKind::Delta => write!(f, "delta"),
            SatelliteKind::Witness => write!(f, "witness"),
        }
    }
}

/// A satellite session attached to a peer handle.
///
/// At most one live handle exists per kind per peer; the owning
/// [`PeerHandle`](super::handle::PeerHandle) enforces that on attach.
#[derive(Debug, Clone)]
pub enum SatelliteHandle {
    /// State-snapshot serving session.
    Snapshot(SnapshotSession),
    /// State-delta streaming session.
    Delta(DeltaSession),
    /// Block-witness serving session.
    Witness(WitnessSession),
}

impl SatelliteHandle {
    /// The protocol kind of this attachment.
    pub fn kind(&self) -> SatelliteKind {
        match self {
            SatelliteHandle::Snapshot(_) => SatelliteKind::Snapshot,
            SatelliteHandle::Delta(_) => SatelliteKind::Delta,
            SatelliteHandle::Witness(_) => SatelliteKind::Witness,
        }
    }

    /// Negotiated version of the underlying session.
    pub fn version(&self) -> u32 {
        match self {
            SatelliteHandle::Snapshot(s) => s.version(),
            SatelliteHandle::Delta(s) => s.version(),
            SatelliteHandle::Witness(s) => s.version(),
        }
    }

    /// Read-only snapshot of the negotiated capabilities.
    pub fn summary(&self) -> SatelliteSummary {
        match self {
            SatelliteHandle::Snapshot(s) => SatelliteSummary::Snapshot { version: s.version() },
            SatelliteHandle::Delta(s) => SatelliteSummary::Delta {
                version: s.version(),
                delta_sync: s.delta_sync(),
            },
            SatelliteHandle::Witness(s) => SatelliteSummary::Witness { version: s.version() },
        }
    }
}

/// Kind-specific summary of a satellite session.
///
/// Serialized untagged: the peer-info record keys these by [`SatelliteKind`]
/// already, so only the fields appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SatelliteSummary {
    /// Snapshot protocol metadata.
    Snapshot {
        /// Negotiated snapshot protocol version.
        version: u32,
    },
    /// Delta protocol metadata.
    Delta {
        /// Negotiated delta protocol version.
        version: u32,
        /// Whether the peer asked to sync via state deltas.
        delta_sync: bool,
    },
    /// Witness protocol metadata.
    Witness {
        /// Negotiated witness protocol version.
        version: u32,
    },
}
