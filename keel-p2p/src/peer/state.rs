//! Peer validation lifecycle.

use std::fmt;

use crate::gate::GateState;

/// Lifecycle state of a peer handle.
///
/// A handle enters `Validating` at construction, with the deadline armed.
/// Both successor states are terminal: nothing leaves `Validated` or
/// `Dropped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerState {
    /// Awaiting base-protocol validation; deadline armed.
    Validating,
    /// Validation succeeded; satellite work may proceed.
    Validated,
    /// Deadline fired or the connection closed before validation.
    Dropped,
}

impl PeerState {
    /// Check if the peer is still awaiting validation.
    pub fn is_validating(&self) -> bool {
        matches!(self, PeerState::Validating)
    }

    /// Check if validation succeeded.
    pub fn is_validated(&self) -> bool {
        matches!(self, PeerState::Validated)
    }

    /// Check if the peer has been dropped.
    pub fn is_dropped(&self) -> bool {
        matches!(self, PeerState::Dropped)
    }
}

impl From<GateState> for PeerState {
    fn from(state: GateState) -> Self {
        match state {
            GateState::Pending => PeerState::Validating,
            GateState::Ready => PeerState::Validated,
            GateState::Cancelled => PeerState::Dropped,
        }
    }
}

impl fmt::Display for PeerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerState::Validating => write!(f, "validating"),
            PeerState::Validated => write!(f, "validated"),
            PeerState::Dropped => write!(f, "dropped"),
        }
    }
}
