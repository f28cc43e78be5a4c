//! Coordination error types.

use thiserror::Error;

use crate::peer::{PeerId, SatelliteKind};

/// Errors returned by the peer coordination layer.
///
/// All of these are local, recoverable outcomes for the immediate caller;
/// none indicate a process-level failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum P2pError {
    /// A live satellite session of this kind is already attached to the peer.
    /// The caller should close the duplicate session rather than overwrite.
    #[error("satellite already attached: {kind}")]
    AlreadyAttached {
        /// Protocol kind of the rejected attachment.
        kind: SatelliteKind,
    },

    /// A handle for this peer identity is already registered.
    #[error("peer already registered: {peer}")]
    AlreadyRegistered {
        /// Identity of the duplicate peer.
        peer: PeerId,
    },

    /// No handle is registered under this peer identity.
    #[error("peer not found: {peer}")]
    PeerNotFound {
        /// Identity that missed.
        peer: PeerId,
    },
}

/// Result type for coordination operations.
pub type P2pResult<T> = Result<T, P2pError>;
