//! Per-connection peer handle.
//!
//! A handle is created when the base-protocol handshake completes. It owns
//! the base session, any attached satellite sessions, the readiness gate
//! that parks satellite users until the peer's chain state has been
//! validated, and the deadline that drops peers which never validate.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio::task::JoinHandle;

use keel_core::{Hash256, U256};

use crate::error::{P2pError, P2pResult};
use crate::gate::{Readiness, ReadinessGate};

use super::satellite::{SatelliteHandle, SatelliteKind, SatelliteSummary};
use super::session::{ChainSession, PeerId};
use super::state::PeerState;

/// Short summary of the base-protocol metadata known about a peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerSummary {
    /// Base protocol version negotiated.
    pub version: u32,
    /// Total difficulty of the peer's chain.
    pub difficulty: U256,
    /// Hash of the peer's best announced block.
    pub head: Hash256,
}

/// Peer-info record assembled for external reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerInfo {
    /// Base protocol version negotiated.
    pub version: u32,
    /// Total difficulty of the peer's chain.
    pub difficulty: U256,
    /// Hash of the peer's best announced block.
    pub head: Hash256,
    /// Summaries of the attached satellite sessions, keyed by kind.
    pub satellites: BTreeMap<SatelliteKind, SatelliteSummary>,
}

/// A connected peer plus its satellite attachments and validation state.
#[derive(Debug)]
pub struct PeerHandle {
    /// Base-protocol session.
    chain: ChainSession,
    /// Gate released once validation resolves one way or the other.
    gate: ReadinessGate,
    /// Live satellite attachments, at most one per kind.
    satellites: RwLock<HashMap<SatelliteKind, SatelliteHandle>>,
    /// Deadline timer task, armed until validation or teardown.
    deadline: Mutex<Option<JoinHandle<()>>>,
}

impl PeerHandle {
    /// Create a handle for a freshly handshaken peer and arm its validation
    /// deadline.
    ///
    /// If the deadline elapses before [`validate`](PeerHandle::validate) is
    /// called, the peer id is sent on `drop_tx` so the connection manager
    /// can close the transport; this crate never closes the transport
    /// itself. Must be called within a tokio runtime.
    pub fn new(
        chain: ChainSession,
        deadline: Duration,
        drop_tx: mpsc::UnboundedSender<PeerId>,
    ) -> Self {
        let gate = ReadinessGate::new();
        let peer = chain.peer_id();

        let timer = tokio::spawn({
            let gate = gate.clone();
            async move {
                tokio::time::sleep(deadline).await;
                if gate.cancel() {
                    tracing::debug!(peer = %peer, "validation deadline elapsed, dropping peer");
                    let _ = drop_tx.send(peer);
                }
            }
        });

        Self {
            chain,
            gate,
            satellites: RwLock::new(HashMap::new()),
            deadline: Mutex::new(Some(timer)),
        }
    }

    /// Peer identity of the underlying connection.
    pub fn peer_id(&self) -> PeerId {
        self.chain.peer_id()
    }

    /// Negotiated base protocol version.
    pub fn version(&self) -> u32 {
        self.chain.version()
    }

    /// The base-protocol session.
    pub fn chain(&self) -> &ChainSession {
        &self.chain
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PeerState {
        self.gate.state().into()
    }

    /// Attach a satellite session under its protocol kind.
    ///
    /// Fails with [`P2pError::AlreadyAttached`] if a live handle for that
    /// kind exists; the caller should close the duplicate session. Attach
    /// never waits on readiness: a satellite connection is parked eagerly,
    /// and its users await [`readiness`](PeerHandle::readiness) before
    /// acting on it. Attaching is allowed before, during, or after gate
    /// resolution.
    pub async fn attach(&self, satellite: SatelliteHandle) -> P2pResult<()> {
        let kind = satellite.kind();
        let mut satellites = self.satellites.write().await;
        if satellites.contains_key(&kind) {
            return Err(P2pError::AlreadyAttached { kind });
        }
        satellites.insert(kind, satellite);
        tracing::debug!(peer = %self.peer_id(), %kind, "satellite attached");
        Ok(())
    }

    /// Remove the satellite attachment for `kind`.
    ///
    /// This is the removal hook the satellite-session collaborator calls
    /// when its session closes; the base connection is unaffected and the
    /// kind may be reattached afterwards.
    pub async fn detach(&self, kind: SatelliteKind) -> Option<SatelliteHandle> {
        let removed = self.satellites.write().await.remove(&kind);
        if removed.is_some() {
            tracing::debug!(peer = %self.peer_id(), %kind, "satellite detached");
        }
        removed
    }

    /// Get the satellite attachment for `kind`, if live.
    pub async fn satellite(&self, kind: SatelliteKind) -> Option<SatelliteHandle> {
        self.satellites.read().await.get(&kind).cloned()
    }

    /// Kinds with a live attachment.
    pub async fn satellite_kinds(&self) -> Vec<SatelliteKind> {
        self.satellites.read().await.keys().copied().collect()
    }

    /// Wait until validation resolves.
    ///
    /// Returns [`Readiness::Ready`] once [`validate`](PeerHandle::validate)
    /// succeeds, or [`Readiness::Cancelled`] if the deadline fired or the
    /// connection was torn down first. Any number of callers may wait
    /// concurrently; all observe the same outcome, and callers arriving
    /// after resolution observe it immediately.
    pub async fn readiness(&self) -> Readiness {
        self.gate.wait().await
    }

    /// Mark base-protocol validation as successful.
    ///
    /// Cancels the deadline and releases every readiness waiter with
    /// `Ready`. Idempotent, and a no-op once the peer has been dropped.
    pub async fn validate(&self) {
        if self.gate.open() {
            if let Some(timer) = self.deadline.lock().await.take() {
                timer.abort();
            }
            tracing::debug!(peer = %self.peer_id(), "peer validated");
        }
    }

    /// Tear the handle down on connection close.
    ///
    /// Cancels the deadline if still pending, releases readiness waiters
    /// with `Cancelled` if the gate is unresolved, and clears the satellite
    /// map. The gate resolves before the map is cleared, so no waiter can
    /// observe an unresolved gate on a torn-down handle.
    pub async fn teardown(&self) {
        if let Some(timer) = self.deadline.lock().await.take() {
            timer.abort();
        }
        if self.gate.cancel() {
            tracing::debug!(peer = %self.peer_id(), "peer torn down before validation");
        }
        self.satellites.write().await.clear();
    }

    /// Summary of the base-protocol metadata.
    ///
    /// Pure read: never resolves or waits on the gate.
    pub async fn summary(&self) -> PeerSummary {
        let (head, difficulty) = self.chain.head().await;
        PeerSummary {
            version: self.chain.version(),
            difficulty,
            head,
        }
    }

    /// Peer-info record with base metadata and per-satellite summaries.
    pub async fn info(&self) -> PeerInfo {
        let (head, difficulty) = self.chain.head().await;
        let satellites = self
            .satellites
            .read()
            .await
            .iter()
            .map(|(kind, satellite)| (*kind, satellite.summary()))
            .collect();

        PeerInfo {
            version: self.chain.version(),
            difficulty,
            head,
            satellites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peer::session::{DeltaSession, SnapshotSession, WitnessSession};

    fn test_handle(deadline: Duration) -> (PeerHandle, mpsc::UnboundedReceiver<PeerId>) {
        let (drop_tx, drop_rx) = mpsc::unbounded_channel();
        let chain = ChainSession::new(
            PeerId::new(7),
            68,
            Hash256::new([0xaa; 32]),
            U256::from(1000u64),
        );
        (PeerHandle::new(chain, deadline, drop_tx), drop_rx)
    }

    #[tokio::test]
    async fn test_duplicate_attach_rejected() {
        let (handle, _drop_rx) = test_handle(Duration::from_secs(60));

        handle
            .attach(SatelliteHandle::Snapshot(SnapshotSession::new(1)))
            .await
            .unwrap();

        let err = handle
            .attach(SatelliteHandle::Snapshot(SnapshotSession::new(2)))
            .await
            .unwrap_err();
        assert_eq!(err, P2pError::AlreadyAttached { kind: SatelliteKind::Snapshot });

        // The first attachment stays in place.
        let kept = handle.satellite(SatelliteKind::Snapshot).await.unwrap();
        assert_eq!(kept.version(), 1);

        // A different kind is fine.
        handle
            .attach(SatelliteHandle::Delta(DeltaSession::new(1, false)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_detach_allows_reattach() {
        let (handle, _drop_rx) = test_handle(Duration::from_secs(60));

        handle
            .attach(SatelliteHandle::Witness(WitnessSession::new(1)))
            .await
            .unwrap();
        assert!(handle.detach(SatelliteKind::Witness).await.is_some());
        assert!(handle.detach(SatelliteKind::Witness).await.is_none());

        handle
            .attach(SatelliteHandle::Witness(WitnessSession::new(2)))
            .await
            .unwrap();
        assert_eq!(handle.satellite_kinds().await, vec![SatelliteKind::Witness]);
    }

    #[tokio::test]
    async fn test_validate_is_idempotent() {
        let (handle, mut drop_rx) = test_handle(Duration::from_secs(60));
        assert!(handle.state().is_validating());

        handle.validate().await;
        handle.validate().await;
        handle.validate().await;

        assert!(handle.state().is_validated());
        assert_eq!(handle.readiness().await, Readiness::Ready);

        // The deadline was cancelled, so no drop signal ever arrives.
        assert!(drop_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_teardown_clears_satellites_and_cancels() {
        let (handle, mut drop_rx) = test_handle(Duration::from_secs(60));
        handle
            .attach(SatelliteHandle::Snapshot(SnapshotSession::new(1)))
            .await
            .unwrap();

        handle.teardown().await;

        assert!(handle.state().is_dropped());
        assert_eq!(handle.readiness().await, Readiness::Cancelled);
        assert!(handle.satellite_kinds().await.is_empty());
        // Teardown is not the deadline path; nothing is signalled.
        assert!(drop_rx.try_recv().is_err());

        // Validation after teardown is a no-op.
        handle.validate().await;
        assert!(handle.state().is_dropped());
    }

    #[tokio::test]
    async fn test_summary_reads_latest_head() {
        let (handle, _drop_rx) = test_handle(Duration::from_secs(60));

        let summary = handle.summary().await;
        assert_eq!(summary.version, 68);
        assert_eq!(summary.head, Hash256::new([0xaa; 32]));
        assert_eq!(summary.difficulty, U256::from(1000u64));

        handle
            .chain()
            .set_head(Hash256::new([0xbb; 32]), U256::from(2000u64))
            .await;
        let summary = handle.summary().await;
        assert_eq!(summary.head, Hash256::new([0xbb; 32]));
        assert_eq!(summary.difficulty, U256::from(2000u64));
    }
}
