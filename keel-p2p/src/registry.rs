//! Process-wide peer handle registry.
//!
//! Holds the live [`PeerHandle`]s keyed by peer identity. The connection
//! manager registers a handle once the base handshake completes and
//! unregisters it when the connection closes; unregistering tears the
//! handle down so readiness waiters are released.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use keel_core::U256;

use crate::error::{P2pError, P2pResult};
use crate::peer::{PeerHandle, PeerId, PeerInfo};

/// Registry of all connected peers.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    /// Live handles, one per peer identity.
    peers: RwLock<HashMap<PeerId, Arc<PeerHandle>>>,
}

impl PeerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle under its peer identity.
    ///
    /// Fails with [`P2pError::AlreadyRegistered`] if a handle for that
    /// identity is already live; the caller should close the duplicate
    /// connection instead.
    pub async fn register(&self, handle: Arc<PeerHandle>) -> P2pResult<()> {
        let peer = handle.peer_id();
        let mut peers = self.peers.write().await;
        if peers.contains_key(&peer) {
            return Err(P2pError::AlreadyRegistered { peer });
        }
        peers.insert(peer, handle);
        tracing::debug!(peer = %peer, total = peers.len(), "peer registered");
        Ok(())
    }

    /// Remove the handle for `peer` and tear it down.
    ///
    /// Teardown cancels the deadline, releases readiness waiters with
    /// `Cancelled` if validation never resolved, and clears the satellite
    /// attachments.
    pub async fn unregister(&self, peer: PeerId) -> Option<Arc<PeerHandle>> {
        let removed = self.peers.write().await.remove(&peer);
        if let Some(handle) = &removed {
            handle.teardown().await;
            tracing::debug!(peer = %peer, "peer unregistered");
        }
        removed
    }

    /// Get the handle for `peer`, if registered.
    pub async fn get(&self, peer: PeerId) -> Option<Arc<PeerHandle>> {
        self.peers.read().await.get(&peer).cloned()
    }

    /// Get the handle for `peer`, failing with [`P2pError::PeerNotFound`]
    /// when it is not registered.
    pub async fn require(&self, peer: PeerId) -> P2pResult<Arc<PeerHandle>> {
        self.get(peer).await.ok_or(P2pError::PeerNotFound { peer })
    }

    /// Check whether a handle is registered for `peer`.
    pub async fn contains(&self, peer: PeerId) -> bool {
        self.peers.read().await.contains_key(&peer)
    }

    /// Number of registered peers.
    pub async fn len(&self) -> usize {
        self.peers.read().await.len()
    }

    /// Check whether no peers are registered.
    pub async fn is_empty(&self) -> bool {
        self.peers.read().await.is_empty()
    }

    /// Identities of all registered peers.
    pub async fn peer_ids(&self) -> Vec<PeerId> {
        self.peers.read().await.keys().copied().collect()
    }

    /// Assemble the peer-info record of every registered peer.
    ///
    /// This is the reporting collaborator's pull: base metadata plus the
    /// per-kind satellite summaries, keyed by peer identity.
    pub async fn infos(&self) -> HashMap<PeerId, PeerInfo> {
        let peers = self.peers.read().await;
        let mut infos = HashMap::with_capacity(peers.len());
        for (peer, handle) in peers.iter() {
            infos.insert(*peer, handle.info().await);
        }
        infos
    }

    /// Get the peer with the highest announced total difficulty.
    pub async fn best_peer(&self) -> Option<Arc<PeerHandle>> {
        let peers = self.peers.read().await;
        let mut best: Option<(U256, Arc<PeerHandle>)> = None;
        for handle in peers.values() {
            let (_, difficulty) = handle.chain().head().await;
            match &best {
                Some((leading, _)) if *leading >= difficulty => {}
                _ => best = Some((difficulty, handle.clone())),
            }
        }
        best.map(|(_, handle)| handle)
    }
}
