//! Readiness gate shared by validation, the drop deadline, and satellite
//! activation.
//!
//! The gate is a broadcast-once signal with first-writer-wins resolution:
//! the validation path and the deadline path both try to resolve it, exactly
//! one succeeds, and every waiter past or future observes that single
//! outcome.

use std::sync::Arc;

use tokio::sync::watch;

/// Resolution states of a [`ReadinessGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Not yet resolved; waiters stay suspended.
    Pending,
    /// Resolved by successful validation.
    Ready,
    /// Resolved by the deadline firing or connection teardown.
    Cancelled,
}

/// Outcome delivered to readiness waiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Base-protocol validation succeeded; satellite work may proceed.
    Ready,
    /// The peer was dropped before validation completed; the caller should
    /// abandon whatever satellite work it queued.
    Cancelled,
}

/// A broadcast-once gate over a watch channel.
#[derive(Debug, Clone)]
pub struct ReadinessGate {
    state: Arc<watch::Sender<GateState>>,
}

impl ReadinessGate {
    /// Create an unresolved gate.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(GateState::Pending);
        Self { state: Arc::new(tx) }
    }

    /// Resolve the gate with `Ready`.
    ///
    /// Returns true if this call won the resolution, false if the gate was
    /// already resolved (either way the call is then a no-op).
    pub fn open(&self) -> bool {
        self.resolve(GateState::Ready)
    }

    /// Resolve the gate with `Cancelled`.
    ///
    /// Returns true if this call won the resolution.
    pub fn cancel(&self) -> bool {
        self.resolve(GateState::Cancelled)
    }

    fn resolve(&self, outcome: GateState) -> bool {
        // send_if_modified makes the Pending check and the transition one
        // atomic step, so validate and the deadline cannot both win.
        self.state.send_if_modified(|state| {
            if *state == GateState::Pending {
                *state = outcome;
                true
            } else {
                false
            }
        })
    }

    /// Current state without waiting.
    pub fn state(&self) -> GateState {
        *self.state.borrow()
    }

    /// Wait until the gate resolves.
    ///
    /// Waiters subscribing after resolution observe the resolved state
    /// immediately.
    pub async fn wait(&self) -> Readiness {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|state| *state != GateState::Pending).await {
            Ok(state) if *state == GateState::Ready => Readiness::Ready,
            // Err means every sender was dropped, which only happens when the
            // owning handle is gone; treat it as cancellation.
            _ => Readiness::Cancelled,
        }
    }
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}
