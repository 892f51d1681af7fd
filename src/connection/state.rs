//! Connection state machine

use std::sync::atomic::{AtomicBool, Ordering};

/// Connection state
///
/// A handle starts `Open` and can only move to `Closed`. `Closed` is
/// terminal; there is no resurrection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Live handle, operations pass the guard
    Open,

    /// Terminal state, every operation except close is rejected
    Closed,
}

impl ConnectionState {
    /// Check if transition is valid.
    ///
    /// Closing an already-closed handle is a valid no-op, which is what makes
    /// close idempotent.
    pub fn can_transition_to(&self, next: ConnectionState) -> bool {
        use ConnectionState::*;

        matches!((self, next), (Open, Closed) | (Closed, Closed) | (Open, Open))
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Shared state flag backing a connection handle.
///
/// A close performed on any thread is immediately visible to guard checks on
/// every other thread. An operation racing a close may observe either state;
/// no stronger ordering is promised.
#[derive(Debug, Default)]
pub struct StateCell(AtomicBool);

impl StateCell {
    /// New cell in the `Open` state
    pub fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Current state
    pub fn state(&self) -> ConnectionState {
        if self.is_closed() {
            ConnectionState::Closed
        } else {
            ConnectionState::Open
        }
    }

    /// Whether the handle has been closed
    pub fn is_closed(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Transition to `Closed`.
    ///
    /// Returns `true` if this call performed the transition, `false` if the
    /// cell was already closed. Either way the cell ends up `Closed`.
    pub fn close(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }
}
