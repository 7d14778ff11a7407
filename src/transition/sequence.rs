//! Transition epoch counter.
//!
//! Every transition attempt and every navigation that bypasses the
//! coordinator bumps the same counter. A resolved transition may only commit
//! while its token is still the latest value.

use parking_lot::Mutex;
use serde::Serialize;

/// Token stamped on a transition attempt. Strictly increasing per counter.
pub type TransitionToken = u64;

/// Why a resolved transition was dropped instead of committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleReason {
    /// A later transition attempt was started.
    Superseded,
    /// A navigation happened outside the coordinator (plain link, back/forward).
    ExternalNavigation,
}

#[derive(Debug, Default)]
struct Epoch {
    value: TransitionToken,
    /// Set when the latest bump came from an external navigation.
    blocked: bool,
}

/// Monotonic counter shared by one coordinator and its navigation listener.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    epoch: Mutex<Epoch>,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a token for a new transition attempt. Clears the block flag.
    pub fn allocate(&self) -> TransitionToken {
        let mut epoch = self.epoch.lock();
        epoch.value += 1;
        epoch.blocked = false;
        epoch.value
    }

    /// Intent-less allocation for a navigation that bypassed the coordinator.
    pub fn block(&self) -> TransitionToken {
        let mut epoch = self.epoch.lock();
        epoch.value += 1;
        epoch.blocked = true;
        epoch.value
    }

    /// Latest allocated value.
    pub fn current(&self) -> TransitionToken {
        self.epoch.lock().value
    }

    pub fn is_blocked(&self) -> bool {
        self.epoch.lock().blocked
    }

    /// `None` if `token` is still the latest allocation.
    pub fn staleness(&self, token: TransitionToken) -> Option<StaleReason> {
        let epoch = self.epoch.lock();
        if token >= epoch.value {
            None
        } else if epoch.blocked {
            Some(StaleReason::ExternalNavigation)
        } else {
            Some(StaleReason::Superseded)
        }
    }
}
