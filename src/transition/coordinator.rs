//! Click → fetch → commit-or-discard.
//!
//! A transition allocates a token when it starts, waits for its loader, and
//! commits only if no later transition or external navigation happened in
//! the meantime. Stale results are dropped without an error. The loader is
//! never cancelled; only its effect on navigation is discarded.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::sequence::{SequenceCounter, StaleReason, TransitionToken};
use super::TransitionError;
use crate::loader::LoadError;
use crate::router::{ListenerId, Location, NavigationEvent, NavigationSink};

/// How a committed transition is applied to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    Push,
    Replace,
}

/// Where a click wants to go. Consumed by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub target: String,
    pub mode: NavigationMode,
}

impl NavigationIntent {
    pub fn push(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            mode: NavigationMode::Push,
        }
    }

    pub fn replace(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            mode: NavigationMode::Replace,
        }
    }
}

/// Final state of a transition whose loader succeeded.
///
/// The loaded value is returned either way: the view may keep it even when
/// the navigation itself was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome<T> {
    Committed {
        token: TransitionToken,
        mode: NavigationMode,
        value: T,
    },
    Discarded {
        token: TransitionToken,
        reason: StaleReason,
        value: T,
    },
}

impl<T> TransitionOutcome<T> {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    pub fn token(&self) -> TransitionToken {
        match self {
            Self::Committed { token, .. } | Self::Discarded { token, .. } => *token,
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Committed { value, .. } | Self::Discarded { value, .. } => value,
        }
    }
}

/// Orders async navigations so that the most recent one wins.
pub struct TransitionCoordinator<S: NavigationSink> {
    inner: Arc<Inner<S>>,
}

struct Inner<S: NavigationSink> {
    sink: Arc<S>,
    sequence: Arc<SequenceCounter>,
    /// True while this coordinator is calling push/replace on the sink.
    committing: Arc<AtomicBool>,
    loading: Arc<watch::Sender<usize>>,
    listener: ListenerId,
}

impl<S: NavigationSink> Drop for Inner<S> {
    fn drop(&mut self) {
        self.sink.unsubscribe(self.listener);
    }
}

impl<S: NavigationSink> Clone for TransitionCoordinator<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: NavigationSink> TransitionCoordinator<S> {
    /// Create a coordinator committing to `sink` and watching it for
    /// navigations made by anyone else.
    pub fn new(sink: Arc<S>) -> Self {
        let sequence = Arc::new(SequenceCounter::new());
        let committing = Arc::new(AtomicBool::new(false));

        let listener = {
            let sequence = Arc::clone(&sequence);
            let committing = Arc::clone(&committing);
            sink.on_navigate(Arc::new(move |event: &NavigationEvent| {
                if committing.load(Ordering::SeqCst) {
                    return;
                }
                let epoch = sequence.block();
                tracing::debug!(
                    action = ?event.action,
                    location = %event.location,
                    epoch,
                    "External navigation, pending transitions blocked"
                );
            }))
        };

        let (loading, _) = watch::channel(0);

        Self {
            inner: Arc::new(Inner {
                sink,
                sequence,
                committing,
                loading: Arc::new(loading),
                listener,
            }),
        }
    }

    /// Start a transition: mark loading and allocate its token now.
    ///
    /// Use this when the loader runs on a spawned task so the token order
    /// matches the click order rather than the task poll order.
    pub fn start(&self, intent: NavigationIntent) -> Transition<S> {
        let mark = LoadingMark::new(Arc::clone(&self.inner.loading));
        let token = self.inner.sequence.allocate();
        tracing::debug!(
            token,
            target = %intent.target,
            mode = ?intent.mode,
            "Transition started"
        );
        Transition {
            coordinator: self.clone(),
            token,
            intent,
            mark,
        }
    }

    /// Run a full transition: start, await `loader`, then commit or discard.
    pub async fn begin_transition<F, Fut, T>(
        &self,
        intent: NavigationIntent,
        loader: F,
    ) -> Result<TransitionOutcome<T>, TransitionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, LoadError>>,
    {
        self.start(intent).resolve(loader).await
    }

    /// Record a navigation made outside the sink (or outside this process's
    /// view of it). Pending transitions will not commit.
    pub fn notify_external_navigation(&self) -> TransitionToken {
        let epoch = self.inner.sequence.block();
        tracing::debug!(epoch, "External navigation reported");
        epoch
    }

    /// True while any transition is waiting for its loader.
    pub fn is_loading(&self) -> bool {
        *self.inner.loading.borrow() > 0
    }

    /// Number of transitions currently waiting for their loader.
    pub fn pending(&self) -> usize {
        *self.inner.loading.borrow()
    }

    /// Watch the number of pending transitions.
    pub fn subscribe_loading(&self) -> watch::Receiver<usize> {
        self.inner.loading.subscribe()
    }

    /// True if the latest epoch bump came from an external navigation.
    pub fn is_blocked(&self) -> bool {
        self.inner.sequence.is_blocked()
    }

    pub fn current_token(&self) -> TransitionToken {
        self.inner.sequence.current()
    }

    fn commit(&self, intent: &NavigationIntent) -> Result<NavigationMode, TransitionError> {
        let rejected = |source| TransitionError::NavigationRejected {
            target: intent.target.clone(),
            source,
        };

        let target = Location::parse(&intent.target).map_err(rejected)?;
        let mode = if intent.mode == NavigationMode::Replace
            || target == self.inner.sink.current_location()
        {
            NavigationMode::Replace
        } else {
            NavigationMode::Push
        };

        self.inner.committing.store(true, Ordering::SeqCst);
        let _committing = scopeguard::guard(Arc::clone(&self.inner.committing), |flag| {
            flag.store(false, Ordering::SeqCst);
        });

        let applied = match mode {
            NavigationMode::Push => self.inner.sink.push(&intent.target),
            NavigationMode::Replace => self.inner.sink.replace(&intent.target),
        };
        applied.map_err(rejected)?;

        Ok(mode)
    }
}

/// A started transition holding its token and loading mark.
///
/// Dropping it without calling [`resolve`](Transition::resolve) clears the
/// loading mark and never navigates.
pub struct Transition<S: NavigationSink> {
    coordinator: TransitionCoordinator<S>,
    token: TransitionToken,
    intent: NavigationIntent,
    mark: LoadingMark,
}

impl<S: NavigationSink> Transition<S> {
    pub fn token(&self) -> TransitionToken {
        self.token
    }

    /// Await `loader`, then commit if this transition is still the latest.
    pub async fn resolve<F, Fut, T>(self, loader: F) -> Result<TransitionOutcome<T>, TransitionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, LoadError>>,
    {
        let Transition {
            coordinator,
            token,
            intent,
            mark,
        } = self;

        let loaded = loader().await;
        drop(mark);

        let value = match loaded {
            Ok(value) => value,
            Err(source) => {
                tracing::warn!(token, target = %intent.target, error = %source, "Transition fetch failed");
                return Err(TransitionError::Fetch {
                    target: intent.target,
                    source,
                });
            }
        };

        if let Some(reason) = coordinator.inner.sequence.staleness(token) {
            tracing::debug!(
                token,
                current = coordinator.current_token(),
                target = %intent.target,
                reason = ?reason,
                "Stale transition discarded"
            );
            return Ok(TransitionOutcome::Discarded {
                token,
                reason,
                value,
            });
        }

        let mode = coordinator.commit(&intent)?;
        tracing::info!(token, target = %intent.target, mode = ?mode, "Transition committed");
        Ok(TransitionOutcome::Committed { token, mode, value })
    }
}

/// Counts one pending transition until dropped.
struct LoadingMark {
    loading: Arc<watch::Sender<usize>>,
}

impl LoadingMark {
    fn new(loading: Arc<watch::Sender<usize>>) -> Self {
        loading.send_modify(|pending| *pending += 1);
        Self { loading }
    }
}

impl Drop for LoadingMark {
    fn drop(&mut self) {
        self.loading
            .send_modify(|pending| *pending = pending.saturating_sub(1));
    }
}
