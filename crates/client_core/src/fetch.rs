//! View-local fetch lifecycle.
//!
//! A [`FetchController`] owns the snapshot of one view instance and the
//! dependency key it was fetched for. Every attempt is identified by a
//! [`FetchTicket`]; an outcome is applied only while its ticket is the
//! controller's current attempt, so results that complete out of order are
//! dropped instead of overwriting newer state.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use tracing::debug;

use crate::error::GatewayError;

static NEXT_ATTEMPT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of one fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptId(u64);

impl AttemptId {
    fn next() -> Self {
        Self(NEXT_ATTEMPT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Pending,
    Ready,
    Failed,
}

/// Rendering state of one fetch attempt.
///
/// `Pending` carries neither value nor error; the terminal variants carry
/// exactly one of them.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchSnapshot<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> FetchSnapshot<T> {
    pub fn status(&self) -> FetchStatus {
        match self {
            FetchSnapshot::Pending => FetchStatus::Pending,
            FetchSnapshot::Ready(_) => FetchStatus::Ready,
            FetchSnapshot::Failed(_) => FetchStatus::Failed,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FetchSnapshot::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchSnapshot::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FetchSnapshot::Pending)
    }
}

impl<T> Default for FetchSnapshot<T> {
    fn default() -> Self {
        FetchSnapshot::Pending
    }
}

impl<T> From<Result<T, GatewayError>> for FetchSnapshot<T> {
    fn from(result: Result<T, GatewayError>) -> Self {
        match result {
            Ok(value) => FetchSnapshot::Ready(value),
            Err(err) => FetchSnapshot::Failed(err.to_string()),
        }
    }
}

/// Handle for one issued attempt, returned to whoever executes the gateway
/// call and handed back together with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<K> {
    attempt: AttemptId,
    key: K,
}

impl<K> FetchTicket<K> {
    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    pub fn key(&self) -> &K {
        &self.key
    }
}

pub struct FetchController<K, T> {
    key: K,
    attempt: AttemptId,
    snapshot: FetchSnapshot<T>,
}

impl<K, T> FetchController<K, T>
where
    K: Clone + PartialEq + fmt::Debug,
{
    /// Creates the controller of a freshly activated view together with the
    /// ticket of its first attempt.
    pub fn activate(key: K) -> (Self, FetchTicket<K>) {
        let mut controller = Self {
            key,
            attempt: AttemptId::next(),
            snapshot: FetchSnapshot::Pending,
        };
        let ticket = controller.begin_attempt();
        (controller, ticket)
    }

    /// Re-keys the controller. Returns the ticket of the new attempt, or
    /// `None` when the key did not change.
    pub fn set_key(&mut self, key: K) -> Option<FetchTicket<K>> {
        if self.key == key {
            return None;
        }
        debug!(from = ?self.key, to = ?key, "dependency key changed");
        self.key = key;
        Some(self.begin_attempt())
    }

    /// Starts a fresh attempt for the current key.
    pub fn reload(&mut self) -> FetchTicket<K> {
        self.begin_attempt()
    }

    fn begin_attempt(&mut self) -> FetchTicket<K> {
        self.attempt = AttemptId::next();
        self.snapshot = FetchSnapshot::Pending;
        FetchTicket {
            attempt: self.attempt,
            key: self.key.clone(),
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket<K>) -> bool {
        ticket.attempt == self.attempt && ticket.key == self.key
    }

    /// Applies the outcome of `ticket`'s attempt. Stale tickets and repeated
    /// outcomes for an attempt that already ended are dropped; the return
    /// value tells whether the snapshot changed.
    pub fn resolve(&mut self, ticket: &FetchTicket<K>, result: Result<T, GatewayError>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                attempt = %ticket.attempt,
                current = %self.attempt,
                key = ?ticket.key,
                "dropping stale fetch outcome"
            );
            return false;
        }
        if !self.snapshot.is_pending() {
            debug!(attempt = %ticket.attempt, "attempt already settled");
            return false;
        }
        self.snapshot = result.into();
        true
    }

    pub fn snapshot(&self) -> &FetchSnapshot<T> {
        &self.snapshot
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
