//! Manager lifecycle state, swapped atomically.
//!
//! ```text
//! Unstarted ──start──▶ Starting ──dial ok──▶ Started(client) ──stop──▶ Stopped
//!     ▲                   │                                               │
//!     └──── dial failed ──┘                    start (restart) ◀─────────┘
//! ```
//!
//! A failed restart falls back to `Stopped`, not `Unstarted`.
//!
//! Transitions are compare-and-swap on an `ArcSwap`, so concurrent `start`
//! and `stop` calls resolve deterministically: exactly one `start` wins the
//! `Starting` slot, exactly one `stop` takes the client. Operations issued
//! while `Starting` see `ClientNotStarted`.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::blockchain::error::{BlockchainError, BlockchainResult};

/// Where a manager is in its lifecycle.
#[derive(Debug)]
pub enum State<C: ?Sized> {
    Unstarted,
    Starting,
    Started(Arc<C>),
    Stopped,
}

impl<C: ?Sized> State<C> {
    pub fn name(&self) -> &'static str {
        match self {
            State::Unstarted => "unstarted",
            State::Starting => "starting",
            State::Started(_) => "started",
            State::Stopped => "stopped",
        }
    }
}

/// Shared, lock-free holder of a manager's client handle.
#[derive(Debug)]
pub struct ManagerState<C: ?Sized> {
    current: ArcSwap<State<C>>,
}

impl<C: ?Sized> ManagerState<C> {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(State::Unstarted),
        }
    }

    /// Claim the `Starting` slot.
    ///
    /// Fails with `AlreadyStarted` while another start is in flight or the
    /// manager is running. The returned guard must be completed with a client;
    /// dropping it rolls the state back so a later `start` can retry.
    pub fn begin_start(&self) -> BlockchainResult<StartGuard<'_, C>> {
        let observed = self.current.load_full();
        match *observed {
            State::Unstarted | State::Stopped => {}
            State::Starting | State::Started(_) => return Err(BlockchainError::AlreadyStarted),
        }

        let previous = self
            .current
            .compare_and_swap(&observed, Arc::new(State::Starting));
        if !Arc::ptr_eq(&*previous, &observed) {
            return Err(BlockchainError::AlreadyStarted);
        }

        Ok(StartGuard {
            state: self,
            rollback: observed,
            completed: false,
        })
    }

    /// The connected client, or `ClientNotStarted`.
    pub fn client(&self) -> BlockchainResult<Arc<C>> {
        match &**self.current.load() {
            State::Started(client) => Ok(Arc::clone(client)),
            _ => Err(BlockchainError::ClientNotStarted),
        }
    }

    /// Move `Started → Stopped` and hand back the client for release.
    pub fn begin_stop(&self) -> BlockchainResult<Arc<C>> {
        loop {
            let observed = self.current.load_full();
            let client = match &*observed {
                State::Started(client) => Arc::clone(client),
                _ => return Err(BlockchainError::ClientNotStarted),
            };

            let previous = self
                .current
                .compare_and_swap(&observed, Arc::new(State::Stopped));
            if Arc::ptr_eq(&*previous, &observed) {
                return Ok(client);
            }
            // Lost a race with another transition; re-read and decide again.
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(**self.current.load(), State::Started(_))
    }

    pub fn state_name(&self) -> &'static str {
        self.current.load().name()
    }
}

impl<C: ?Sized> Default for ManagerState<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive right to finish a `start`.
#[derive(Debug)]
pub struct StartGuard<'a, C: ?Sized> {
    state: &'a ManagerState<C>,
    /// `Unstarted` or `Stopped`, whichever the start replaced.
    rollback: Arc<State<C>>,
    completed: bool,
}

impl<C: ?Sized> StartGuard<'_, C> {
    /// Publish the connected client.
    pub fn complete(mut self, client: Arc<C>) {
        self.state.current.store(Arc::new(State::Started(client)));
        self.completed = true;
    }
}

impl<C: ?Sized> Drop for StartGuard<'_, C> {
    fn drop(&mut self) {
        if !self.completed {
            self.state.current.store(Arc::clone(&self.rollback));
        }
    }
}
