//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Caller:
//!     Context (context.rs) → every manager call
//!         cancel / deadline → Interrupted
//!
//! Manager:
//!     start → ManagerState::begin_start (state.rs) → dial → StartGuard::complete
//!     stop  → ManagerState::begin_stop → NodeClient::close
//! ```
//!
//! # Design Decisions
//! - State is swapped atomically, never locked across an await
//! - A failed or dropped start rolls back to `Unstarted`
//! - Stop ignores the caller's cancellation: release always runs

pub mod context;
pub mod state;

pub use context::{Context, Interrupted};
pub use state::{ManagerState, StartGuard, State};
