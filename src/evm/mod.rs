//! EVM chain family.
//!
//! # Data Flow
//! ```text
//! Environment / config (private key, RPC URL)
//!     → signer.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts)
//!     → manager.rs (balance, call, submit, details)
//!         → abi.rs, submission.rs, details.rs
//! ```
//!
//! # Security Constraints
//! - Private keys only from explicit input or environment variables
//! - Never log private keys
//! - All RPC calls have configurable timeouts

pub mod abi;
pub mod client;
pub mod details;
pub mod manager;
pub mod signer;
pub mod submission;

pub use client::{AlloyNodeClient, AlloyNodeFactory};
pub use manager::EvmManager;
pub use signer::LocalSigner;
