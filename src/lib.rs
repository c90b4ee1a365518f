//! Chain-agnostic blockchain manager library.
//!
//! One `BlockchainManager` contract over EVM, Bitcoin, Cosmos and Solana
//! networks. The EVM family is fully implemented; other families expose
//! their lifecycle and report `NotImplemented` for data operations.

// Domain model
pub mod types;

// Manager contract and chain families
pub mod blockchain;
pub mod evm;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use blockchain::{BlockchainError, BlockchainManager, BlockchainResult, ManagerRegistry};
pub use config::ManagerConfig;
pub use lifecycle::Context;
