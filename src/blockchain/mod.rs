//! Chain-agnostic blockchain manager contract.
//!
//! # Data Flow
//! ```text
//! caller → registry.rs (network → manager)
//!     → manager.rs (capability traits)
//!         → node.rs   (NodeClient: RPC transport)
//!         → signer.rs (TransactionSigner: key material)
//!     → error.rs (BlockchainError on every path)
//! ```
//!
//! # Design Decisions
//! - Capabilities are discovered, not assumed: a chain without an operation
//!   reports `NotImplemented` instead of carrying a stub
//! - Node transport and signing are injected, so managers are testable
//!   without a network

pub mod error;
pub mod manager;
pub mod node;
pub mod registry;
pub mod signer;
pub mod unsupported;

pub use error::{BlockchainError, BlockchainResult, ErrorKind};
pub use manager::{
    BalanceReader, BlockchainManager, Capability, ContractReader, Lifecycle,
    TransactionInspector, TransactionSubmitter,
};
pub use node::{NodeClient, NodeClientFactory, NodeError, NodeReceipt};
pub use registry::ManagerRegistry;
pub use signer::{SignerError, TransactionSigner};
pub use unsupported::UnsupportedManager;
