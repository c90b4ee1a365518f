//! Node transport capability.
//!
//! # Responsibilities
//! - Abstract the RPC round trips a manager needs (balance, call, submit,
//!   transaction lookup, receipt lookup, close)
//! - Dial a connected client from a URL under the caller's context
//!
//! # Design Decisions
//! - Errors are text-bearing: nodes report submission failures as free text,
//!   which `evm::submission` classifies
//! - `NotFound` is distinct from `Rpc` so callers can tell "unknown hash"
//!   from transport failure

use std::fmt::Debug;
use std::sync::Arc;

use alloy::consensus::TxEnvelope;
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::rpc::types::{Log, TransactionRequest};
use async_trait::async_trait;
use thiserror::Error;

use crate::lifecycle::context::{Context, Interrupted};

/// Errors reported by a node client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("invalid RPC URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Interrupted(#[from] Interrupted),
}

/// Receipt fields a manager consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeReceipt {
    /// `true` when execution succeeded.
    pub status: bool,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub effective_gas_price: u128,
    pub logs: Vec<Log>,
}

/// A connected node.
#[async_trait]
pub trait NodeClient: Send + Sync + Debug {
    /// Native balance at the latest block.
    async fn balance_at(&self, address: Address) -> Result<U256, NodeError>;

    /// Read-only call at the latest block.
    async fn call_contract(&self, request: TransactionRequest) -> Result<Bytes, NodeError>;

    /// Broadcast a signed transaction.
    async fn send_transaction(&self, tx: &TxEnvelope) -> Result<(), NodeError>;

    /// The signed transaction and whether it is still pending.
    async fn transaction_by_hash(&self, hash: B256) -> Result<(TxEnvelope, bool), NodeError>;

    async fn transaction_receipt(&self, hash: B256) -> Result<NodeReceipt, NodeError>;

    /// Release the connection. Best effort; never fails.
    ///
    /// Implementations may only log here: the transport is freed when the
    /// last handle to the client is dropped, so in-flight calls holding a
    /// handle keep it alive until they finish.
    async fn close(&self);
}

/// Builds connected clients.
#[async_trait]
pub trait NodeClientFactory: Send + Sync + Debug {
    async fn dial(&self, url: &str, ctx: &Context) -> Result<Arc<dyn NodeClient>, NodeError>;
}
