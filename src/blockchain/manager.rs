//! The chain-agnostic manager contract.
//!
//! # Responsibilities
//! - Split the manager surface into capability traits, one per operation group
//! - Let each chain family advertise only what it supports
//! - Give callers one entry point on `dyn BlockchainManager` that reports a
//!   missing capability as `NotImplemented`
//!
//! # Data Flow
//! ```text
//! caller
//!     → dyn BlockchainManager::get_balance(ctx, address, token)
//!         → balances() ── None ──▶ NotImplemented
//!                      └─ Some ──▶ BalanceReader::get_balance → NodeClient
//! ```

use std::fmt;

use alloy::primitives::{Bytes, U256};
use async_trait::async_trait;

use crate::blockchain::error::{BlockchainError, BlockchainResult};
use crate::lifecycle::context::Context;
use crate::types::{Address, Network, Token, Transaction, TransactionDetails};

/// An operation group a manager may or may not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Balance,
    ReadCall,
    SendTransaction,
    TransactionDetails,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Balance => "balance query",
            Capability::ReadCall => "read call",
            Capability::SendTransaction => "transaction submission",
            Capability::TransactionDetails => "transaction details",
        };
        f.write_str(name)
    }
}

/// Start and stop. Every manager has a lifecycle.
#[async_trait]
pub trait Lifecycle: Send + Sync {
    /// Connect to the node. Fails with `AlreadyStarted` unless the manager is
    /// unstarted or stopped.
    async fn start(&self, ctx: &Context) -> BlockchainResult<()>;

    /// Release the node connection. Runs to completion even if `ctx` is
    /// already canceled.
    async fn stop(&self, ctx: &Context) -> BlockchainResult<()>;
}

#[async_trait]
pub trait BalanceReader: Send + Sync {
    async fn get_balance(
        &self,
        ctx: &Context,
        address: &Address,
        token: &Token,
    ) -> BlockchainResult<U256>;
}

#[async_trait]
pub trait ContractReader: Send + Sync {
    /// Read-only call against latest state. Returns raw return data.
    async fn read_call(&self, ctx: &Context, tx: &Transaction) -> BlockchainResult<Bytes>;
}

#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Sign and broadcast. Returns the transaction hash string.
    async fn send_transaction(&self, ctx: &Context, tx: Transaction) -> BlockchainResult<String>;
}

#[async_trait]
pub trait TransactionInspector: Send + Sync {
    async fn get_transaction_details(
        &self,
        ctx: &Context,
        tx_id: &str,
    ) -> BlockchainResult<TransactionDetails>;
}

/// A manager bound to one network.
///
/// Capabilities default to unsupported; a chain family overrides the ones it
/// implements.
pub trait BlockchainManager: Lifecycle + fmt::Debug {
    fn network(&self) -> Network;

    fn balances(&self) -> Option<&dyn BalanceReader> {
        None
    }

    fn contracts(&self) -> Option<&dyn ContractReader> {
        None
    }

    fn submitter(&self) -> Option<&dyn TransactionSubmitter> {
        None
    }

    fn inspector(&self) -> Option<&dyn TransactionInspector> {
        None
    }

    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Balance => self.balances().is_some(),
            Capability::ReadCall => self.contracts().is_some(),
            Capability::SendTransaction => self.submitter().is_some(),
            Capability::TransactionDetails => self.inspector().is_some(),
        }
    }
}

impl dyn BlockchainManager {
    fn not_implemented(&self, capability: Capability) -> BlockchainError {
        BlockchainError::NotImplemented {
            network: self.network(),
            capability,
        }
    }

    pub async fn get_balance(
        &self,
        ctx: &Context,
        address: &Address,
        token: &Token,
    ) -> BlockchainResult<U256> {
        let reader = self
            .balances()
            .ok_or_else(|| self.not_implemented(Capability::Balance))?;
        reader.get_balance(ctx, address, token).await
    }

    pub async fn read_call(&self, ctx: &Context, tx: &Transaction) -> BlockchainResult<Bytes> {
        let reader = self
            .contracts()
            .ok_or_else(|| self.not_implemented(Capability::ReadCall))?;
        reader.read_call(ctx, tx).await
    }

    pub async fn send_transaction(
        &self,
        ctx: &Context,
        tx: Transaction,
    ) -> BlockchainResult<String> {
        let submitter = self
            .submitter()
            .ok_or_else(|| self.not_implemented(Capability::SendTransaction))?;
        submitter.send_transaction(ctx, tx).await
    }

    pub async fn get_transaction_details(
        &self,
        ctx: &Context,
        tx_id: &str,
    ) -> BlockchainResult<TransactionDetails> {
        let inspector = self
            .inspector()
            .ok_or_else(|| self.not_implemented(Capability::TransactionDetails))?;
        inspector.get_transaction_details(ctx, tx_id).await
    }
}
