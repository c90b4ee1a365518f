//! EVM chain manager.
//!
//! # Data Flow
//! ```text
//! start  → factory.dial(rpc_url, ctx) → ManagerState::Started(client)
//! get_balance
//!     Native           → client.balance_at
//!     FungibleContract → abi::encode_balance_of → client.call_contract → abi::decode_balance_of
//! send_transaction
//!     → signer.sign_transaction → signed envelope → client.send_transaction
//!     → failure text → submission::classify_submission_error
//! get_transaction_details
//!     → TransactionHash::parse → client.transaction_by_hash → client.transaction_receipt
//!     → details::assemble_details
//! ```
//!
//! # Design Decisions
//! - Every node round trip runs under the caller's `Context`
//! - No retries: each failure is terminal for the call
//! - Operations take a snapshot of the client handle, so a concurrent `stop`
//!   never invalidates an in-flight call

use std::sync::Arc;

use alloy::consensus::TxEnvelope;
use alloy::eips::eip2718::Decodable2718;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Bytes, U256};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;

use crate::blockchain::error::{BlockchainError, BlockchainResult};
use crate::blockchain::manager::{
    BalanceReader, BlockchainManager, ContractReader, Lifecycle, TransactionInspector,
    TransactionSubmitter,
};
use crate::blockchain::node::{NodeClient, NodeClientFactory, NodeError};
use crate::blockchain::signer::{SignerError, TransactionSigner};
use crate::evm::{abi, details, submission};
use crate::lifecycle::context::{Context, Interrupted};
use crate::lifecycle::state::ManagerState;
use crate::types::{
    Address, Network, SignedPayload, Token, TokenKind, Transaction, TransactionDetails,
    TransactionHash,
};

/// Manager for one EVM-compatible network.
#[derive(Debug)]
pub struct EvmManager {
    network: Network,
    rpc_url: String,
    factory: Arc<dyn NodeClientFactory>,
    signer: Option<Arc<dyn TransactionSigner>>,
    state: ManagerState<dyn NodeClient>,
}

impl EvmManager {
    pub fn new(
        network: Network,
        rpc_url: impl Into<String>,
        factory: Arc<dyn NodeClientFactory>,
    ) -> Self {
        Self {
            network,
            rpc_url: rpc_url.into(),
            factory,
            signer: None,
            state: ManagerState::new(),
        }
    }

    /// Attach the signer `send_transaction` uses.
    pub fn with_signer(mut self, signer: Arc<dyn TransactionSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn is_started(&self) -> bool {
        self.state.is_started()
    }

    /// Map a dial failure onto the caller-visible start error.
    fn connect_error(&self, ctx: &Context, cause: NodeError) -> BlockchainError {
        let reason = match &cause {
            NodeError::Interrupted(reason) => Some(*reason),
            _ => ctx.err(),
        };
        match reason {
            Some(Interrupted::Canceled) => BlockchainError::ConnectionCanceled(cause),
            Some(Interrupted::DeadlineExceeded) => BlockchainError::ConnectionTimedOut(cause),
            None => BlockchainError::UnableToConnect {
                network: self.network,
                source: cause,
            },
        }
    }
}

/// Pull the chain-native envelope out of a signed transaction.
fn signed_envelope(tx: &Transaction) -> BlockchainResult<TxEnvelope> {
    match &tx.signed {
        Some(SignedPayload::Evm(envelope)) => Ok(envelope.clone()),
        Some(SignedPayload::Raw(raw)) => TxEnvelope::decode_2718(&mut raw.as_ref()).map_err(|e| {
            BlockchainError::invalid_transaction(format!(
                "signed bytes are not an EVM transaction: {e}"
            ))
        }),
        None => Err(BlockchainError::invalid_transaction(
            "signed transaction payload missing",
        )),
    }
}

#[async_trait]
impl Lifecycle for EvmManager {
    async fn start(&self, ctx: &Context) -> BlockchainResult<()> {
        let guard = self.state.begin_start()?;

        let dialed = match ctx.run(self.factory.dial(&self.rpc_url, ctx)).await {
            Ok(result) => result,
            Err(reason) => Err(NodeError::Interrupted(reason)),
        };

        match dialed {
            Ok(client) => {
                guard.complete(client);
                tracing::info!(network = %self.network, rpc_url = %self.rpc_url, "EVM manager started");
                Ok(())
            }
            Err(cause) => {
                let err = self.connect_error(ctx, cause);
                tracing::warn!(network = %self.network, error = %err, "EVM manager failed to start");
                Err(err)
            }
        }
    }

    async fn stop(&self, _ctx: &Context) -> BlockchainResult<()> {
        let client = self.state.begin_stop()?;
        client.close().await;
        tracing::info!(network = %self.network, "EVM manager stopped");
        Ok(())
    }
}

#[async_trait]
impl BalanceReader for EvmManager {
    async fn get_balance(
        &self,
        ctx: &Context,
        address: &Address,
        token: &Token,
    ) -> BlockchainResult<U256> {
        let client = self.state.client()?;

        match &token.kind {
            TokenKind::Native => ctx
                .run(client.balance_at(address.to_evm()))
                .await?
                .map_err(BlockchainError::BalanceQuery),
            TokenKind::FungibleContract(contract) => {
                let request = TransactionRequest::default()
                    .with_to(contract.to_evm())
                    .with_input(abi::encode_balance_of(address.to_evm()));
                let data = ctx
                    .run(client.call_contract(request))
                    .await?
                    .map_err(BlockchainError::ContractCall)?;
                abi::decode_balance_of(&data)
            }
            TokenKind::ChainDenom(_) => Err(BlockchainError::UnsupportedTokenType(token.token_type())),
        }
    }
}

#[async_trait]
impl ContractReader for EvmManager {
    async fn read_call(&self, ctx: &Context, tx: &Transaction) -> BlockchainResult<Bytes> {
        let client = self.state.client()?;

        let mut request = TransactionRequest::default()
            .with_from(tx.from.to_evm())
            .with_to(tx.to.to_evm())
            .with_value(tx.amount);
        if let Some(fields) = tx.payload.as_evm() {
            request = request.with_input(fields.data.clone());
        }

        ctx.run(client.call_contract(request))
            .await?
            .map_err(BlockchainError::ContractCall)
    }
}

#[async_trait]
impl TransactionSubmitter for EvmManager {
    async fn send_transaction(&self, ctx: &Context, tx: Transaction) -> BlockchainResult<String> {
        let client = self.state.client()?;
        let signer = self.signer.as_ref().ok_or_else(|| {
            BlockchainError::FailedToSignTransaction(SignerError::NotConfigured(
                "no transaction signer attached".to_string(),
            ))
        })?;

        let signed = ctx
            .run(signer.sign_transaction(tx))
            .await?
            .map_err(BlockchainError::FailedToSignTransaction)?
            .ok_or_else(|| BlockchainError::invalid_transaction("signer returned no transaction"))?;
        let envelope = signed_envelope(&signed)?;
        let hash = TransactionHash::from_b256(*envelope.tx_hash(), self.network);

        let submitted = match ctx.run(client.send_transaction(&envelope)).await {
            Ok(result) => result,
            Err(reason) => Err(NodeError::Interrupted(reason)),
        };
        if let Err(cause) = submitted {
            let err = submission::classify_submission_error(cause);
            tracing::warn!(network = %self.network, tx_hash = %hash, error = %err, "Transaction rejected");
            return Err(err);
        }

        tracing::info!(network = %self.network, tx_hash = %hash, "Transaction submitted");
        Ok(hash.to_string())
    }
}

#[async_trait]
impl TransactionInspector for EvmManager {
    async fn get_transaction_details(
        &self,
        ctx: &Context,
        tx_id: &str,
    ) -> BlockchainResult<TransactionDetails> {
        let client = self.state.client()?;
        let hash = TransactionHash::parse(tx_id, self.network).map_err(|source| {
            BlockchainError::InvalidHash {
                input: tx_id.to_string(),
                source,
            }
        })?;

        let (envelope, pending) = ctx
            .run(client.transaction_by_hash(hash.as_b256()))
            .await?
            .map_err(BlockchainError::FailedToRetrieveTransaction)?;

        let receipt = match ctx.run(client.transaction_receipt(hash.as_b256())).await? {
            Ok(receipt) => Some(receipt),
            Err(NodeError::NotFound(_)) if pending => None,
            Err(cause) => return Err(BlockchainError::FailedToRetrieveTransaction(cause)),
        };

        details::assemble_details(self.network, hash, &envelope, pending, receipt.as_ref())
    }
}

impl BlockchainManager for EvmManager {
    fn network(&self) -> Network {
        self.network
    }

    fn balances(&self) -> Option<&dyn BalanceReader> {
        Some(self)
    }

    fn contracts(&self) -> Option<&dyn ContractReader> {
        Some(self)
    }

    fn submitter(&self) -> Option<&dyn TransactionSubmitter> {
        Some(self)
    }

    fn inspector(&self) -> Option<&dyn TransactionInspector> {
        Some(self)
    }
}
