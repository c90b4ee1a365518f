//! Alloy-backed node client with timeout and error handling.
//!
//! # Responsibilities
//! - Dial a JSON-RPC endpoint (http, https, ws, wss) and probe `eth_chainId`
//! - Query chain state (balances, calls, transactions, receipts)
//! - Submit signed transactions
//! - Bound every request with a timeout and record RPC metrics

use std::fmt;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::{Duration, Instant};

use alloy::consensus::TxEnvelope;
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use tokio::time::timeout;

use crate::blockchain::node::{NodeClient, NodeClientFactory, NodeError, NodeReceipt};
use crate::lifecycle::context::Context;
use crate::observability::metrics;

const SUPPORTED_SCHEMES: [&str; 4] = ["http", "https", "ws", "wss"];

/// Node client over an alloy provider.
#[derive(Clone)]
pub struct AlloyNodeClient {
    provider: Arc<dyn Provider + Send + Sync>,
    rpc_url: String,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl AlloyNodeClient {
    /// Run one RPC under the request timeout, recording its outcome.
    async fn request<F, T, E>(&self, method: &'static str, call: F) -> Result<T, NodeError>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let started = Instant::now();
        let result = match timeout(self.timeout_duration, call.into_future()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(NodeError::Rpc(e.to_string())),
            Err(_) => Err(NodeError::Timeout(self.timeout_duration.as_secs())),
        };

        let outcome = match &result {
            Ok(_) => "ok",
            Err(NodeError::Timeout(_)) => "timeout",
            Err(_) => "error",
        };
        metrics::record_rpc_request(method, outcome, started.elapsed());

        if let Err(e) = &result {
            tracing::warn!(method, rpc_url = %self.rpc_url, error = %e, "RPC request failed");
        }
        result
    }

    /// Chain id reported by the node.
    pub async fn chain_id(&self) -> Result<u64, NodeError> {
        self.request("eth_chainId", self.provider.get_chain_id())
            .await
    }
}

#[async_trait]
impl NodeClient for AlloyNodeClient {
    async fn balance_at(&self, address: Address) -> Result<U256, NodeError> {
        self.request("eth_getBalance", self.provider.get_balance(address))
            .await
    }

    async fn call_contract(&self, request: TransactionRequest) -> Result<Bytes, NodeError> {
        self.request("eth_call", self.provider.call(request)).await
    }

    async fn send_transaction(&self, tx: &TxEnvelope) -> Result<(), NodeError> {
        let encoded = tx.encoded_2718();
        let pending = self
            .request(
                "eth_sendRawTransaction",
                self.provider.send_raw_transaction(&encoded),
            )
            .await?;
        tracing::debug!(tx_hash = %pending.tx_hash(), "Transaction accepted by node");
        Ok(())
    }

    async fn transaction_by_hash(&self, hash: B256) -> Result<(TxEnvelope, bool), NodeError> {
        let tx = self
            .request(
                "eth_getTransactionByHash",
                self.provider.get_transaction_by_hash(hash),
            )
            .await?
            .ok_or_else(|| NodeError::NotFound(format!("transaction {hash}")))?;

        let pending = tx.block_number.is_none();
        Ok((tx.inner.into_inner(), pending))
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<NodeReceipt, NodeError> {
        let receipt = self
            .request(
                "eth_getTransactionReceipt",
                self.provider.get_transaction_receipt(hash),
            )
            .await?
            .ok_or_else(|| NodeError::NotFound(format!("receipt for {hash}")))?;

        Ok(NodeReceipt {
            status: receipt.status(),
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            effective_gas_price: receipt.effective_gas_price,
            logs: receipt.inner.logs().to_vec(),
        })
    }

    async fn close(&self) {
        // The transport is released once the last provider handle drops.
        tracing::debug!(rpc_url = %self.rpc_url, "Node client closed");
    }
}

impl fmt::Debug for AlloyNodeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlloyNodeClient")
            .field("rpc_url", &self.rpc_url)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

/// Dials `AlloyNodeClient`s.
#[derive(Debug, Clone)]
pub struct AlloyNodeFactory {
    request_timeout: Duration,
}

impl AlloyNodeFactory {
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }
}

impl Default for AlloyNodeFactory {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// Reject URLs alloy cannot connect to before opening anything.
pub fn validate_rpc_url(rpc_url: &str) -> Result<url::Url, NodeError> {
    let parsed = url::Url::parse(rpc_url).map_err(|e| NodeError::InvalidUrl {
        url: rpc_url.to_string(),
        reason: e.to_string(),
    })?;
    if !SUPPORTED_SCHEMES.contains(&parsed.scheme()) {
        return Err(NodeError::InvalidUrl {
            url: rpc_url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(parsed)
}

#[async_trait]
impl NodeClientFactory for AlloyNodeFactory {
    async fn dial(&self, url: &str, ctx: &Context) -> Result<Arc<dyn NodeClient>, NodeError> {
        validate_rpc_url(url)?;

        let provider = ctx
            .run(ProviderBuilder::new().connect(url))
            .await?
            .map_err(|e| NodeError::Rpc(e.to_string()))?;

        let client = AlloyNodeClient {
            provider: Arc::new(provider),
            rpc_url: url.to_string(),
            timeout_duration: self.request_timeout,
        };

        let chain_id = ctx.run(client.chain_id()).await??;
        tracing::info!(rpc_url = %url, chain_id, "Node client connected");

        Ok(Arc::new(client))
    }
}
