//! Shared fakes for manager integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::network::TxSignerSync;
use alloy::primitives::{Bytes, TxKind, B256, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;

use blockchain_manager::blockchain::{
    NodeClient, NodeClientFactory, NodeError, NodeReceipt, SignerError, TransactionSigner,
};
use blockchain_manager::lifecycle::Context;
use blockchain_manager::types::{
    Address, EvmFields, FeeModel, Network, SignedPayload, Transaction, TransactionType,
};

pub const RECIPIENT: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";
pub const TEST_URL: &str = "http://node.test:8545";

#[derive(Debug)]
struct NodeState {
    balance: Result<U256, NodeError>,
    balance_delay: Option<Duration>,
    call_result: Result<Bytes, NodeError>,
    send_result: Result<(), NodeError>,
    transaction: Result<(TxEnvelope, bool), NodeError>,
    receipt: Result<NodeReceipt, NodeError>,
    contract_calls: Vec<TransactionRequest>,
    sent: Vec<TxEnvelope>,
    balance_queries: usize,
    closed: bool,
}

/// In-process node with programmed answers and a call log.
#[derive(Debug)]
pub struct MockNodeClient {
    state: Mutex<NodeState>,
}

impl MockNodeClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(NodeState {
                balance: Ok(U256::ZERO),
                balance_delay: None,
                call_result: Ok(Bytes::new()),
                send_result: Ok(()),
                transaction: Err(NodeError::NotFound("transaction".to_string())),
                receipt: Err(NodeError::NotFound("receipt".to_string())),
                contract_calls: Vec::new(),
                sent: Vec::new(),
                balance_queries: 0,
                closed: false,
            }),
        })
    }

    pub fn set_balance(&self, balance: Result<U256, NodeError>) {
        self.state.lock().unwrap().balance = balance;
    }

    /// Hold every balance answer for `delay` before replying.
    pub fn set_balance_delay(&self, delay: Duration) {
        self.state.lock().unwrap().balance_delay = Some(delay);
    }

    pub fn set_call_result(&self, result: Result<Bytes, NodeError>) {
        self.state.lock().unwrap().call_result = result;
    }

    pub fn reject_submissions(&self, message: &str) {
        self.state.lock().unwrap().send_result = Err(NodeError::Rpc(message.to_string()));
    }

    pub fn set_transaction(&self, transaction: Result<(TxEnvelope, bool), NodeError>) {
        self.state.lock().unwrap().transaction = transaction;
    }

    pub fn set_receipt(&self, receipt: Result<NodeReceipt, NodeError>) {
        self.state.lock().unwrap().receipt = receipt;
    }

    pub fn contract_calls(&self) -> Vec<TransactionRequest> {
        self.state.lock().unwrap().contract_calls.clone()
    }

    pub fn sent(&self) -> Vec<TxEnvelope> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn balance_queries(&self) -> usize {
        self.state.lock().unwrap().balance_queries
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }
}

#[async_trait]
impl NodeClient for MockNodeClient {
    async fn balance_at(&self, _address: alloy::primitives::Address) -> Result<U256, NodeError> {
        let (balance, delay) = {
            let mut state = self.state.lock().unwrap();
            state.balance_queries += 1;
            (state.balance.clone(), state.balance_delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        balance
    }

    async fn call_contract(&self, request: TransactionRequest) -> Result<Bytes, NodeError> {
        let mut state = self.state.lock().unwrap();
        state.contract_calls.push(request);
        state.call_result.clone()
    }

    async fn send_transaction(&self, tx: &TxEnvelope) -> Result<(), NodeError> {
        let mut state = self.state.lock().unwrap();
        state.sent.push(tx.clone());
        state.send_result.clone()
    }

    async fn transaction_by_hash(&self, _hash: B256) -> Result<(TxEnvelope, bool), NodeError> {
        self.state.lock().unwrap().transaction.clone()
    }

    async fn transaction_receipt(&self, _hash: B256) -> Result<NodeReceipt, NodeError> {
        self.state.lock().unwrap().receipt.clone()
    }

    async fn close(&self) {
        self.state.lock().unwrap().closed = true;
    }
}

#[derive(Debug, Clone)]
pub enum DialBehavior {
    Connect,
    Fail(NodeError),
    /// Never completes; only the caller's context ends the dial.
    Hang,
    /// Connects after a delay.
    Slow(Duration),
}

/// Hands out one shared `MockNodeClient`.
#[derive(Debug)]
pub struct MockFactory {
    pub client: Arc<MockNodeClient>,
    behavior: Mutex<DialBehavior>,
    dials: AtomicUsize,
}

impl MockFactory {
    pub fn new(behavior: DialBehavior) -> Arc<Self> {
        Arc::new(Self {
            client: MockNodeClient::new(),
            behavior: Mutex::new(behavior),
            dials: AtomicUsize::new(0),
        })
    }

    pub fn connecting() -> Arc<Self> {
        Self::new(DialBehavior::Connect)
    }

    pub fn set_behavior(&self, behavior: DialBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn dials(&self) -> usize {
        self.dials.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NodeClientFactory for MockFactory {
    async fn dial(&self, _url: &str, _ctx: &Context) -> Result<Arc<dyn NodeClient>, NodeError> {
        self.dials.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            DialBehavior::Connect => {}
            DialBehavior::Fail(e) => return Err(e),
            DialBehavior::Hang => std::future::pending::<()>().await,
            DialBehavior::Slow(delay) => tokio::time::sleep(delay).await,
        }
        Ok(self.client.clone() as Arc<dyn NodeClient>)
    }
}

/// Signer whose output is scripted.
#[derive(Debug)]
pub enum MockSigner {
    Fail,
    ReturnNothing,
    /// Returns the transaction without a signed payload.
    LeaveUnsigned,
    /// Attaches these bytes as an opaque signed payload.
    Raw(Bytes),
}

#[async_trait]
impl TransactionSigner for MockSigner {
    async fn sign_transaction(&self, mut tx: Transaction) -> Result<Option<Transaction>, SignerError> {
        match self {
            MockSigner::Fail => Err(SignerError::Signing("hardware wallet unplugged".to_string())),
            MockSigner::ReturnNothing => Ok(None),
            MockSigner::LeaveUnsigned => Ok(Some(tx)),
            MockSigner::Raw(bytes) => {
                tx.signed = Some(SignedPayload::Raw(bytes.clone()));
                tx.signed_bytes = Some(bytes.clone());
                Ok(Some(tx))
            }
        }
    }
}

pub fn evm_address(hex: &str) -> Address {
    Address::parse(hex, Network::Ethereum).unwrap()
}

/// A legacy transfer of 1000 wei from `from` to `RECIPIENT`.
pub fn transfer_from(from: alloy::primitives::Address) -> Transaction {
    Transaction::evm(
        Address::from_evm(from, Network::Ethereum).unwrap(),
        evm_address(RECIPIENT),
        U256::from(1000),
        TransactionType::Transfer,
        EvmFields {
            nonce: 0,
            gas_limit: 21_000,
            chain_id: 1,
            fee: FeeModel::Legacy { gas_price: 50 },
            data: Bytes::new(),
        },
    )
}

/// Sign a legacy transfer to `RECIPIENT` directly with `signer`.
pub fn signed_legacy(signer: &PrivateKeySigner, gas_price: u128) -> TxEnvelope {
    let mut tx = TxLegacy {
        chain_id: Some(1),
        nonce: 0,
        gas_price,
        gas_limit: 21_000,
        to: TxKind::Call(evm_address(RECIPIENT).to_evm()),
        value: U256::from(1000),
        input: Bytes::new(),
    };
    let sig = signer.sign_transaction_sync(&mut tx).unwrap();
    TxEnvelope::from(tx.into_signed(sig))
}

/// Lowercase `0x`-prefixed hash of a signed envelope.
pub fn hash_hex(envelope: &TxEnvelope) -> String {
    format!("0x{}", alloy::hex::encode(envelope.tx_hash()))
}
