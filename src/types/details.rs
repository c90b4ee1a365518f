//! Chain-agnostic view of an executed transaction.

use std::collections::BTreeMap;

use alloy::primitives::{Bytes, U256};
use serde::Serialize;

use crate::types::address::Address;
use crate::types::hash::TransactionHash;
use crate::types::transaction::TransactionStatus;

/// One log entry emitted during execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Log {
    pub address: Address,
    /// Hex-encoded topics, `0x`-prefixed.
    pub topics: Vec<String>,
    pub data: Bytes,
    pub block_number: Option<u64>,
    pub tx_hash: Option<TransactionHash>,
    pub index: u64,
}

/// Coarse event derived from a log's first topic.
///
/// Parameters stay empty: decoding them needs the emitting contract's ABI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Event {
    pub name: String,
    pub params: BTreeMap<String, String>,
}

/// Result of `get_transaction_details`. Read-only to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionDetails {
    pub hash: TransactionHash,
    pub status: TransactionStatus,
    pub block_number: Option<u64>,
    pub from: Address,
    pub to: Address,
    pub amount: U256,
    pub fee: Option<U256>,
    pub logs: Vec<Log>,
    /// Events keyed by name.
    pub events: BTreeMap<String, Event>,
}
