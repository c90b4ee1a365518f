//! Transfer intent plus chain-specific fields.
//!
//! # Lifecycle
//! ```text
//! caller builds Transaction (from, to, amount, type, chain payload)
//!     → TransactionSigner fills `signed`, `signed_bytes`, `hash`
//!     → manager submits and may set `status` / `block_number`
//! ```
//! A transaction never moves between chains: `from` and `to` carry the
//! originating network.

use std::fmt;
use std::time::SystemTime;

use alloy::consensus::TxEnvelope;
use alloy::primitives::{Bytes, U256};
use serde::Serialize;
use thiserror::Error;

use crate::types::address::Address;
use crate::types::hash::TransactionHash;
use crate::types::network::ChainFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Transfer,
    ContractCall,
    Stake,
    Delegate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Gas pricing for an EVM transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeModel {
    /// Flat gas price (pre-London and EIP-155 transactions).
    Legacy { gas_price: u128 },
    /// EIP-1559 base fee + priority fee.
    DynamicFee {
        max_fee_per_gas: u128,
        max_priority_fee_per_gas: u128,
    },
}

/// EVM-specific transaction fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmFields {
    pub nonce: u64,
    pub gas_limit: u64,
    pub chain_id: u64,
    pub fee: FeeModel,
    /// Call data; empty for plain transfers.
    pub data: Bytes,
}

/// Chain-specific fields, one variant per chain family that has any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChainPayload {
    #[default]
    None,
    Evm(EvmFields),
}

impl ChainPayload {
    pub fn as_evm(&self) -> Option<&EvmFields> {
        match self {
            ChainPayload::Evm(fields) => Some(fields),
            ChainPayload::None => None,
        }
    }
}

/// The chain-native signed object a signer produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignedPayload {
    /// A signed EVM transaction envelope.
    Evm(TxEnvelope),
    /// Opaque signed bytes; EVM managers accept them if they decode as EIP-2718.
    Raw(Bytes),
}

/// Why a transaction failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("sender and recipient belong to different chains ({from} vs {to})")]
    MixedNetworks { from: ChainFamily, to: ChainFamily },

    #[error("transfer amount must be positive")]
    ZeroAmount,

    #[error("missing chain payload for {0} transaction")]
    MissingPayload(ChainFamily),

    #[error("payload field '{0}' must be non-zero")]
    ZeroField(&'static str),

    #[error("max priority fee {priority} exceeds max fee {max}")]
    PriorityFeeAboveMax { priority: u128, max: u128 },
}

/// A transaction as seen by callers and signers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Set once the transaction has been signed.
    pub hash: Option<TransactionHash>,
    pub from: Address,
    pub to: Address,
    pub amount: U256,
    pub tx_type: TransactionType,
    pub status: TransactionStatus,
    pub timestamp: Option<SystemTime>,
    pub block_number: Option<u64>,
    pub payload: ChainPayload,
    pub signed: Option<SignedPayload>,
    pub signed_bytes: Option<Bytes>,
}

impl Transaction {
    /// New pending transaction with no chain fields.
    pub fn new(from: Address, to: Address, amount: U256, tx_type: TransactionType) -> Self {
        Self {
            hash: None,
            from,
            to,
            amount,
            tx_type,
            status: TransactionStatus::Pending,
            timestamp: Some(SystemTime::now()),
            block_number: None,
            payload: ChainPayload::None,
            signed: None,
            signed_bytes: None,
        }
    }

    /// New EVM transaction with its gas, nonce and chain fields seeded.
    pub fn evm(
        from: Address,
        to: Address,
        amount: U256,
        tx_type: TransactionType,
        fields: EvmFields,
    ) -> Self {
        Self::new(from, to, amount, tx_type).with_payload(ChainPayload::Evm(fields))
    }

    pub fn with_payload(mut self, payload: ChainPayload) -> Self {
        self.payload = payload;
        self
    }

    pub fn set_status(&mut self, status: TransactionStatus) {
        self.status = status;
    }

    pub fn set_block_number(&mut self, block_number: u64) {
        self.block_number = Some(block_number);
    }

    /// Record the signer's output.
    pub fn set_signed(&mut self, signed: SignedPayload, raw: Bytes, hash: TransactionHash) {
        self.signed = Some(signed);
        self.signed_bytes = Some(raw);
        self.hash = Some(hash);
    }

    /// Check the fields a signer needs before it can produce a valid transaction.
    pub fn validate(&self) -> Result<(), TransactionError> {
        let family = self.from.network().family();
        let to_family = self.to.network().family();
        if family != to_family {
            return Err(TransactionError::MixedNetworks {
                from: family,
                to: to_family,
            });
        }

        if self.tx_type == TransactionType::Transfer && self.amount.is_zero() {
            return Err(TransactionError::ZeroAmount);
        }

        if family == ChainFamily::Evm {
            let fields = self
                .payload
                .as_evm()
                .ok_or(TransactionError::MissingPayload(family))?;
            if fields.gas_limit == 0 {
                return Err(TransactionError::ZeroField("gas_limit"));
            }
            if fields.chain_id == 0 {
                return Err(TransactionError::ZeroField("chain_id"));
            }
            match fields.fee {
                FeeModel::Legacy { gas_price: 0 } => {
                    return Err(TransactionError::ZeroField("gas_price"));
                }
                FeeModel::DynamicFee {
                    max_fee_per_gas,
                    max_priority_fee_per_gas,
                } if max_priority_fee_per_gas > max_fee_per_gas => {
                    return Err(TransactionError::PriorityFeeAboveMax {
                        priority: max_priority_fee_per_gas,
                        max: max_fee_per_gas,
                    });
                }
                _ => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::network::Network;

    fn addr(hex: &str) -> Address {
        Address::parse(hex, Network::Ethereum).unwrap()
    }

    fn fields() -> EvmFields {
        EvmFields {
            nonce: 1,
            gas_limit: 21_000,
            chain_id: 1,
            fee: FeeModel::Legacy { gas_price: 50 },
            data: Bytes::new(),
        }
    }

    fn transfer() -> Transaction {
        Transaction::evm(
            addr("0x32Be343B94f860124dC4fEe278FDCBD38C102D88"),
            addr("0x6B175474E89094C44Da98b954EedeAC495271d0F"),
            U256::from(1000),
            TransactionType::Transfer,
            fields(),
        )
    }

    #[test]
    fn test_valid_transfer() {
        let tx = transfer();
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(tx.hash.is_none());
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn test_zero_amount_transfer_rejected() {
        let mut tx = transfer();
        tx.amount = U256::ZERO;
        assert_eq!(tx.validate(), Err(TransactionError::ZeroAmount));

        // Contract calls may carry no value.
        tx.tx_type = TransactionType::ContractCall;
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn test_missing_payload_rejected() {
        let tx = transfer().with_payload(ChainPayload::None);
        assert_eq!(
            tx.validate(),
            Err(TransactionError::MissingPayload(ChainFamily::Evm))
        );
    }

    #[test]
    fn test_zero_fields_rejected() {
        let mut tx = transfer();
        if let ChainPayload::Evm(f) = &mut tx.payload {
            f.gas_limit = 0;
        }
        assert_eq!(tx.validate(), Err(TransactionError::ZeroField("gas_limit")));

        let mut tx = transfer();
        if let ChainPayload::Evm(f) = &mut tx.payload {
            f.chain_id = 0;
        }
        assert_eq!(tx.validate(), Err(TransactionError::ZeroField("chain_id")));

        let mut tx = transfer();
        if let ChainPayload::Evm(f) = &mut tx.payload {
            f.fee = FeeModel::Legacy { gas_price: 0 };
        }
        assert_eq!(tx.validate(), Err(TransactionError::ZeroField("gas_price")));
    }

    #[test]
    fn test_priority_fee_above_max_rejected() {
        let mut tx = transfer();
        if let ChainPayload::Evm(f) = &mut tx.payload {
            f.fee = FeeModel::DynamicFee {
                max_fee_per_gas: 10,
                max_priority_fee_per_gas: 11,
            };
        }
        assert!(matches!(
            tx.validate(),
            Err(TransactionError::PriorityFeeAboveMax { .. })
        ));
    }

    #[test]
    fn test_mutators() {
        let mut tx = transfer();
        tx.set_status(TransactionStatus::Confirmed);
        tx.set_block_number(42);
        assert_eq!(tx.status, TransactionStatus::Confirmed);
        assert_eq!(tx.block_number, Some(42));
    }
}
