//! Assembly of `TransactionDetails` from node data.
//!
//! # Data Flow
//! ```text
//! TxEnvelope ── recover_signer ──▶ from
//!            ── to / value / gas_price
//! NodeReceipt ── status, block, gas_used, effective_gas_price
//!             ── logs ──▶ Log (validated address) ──▶ Event (first topic)
//! ```
//!
//! Pure: no I/O, so every rule here is unit-tested without a node.

use std::collections::BTreeMap;

use alloy::consensus::transaction::SignerRecoverable;
use alloy::consensus::{Transaction as _, TxEnvelope};
use alloy::primitives::U256;

use crate::blockchain::error::{BlockchainError, BlockchainResult};
use crate::blockchain::node::NodeReceipt;
use crate::types::{
    Address, AddressError, Event, Log, Network, TransactionDetails, TransactionHash,
    TransactionStatus,
};

/// Build the chain-agnostic view of one transaction.
///
/// `receipt` is `None` only for a pending transaction the node has not yet
/// produced a receipt for; such details carry no block, fee or logs.
pub fn assemble_details(
    network: Network,
    hash: TransactionHash,
    envelope: &TxEnvelope,
    pending: bool,
    receipt: Option<&NodeReceipt>,
) -> BlockchainResult<TransactionDetails> {
    let status = match receipt {
        Some(receipt) if !pending => {
            if receipt.status {
                TransactionStatus::Confirmed
            } else {
                TransactionStatus::Failed
            }
        }
        _ => TransactionStatus::Pending,
    };

    let sender = envelope.recover_signer().map_err(|e| {
        BlockchainError::invalid_address(hash.to_string(), AddressError::Recovery(e.to_string()))
    })?;
    let from = evm_address(sender, network)?;

    let to = match envelope.to() {
        Some(recipient) => evm_address(recipient, network)?,
        None => {
            return Err(BlockchainError::invalid_address(
                "",
                AddressError::MissingRecipient,
            ))
        }
    };

    let (logs, events, fee, block_number) = match receipt {
        Some(receipt) => {
            let logs = receipt
                .logs
                .iter()
                .map(|log| convert_log(log, network))
                .collect::<BlockchainResult<Vec<_>>>()?;
            let events = derive_events(&logs);
            let gas_price = envelope
                .gas_price()
                .unwrap_or(receipt.effective_gas_price);
            let fee = U256::from(gas_price) * U256::from(receipt.gas_used);
            (logs, events, Some(fee), receipt.block_number)
        }
        None => (Vec::new(), BTreeMap::new(), None, None),
    };

    Ok(TransactionDetails {
        hash,
        status,
        block_number,
        from,
        to,
        amount: envelope.value(),
        fee,
        logs,
        events,
    })
}

fn evm_address(raw: alloy::primitives::Address, network: Network) -> BlockchainResult<Address> {
    Address::from_evm(raw, network)
        .map_err(|source| BlockchainError::invalid_address(raw.to_string(), source))
}

fn convert_log(log: &alloy::rpc::types::Log, network: Network) -> BlockchainResult<Log> {
    Ok(Log {
        address: evm_address(log.address(), network)?,
        topics: log.topics().iter().map(|t| t.to_string()).collect(),
        data: log.data().data.clone(),
        block_number: log.block_number,
        tx_hash: log
            .transaction_hash
            .map(|h| TransactionHash::from_b256(h, network)),
        index: log.log_index.unwrap_or_default(),
    })
}

/// One coarse event per distinct first topic; logs sharing a topic collapse
/// into a single entry. Parameters are not decoded.
fn derive_events(logs: &[Log]) -> BTreeMap<String, Event> {
    logs.iter()
        .filter_map(|log| log.topics.first())
        .map(|name| {
            (
                name.clone(),
                Event {
                    name: name.clone(),
                    params: BTreeMap::new(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::consensus::{SignableTransaction, TxEip1559, TxLegacy};
    use alloy::network::TxSignerSync;
    use alloy::primitives::{address, b256, Bytes, LogData, TxKind, B256};
    use alloy::signers::local::PrivateKeySigner;

    const RECIPIENT: alloy::primitives::Address =
        address!("6B175474E89094C44Da98b954EedeAC495271d0F");

    fn signed_legacy(signer: &PrivateKeySigner, to: TxKind) -> TxEnvelope {
        let mut tx = TxLegacy {
            chain_id: Some(1),
            nonce: 0,
            gas_price: 50,
            gas_limit: 21_000,
            to,
            value: U256::from(1000),
            input: Bytes::new(),
        };
        let sig = signer.sign_transaction_sync(&mut tx).unwrap();
        TxEnvelope::from(tx.into_signed(sig))
    }

    fn receipt_log(topics: Vec<B256>, index: u64) -> alloy::rpc::types::Log {
        alloy::rpc::types::Log {
            inner: alloy::primitives::Log {
                address: RECIPIENT,
                data: LogData::new_unchecked(topics, Bytes::from_static(&[0xab])),
            },
            block_number: Some(100),
            transaction_hash: Some(B256::repeat_byte(0x11)),
            log_index: Some(index),
            ..Default::default()
        }
    }

    fn tx_hash() -> TransactionHash {
        TransactionHash::from_b256(B256::repeat_byte(0x11), Network::Ethereum)
    }

    #[test]
    fn test_confirmed_legacy_transaction() {
        let signer = PrivateKeySigner::random();
        let envelope = signed_legacy(&signer, TxKind::Call(RECIPIENT));
        let transfer_topic =
            b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");
        let receipt = NodeReceipt {
            status: true,
            block_number: Some(100),
            gas_used: 21_000,
            effective_gas_price: 50,
            logs: vec![
                receipt_log(vec![transfer_topic], 0),
                receipt_log(vec![], 1),
                receipt_log(vec![transfer_topic, B256::repeat_byte(0x22)], 2),
            ],
        };

        let details =
            assemble_details(Network::Ethereum, tx_hash(), &envelope, false, Some(&receipt))
                .unwrap();

        assert_eq!(details.status, TransactionStatus::Confirmed);
        assert_eq!(details.fee, Some(U256::from(1_050_000u64)));
        assert_eq!(details.block_number, Some(100));
        assert_eq!(details.from.to_evm(), signer.address());
        assert_eq!(details.to.to_evm(), RECIPIENT);
        assert_eq!(details.amount, U256::from(1000));

        assert_eq!(details.logs.len(), 3);
        assert_eq!(details.logs[0].topics, vec![transfer_topic.to_string()]);
        assert_eq!(details.logs[0].data, Bytes::from_static(&[0xab]));
        assert_eq!(details.logs[1].index, 1);
        assert_eq!(details.logs[0].tx_hash, Some(tx_hash()));

        // Topic-less logs yield no event; repeated topics share one.
        assert_eq!(details.events.len(), 1);
        assert_eq!(details.events[&transfer_topic.to_string()].name, transfer_topic.to_string());
        let event = &details.events[&transfer_topic.to_string()];
        assert!(event.params.is_empty());
    }

    #[test]
    fn test_failed_status() {
        let signer = PrivateKeySigner::random();
        let envelope = signed_legacy(&signer, TxKind::Call(RECIPIENT));
        let receipt = NodeReceipt {
            status: false,
            block_number: Some(7),
            gas_used: 30_000,
            effective_gas_price: 50,
            logs: vec![],
        };
        let details =
            assemble_details(Network::Ethereum, tx_hash(), &envelope, false, Some(&receipt))
                .unwrap();
        assert_eq!(details.status, TransactionStatus::Failed);
        assert_eq!(details.fee, Some(U256::from(1_500_000u64)));
    }

    #[test]
    fn test_pending_without_receipt() {
        let signer = PrivateKeySigner::random();
        let envelope = signed_legacy(&signer, TxKind::Call(RECIPIENT));
        let details =
            assemble_details(Network::Ethereum, tx_hash(), &envelope, true, None).unwrap();
        assert_eq!(details.status, TransactionStatus::Pending);
        assert!(details.fee.is_none());
        assert!(details.block_number.is_none());
        assert!(details.logs.is_empty());
    }

    #[test]
    fn test_dynamic_fee_uses_effective_price() {
        let signer = PrivateKeySigner::random();
        let mut tx = TxEip1559 {
            chain_id: 1,
            nonce: 3,
            gas_limit: 21_000,
            max_fee_per_gas: 100,
            max_priority_fee_per_gas: 2,
            to: TxKind::Call(RECIPIENT),
            value: U256::from(5),
            access_list: Default::default(),
            input: Bytes::new(),
        };
        let sig = signer.sign_transaction_sync(&mut tx).unwrap();
        let envelope = TxEnvelope::from(tx.into_signed(sig));
        let receipt = NodeReceipt {
            status: true,
            block_number: Some(1),
            gas_used: 21_000,
            effective_gas_price: 40,
            logs: vec![],
        };
        let details =
            assemble_details(Network::Base, tx_hash(), &envelope, false, Some(&receipt)).unwrap();
        assert_eq!(details.fee, Some(U256::from(840_000u64)));
        assert_eq!(details.from.network(), Network::Base);
    }

    #[test]
    fn test_contract_creation_has_no_recipient() {
        let signer = PrivateKeySigner::random();
        let envelope = signed_legacy(&signer, TxKind::Create);
        let err =
            assemble_details(Network::Ethereum, tx_hash(), &envelope, true, None).unwrap_err();
        assert!(matches!(
            err,
            BlockchainError::InvalidAddress {
                source: AddressError::MissingRecipient,
                ..
            }
        ));
    }
}
