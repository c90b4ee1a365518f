//! Local private-key signer for EVM transactions.
//!
//! # Security
//! - Private keys are loaded from a hex string or an environment variable
//! - Keys are never logged or serialized; only the derived address is

use alloy::consensus::{SignableTransaction, TxEip1559, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TxSigner;
use alloy::primitives::{Address, Bytes, TxKind};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;

use crate::blockchain::signer::{SignerError, TransactionSigner};
use crate::types::{
    ChainPayload, EvmFields, FeeModel, SignedPayload, Transaction, TransactionHash,
};

/// Default environment variable holding the signer's private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "BLOCKCHAIN_SIGNER_PRIVATE_KEY";

/// Signs EVM transactions with an in-process key.
#[derive(Debug, Clone)]
pub struct LocalSigner {
    signer: PrivateKeySigner,
}

impl LocalSigner {
    /// Create a signer from a hex-encoded private key (with or without `0x`).
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, SignerError> {
        let key_hex = private_key_hex
            .strip_prefix("0x")
            .unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| SignerError::InvalidPrivateKey(format!("{e}")))?;

        tracing::info!(address = %signer.address(), "Signer initialized");
        Ok(Self { signer })
    }

    /// Load the key from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self, SignerError> {
        let private_key = std::env::var(var).map_err(|_| {
            SignerError::NotConfigured(format!("environment variable {var} not set"))
        })?;
        Self::from_private_key(&private_key)
    }

    pub fn from_signer(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    /// The account this signer signs for.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    async fn sign_envelope(
        &self,
        fields: &EvmFields,
        to: Address,
        tx: &Transaction,
    ) -> Result<TxEnvelope, SignerError> {
        let to = TxKind::Call(to);
        let envelope = match fields.fee {
            FeeModel::Legacy { gas_price } => {
                let mut unsigned = TxLegacy {
                    chain_id: Some(fields.chain_id),
                    nonce: fields.nonce,
                    gas_price,
                    gas_limit: fields.gas_limit,
                    to,
                    value: tx.amount,
                    input: fields.data.clone(),
                };
                let sig = self
                    .signer
                    .sign_transaction(&mut unsigned)
                    .await
                    .map_err(|e| SignerError::Signing(e.to_string()))?;
                TxEnvelope::from(unsigned.into_signed(sig))
            }
            FeeModel::DynamicFee {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => {
                let mut unsigned = TxEip1559 {
                    chain_id: fields.chain_id,
                    nonce: fields.nonce,
                    gas_limit: fields.gas_limit,
                    max_fee_per_gas,
                    max_priority_fee_per_gas,
                    to,
                    value: tx.amount,
                    access_list: Default::default(),
                    input: fields.data.clone(),
                };
                let sig = self
                    .signer
                    .sign_transaction(&mut unsigned)
                    .await
                    .map_err(|e| SignerError::Signing(e.to_string()))?;
                TxEnvelope::from(unsigned.into_signed(sig))
            }
        };
        Ok(envelope)
    }
}

#[async_trait]
impl TransactionSigner for LocalSigner {
    async fn sign_transaction(&self, mut tx: Transaction) -> Result<Option<Transaction>, SignerError> {
        tx.validate()?;

        let account = crate::types::Address::from_evm(self.address(), tx.from.network())
            .map_err(|e| SignerError::Signing(e.to_string()))?;
        if account.to_evm() != tx.from.to_evm() {
            return Err(SignerError::AccountMismatch {
                expected: account,
                actual: tx.from,
            });
        }

        let fields = match &tx.payload {
            ChainPayload::Evm(fields) => fields.clone(),
            ChainPayload::None => {
                return Err(SignerError::Signing("missing EVM payload".to_string()))
            }
        };

        let envelope = self.sign_envelope(&fields, tx.to.to_evm(), &tx).await?;
        let raw = Bytes::from(envelope.encoded_2718());
        let hash = TransactionHash::from_b256(*envelope.tx_hash(), tx.from.network());

        tracing::debug!(tx_hash = %hash, nonce = fields.nonce, "Transaction signed");
        tx.set_signed(SignedPayload::Evm(envelope), raw, hash);
        Ok(Some(tx))
    }
}
