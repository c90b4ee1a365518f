//! Transaction signing capability.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Address, Transaction, TransactionError};

/// Errors a signer can report.
#[derive(Debug, Error)]
pub enum SignerError {
    /// No key material configured.
    #[error("signer not configured: {0}")]
    NotConfigured(String),

    #[error("invalid private key format: {0}")]
    InvalidPrivateKey(String),

    #[error(transparent)]
    InvalidTransaction(#[from] TransactionError),

    #[error("sender {actual} does not match signing account {expected}")]
    AccountMismatch { expected: Address, actual: Address },

    #[error("signing failed: {0}")]
    Signing(String),
}

/// Holds key material and signs transactions without exposing it.
///
/// Implementations populate `signed`, `signed_bytes` and `hash` on the
/// returned transaction. `Ok(None)` means the signer declined to produce one.
#[async_trait]
pub trait TransactionSigner: Send + Sync + std::fmt::Debug {
    async fn sign_transaction(&self, tx: Transaction) -> Result<Option<Transaction>, SignerError>;
}
