//! Error taxonomy shared by every chain manager.
//!
//! Each variant names the domain failure and, where there is one, carries the
//! underlying cause as its `source`. `ErrorKind` is the fieldless view used
//! for matching when the cause does not matter.

use thiserror::Error;

use crate::blockchain::manager::Capability;
use crate::blockchain::node::NodeError;
use crate::blockchain::signer::SignerError;
use crate::lifecycle::context::Interrupted;
use crate::types::{AddressError, HashError, Network, TokenType};

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// `start` called on a running (or starting) manager.
    #[error("client already started")]
    AlreadyStarted,

    /// Operation called before `start` or after `stop`.
    #[error("client not started")]
    ClientNotStarted,

    /// Dial aborted because the caller canceled.
    #[error("connection canceled: {0}")]
    ConnectionCanceled(#[source] NodeError),

    /// Dial aborted because the caller's deadline elapsed.
    #[error("connection timed out: {0}")]
    ConnectionTimedOut(#[source] NodeError),

    /// Any other dial failure.
    #[error("unable to connect to {network} client: {source}")]
    UnableToConnect {
        network: Network,
        #[source]
        source: NodeError,
    },

    /// Caller canceled, or its deadline elapsed, mid-operation.
    #[error("operation interrupted: {0}")]
    Interrupted(#[from] Interrupted),

    #[error("unsupported token type: {0}")]
    UnsupportedTokenType(TokenType),

    #[error("failed to query balance: {0}")]
    BalanceQuery(#[source] NodeError),

    #[error("contract call failed: {0}")]
    ContractCall(#[source] NodeError),

    #[error("failed to decode contract return data: {0}")]
    AbiDecode(#[source] alloy::sol_types::Error),

    /// Signer returned nothing, or the signed payload has the wrong shape.
    #[error("invalid transaction: {reason}")]
    InvalidTransaction { reason: String },

    #[error("failed to sign transaction: {0}")]
    FailedToSignTransaction(#[source] SignerError),

    #[error("insufficient funds: {0}")]
    InsufficientFunds(#[source] NodeError),

    #[error("max gas cap exceeded: {0}")]
    MaxGasCapExceeded(#[source] NodeError),

    #[error("replacement transaction underpriced: {0}")]
    ReplacementUnderpriced(#[source] NodeError),

    #[error("nonce too low: {0}")]
    NonceTooLow(#[source] NodeError),

    #[error("failed to send transaction: {0}")]
    FailedToSendTransaction(#[source] NodeError),

    #[error("failed to retrieve transaction: {0}")]
    FailedToRetrieveTransaction(#[source] NodeError),

    #[error("invalid address '{input}': {source}")]
    InvalidAddress {
        input: String,
        #[source]
        source: AddressError,
    },

    #[error("invalid transaction hash '{input}': {source}")]
    InvalidHash {
        input: String,
        #[source]
        source: HashError,
    },

    #[error("{capability} is not implemented for {network}")]
    NotImplemented {
        network: Network,
        capability: Capability,
    },
}

/// Fieldless discriminant of [`BlockchainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AlreadyStarted,
    ClientNotStarted,
    ConnectionCanceled,
    ConnectionTimedOut,
    UnableToConnect,
    Interrupted,
    UnsupportedTokenType,
    BalanceQuery,
    ContractCall,
    AbiDecode,
    InvalidTransaction,
    FailedToSignTransaction,
    InsufficientFunds,
    MaxGasCapExceeded,
    ReplacementUnderpriced,
    NonceTooLow,
    FailedToSendTransaction,
    FailedToRetrieveTransaction,
    InvalidAddress,
    InvalidHash,
    NotImplemented,
}

impl ErrorKind {
    /// Stable snake_case label, used as a metric dimension.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AlreadyStarted => "already_started",
            ErrorKind::ClientNotStarted => "client_not_started",
            ErrorKind::ConnectionCanceled => "connection_canceled",
            ErrorKind::ConnectionTimedOut => "connection_timed_out",
            ErrorKind::UnableToConnect => "unable_to_connect",
            ErrorKind::Interrupted => "interrupted",
            ErrorKind::UnsupportedTokenType => "unsupported_token_type",
            ErrorKind::BalanceQuery => "balance_query",
            ErrorKind::ContractCall => "contract_call",
            ErrorKind::AbiDecode => "abi_decode",
            ErrorKind::InvalidTransaction => "invalid_transaction",
            ErrorKind::FailedToSignTransaction => "failed_to_sign_transaction",
            ErrorKind::InsufficientFunds => "insufficient_funds",
            ErrorKind::MaxGasCapExceeded => "max_gas_cap_exceeded",
            ErrorKind::ReplacementUnderpriced => "replacement_underpriced",
            ErrorKind::NonceTooLow => "nonce_too_low",
            ErrorKind::FailedToSendTransaction => "failed_to_send_transaction",
            ErrorKind::FailedToRetrieveTransaction => "failed_to_retrieve_transaction",
            ErrorKind::InvalidAddress => "invalid_address",
            ErrorKind::InvalidHash => "invalid_hash",
            ErrorKind::NotImplemented => "not_implemented",
        }
    }
}

impl BlockchainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlockchainError::AlreadyStarted => ErrorKind::AlreadyStarted,
            BlockchainError::ClientNotStarted => ErrorKind::ClientNotStarted,
            BlockchainError::ConnectionCanceled(_) => ErrorKind::ConnectionCanceled,
            BlockchainError::ConnectionTimedOut(_) => ErrorKind::ConnectionTimedOut,
            BlockchainError::UnableToConnect { .. } => ErrorKind::UnableToConnect,
            BlockchainError::Interrupted(_) => ErrorKind::Interrupted,
            BlockchainError::UnsupportedTokenType(_) => ErrorKind::UnsupportedTokenType,
            BlockchainError::BalanceQuery(_) => ErrorKind::BalanceQuery,
            BlockchainError::ContractCall(_) => ErrorKind::ContractCall,
            BlockchainError::AbiDecode(_) => ErrorKind::AbiDecode,
            BlockchainError::InvalidTransaction { .. } => ErrorKind::InvalidTransaction,
            BlockchainError::FailedToSignTransaction(_) => ErrorKind::FailedToSignTransaction,
            BlockchainError::InsufficientFunds(_) => ErrorKind::InsufficientFunds,
            BlockchainError::MaxGasCapExceeded(_) => ErrorKind::MaxGasCapExceeded,
            BlockchainError::ReplacementUnderpriced(_) => ErrorKind::ReplacementUnderpriced,
            BlockchainError::NonceTooLow(_) => ErrorKind::NonceTooLow,
            BlockchainError::FailedToSendTransaction(_) => ErrorKind::FailedToSendTransaction,
            BlockchainError::FailedToRetrieveTransaction(_) => {
                ErrorKind::FailedToRetrieveTransaction
            }
            BlockchainError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            BlockchainError::InvalidHash { .. } => ErrorKind::InvalidHash,
            BlockchainError::NotImplemented { .. } => ErrorKind::NotImplemented,
        }
    }

    pub(crate) fn invalid_transaction(reason: impl Into<String>) -> Self {
        BlockchainError::InvalidTransaction {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_address(input: impl Into<String>, source: AddressError) -> Self {
        BlockchainError::InvalidAddress {
            input: input.into(),
            source,
        }
    }
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;
