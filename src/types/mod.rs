//! Chain-agnostic domain types.
//!
//! Identifiers (`Address`, `TransactionHash`) validate on construction and are
//! immutable afterwards. `Transaction` is the one mutable record: callers build
//! it, signers fill its signed fields, managers update its status.

pub mod address;
pub mod details;
pub mod hash;
pub mod hex;
pub mod network;
pub mod token;
pub mod transaction;

pub use address::{Address, AddressError};
pub use details::{Event, Log, TransactionDetails};
pub use hash::{HashError, TransactionHash};
pub use hex::HexError;
pub use network::{ChainFamily, Network, UnknownNetwork};
pub use token::{Token, TokenKind, TokenType};
pub use transaction::{
    ChainPayload, EvmFields, FeeModel, SignedPayload, Transaction, TransactionError,
    TransactionStatus, TransactionType,
};
