//! Token descriptors for balance queries.

use std::fmt;

use serde::Serialize;

use crate::types::address::Address;

/// Fieldless token discriminant, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Native,
    FungibleContract,
    ChainDenom,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Native => "native",
            TokenType::FungibleContract => "fungible-contract",
            TokenType::ChainDenom => "chain-denom",
        };
        f.write_str(name)
    }
}

/// Where a token's balance lives.
///
/// Native tokens carry no reference; contract-style tokens always do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "reference")]
pub enum TokenKind {
    /// The chain's base currency.
    Native,
    /// A token tracked in contract (or program) storage, e.g. ERC-20 or an SPL mint.
    FungibleContract(Address),
    /// A bank-module denomination such as `uatom`.
    ChainDenom(String),
}

/// A token on some network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Token {
    pub fn native(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            kind: TokenKind::Native,
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    pub fn contract(
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            kind: TokenKind::FungibleContract(address),
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    pub fn denom(
        denom: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            kind: TokenKind::ChainDenom(denom.into()),
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    pub fn token_type(&self) -> TokenType {
        match self.kind {
            TokenKind::Native => TokenType::Native,
            TokenKind::FungibleContract(_) => TokenType::FungibleContract,
            TokenKind::ChainDenom(_) => TokenType::ChainDenom,
        }
    }

    /// Contract address for contract-style tokens.
    pub fn address(&self) -> Option<&Address> {
        match &self.kind {
            TokenKind::FungibleContract(address) => Some(address),
            _ => None,
        }
    }
}
