//! Supported networks and the chain families they belong to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A blockchain network a manager can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Ethereum,
    Bitcoin,
    Solana,
    Arbitrum,
    Optimism,
    Avalanche,
    Polygon,
    Cosmos,
    Bsc,
    Base,
    Blast,
}

/// Chain family: networks in one family share address and transaction formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    Evm,
    Bitcoin,
    Cosmos,
    Solana,
}

impl Network {
    /// All known networks, in declaration order.
    pub const ALL: [Network; 11] = [
        Network::Ethereum,
        Network::Bitcoin,
        Network::Solana,
        Network::Arbitrum,
        Network::Optimism,
        Network::Avalanche,
        Network::Polygon,
        Network::Cosmos,
        Network::Bsc,
        Network::Base,
        Network::Blast,
    ];

    /// Canonical lowercase name, as used in config files and `Address::network`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Ethereum => "ethereum",
            Network::Bitcoin => "bitcoin",
            Network::Solana => "solana",
            Network::Arbitrum => "arbitrum",
            Network::Optimism => "optimism",
            Network::Avalanche => "avalanche",
            Network::Polygon => "polygon",
            Network::Cosmos => "cosmos",
            Network::Bsc => "bsc",
            Network::Base => "base",
            Network::Blast => "blast",
        }
    }

    /// The family whose formats this network uses.
    pub fn family(&self) -> ChainFamily {
        match self {
            Network::Bitcoin => ChainFamily::Bitcoin,
            Network::Solana => ChainFamily::Solana,
            Network::Cosmos => ChainFamily::Cosmos,
            Network::Ethereum
            | Network::Arbitrum
            | Network::Optimism
            | Network::Avalanche
            | Network::Polygon
            | Network::Bsc
            | Network::Base
            | Network::Blast => ChainFamily::Evm,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChainFamily::Evm => "evm",
            ChainFamily::Bitcoin => "bitcoin",
            ChainFamily::Cosmos => "cosmos",
            ChainFamily::Solana => "solana",
        };
        f.write_str(name)
    }
}

/// Returned when a string names no known network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network: {0}")]
pub struct UnknownNetwork(pub String);

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Network::ALL
            .iter()
            .copied()
            .find(|n| n.as_str() == lowered)
            .ok_or_else(|| UnknownNetwork(s.to_string()))
    }
}
