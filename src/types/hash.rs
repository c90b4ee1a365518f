//! Network-tagged transaction hashes.

use std::fmt;

use alloy::primitives::B256;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::types::hex::{decode_fixed, HexError};
use crate::types::network::{ChainFamily, Network};

/// Byte length of a transaction hash.
pub const HASH_LENGTH: usize = 32;

/// Why a transaction hash could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error(transparent)]
    Hex(#[from] HexError),

    #[error("{family} transaction ids are not hex hashes")]
    UnsupportedFamily { family: ChainFamily },
}

/// A validated 32-byte transaction hash bound to its network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionHash {
    inner: B256,
    network: Network,
}

impl TransactionHash {
    /// Parse a 64-digit hex hash (optional `0x`/`0X` prefix).
    ///
    /// Solana signatures are base58 and rejected here.
    pub fn parse(input: &str, network: Network) -> Result<Self, HashError> {
        if let ChainFamily::Solana = network.family() {
            return Err(HashError::UnsupportedFamily {
                family: ChainFamily::Solana,
            });
        }
        let bytes = decode_fixed::<HASH_LENGTH>(input)?;
        Ok(Self {
            inner: B256::from(bytes),
            network,
        })
    }

    pub fn from_b256(inner: B256, network: Network) -> Self {
        Self { inner, network }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_slice()
    }

    pub fn as_b256(&self) -> B256 {
        self.inner
    }

    pub fn network(&self) -> Network {
        self.network
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", alloy::hex::encode(self.inner))
    }
}

impl Serialize for TransactionHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";

    #[test]
    fn test_parse_valid_hash() {
        let hash = TransactionHash::parse(VALID, Network::Ethereum).unwrap();
        assert_eq!(hash.to_string(), VALID);
        assert_eq!(hash.as_bytes().len(), HASH_LENGTH);
        assert_eq!(hash.network(), Network::Ethereum);
    }

    #[test]
    fn test_upper_case_is_normalized() {
        let upper = format!("0X{}", VALID[2..].to_uppercase());
        let hash = TransactionHash::parse(&upper, Network::Ethereum).unwrap();
        assert_eq!(hash.to_string(), VALID);

        let bare = TransactionHash::parse(&VALID[2..], Network::Bitcoin).unwrap();
        assert_eq!(bare.to_string(), VALID);
    }

    #[test]
    fn test_invalid_hashes() {
        assert!(TransactionHash::parse("0x123", Network::Ethereum).is_err());
        assert!(TransactionHash::parse(&VALID[..65], Network::Ethereum).is_err());
        assert!(TransactionHash::parse(&format!("{}00", VALID), Network::Ethereum).is_err());
        let bad_char = VALID.replace('f', "g");
        assert!(matches!(
            TransactionHash::parse(&bad_char, Network::Ethereum),
            Err(HashError::Hex(HexError::InvalidCharacter { character: 'g', .. }))
        ));
    }

    #[test]
    fn test_solana_rejected() {
        assert_eq!(
            TransactionHash::parse(VALID, Network::Solana),
            Err(HashError::UnsupportedFamily {
                family: ChainFamily::Solana
            })
        );
    }
}
