//! Network-tagged account addresses.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::types::hex::{decode_fixed, HexError};
use crate::types::network::{ChainFamily, Network};

/// Byte length of an EVM address.
pub const EVM_ADDRESS_LENGTH: usize = 20;

/// Why an address could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error(transparent)]
    Hex(#[from] HexError),

    #[error("{family} addresses are not supported")]
    UnsupportedFamily { family: ChainFamily },

    #[error("transaction has no recipient")]
    MissingRecipient,

    #[error("sender recovery failed: {0}")]
    Recovery(String),
}

/// A validated address bound to the network it belongs to.
///
/// Immutable once built: every constructor validates, so there is no
/// partially valid `Address`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    inner: alloy::primitives::Address,
    network: Network,
}

impl Address {
    /// Parse a hex address (optional `0x`/`0X` prefix) for `network`.
    pub fn parse(input: &str, network: Network) -> Result<Self, AddressError> {
        match network.family() {
            ChainFamily::Evm => {
                let bytes = decode_fixed::<EVM_ADDRESS_LENGTH>(input)?;
                Ok(Self {
                    inner: alloy::primitives::Address::from(bytes),
                    network,
                })
            }
            family => Err(AddressError::UnsupportedFamily { family }),
        }
    }

    /// Wrap a raw EVM address, e.g. one recovered from a signature.
    pub fn from_evm(
        inner: alloy::primitives::Address,
        network: Network,
    ) -> Result<Self, AddressError> {
        match network.family() {
            ChainFamily::Evm => Ok(Self { inner, network }),
            family => Err(AddressError::UnsupportedFamily { family }),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_slice()
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// The address as an alloy primitive, for building RPC requests.
    pub fn to_evm(&self) -> alloy::primitives::Address {
        self.inner
    }
}

impl fmt::Display for Address {
    /// EIP-55 mixed-case checksum encoding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.to_checksum(None))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
