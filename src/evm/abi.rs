//! Embedded ERC-20 interface fragment.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::blockchain::error::{BlockchainError, BlockchainResult};

sol! {
    /// The one ERC-20 function balance queries need.
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// Call data for `balanceOf(owner)`.
pub fn encode_balance_of(owner: Address) -> Bytes {
    IERC20::balanceOfCall { owner }.abi_encode().into()
}

/// Decode the single `uint256` returned by `balanceOf`.
pub fn decode_balance_of(data: &[u8]) -> BlockchainResult<U256> {
    IERC20::balanceOfCall::abi_decode_returns(data).map_err(BlockchainError::AbiDecode)
}
