//! Strict fixed-length hex decoding for identifiers.

use thiserror::Error;

/// Why a hex identifier was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("expected {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid hex character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
}

/// Strip an optional `0x` / `0X` prefix.
pub(crate) fn strip_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Decode exactly `N` bytes of hex, with an optional `0x` prefix.
///
/// Length is checked before the alphabet so that `0x123` reports a length
/// error rather than an odd-digit error.
pub(crate) fn decode_fixed<const N: usize>(input: &str) -> Result<[u8; N], HexError> {
    let digits = strip_prefix(input);
    if digits.len() != 2 * N {
        return Err(HexError::InvalidLength {
            expected: 2 * N,
            actual: digits.len(),
        });
    }
    if let Some((position, character)) = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(HexError::InvalidCharacter {
            character,
            position,
        });
    }

    alloy::hex::decode_to_array::<_, N>(digits).map_err(|_| HexError::InvalidLength {
        expected: 2 * N,
        actual: digits.len(),
    })
}
