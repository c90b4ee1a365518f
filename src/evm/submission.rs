//! Classification of node submission failures.
//!
//! Nodes report rejected transactions as free text. The table below is the
//! only place that text is interpreted. Matching is case-insensitive
//! substring search, first hit wins; a node that rewords its messages falls
//! through to `FailedToSendTransaction`.

use crate::blockchain::error::BlockchainError;
use crate::blockchain::node::NodeError;
use crate::observability::metrics;

/// What a rejection message means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionFailure {
    InsufficientFunds,
    MaxGasCapExceeded,
    ReplacementUnderpriced,
    NonceTooLow,
    Other,
}

/// Lowercase needle → failure.
const KNOWN_MESSAGES: &[(&str, SubmissionFailure)] = &[
    ("insufficient funds", SubmissionFailure::InsufficientFunds),
    ("exceeds block gas limit", SubmissionFailure::MaxGasCapExceeded),
    ("exceeds the configured cap", SubmissionFailure::MaxGasCapExceeded),
    ("replacement transaction underpriced", SubmissionFailure::ReplacementUnderpriced),
    ("nonce too low", SubmissionFailure::NonceTooLow),
];

impl SubmissionFailure {
    pub fn classify(message: &str) -> Self {
        let lowered = message.to_lowercase();
        KNOWN_MESSAGES
            .iter()
            .find(|(needle, _)| lowered.contains(needle))
            .map(|(_, failure)| *failure)
            .unwrap_or(SubmissionFailure::Other)
    }

    fn into_error(self, cause: NodeError) -> BlockchainError {
        match self {
            SubmissionFailure::InsufficientFunds => BlockchainError::InsufficientFunds(cause),
            SubmissionFailure::MaxGasCapExceeded => BlockchainError::MaxGasCapExceeded(cause),
            SubmissionFailure::ReplacementUnderpriced => {
                BlockchainError::ReplacementUnderpriced(cause)
            }
            SubmissionFailure::NonceTooLow => BlockchainError::NonceTooLow(cause),
            SubmissionFailure::Other => BlockchainError::FailedToSendTransaction(cause),
        }
    }
}

/// Map a failed `send_transaction` onto the domain taxonomy.
///
/// Caller interruption is reported as such, not as a send failure.
pub fn classify_submission_error(cause: NodeError) -> BlockchainError {
    let err = match cause {
        NodeError::Interrupted(reason) => BlockchainError::Interrupted(reason),
        other => SubmissionFailure::classify(&other.to_string()).into_error(other),
    };
    metrics::record_submission_failure(err.kind().as_str());
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::error::ErrorKind;
    use crate::lifecycle::context::Interrupted;

    fn kind_of(message: &str) -> ErrorKind {
        classify_submission_error(NodeError::Rpc(message.to_string())).kind()
    }

    #[test]
    fn test_insufficient_funds_variants() {
        assert_eq!(
            kind_of("insufficient funds for gas * price + value"),
            ErrorKind::InsufficientFunds
        );
        assert_eq!(
            kind_of("err: insufficient funds for transfer (supplied gas 21000)"),
            ErrorKind::InsufficientFunds
        );
        assert_eq!(kind_of("INSUFFICIENT FUNDS"), ErrorKind::InsufficientFunds);
    }

    #[test]
    fn test_gas_cap_variants() {
        assert_eq!(kind_of("exceeds block gas limit"), ErrorKind::MaxGasCapExceeded);
        assert_eq!(
            kind_of("tx fee (1.50 ether) exceeds the configured cap (1.00 ether)"),
            ErrorKind::MaxGasCapExceeded
        );
        assert_eq!(
            kind_of("Transaction gas limit exceeds block gas limit of 30000000"),
            ErrorKind::MaxGasCapExceeded
        );
    }

    #[test]
    fn test_replacement_underpriced() {
        assert_eq!(
            kind_of("Replacement Transaction Underpriced"),
            ErrorKind::ReplacementUnderpriced
        );
    }

    #[test]
    fn test_nonce_too_low_variants() {
        assert_eq!(kind_of("nonce too low"), ErrorKind::NonceTooLow);
        assert_eq!(
            kind_of("nonce too low: next nonce 5, tx nonce 3"),
            ErrorKind::NonceTooLow
        );
    }

    #[test]
    fn test_unknown_message_is_generic() {
        assert_eq!(kind_of("already known"), ErrorKind::FailedToSendTransaction);
        assert_eq!(kind_of(""), ErrorKind::FailedToSendTransaction);
        let err = classify_submission_error(NodeError::Timeout(30));
        assert_eq!(err.kind(), ErrorKind::FailedToSendTransaction);
    }

    #[test]
    fn test_interruption_is_not_a_send_failure() {
        let err = classify_submission_error(NodeError::Interrupted(Interrupted::Canceled));
        assert_eq!(err.kind(), ErrorKind::Interrupted);
    }

    #[test]
    fn test_cause_survives_classification() {
        let err = classify_submission_error(NodeError::Rpc("nonce too low".to_string()));
        match err {
            BlockchainError::NonceTooLow(cause) => {
                assert_eq!(cause, NodeError::Rpc("nonce too low".to_string()))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
