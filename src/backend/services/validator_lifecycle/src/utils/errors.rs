use thiserror::Error;
use uuid::Uuid;

use chain_models::ids::{Address, ValidationId};
use chain_models::session::LifecyclePhase;

/// How a failed chain transaction failed, classified from the raw error text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionFailure {
    Reverted,
    RejectedByUser,
    InsufficientFunds,
    NonceConflict,
    Other(String),
}

impl std::fmt::Display for TransactionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionFailure::Reverted => f.write_str("transaction reverted"),
            TransactionFailure::RejectedByUser => f.write_str("rejected by user"),
            TransactionFailure::InsufficientFunds => f.write_str("insufficient funds"),
            TransactionFailure::NonceConflict => f.write_str("nonce conflict"),
            TransactionFailure::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// Map a raw chain/wallet error message onto a friendly failure category.
///
/// Chain clients disagree on error shapes, so this matches known substrings
/// and falls back to carrying the raw text.
pub fn classify_transaction_error(raw: &str) -> TransactionFailure {
    let lower = raw.to_lowercase();
    if lower.contains("revert") {
        TransactionFailure::Reverted
    } else if lower.contains("user rejected") || lower.contains("user denied") {
        TransactionFailure::RejectedByUser
    } else if lower.contains("insufficient funds") {
        TransactionFailure::InsufficientFunds
    } else if lower.contains("nonce too low") || lower.contains("replacement transaction") {
        TransactionFailure::NonceConflict
    } else {
        TransactionFailure::Other(raw.to_string())
    }
}

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("invalid input: {0}")]
    UserInput(String),

    #[error("validation ID is the zero sentinel; validator is not registered")]
    ZeroValidationId,

    #[error("no registration justification found for validation ID {0}")]
    JustificationNotFound(ValidationId),

    #[error("no warp message found in transaction logs")]
    MessageNotFound,

    #[error("signature aggregation failed: {0}")]
    AggregationFailed(String),

    #[error("quorum not met: required {required}%, achieved {achieved}%")]
    QuorumNotMet { required: u8, achieved: u8 },

    #[error("connected wallet {wallet} is not the manager owner {owner}")]
    NotAuthorized { wallet: Address, owner: Address },

    #[error("weight change of {delta} is at least 20% of total L1 weight {total}")]
    WeightChangeTooLarge { delta: u64, total: u64 },

    #[error("session is in phase {actual}, expected {expected}")]
    InvalidPhase {
        expected: LifecyclePhase,
        actual: LifecyclePhase,
    },

    #[error("session {0} not found")]
    SessionNotFound(Uuid),

    #[error("malformed access-list predicate")]
    MalformedAccessList,

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("transaction failed: {0}")]
    Transaction(TransactionFailure),

    #[error("chain RPC error: {0}")]
    ChainRpc(String),

    #[error("aggregator transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LifecycleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_reverts() {
        assert_eq!(
            classify_transaction_error("execution reverted: EOA not owner"),
            TransactionFailure::Reverted
        );
    }

    #[test]
    fn classifies_user_rejection() {
        assert_eq!(
            classify_transaction_error("User rejected the request."),
            TransactionFailure::RejectedByUser
        );
        assert_eq!(
            classify_transaction_error("user denied transaction signature"),
            TransactionFailure::RejectedByUser
        );
    }

    #[test]
    fn classifies_funds_and_nonce() {
        assert_eq!(
            classify_transaction_error("insufficient funds for gas * price + value"),
            TransactionFailure::InsufficientFunds
        );
        assert_eq!(
            classify_transaction_error("nonce too low: next nonce 5"),
            TransactionFailure::NonceConflict
        );
        assert_eq!(
            classify_transaction_error("replacement transaction underpriced"),
            TransactionFailure::NonceConflict
        );
    }

    #[test]
    fn unknown_errors_keep_raw_text() {
        let raw = "something unexpected";
        assert_eq!(
            classify_transaction_error(raw),
            TransactionFailure::Other(raw.to_string())
        );
    }
}
