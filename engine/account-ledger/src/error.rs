//! Error types for the account ledger

use crate::funds::Funds;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Funds, available: Funds },

    #[error("account not found: league {league}, participant {participant}")]
    AccountNotFound { league: u64, participant: u64 },

    #[error("amount must be positive")]
    NonPositiveAmount,
}

pub type Result<T> = std::result::Result<T, LedgerError>;
