//! Error composition and reason-code mapping for the request boundary.

use crate::messages::ErrorMessage;
use account_ledger::LedgerError;
use competitor_registry::RegistryError;
use steward::StewardError;
use thiserror::Error;
use transfer_market::MarketError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Steward(#[from] StewardError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Market(#[from] MarketError),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    /// Stable reason code for the caller. Every failure is recoverable and
    /// surfaced as a rejected request; nothing here aborts the process.
    pub fn reason_code(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "VALIDATION_ERROR",
            GatewayError::Steward(err) => steward_code(err),
            GatewayError::Registry(err) => registry_code(err),
            GatewayError::Ledger(err) => ledger_code(err),
            GatewayError::Market(err) => market_code(err),
        }
    }

    pub fn to_message(&self) -> ErrorMessage {
        ErrorMessage { code: self.reason_code().to_string(), message: self.to_string() }
    }
}

fn steward_code(err: &StewardError) -> &'static str {
    match err {
        StewardError::InsufficientData => "INSUFFICIENT_DATA",
        StewardError::GrandPrixFinalized(_) => "ALREADY_CALCULATED",
        _ => "VALIDATION_ERROR",
    }
}

fn registry_code(err: &RegistryError) -> &'static str {
    match err {
        RegistryError::CompetitorNotFound(_)
        | RegistryError::TeammateNotFound(_)
        | RegistryError::EngineerNotFound(_) => "NOT_FOUND",
        _ => "VALIDATION_ERROR",
    }
}

fn ledger_code(err: &LedgerError) -> &'static str {
    match err {
        LedgerError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
        LedgerError::AccountNotFound { .. } => "NOT_FOUND",
        LedgerError::NonPositiveAmount => "VALIDATION_ERROR",
    }
}

fn market_code(err: &MarketError) -> &'static str {
    match err {
        MarketError::BidTooLow { .. } => "BID_TOO_LOW",
        MarketError::AuctionStillOpen { .. } => "AUCTION_STILL_OPEN",
        MarketError::AuctionClosed | MarketError::NoBids => "AUCTION_CLOSED",
        MarketError::ClauseNotExpired { .. } => "CLAUSE_NOT_EXPIRED",
        MarketError::AuctionNotFound
        | MarketError::ClauseNotFound { .. }
        | MarketError::ItemNotOwned(_) => "NOT_FOUND",
        MarketError::InvalidAmount
        | MarketError::InvalidInvestment
        | MarketError::ItemRoleMismatch { .. }
        | MarketError::NotOwner(_)
        | MarketError::AlreadyOwner(_) => "VALIDATION_ERROR",
        MarketError::Ledger(inner) => ledger_code(inner),
        MarketError::Registry(inner) => registry_code(inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use account_ledger::Funds;

    #[test]
    fn nested_ledger_failures_keep_their_code() {
        let err = GatewayError::Market(MarketError::Ledger(LedgerError::InsufficientFunds {
            required: Funds::from_cents(100),
            available: Funds::from_cents(10),
        }));
        assert_eq!(err.reason_code(), "INSUFFICIENT_FUNDS");
    }

    #[test]
    fn bid_too_low_maps_to_its_own_code() {
        let err = GatewayError::Market(MarketError::BidTooLow { minimum: Funds::from_cents(5) });
        let message = err.to_message();
        assert_eq!(message.code, "BID_TOO_LOW");
        assert!(message.message.contains("minimum"));
    }
}
