//! Error types for the transfer market

use account_ledger::{Funds, LedgerError};
use chrono::{DateTime, Utc};
use competitor_registry::{RegistryError, Role};
use steward::{CompetitorId, LeagueId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("bid too low: minimum acceptable bid is {minimum}")]
    BidTooLow { minimum: Funds },

    #[error("amount must be positive")]
    InvalidAmount,

    #[error("auction still open until {close_time}")]
    AuctionStillOpen { close_time: DateTime<Utc> },

    #[error("auction is closed")]
    AuctionClosed,

    #[error("no auction found for this item")]
    AuctionNotFound,

    // Auctions are created on their first bid, so an open auction always
    // has one; kept as an explicit rejection rather than a panic path.
    #[error("auction has no bids")]
    NoBids,

    #[error("item is a {actual}, the auction addressed a {expected}")]
    ItemRoleMismatch { expected: Role, actual: Role },

    #[error("no buy-out clause for competitor {competitor} in league {league}")]
    ClauseNotFound { league: LeagueId, competitor: CompetitorId },

    #[error("clause protected until {expires_at}")]
    ClauseNotExpired { expires_at: DateTime<Utc> },

    #[error("investment must be positive")]
    InvalidInvestment,

    #[error("competitor {0} is not owned by anyone in this league")]
    ItemNotOwned(CompetitorId),

    #[error("requester does not own competitor {0}")]
    NotOwner(CompetitorId),

    #[error("requester already owns competitor {0}")]
    AlreadyOwner(CompetitorId),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type Result<T> = std::result::Result<T, MarketError>;
