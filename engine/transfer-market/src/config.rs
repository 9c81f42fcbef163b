//! Market configuration

use account_ledger::Funds;
use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tunables for auctions and buy-out clauses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// How long an auction stays open after its first bid.
    pub auction_duration_hours: i64,

    /// Protection window granted to a new owner after a transfer.
    pub protection_window_days: i64,

    /// Clause value after a transfer = acquisition price × this factor.
    pub clause_reset_factor: Decimal,

    /// Minimum step above the current leading bid.
    pub bid_increment: Funds,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            auction_duration_hours: 48,
            protection_window_days: 14,
            clause_reset_factor: Decimal::TWO,
            bid_increment: Funds::from_cents(1),
        }
    }
}

impl MarketConfig {
    pub fn auction_duration(&self) -> Duration {
        Duration::hours(self.auction_duration_hours)
    }

    pub fn protection_window(&self) -> Duration {
        Duration::days(self.protection_window_days)
    }

    pub fn reset_clause_value(&self, acquisition_price: Funds) -> Funds {
        Funds::from_decimal(acquisition_price.to_decimal() * self.clause_reset_factor)
    }
}
