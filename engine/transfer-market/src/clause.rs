//! Buy-out clause state.

use account_ledger::Funds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ownership-protection price and window for one competitor in one league.
///
/// The value only moves up (owner investments) until an ownership transfer
/// resets it from the new acquisition price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseState {
    pub value: Funds,
    pub expires_at: DateTime<Utc>,
}

impl ClauseState {
    pub fn new(value: Funds, expires_at: DateTime<Utc>) -> Self {
        Self { value, expires_at }
    }

    /// Protected means a buy-out is not yet permitted. The boundary instant
    /// itself is buyable.
    pub fn is_protected(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn protection_ends_exactly_at_expiry() {
        let expiry = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let clause = ClauseState::new(Funds::from_cents(5000), expiry);
        assert!(clause.is_protected(expiry - chrono::Duration::seconds(1)));
        assert!(!clause.is_protected(expiry));
        assert!(!clause.is_protected(expiry + chrono::Duration::seconds(1)));
    }
}
