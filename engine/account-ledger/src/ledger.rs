//! Per-league participant accounts.

use crate::error::{LedgerError, Result};
use crate::funds::Funds;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One participant's account inside one league.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Account {
    pub league: u64,
    pub participant: u64,
    pub balance: Funds,
    pub opened_at: DateTime<Utc>,
}

/// In-memory account store keyed by (league, participant).
///
/// Mutations go through the per-entry guard, so two transfers against the
/// same account cannot interleave.
#[derive(Debug, Default)]
pub struct AccountLedger {
    accounts: DashMap<(u64, u64), Account>,
}

impl AccountLedger {
    pub fn new() -> Self {
        Self { accounts: DashMap::new() }
    }

    /// Open an account with an opening balance. Idempotent: an existing
    /// account is left untouched.
    pub fn open_account(&self, league: u64, participant: u64, opening: Funds, now: DateTime<Utc>) {
        self.accounts.entry((league, participant)).or_insert_with(|| {
            debug!(league, participant, %opening, "account opened");
            Account { league, participant, balance: opening, opened_at: now }
        });
    }

    pub fn balance_of(&self, league: u64, participant: u64) -> Result<Funds> {
        self.accounts
            .get(&(league, participant))
            .map(|account| account.balance)
            .ok_or(LedgerError::AccountNotFound { league, participant })
    }

    /// Add funds; returns the new balance.
    pub fn credit(&self, league: u64, participant: u64, amount: Funds) -> Result<Funds> {
        if amount.is_negative() {
            return Err(LedgerError::NonPositiveAmount);
        }
        let mut account = self
            .accounts
            .get_mut(&(league, participant))
            .ok_or(LedgerError::AccountNotFound { league, participant })?;
        account.balance += amount;
        debug!(league, participant, %amount, balance = %account.balance, "account credited");
        Ok(account.balance)
    }

    /// Remove funds; fails without mutating when the balance cannot cover
    /// the amount.
    pub fn debit(&self, league: u64, participant: u64, amount: Funds) -> Result<Funds> {
        if amount.is_negative() {
            return Err(LedgerError::NonPositiveAmount);
        }
        let mut account = self
            .accounts
            .get_mut(&(league, participant))
            .ok_or(LedgerError::AccountNotFound { league, participant })?;
        if account.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                required: amount,
                available: account.balance,
            });
        }
        account.balance -= amount;
        debug!(league, participant, %amount, balance = %account.balance, "account debited");
        Ok(account.balance)
    }
}
