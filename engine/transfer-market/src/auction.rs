//! A single item's auction: append-only bid history with a leading index.
//!
//! The bid list is only ever appended to; the current leader is tracked by
//! index so reads never rescan the history. Ordering is amount descending,
//! ties broken by earliest placement.

use crate::error::{MarketError, Result};
use account_ledger::Funds;
use chrono::{DateTime, Utc};
use competitor_registry::Role;
use serde::{Deserialize, Serialize};
use steward::{CompetitorId, LeagueId, ParticipantId};
use uuid::Uuid;

/// One auction per (item, league).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuctionKey {
    pub item_type: Role,
    pub item_id: CompetitorId,
    pub league: LeagueId,
}

/// `Closed` is terminal; there is no re-opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionState {
    Open,
    Closed,
}

/// An accepted bid. Immutable once recorded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bid {
    pub id: Uuid,
    pub bidder: ParticipantId,
    pub amount: Funds,
    pub placed_at: DateTime<Utc>,
    #[serde(skip)]
    pub(crate) seq: u64,
}

#[derive(Debug)]
pub struct Auction {
    pub base_value: Funds,
    pub opened_at: DateTime<Utc>,
    /// Never shortened or extended after creation; a late bid does not
    /// move it.
    pub close_time: DateTime<Utc>,
    pub state: AuctionState,
    bids: Vec<Bid>,
    leading: Option<usize>,
    next_seq: u64,
}

impl Auction {
    pub fn new(base_value: Funds, opened_at: DateTime<Utc>, close_time: DateTime<Utc>) -> Self {
        Self {
            base_value,
            opened_at,
            close_time,
            state: AuctionState::Open,
            bids: Vec::new(),
            leading: None,
            next_seq: 0,
        }
    }

    /// The smallest amount the next bid must reach.
    pub fn minimum_acceptable(&self, increment: Funds) -> Funds {
        match self.leading_bid() {
            Some(bid) => bid.amount + increment,
            None => self.base_value,
        }
    }

    pub fn leading_bid(&self) -> Option<&Bid> {
        self.leading.map(|idx| &self.bids[idx])
    }

    /// Highest bid amount, or the base value when no bids exist.
    pub fn leading_amount(&self) -> Funds {
        self.leading_bid().map(|bid| bid.amount).unwrap_or(self.base_value)
    }

    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    pub(crate) fn place(
        &mut self,
        bidder: ParticipantId,
        amount: Funds,
        now: DateTime<Utc>,
        increment: Funds,
    ) -> Result<Bid> {
        if self.state == AuctionState::Closed || now >= self.close_time {
            return Err(MarketError::AuctionClosed);
        }
        let minimum = self.minimum_acceptable(increment);
        if amount < minimum {
            return Err(MarketError::BidTooLow { minimum });
        }

        let bid = Bid { id: Uuid::new_v4(), bidder, amount, placed_at: now, seq: self.next_seq };
        self.next_seq += 1;
        self.bids.push(bid);
        let idx = self.bids.len() - 1;
        match self.leading {
            Some(lead) if !outranks(&self.bids[idx], &self.bids[lead]) => {}
            _ => self.leading = Some(idx),
        }
        Ok(bid)
    }

    pub(crate) fn mark_closed(&mut self) {
        self.state = AuctionState::Closed;
    }
}

/// Amount descending; on equal amounts the earlier bid keeps the lead.
fn outranks(a: &Bid, b: &Bid) -> bool {
    a.amount > b.amount || (a.amount == b.amount && (a.placed_at, a.seq) < (b.placed_at, b.seq))
}
