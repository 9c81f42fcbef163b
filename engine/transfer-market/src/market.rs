//! Transfer market: auctions and buy-out clauses, settled against the
//! account ledger and the competitor registry.
//!
//! Auction mutations run under the per-key map guard. Clause operations
//! span three structures (ledger, registry, clause book), so they hold an
//! explicit per-(league, competitor) lock for the whole sequence.

use crate::auction::{Auction, AuctionKey, AuctionState, Bid};
use crate::clause::ClauseState;
use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use account_ledger::{AccountLedger, Funds};
use chrono::{DateTime, Utc};
use competitor_registry::CompetitorRegistry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use steward::{CompetitorId, LeagueId, ParticipantId};
use tracing::info;
use uuid::Uuid;

/// Response to an accepted bid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BidReceipt {
    pub bid_id: Uuid,
    pub amount: Funds,
    pub minimum_next_bid: Funds,
    pub close_time: DateTime<Utc>,
}

/// Outcome of closing an auction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Settlement {
    pub winner: ParticipantId,
    pub amount: Funds,
    pub previous_owner: Option<ParticipantId>,
    pub clause: ClauseState,
}

/// Outcome of a clause buy-out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BuyoutReceipt {
    pub price: Funds,
    pub previous_owner: ParticipantId,
    pub clause: ClauseState,
}

pub struct TransferMarket {
    registry: Arc<CompetitorRegistry>,
    ledger: Arc<AccountLedger>,
    config: MarketConfig,
    auctions: DashMap<AuctionKey, Auction>,
    clauses: DashMap<(LeagueId, CompetitorId), ClauseState>,
    clause_locks: DashMap<(LeagueId, CompetitorId), Arc<Mutex<()>>>,
}

impl TransferMarket {
    pub fn new(
        registry: Arc<CompetitorRegistry>,
        ledger: Arc<AccountLedger>,
        config: MarketConfig,
    ) -> Self {
        Self {
            registry,
            ledger,
            config,
            auctions: DashMap::new(),
            clauses: DashMap::new(),
            clause_locks: DashMap::new(),
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Place a bid, creating the auction on the item's first bid.
    ///
    /// A new auction opens at the competitor's market value and closes
    /// `auction_duration` later; accepted bids never move the close time.
    pub fn place_bid(
        &self,
        key: AuctionKey,
        bidder: ParticipantId,
        amount: Funds,
        now: DateTime<Utc>,
    ) -> Result<BidReceipt> {
        if !amount.is_positive() {
            return Err(MarketError::InvalidAmount);
        }
        let competitor = self.registry.get(key.item_id)?;
        if competitor.role != key.item_type {
            return Err(MarketError::ItemRoleMismatch {
                expected: key.item_type,
                actual: competitor.role,
            });
        }

        let mut auction = self.auctions.entry(key).or_insert_with(|| {
            info!(
                league = key.league,
                item = key.item_id,
                base = %competitor.market_value,
                "auction opened"
            );
            Auction::new(competitor.market_value, now, now + self.config.auction_duration())
        });
        let bid = auction.place(bidder, amount, now, self.config.bid_increment)?;
        info!(league = key.league, item = key.item_id, bidder, amount = %amount, "bid accepted");
        Ok(BidReceipt {
            bid_id: bid.id,
            amount: bid.amount,
            minimum_next_bid: auction.minimum_acceptable(self.config.bid_increment),
            close_time: auction.close_time,
        })
    }

    /// Current leading amount: the highest bid, the auction base value, or
    /// the competitor's market value when no auction exists yet.
    pub fn leading_bid(&self, key: AuctionKey) -> Result<Funds> {
        match self.auctions.get(&key) {
            Some(auction) => Ok(auction.leading_amount()),
            None => Ok(self.registry.market_value(key.item_id)?),
        }
    }

    pub fn bid_history(&self, key: AuctionKey) -> Result<Vec<Bid>> {
        let auction = self.auctions.get(&key).ok_or(MarketError::AuctionNotFound)?;
        Ok(auction.bids().to_vec())
    }

    /// Close an elapsed auction and settle it: debit the winner, pay the
    /// previous owner, transfer ownership, reset the clause.
    ///
    /// Settlement is atomic: a failed debit leaves the auction open and
    /// untouched, so the close can be retried. A second close of the same
    /// auction is rejected with `AuctionClosed`.
    pub fn close(&self, key: AuctionKey, now: DateTime<Utc>) -> Result<Settlement> {
        let mut auction = self.auctions.get_mut(&key).ok_or(MarketError::AuctionNotFound)?;
        if auction.state == AuctionState::Closed {
            return Err(MarketError::AuctionClosed);
        }
        if now < auction.close_time {
            return Err(MarketError::AuctionStillOpen { close_time: auction.close_time });
        }
        let leading = *auction.leading_bid().ok_or(MarketError::NoBids)?;

        let previous = self.registry.owner_of(key.league, key.item_id);
        self.ledger.debit(key.league, leading.bidder, leading.amount)?;
        if let Some(ownership) = previous {
            if let Err(err) = self.ledger.credit(key.league, ownership.owner, leading.amount) {
                let _ = self.ledger.credit(key.league, leading.bidder, leading.amount);
                return Err(err.into());
            }
        }
        self.registry.transfer_owner(
            key.league,
            key.item_id,
            leading.bidder,
            leading.amount,
            now,
        )?;
        let clause = self.reset_clause(key.league, key.item_id, leading.amount, now);
        auction.mark_closed();

        info!(
            league = key.league,
            item = key.item_id,
            winner = leading.bidder,
            amount = %leading.amount,
            "auction closed"
        );
        Ok(Settlement {
            winner: leading.bidder,
            amount: leading.amount,
            previous_owner: previous.map(|o| o.owner),
            clause,
        })
    }

    /// Assign a competitor to a participant outside the auction flow
    /// (league bootstrap). Sets ownership and seeds the clause.
    pub fn grant(
        &self,
        league: LeagueId,
        competitor: CompetitorId,
        owner: ParticipantId,
        price: Funds,
        now: DateTime<Utc>,
    ) -> Result<ClauseState> {
        self.registry.transfer_owner(league, competitor, owner, price, now)?;
        Ok(self.reset_clause(league, competitor, price, now))
    }

    pub fn clause_of(&self, league: LeagueId, competitor: CompetitorId) -> Option<ClauseState> {
        self.clauses.get(&(league, competitor)).map(|c| *c)
    }

    /// Whether a buy-out would be accepted right now for a requester
    /// holding `requester_funds`.
    pub fn can_buyout(
        &self,
        league: LeagueId,
        competitor: CompetitorId,
        requester_funds: Funds,
        now: DateTime<Utc>,
    ) -> bool {
        self.clauses
            .get(&(league, competitor))
            .map(|clause| !clause.is_protected(now) && requester_funds >= clause.value)
            .unwrap_or(false)
    }

    /// Execute a buy-out: debit the requester by the clause value, pay the
    /// current owner, transfer ownership and reset the clause for the new
    /// owner.
    pub fn apply_buyout(
        &self,
        league: LeagueId,
        competitor: CompetitorId,
        requester: ParticipantId,
        now: DateTime<Utc>,
    ) -> Result<BuyoutReceipt> {
        let lock = self.clause_lock(league, competitor);
        let _guard = lock.lock().expect("clause lock poisoned");

        let clause = *self
            .clauses
            .get(&(league, competitor))
            .ok_or(MarketError::ClauseNotFound { league, competitor })?;
        if clause.is_protected(now) {
            return Err(MarketError::ClauseNotExpired { expires_at: clause.expires_at });
        }
        let ownership =
            self.registry.owner_of(league, competitor).ok_or(MarketError::ItemNotOwned(competitor))?;
        if ownership.owner == requester {
            return Err(MarketError::AlreadyOwner(competitor));
        }

        self.ledger.debit(league, requester, clause.value)?;
        if let Err(err) = self.ledger.credit(league, ownership.owner, clause.value) {
            let _ = self.ledger.credit(league, requester, clause.value);
            return Err(err.into());
        }
        self.registry.transfer_owner(league, competitor, requester, clause.value, now)?;
        let new_clause = self.reset_clause(league, competitor, clause.value, now);

        info!(league, competitor, requester, price = %clause.value, "clause bought out");
        Ok(BuyoutReceipt { price: clause.value, previous_owner: ownership.owner, clause: new_clause })
    }

    /// Raise a clause: the owner invests, the clause grows by twice the
    /// investment. The protection window is unchanged.
    pub fn upgrade_clause(
        &self,
        league: LeagueId,
        competitor: CompetitorId,
        requester: ParticipantId,
        investment: Funds,
    ) -> Result<Funds> {
        if !investment.is_positive() {
            return Err(MarketError::InvalidInvestment);
        }
        let lock = self.clause_lock(league, competitor);
        let _guard = lock.lock().expect("clause lock poisoned");

        let ownership =
            self.registry.owner_of(league, competitor).ok_or(MarketError::ItemNotOwned(competitor))?;
        if ownership.owner != requester {
            return Err(MarketError::NotOwner(competitor));
        }
        let mut clause = self
            .clauses
            .get_mut(&(league, competitor))
            .ok_or(MarketError::ClauseNotFound { league, competitor })?;

        self.ledger.debit(league, requester, investment)?;
        clause.value += investment * 2;
        info!(league, competitor, requester, value = %clause.value, "clause upgraded");
        Ok(clause.value)
    }

    fn reset_clause(
        &self,
        league: LeagueId,
        competitor: CompetitorId,
        acquisition_price: Funds,
        now: DateTime<Utc>,
    ) -> ClauseState {
        let clause = ClauseState::new(
            self.config.reset_clause_value(acquisition_price),
            now + self.config.protection_window(),
        );
        self.clauses.insert((league, competitor), clause);
        clause
    }

    fn clause_lock(&self, league: LeagueId, competitor: CompetitorId) -> Arc<Mutex<()>> {
        self.clause_locks.entry((league, competitor)).or_default().clone()
    }
}
