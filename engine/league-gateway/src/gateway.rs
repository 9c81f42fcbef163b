//! The league gateway: one service the surrounding API layer calls.
//!
//! Wires the scoring engine, the competitor registry, the account ledger
//! and the transfer market together. League and competitor identifiers are
//! always explicit request fields; the gateway holds no per-caller state.

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::messages::{
    BidRequest, BidResponse, BuyoutRequest, BuyoutResponse, CloseAuctionRequest,
    CloseAuctionResponse, DerivedPointsEntry, EngineerPointsRequest, EngineerPointsResponse,
    ExpectedPositionsRequest, ExpectedPositionsResponse, GrantCompetitorRequest,
    GrantCompetitorResponse, LeadingBidRequest, LeadingBidResponse, LineupAction,
    LineupPointsRequest, LineupPointsResponse, SessionResultRequest, SessionResultResponse,
    StandingsEntry, StandingsResponse, UpgradeClauseRequest, UpgradeClauseResponse,
};
use account_ledger::AccountLedger;
use chrono::Utc;
use competitor_registry::{CompetitorRegistry, Role};
use std::sync::Arc;
use steward::{
    CompetitorId, EngineerPairing, ScoreBreakdown, ScoreOutcome, SessionKind, Steward,
    TeammateComparison,
};
use tracing::instrument;
use transfer_market::{AuctionKey, TransferMarket};

pub struct LeagueGateway {
    config: GatewayConfig,
    registry: Arc<CompetitorRegistry>,
    ledger: Arc<AccountLedger>,
    steward: Arc<Steward>,
    market: Arc<TransferMarket>,
}

impl LeagueGateway {
    pub fn new(config: GatewayConfig) -> Self {
        let registry = Arc::new(CompetitorRegistry::new());
        let ledger = Arc::new(AccountLedger::new());
        let market = Arc::new(TransferMarket::new(
            Arc::clone(&registry),
            Arc::clone(&ledger),
            config.market.clone(),
        ));
        Self { config, registry, ledger, steward: Arc::new(Steward::new()), market }
    }

    pub fn registry(&self) -> &CompetitorRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &AccountLedger {
        &self.ledger
    }

    pub fn steward(&self) -> &Steward {
        &self.steward
    }

    pub fn market(&self) -> &TransferMarket {
        &self.market
    }

    /// Open a participant account with the configured opening balance.
    pub async fn open_account(&self, league_id: u64, participant_id: u64) {
        self.ledger.open_account(
            league_id,
            participant_id,
            self.config.default_opening_balance,
            Utc::now(),
        );
    }

    /// Record a session outcome and score it against the stored prediction.
    #[instrument(skip(self, request), fields(grand_prix = request.grand_prix, competitor = request.competitor_id))]
    pub async fn submit_session_result(
        &self,
        request: SessionResultRequest,
    ) -> Result<SessionResultResponse> {
        let kind: SessionKind = request.session_kind.parse()?;
        let bonuses = request.bonuses.normalized();
        let outcome = self.steward.record_result(
            request.grand_prix,
            kind,
            request.competitor_id,
            request.finish_position,
            bonuses,
        )?;
        Ok(match outcome {
            ScoreOutcome::Scored(breakdown) => SessionResultResponse {
                total_points: breakdown.total_points,
                breakdown,
                insufficient_data: false,
            },
            ScoreOutcome::InsufficientData => SessionResultResponse {
                total_points: 0,
                breakdown: ScoreBreakdown::zero(),
                insufficient_data: true,
            },
        })
    }

    /// Record the pre-session ranking prediction for one session.
    pub async fn set_expected_positions(
        &self,
        request: ExpectedPositionsRequest,
    ) -> Result<ExpectedPositionsResponse> {
        let kind: SessionKind = request.session_kind.parse()?;
        let positions: Vec<(CompetitorId, u32)> = request
            .positions
            .iter()
            .map(|entry| (entry.competitor_id, entry.expected_position))
            .collect();
        let accepted = self.steward.set_expected_positions(request.grand_prix, kind, &positions)?;
        Ok(ExpectedPositionsResponse { accepted })
    }

    /// Derive both garage engineers' points from a pilot's session score.
    ///
    /// The comparison flag is taken verbatim from the caller; it is not
    /// inferred from the stored finish positions.
    pub async fn calculate_track_engineer_points(
        &self,
        request: EngineerPointsRequest,
    ) -> Result<EngineerPointsResponse> {
        let kind: SessionKind = request.session_kind.parse()?;
        let comparison: TeammateComparison = request.teammate_comparison.parse()?;

        let pilot = self.registry.get(request.pilot_id)?;
        if pilot.role != Role::Pilot {
            return Err(GatewayError::Validation(format!(
                "competitor {} is a {}, not a pilot",
                request.pilot_id, pilot.role
            )));
        }
        let teammate = self.registry.teammate_of(request.pilot_id)?;
        let pairing = EngineerPairing {
            subject_pilot: request.pilot_id,
            subject_engineer: self.registry.engineer_for(request.pilot_id)?,
            teammate_pilot: teammate,
            teammate_engineer: self.registry.engineer_for(teammate)?,
        };
        let derived =
            self.steward.derive_engineer_points(request.grand_prix, kind, pairing, comparison)?;
        Ok(EngineerPointsResponse {
            derived: derived
                .iter()
                .map(|record| DerivedPointsEntry {
                    engineer_id: record.engineer,
                    points: record.points,
                    comparison: record.comparison,
                })
                .collect(),
        })
    }

    pub async fn place_bid(&self, request: BidRequest) -> Result<BidResponse> {
        let key = AuctionKey {
            item_type: parse_role(&request.item_type)?,
            item_id: request.item_id,
            league: request.league_id,
        };
        let receipt = self.market.place_bid(key, request.bidder_id, request.amount, Utc::now())?;
        Ok(BidResponse {
            accepted: true,
            bid_id: receipt.bid_id,
            amount: receipt.amount,
            minimum_next_bid: receipt.minimum_next_bid,
            close_time: receipt.close_time,
        })
    }

    pub async fn leading_bid(&self, request: LeadingBidRequest) -> Result<LeadingBidResponse> {
        let key = AuctionKey {
            item_type: parse_role(&request.item_type)?,
            item_id: request.item_id,
            league: request.league_id,
        };
        Ok(LeadingBidResponse { amount: self.market.leading_bid(key)? })
    }

    /// Close an elapsed auction and settle it.
    pub async fn close_auction(&self, request: CloseAuctionRequest) -> Result<CloseAuctionResponse> {
        let key = AuctionKey {
            item_type: parse_role(&request.item_type)?,
            item_id: request.item_id,
            league: request.league_id,
        };
        let settlement = self.market.close(key, Utc::now())?;
        Ok(CloseAuctionResponse {
            winner_id: settlement.winner,
            amount: settlement.amount,
            previous_owner: settlement.previous_owner,
            new_clause_value: settlement.clause.value,
            protected_until: settlement.clause.expires_at,
        })
    }

    pub async fn clause_buyout(&self, request: BuyoutRequest) -> Result<BuyoutResponse> {
        let receipt = self.market.apply_buyout(
            request.league_id,
            request.competitor_id,
            request.requester_id,
            Utc::now(),
        )?;
        Ok(BuyoutResponse {
            price: receipt.price,
            previous_owner: receipt.previous_owner,
            new_clause_value: receipt.clause.value,
            protected_until: receipt.clause.expires_at,
        })
    }

    pub async fn clause_upgrade(
        &self,
        request: UpgradeClauseRequest,
    ) -> Result<UpgradeClauseResponse> {
        let new_clause_value = self.market.upgrade_clause(
            request.league_id,
            request.competitor_id,
            request.requester_id,
            request.investment,
        )?;
        Ok(UpgradeClauseResponse { new_clause_value })
    }

    /// League bootstrap: assign a competitor and seed its clause.
    pub async fn grant_competitor(
        &self,
        request: GrantCompetitorRequest,
    ) -> Result<GrantCompetitorResponse> {
        let clause = self.market.grant(
            request.league_id,
            request.competitor_id,
            request.owner_id,
            request.price,
            Utc::now(),
        )?;
        Ok(GrantCompetitorResponse {
            clause_value: clause.value,
            protected_until: clause.expires_at,
        })
    }

    /// Apply, recompute or clear a grand prix's points for a league.
    ///
    /// `Update` of an already-finalized pair is a no-op success that
    /// reports the advisory `already_calculated_count`.
    pub async fn lineup_points(
        &self,
        action: LineupAction,
        request: LineupPointsRequest,
    ) -> Result<LineupPointsResponse> {
        let entries = self.registry.owned_entries(request.league_id);
        let response = match action {
            LineupAction::Update => {
                let outcome =
                    self.steward.finalize_lineup(request.league_id, request.grand_prix, &entries);
                LineupPointsResponse {
                    count: outcome.count,
                    already_calculated_count: outcome.already_calculated_count,
                }
            }
            LineupAction::Reset => {
                let outcome =
                    self.steward.reset_lineup(request.league_id, request.grand_prix, &entries);
                LineupPointsResponse {
                    count: outcome.count,
                    already_calculated_count: outcome.already_calculated_count,
                }
            }
            LineupAction::Clear => {
                let count = self.steward.clear_lineup(request.league_id, request.grand_prix);
                LineupPointsResponse { count, already_calculated_count: 0 }
            }
        };
        Ok(response)
    }

    pub async fn standings(&self, league_id: u64) -> StandingsResponse {
        StandingsResponse {
            standings: self
                .steward
                .standings(league_id)
                .into_iter()
                .map(|(participant_id, total_points)| StandingsEntry {
                    participant_id,
                    total_points,
                })
                .collect(),
        }
    }

    /// A competitor's points across one grand-prix weekend, if scored.
    pub async fn competitor_weekend_points(
        &self,
        grand_prix: u32,
        competitor_id: u32,
    ) -> Option<i64> {
        self.steward.weekend_total(grand_prix, competitor_id)
    }
}

fn parse_role(value: &str) -> Result<Role> {
    match value {
        "pilot" => Ok(Role::Pilot),
        "track_engineer" => Ok(Role::TrackEngineer),
        "chief_engineer" => Ok(Role::ChiefEngineer),
        "team_constructor" => Ok(Role::TeamConstructor),
        other => Err(GatewayError::Validation(format!("unknown item type: {other}"))),
    }
}
