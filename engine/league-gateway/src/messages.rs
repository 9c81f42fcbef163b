//! Request and response contracts for the surrounding API layer.
//!
//! All amounts are integer cents and round-trip JSON without precision
//! loss. Identifiers are always explicit call parameters; nothing is read
//! from ambient session state.

use crate::normalization::BonusFields;
use account_ledger::Funds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use steward::{ScoreBreakdown, TeammateComparison};
use uuid::Uuid;

/// Record one competitor's session outcome and score it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResultRequest {
    pub grand_prix: u32,
    pub session_kind: String,
    pub competitor_id: u32,
    pub finish_position: u32,
    #[serde(default)]
    pub bonuses: BonusFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResultResponse {
    pub total_points: i64,
    pub breakdown: ScoreBreakdown,
    /// True when the result was stored but could not be scored because the
    /// expected position is missing; points are zero, not defaulted.
    pub insufficient_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedPositionEntry {
    pub competitor_id: u32,
    pub expected_position: u32,
}

/// Pre-session ranking prediction for one session, as a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedPositionsRequest {
    pub grand_prix: u32,
    pub session_kind: String,
    pub positions: Vec<ExpectedPositionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedPositionsResponse {
    pub accepted: usize,
}

/// Derive track-engineer points from a pilot's session score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineerPointsRequest {
    pub grand_prix: u32,
    pub session_kind: String,
    pub pilot_id: u32,
    pub teammate_comparison: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedPointsEntry {
    pub engineer_id: u32,
    pub points: i64,
    pub comparison: TeammateComparison,
}

/// Always exactly two entries: the subject pilot's engineer and the
/// team-mate's engineer with the opposite comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineerPointsResponse {
    pub derived: Vec<DerivedPointsEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidRequest {
    pub item_type: String,
    pub item_id: u32,
    pub league_id: u64,
    pub bidder_id: u64,
    pub amount: Funds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidResponse {
    pub accepted: bool,
    pub bid_id: Uuid,
    pub amount: Funds,
    pub minimum_next_bid: Funds,
    pub close_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadingBidRequest {
    pub item_type: String,
    pub item_id: u32,
    pub league_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadingBidResponse {
    pub amount: Funds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseAuctionRequest {
    pub item_type: String,
    pub item_id: u32,
    pub league_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseAuctionResponse {
    pub winner_id: u64,
    pub amount: Funds,
    pub previous_owner: Option<u64>,
    pub new_clause_value: Funds,
    pub protected_until: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyoutRequest {
    pub competitor_id: u32,
    pub league_id: u64,
    pub requester_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyoutResponse {
    pub price: Funds,
    pub previous_owner: u64,
    pub new_clause_value: Funds,
    pub protected_until: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeClauseRequest {
    pub competitor_id: u32,
    pub league_id: u64,
    pub requester_id: u64,
    pub investment: Funds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeClauseResponse {
    pub new_clause_value: Funds,
}

/// League bootstrap: hand a competitor to a participant outside the
/// auction flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantCompetitorRequest {
    pub competitor_id: u32,
    pub league_id: u64,
    pub owner_id: u64,
    pub price: Funds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantCompetitorResponse {
    pub clause_value: Funds,
    pub protected_until: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineupAction {
    Update,
    Reset,
    Clear,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupPointsRequest {
    pub league_id: u64,
    pub grand_prix: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupPointsResponse {
    pub count: u32,
    /// Non-zero when the pair was already finalized; the call was a no-op
    /// and this is advisory, not a failure.
    pub already_calculated_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub participant_id: u64,
    pub total_points: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub standings: Vec<StandingsEntry>,
}

/// Error envelope returned for every rejected request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// Stable reason code, e.g. `BID_TOO_LOW`.
    pub code: String,
    pub message: String,
}
