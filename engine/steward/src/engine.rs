//! The steward engine: one facade over the scoring books that enforces the
//! cross-book rules (predictions freeze once results exist, results freeze
//! once a grand prix is finalized, derived scores overwrite in place).

use crate::bonus::BonusSet;
use crate::derive::{DerivedPoints, derive_points};
use crate::error::{Result, StewardError};
use crate::expected::ExpectedPositionBook;
use crate::lineup::{FinalizeOutcome, LineupBook};
use crate::points::{ScoreBreakdown, compute_points};
use crate::points_book::PointsBook;
use crate::results::{SessionResult, SessionResultStore};
use crate::types::{
    CompetitorId, GrandPrixId, LeagueId, ParticipantId, Points, SessionKey, SessionKind,
    TeammateComparison,
};
use tracing::debug;

/// Result of recording a session outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    Scored(ScoreBreakdown),
    /// The result was stored but no prediction exists yet, so no points
    /// were computed.
    InsufficientData,
}

/// Pilot/engineer identities needed for one derivation call.
#[derive(Debug, Clone, Copy)]
pub struct EngineerPairing {
    pub subject_pilot: CompetitorId,
    pub subject_engineer: CompetitorId,
    pub teammate_pilot: CompetitorId,
    pub teammate_engineer: CompetitorId,
}

#[derive(Debug, Default)]
pub struct Steward {
    expected: ExpectedPositionBook,
    results: SessionResultStore,
    points: PointsBook,
    lineups: LineupBook,
}

impl Steward {
    pub fn new() -> Self {
        Self {
            expected: ExpectedPositionBook::new(),
            results: SessionResultStore::new(),
            points: PointsBook::new(),
            lineups: LineupBook::new(),
        }
    }

    /// Record one prediction. Rejected once the session outcome is known.
    pub fn set_expected_position(
        &self,
        grand_prix: GrandPrixId,
        kind: SessionKind,
        competitor: CompetitorId,
        rank: u32,
    ) -> Result<()> {
        let key = SessionKey::new(grand_prix, kind, competitor);
        if self.results.contains(&key) {
            return Err(StewardError::ResultAlreadyRecorded);
        }
        self.expected.set(key, rank)
    }

    /// Record a batch of predictions for one session. The batch is validated
    /// as a whole before anything is written.
    pub fn set_expected_positions(
        &self,
        grand_prix: GrandPrixId,
        kind: SessionKind,
        positions: &[(CompetitorId, u32)],
    ) -> Result<usize> {
        let mut seen = std::collections::HashSet::new();
        for &(competitor, rank) in positions {
            if rank == 0 {
                return Err(StewardError::InvalidRank);
            }
            if !seen.insert(competitor) {
                return Err(StewardError::DuplicateRanking(competitor));
            }
            if self.results.contains(&SessionKey::new(grand_prix, kind, competitor)) {
                return Err(StewardError::ResultAlreadyRecorded);
            }
        }
        for &(competitor, rank) in positions {
            self.expected.set(SessionKey::new(grand_prix, kind, competitor), rank)?;
        }
        debug!(grand_prix, %kind, count = positions.len(), "expected positions recorded");
        Ok(positions.len())
    }

    /// Store a session outcome and score it if a prediction exists.
    ///
    /// Results are upserts until the grand prix is finalized anywhere;
    /// after that they are read-only.
    pub fn record_result(
        &self,
        grand_prix: GrandPrixId,
        kind: SessionKind,
        competitor: CompetitorId,
        finish_position: u32,
        bonuses: BonusSet,
    ) -> Result<ScoreOutcome> {
        if finish_position == 0 {
            return Err(StewardError::InvalidRank);
        }
        if self.lineups.grand_prix_finalized(grand_prix) {
            return Err(StewardError::GrandPrixFinalized(grand_prix));
        }
        bonuses.validate_for(kind)?;

        let key = SessionKey::new(grand_prix, kind, competitor);
        self.results.upsert(key, SessionResult { finish_position, bonuses });

        let Some(expected) = self.expected.get(&key) else {
            debug!(grand_prix, %kind, competitor, "result stored without prediction");
            return Ok(ScoreOutcome::InsufficientData);
        };
        let score = compute_points(expected, finish_position, kind, &bonuses)?;
        self.points.upsert(key, score);
        Ok(ScoreOutcome::Scored(score))
    }

    /// Recompute and persist the score for an already-recorded session.
    pub fn score_session(
        &self,
        grand_prix: GrandPrixId,
        kind: SessionKind,
        competitor: CompetitorId,
    ) -> Result<ScoreBreakdown> {
        let key = SessionKey::new(grand_prix, kind, competitor);
        let expected = self.expected.get(&key).ok_or(StewardError::InsufficientData)?;
        let result = self.results.get(&key).ok_or(StewardError::InsufficientData)?;
        let score = compute_points(expected, result.finish_position, kind, &result.bonuses)?;
        self.points.upsert(key, score);
        Ok(score)
    }

    /// Derive and persist track-engineer points for both sides of a garage.
    ///
    /// The subject pilot's engineer is scored with the given comparison, the
    /// team-mate's engineer with the opposite one, each from their own
    /// pilot's session total. Re-running the derivation overwrites the two
    /// entries rather than duplicating them.
    pub fn derive_engineer_points(
        &self,
        grand_prix: GrandPrixId,
        kind: SessionKind,
        pairing: EngineerPairing,
        comparison: TeammateComparison,
    ) -> Result<[DerivedPoints; 2]> {
        let subject_key = SessionKey::new(grand_prix, kind, pairing.subject_pilot);
        let teammate_key = SessionKey::new(grand_prix, kind, pairing.teammate_pilot);
        let subject_points =
            self.points.get(&subject_key).ok_or(StewardError::InsufficientData)?.total_points;
        let teammate_points =
            self.points.get(&teammate_key).ok_or(StewardError::InsufficientData)?.total_points;

        let derived = [
            DerivedPoints {
                engineer: pairing.subject_engineer,
                points: derive_points(subject_points, comparison),
                comparison,
            },
            DerivedPoints {
                engineer: pairing.teammate_engineer,
                points: derive_points(teammate_points, comparison.opposite()),
                comparison: comparison.opposite(),
            },
        ];
        for record in &derived {
            self.points.upsert(
                SessionKey::new(grand_prix, kind, record.engineer),
                ScoreBreakdown::flat(record.points),
            );
        }
        debug!(grand_prix, %kind, engineer_a = derived[0].engineer, engineer_b = derived[1].engineer,
            "engineer points derived");
        Ok(derived)
    }

    pub fn session_score(
        &self,
        grand_prix: GrandPrixId,
        kind: SessionKind,
        competitor: CompetitorId,
    ) -> Option<ScoreBreakdown> {
        self.points.get(&SessionKey::new(grand_prix, kind, competitor))
    }

    pub fn weekend_total(&self, grand_prix: GrandPrixId, competitor: CompetitorId) -> Option<Points> {
        self.points.weekend_total(grand_prix, competitor)
    }

    pub fn finalize_lineup(
        &self,
        league: LeagueId,
        grand_prix: GrandPrixId,
        entries: &[(ParticipantId, CompetitorId)],
    ) -> FinalizeOutcome {
        self.lineups.finalize(league, grand_prix, entries, &self.points)
    }

    /// Clear and re-apply a pair, picking up recomputed scores.
    pub fn reset_lineup(
        &self,
        league: LeagueId,
        grand_prix: GrandPrixId,
        entries: &[(ParticipantId, CompetitorId)],
    ) -> FinalizeOutcome {
        self.lineups.clear(league, grand_prix);
        self.lineups.finalize(league, grand_prix, entries, &self.points)
    }

    pub fn clear_lineup(&self, league: LeagueId, grand_prix: GrandPrixId) -> u32 {
        self.lineups.clear(league, grand_prix)
    }

    pub fn standings(&self, league: LeagueId) -> Vec<(ParticipantId, Points)> {
        self.lineups.standings(league)
    }
}
