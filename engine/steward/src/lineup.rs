//! League lineup finalization and standings.
//!
//! Applying a grand prix's points to a league is guarded by an atomic
//! applied-marker per (league, grand prix): a second application is reported
//! as already calculated instead of double-crediting the standings.

use crate::points_book::PointsBook;
use crate::types::{CompetitorId, GrandPrixId, LeagueId, ParticipantId, Points};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Outcome of a finalization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeOutcome {
    /// Lineup entries whose points were applied by this call.
    pub count: u32,
    /// Entries skipped because the pair was already finalized.
    pub already_calculated_count: u32,
}

#[derive(Debug, Clone)]
struct AppliedRow {
    participant: ParticipantId,
    competitor: CompetitorId,
    points: Points,
}

/// Standings totals plus the per-(league, grand prix) applied record.
#[derive(Debug, Default)]
pub struct LineupBook {
    applied: DashMap<(LeagueId, GrandPrixId), Vec<AppliedRow>>,
    totals: DashMap<(LeagueId, ParticipantId), Points>,
}

impl LineupBook {
    pub fn new() -> Self {
        Self { applied: DashMap::new(), totals: DashMap::new() }
    }

    /// Apply each owned competitor's weekend points to its owner's total.
    ///
    /// Entries without any computed points are skipped. Idempotent: on a
    /// pair that was already finalized nothing is applied and every entry
    /// is reported in `already_calculated_count`.
    pub fn finalize(
        &self,
        league: LeagueId,
        grand_prix: GrandPrixId,
        entries: &[(ParticipantId, CompetitorId)],
        points: &PointsBook,
    ) -> FinalizeOutcome {
        match self.applied.entry((league, grand_prix)) {
            Entry::Occupied(_) => {
                warn!(league, grand_prix, "lineup points already calculated");
                FinalizeOutcome { count: 0, already_calculated_count: entries.len() as u32 }
            }
            Entry::Vacant(slot) => {
                let mut rows = Vec::new();
                for &(participant, competitor) in entries {
                    let Some(total) = points.weekend_total(grand_prix, competitor) else {
                        continue;
                    };
                    *self.totals.entry((league, participant)).or_insert(0) += total;
                    rows.push(AppliedRow { participant, competitor, points: total });
                }
                let count = rows.len() as u32;
                slot.insert(rows);
                info!(league, grand_prix, count, "lineup points applied");
                FinalizeOutcome { count, already_calculated_count: 0 }
            }
        }
    }

    /// Undo a finalization: subtract the applied rows and drop the marker.
    /// Returns the number of rows cleared; zero when nothing was applied.
    pub fn clear(&self, league: LeagueId, grand_prix: GrandPrixId) -> u32 {
        let Some((_, rows)) = self.applied.remove(&(league, grand_prix)) else {
            return 0;
        };
        for row in &rows {
            if let Some(mut total) = self.totals.get_mut(&(league, row.participant)) {
                *total -= row.points;
            }
        }
        info!(league, grand_prix, count = rows.len(), "lineup points cleared");
        rows.len() as u32
    }

    /// Whether any league has finalized this grand prix.
    pub fn grand_prix_finalized(&self, grand_prix: GrandPrixId) -> bool {
        self.applied.iter().any(|entry| entry.key().1 == grand_prix)
    }

    /// Participant totals for a league, highest first.
    pub fn standings(&self, league: LeagueId) -> Vec<(ParticipantId, Points)> {
        let mut rows: Vec<(ParticipantId, Points)> = self
            .totals
            .iter()
            .filter(|entry| entry.key().0 == league)
            .map(|entry| (entry.key().1, *entry.value()))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::ScoreBreakdown;
    use crate::types::{SessionKey, SessionKind};

    fn seeded_points() -> PointsBook {
        let points = PointsBook::new();
        points.upsert(
            SessionKey::new(7, SessionKind::Race, 44),
            ScoreBreakdown { delta_points: 3, bonus_points: 11, total_points: 14 },
        );
        points.upsert(
            SessionKey::new(7, SessionKind::Race, 16),
            ScoreBreakdown { delta_points: -2, bonus_points: 0, total_points: -2 },
        );
        points
    }

    #[test]
    fn second_finalization_is_a_no_op() {
        let book = LineupBook::new();
        let points = seeded_points();
        let entries = [(100u64, 44u32), (200u64, 16u32)];

        let first = book.finalize(5, 7, &entries, &points);
        assert_eq!(first, FinalizeOutcome { count: 2, already_calculated_count: 0 });

        let second = book.finalize(5, 7, &entries, &points);
        assert_eq!(second, FinalizeOutcome { count: 0, already_calculated_count: 2 });

        let standings = book.standings(5);
        assert_eq!(standings, vec![(100, 14), (200, -2)]);
    }

    #[test]
    fn unscored_competitors_are_skipped() {
        let book = LineupBook::new();
        let points = seeded_points();
        let outcome = book.finalize(5, 7, &[(100, 44), (300, 99)], &points);
        assert_eq!(outcome.count, 1);
    }

    #[test]
    fn clear_restores_standings() {
        let book = LineupBook::new();
        let points = seeded_points();
        let entries = [(100u64, 44u32)];

        book.finalize(5, 7, &entries, &points);
        assert_eq!(book.clear(5, 7), 1);
        assert_eq!(book.standings(5), vec![(100, 0)]);
        assert!(!book.grand_prix_finalized(7));

        // Cleared pairs can be finalized again.
        let again = book.finalize(5, 7, &entries, &points);
        assert_eq!(again.count, 1);
    }

    #[test]
    fn clear_without_marker_reports_zero() {
        let book = LineupBook::new();
        assert_eq!(book.clear(9, 9), 0);
    }
}
