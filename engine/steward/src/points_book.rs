//! Computed score breakdowns, persisted per competitor per grand prix.

use crate::points::ScoreBreakdown;
use crate::types::{CompetitorId, GrandPrixId, Points, SessionKey, SessionKind};
use dashmap::DashMap;

/// Persisted scores. Recomputation overwrites the entry for its key.
#[derive(Debug, Default)]
pub struct PointsBook {
    scores: DashMap<SessionKey, ScoreBreakdown>,
}

impl PointsBook {
    pub fn new() -> Self {
        Self { scores: DashMap::new() }
    }

    pub fn upsert(&self, key: SessionKey, score: ScoreBreakdown) {
        self.scores.insert(key, score);
    }

    pub fn get(&self, key: &SessionKey) -> Option<ScoreBreakdown> {
        self.scores.get(key).map(|s| *s)
    }

    /// Sum of a competitor's totals across every session of a grand prix.
    /// `None` when no session has been scored yet.
    pub fn weekend_total(&self, grand_prix: GrandPrixId, competitor: CompetitorId) -> Option<Points> {
        let mut total = 0;
        let mut any = false;
        for kind in SessionKind::ALL {
            if let Some(score) = self.get(&SessionKey::new(grand_prix, kind, competitor)) {
                total += score.total_points;
                any = true;
            }
        }
        any.then_some(total)
    }
}
