//! Track-engineer points derived from a pilot's session score.

use crate::types::{CompetitorId, Points, TeammateComparison};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// One derived record: an engineer's points for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedPoints {
    pub engineer: CompetitorId,
    pub points: Points,
    pub comparison: TeammateComparison,
}

/// Derive an engineer's points from their pilot's session total.
///
/// `Ahead` pays half the pilot's points. `Behind` pays a fifth of the
/// magnitude of the pilot's points, so the result on that branch is never
/// negative even when the pilot scored below zero. Rounding is
/// half-away-from-zero.
pub fn derive_points(pilot_points: Points, comparison: TeammateComparison) -> Points {
    let (base, factor) = match comparison {
        TeammateComparison::Ahead => (pilot_points, Decimal::new(5, 1)),
        TeammateComparison::Behind => (pilot_points.abs(), Decimal::new(2, 1)),
    };
    (Decimal::from(base) * factor)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}
