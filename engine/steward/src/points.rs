//! Point calculation for a single session result.
//!
//! The base score is the signed difference between the predicted and the
//! actual finish position. Bonus events are additive on top, independent of
//! the sign of that difference.

use crate::bonus::BonusSet;
use crate::error::{Result, StewardError};
use crate::types::{Points, SessionKind};
use serde::{Deserialize, Serialize};

pub const START_POSITION_WEIGHT: Points = 3;
pub const CLEAN_OVERTAKE_POINTS: Points = 2;
pub const POSITION_LOST_PENALTY: Points = 1;
pub const FASTEST_LAP_POINTS: Points = 5;
/// Fastest lap only pays when finishing inside the top ten.
pub const FASTEST_LAP_MAX_FINISH: u32 = 10;
pub const CAUSED_VSC_PENALTY: Points = 5;
pub const CAUSED_SC_PENALTY: Points = 8;
pub const CAUSED_RED_FLAG_PENALTY: Points = 12;
pub const DNF_DRIVER_ERROR_PENALTY: Points = 10;
pub const DNF_NO_FAULT_PENALTY: Points = 3;

/// Decomposition of one session score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub delta_points: Points,
    pub bonus_points: Points,
    pub total_points: Points,
}

impl ScoreBreakdown {
    pub fn zero() -> Self {
        Self { delta_points: 0, bonus_points: 0, total_points: 0 }
    }

    /// A score with no bonus decomposition; derived entries carry their
    /// whole value in the delta column.
    pub fn flat(total: Points) -> Self {
        Self { delta_points: total, bonus_points: 0, total_points: total }
    }
}

/// Compute the point total for one competitor in one session.
///
/// `expected` and `finish` are 1-based ranks; zero means the value is
/// missing, which is reported as `InsufficientData` rather than scored
/// from defaults.
pub fn compute_points(
    expected: u32,
    finish: u32,
    kind: SessionKind,
    bonuses: &BonusSet,
) -> Result<ScoreBreakdown> {
    if expected == 0 || finish == 0 {
        return Err(StewardError::InsufficientData);
    }
    bonuses.validate_for(kind)?;

    let delta = Points::from(expected) - Points::from(finish);

    let mut bonus: Points = 0;
    bonus += Points::from(bonuses.positions_gained_at_start) * START_POSITION_WEIGHT;
    bonus += Points::from(bonuses.clean_overtakes) * CLEAN_OVERTAKE_POINTS;
    bonus -= Points::from(bonuses.net_positions_lost) * POSITION_LOST_PENALTY;
    if bonuses.fastest_lap && finish <= FASTEST_LAP_MAX_FINISH {
        bonus += FASTEST_LAP_POINTS;
    }
    if bonuses.caused_vsc {
        bonus -= CAUSED_VSC_PENALTY;
    }
    if bonuses.caused_sc {
        bonus -= CAUSED_SC_PENALTY;
    }
    if bonuses.caused_red_flag {
        bonus -= CAUSED_RED_FLAG_PENALTY;
    }
    if bonuses.dnf_driver_error {
        bonus -= DNF_DRIVER_ERROR_PENALTY;
    }
    if bonuses.dnf_no_fault {
        bonus -= DNF_NO_FAULT_PENALTY;
    }

    Ok(ScoreBreakdown { delta_points: delta, bonus_points: bonus, total_points: delta + bonus })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bonuses_score_exactly_the_delta() {
        for expected in 1..=20u32 {
            for finish in 1..=20u32 {
                let score =
                    compute_points(expected, finish, SessionKind::Race, &BonusSet::default())
                        .unwrap();
                assert_eq!(score.delta_points, i64::from(expected) - i64::from(finish));
                assert_eq!(score.bonus_points, 0);
                assert_eq!(score.total_points, score.delta_points);
            }
        }
    }

    #[test]
    fn missing_positions_signal_insufficient_data() {
        let bonuses = BonusSet::default();
        assert_eq!(
            compute_points(0, 5, SessionKind::Race, &bonuses),
            Err(StewardError::InsufficientData)
        );
        assert_eq!(
            compute_points(5, 0, SessionKind::Race, &bonuses),
            Err(StewardError::InsufficientData)
        );
    }

    #[test]
    fn fastest_lap_boundary_at_tenth_place() {
        let bonuses = BonusSet { fastest_lap: true, ..Default::default() };
        let at_ten = compute_points(10, 10, SessionKind::Race, &bonuses).unwrap();
        assert_eq!(at_ten.bonus_points, FASTEST_LAP_POINTS);

        let at_eleven = compute_points(11, 11, SessionKind::Race, &bonuses).unwrap();
        assert_eq!(at_eleven.bonus_points, 0);
    }

    #[test]
    fn start_positions_weigh_three_per_unit_and_can_subtract() {
        let gained = BonusSet { positions_gained_at_start: 2, ..Default::default() };
        assert_eq!(compute_points(5, 5, SessionKind::Race, &gained).unwrap().bonus_points, 6);

        let lost = BonusSet { positions_gained_at_start: -2, ..Default::default() };
        assert_eq!(compute_points(5, 5, SessionKind::Race, &lost).unwrap().bonus_points, -6);
    }

    #[test]
    fn incident_penalties_stack() {
        let bonuses = BonusSet {
            caused_vsc: true,
            caused_sc: true,
            caused_red_flag: true,
            dnf_driver_error: true,
            ..Default::default()
        };
        let score = compute_points(8, 8, SessionKind::Race, &bonuses).unwrap();
        assert_eq!(score.bonus_points, -(5 + 8 + 12 + 10));
    }

    #[test]
    fn qualy_red_flag_is_scored() {
        let bonuses = BonusSet { caused_red_flag: true, ..Default::default() };
        let score = compute_points(3, 1, SessionKind::Qualy, &bonuses).unwrap();
        assert_eq!(score.delta_points, 2);
        assert_eq!(score.bonus_points, -CAUSED_RED_FLAG_PENALTY);
        assert_eq!(score.total_points, 2 - CAUSED_RED_FLAG_PENALTY);
    }

    #[test]
    fn race_weekend_scenario() {
        // Outqualified the prediction by three, gained two at the start,
        // took the fastest lap: 3 + 2*3 + 5 = 17.
        let bonuses = BonusSet {
            positions_gained_at_start: 2,
            fastest_lap: true,
            ..Default::default()
        };
        let score = compute_points(5, 2, SessionKind::Race, &bonuses).unwrap();
        assert_eq!(score.delta_points, 3);
        assert_eq!(score.bonus_points, 11);
        assert_eq!(score.total_points, 17);
    }
}
