// Steward - deterministic grand-prix scoring engine

mod bonus;
mod derive;
mod engine;
mod error;
mod expected;
mod lineup;
mod points;
mod points_book;
mod results;
mod types;

pub use bonus::BonusSet;
pub use derive::{DerivedPoints, derive_points};
pub use engine::{EngineerPairing, ScoreOutcome, Steward};
pub use error::{Result, StewardError};
pub use expected::ExpectedPositionBook;
pub use lineup::{FinalizeOutcome, LineupBook};
pub use points::{
    CAUSED_RED_FLAG_PENALTY, CAUSED_SC_PENALTY, CAUSED_VSC_PENALTY, CLEAN_OVERTAKE_POINTS,
    DNF_DRIVER_ERROR_PENALTY, DNF_NO_FAULT_PENALTY, FASTEST_LAP_MAX_FINISH, FASTEST_LAP_POINTS,
    POSITION_LOST_PENALTY, START_POSITION_WEIGHT, ScoreBreakdown, compute_points,
};
pub use points_book::PointsBook;
pub use results::{SessionResult, SessionResultStore};
pub use types::{
    CompetitorId, GrandPrixId, LeagueId, ParticipantId, Points, SessionKey, SessionKind, TeamId,
    TeammateComparison,
};
