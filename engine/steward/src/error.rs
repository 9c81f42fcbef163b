//! Error types for the steward engine

use crate::types::{GrandPrixId, SessionKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StewardError {
    #[error("insufficient data: expected position and finish position are both required")]
    InsufficientData,

    #[error("unknown session kind: {0}")]
    InvalidSessionKind(String),

    #[error("unknown teammate comparison: {0}")]
    InvalidComparison(String),

    #[error("bonus field `{field}` does not apply to {kind} sessions")]
    BonusNotApplicable { field: &'static str, kind: SessionKind },

    #[error("position rank must be at least 1")]
    InvalidRank,

    #[error("competitor {0} appears more than once in the submitted ranking")]
    DuplicateRanking(u32),

    #[error("a session result is already recorded; the prediction can no longer change")]
    ResultAlreadyRecorded,

    #[error("grand prix {0} has finalized lineup points; results are read-only")]
    GrandPrixFinalized(GrandPrixId),
}

pub type Result<T> = std::result::Result<T, StewardError>;
