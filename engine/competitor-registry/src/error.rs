//! Error types for the competitor registry

use steward::CompetitorId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("competitor not found: {0}")]
    CompetitorNotFound(CompetitorId),

    #[error("competitor {0} is already registered")]
    DuplicateCompetitor(CompetitorId),

    #[error("competitor {0} is not a pilot")]
    NotAPilot(CompetitorId),

    #[error("track engineer {0} has no linked pilot")]
    MissingPilotLink(CompetitorId),

    #[error("track engineer {engineer} links to {pilot}, which is not a registered pilot")]
    InvalidPilotLink { engineer: CompetitorId, pilot: CompetitorId },

    #[error("pilot {0} has no team-mate")]
    TeammateNotFound(CompetitorId),

    #[error("pilot {0} has no track engineer")]
    EngineerNotFound(CompetitorId),

    #[error("catalog file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
