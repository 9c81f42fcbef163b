use crate::error::StewardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type CompetitorId = u32;
pub type TeamId = u32;
pub type GrandPrixId = u32;
pub type LeagueId = u64;
pub type ParticipantId = u64;
pub type Points = i64;

/// Session within a grand-prix weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Practice,
    Qualy,
    Race,
}

impl SessionKind {
    pub const ALL: [SessionKind; 3] = [SessionKind::Practice, SessionKind::Qualy, SessionKind::Race];
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionKind::Practice => "practice",
            SessionKind::Qualy => "qualy",
            SessionKind::Race => "race",
        };
        write!(f, "{s}")
    }
}

impl FromStr for SessionKind {
    type Err = StewardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "practice" => Ok(SessionKind::Practice),
            "qualy" => Ok(SessionKind::Qualy),
            "race" => Ok(SessionKind::Race),
            other => Err(StewardError::InvalidSessionKind(other.to_string())),
        }
    }
}

/// Whether a pilot finished ahead of or behind their team-mate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeammateComparison {
    Ahead,
    Behind,
}

impl TeammateComparison {
    pub fn opposite(self) -> Self {
        match self {
            TeammateComparison::Ahead => TeammateComparison::Behind,
            TeammateComparison::Behind => TeammateComparison::Ahead,
        }
    }
}

impl fmt::Display for TeammateComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TeammateComparison::Ahead => "ahead",
            TeammateComparison::Behind => "behind",
        };
        write!(f, "{s}")
    }
}

impl FromStr for TeammateComparison {
    type Err = StewardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ahead" => Ok(TeammateComparison::Ahead),
            "behind" => Ok(TeammateComparison::Behind),
            other => Err(StewardError::InvalidComparison(other.to_string())),
        }
    }
}

/// Composite key for per-session records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub grand_prix: GrandPrixId,
    pub kind: SessionKind,
    pub competitor: CompetitorId,
}

impl SessionKey {
    pub fn new(grand_prix: GrandPrixId, kind: SessionKind, competitor: CompetitorId) -> Self {
        Self { grand_prix, kind, competitor }
    }
}
