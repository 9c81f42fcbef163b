use account_ledger::Funds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use steward::{CompetitorId, ParticipantId, TeamId};

/// What a competitor is within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Pilot,
    TrackEngineer,
    ChiefEngineer,
    TeamConstructor,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Pilot => "pilot",
            Role::TrackEngineer => "track_engineer",
            Role::ChiefEngineer => "chief_engineer",
            Role::TeamConstructor => "team_constructor",
        };
        write!(f, "{s}")
    }
}

/// A scoreable, ownable entity: pilot, engineer or constructor.
///
/// Competitors are never deleted, only re-owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub name: String,
    pub role: Role,
    pub team: TeamId,
    pub market_value: Funds,
    /// For track engineers: the pilot they work for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_pilot: Option<CompetitorId>,
}

/// Who holds a competitor inside one league, and at what price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ownership {
    pub owner: ParticipantId,
    pub acquired_price: Funds,
    pub acquired_at: DateTime<Utc>,
}

/// On-disk catalog format for seeding the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorCatalog {
    pub competitors: Vec<Competitor>,
}
