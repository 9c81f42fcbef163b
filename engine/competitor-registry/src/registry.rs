use crate::error::{RegistryError, Result};
use crate::types::{Competitor, CompetitorCatalog, Ownership, Role};
use account_ledger::Funds;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::path::Path;
use steward::{CompetitorId, LeagueId, ParticipantId, TeamId};
use tracing::{debug, info};

/// Competitor Registry - catalog and per-league ownership
///
/// Holds the global catalog (identity, role, team, garage links) plus one
/// ownership record per (league, competitor). Lookups the scoring and
/// market paths need (team-mate, engineer-for-pilot) are index maps built
/// at registration time.
#[derive(Debug, Default)]
pub struct CompetitorRegistry {
    competitors: DashMap<CompetitorId, Competitor>,

    /// Pilots per team, for team-mate resolution.
    pilots_by_team: DashMap<TeamId, Vec<CompetitorId>>,

    /// Track engineer per pilot.
    engineer_by_pilot: DashMap<CompetitorId, CompetitorId>,

    /// Per-league ownership records.
    ownership: DashMap<(LeagueId, CompetitorId), Ownership>,
}

impl CompetitorRegistry {
    pub fn new() -> Self {
        Self {
            competitors: DashMap::new(),
            pilots_by_team: DashMap::new(),
            engineer_by_pilot: DashMap::new(),
            ownership: DashMap::new(),
        }
    }

    /// Register one competitor. Track engineers must be registered after
    /// the pilot they link to.
    pub fn register(&self, competitor: Competitor) -> Result<()> {
        if self.competitors.contains_key(&competitor.id) {
            return Err(RegistryError::DuplicateCompetitor(competitor.id));
        }
        if competitor.role == Role::TrackEngineer {
            let pilot =
                competitor.linked_pilot.ok_or(RegistryError::MissingPilotLink(competitor.id))?;
            let is_pilot =
                self.competitors.get(&pilot).map(|c| c.role == Role::Pilot).unwrap_or(false);
            if !is_pilot {
                return Err(RegistryError::InvalidPilotLink { engineer: competitor.id, pilot });
            }
            self.engineer_by_pilot.insert(pilot, competitor.id);
        }
        if competitor.role == Role::Pilot {
            self.pilots_by_team.entry(competitor.team).or_default().push(competitor.id);
        }
        debug!(id = competitor.id, role = %competitor.role, "competitor registered");
        self.competitors.insert(competitor.id, competitor);
        Ok(())
    }

    /// Load a competitor catalog from a JSON file.
    ///
    /// Registers in two passes so engineers can link to pilots regardless
    /// of file order.
    pub fn load_from_file<P: AsRef<Path>>(&self, file_path: P) -> Result<usize> {
        info!("loading competitor catalog from {:?}", file_path.as_ref());
        let json = std::fs::read_to_string(&file_path)?;
        let catalog: CompetitorCatalog = serde_json::from_str(&json)?;

        let mut count = 0;
        for competitor in catalog.competitors.iter().filter(|c| c.role != Role::TrackEngineer) {
            self.register(competitor.clone())?;
            count += 1;
        }
        for competitor in catalog.competitors.iter().filter(|c| c.role == Role::TrackEngineer) {
            self.register(competitor.clone())?;
            count += 1;
        }

        info!("registered {count} competitors");
        Ok(count)
    }

    pub fn get(&self, id: CompetitorId) -> Result<Competitor> {
        self.competitors.get(&id).map(|c| c.clone()).ok_or(RegistryError::CompetitorNotFound(id))
    }

    pub fn market_value(&self, id: CompetitorId) -> Result<Funds> {
        self.competitors
            .get(&id)
            .map(|c| c.market_value)
            .ok_or(RegistryError::CompetitorNotFound(id))
    }

    /// The other pilot on the same team.
    pub fn teammate_of(&self, pilot: CompetitorId) -> Result<CompetitorId> {
        let competitor = self.get(pilot)?;
        if competitor.role != Role::Pilot {
            return Err(RegistryError::NotAPilot(pilot));
        }
        self.pilots_by_team
            .get(&competitor.team)
            .and_then(|pilots| pilots.iter().find(|&&id| id != pilot).copied())
            .ok_or(RegistryError::TeammateNotFound(pilot))
    }

    /// The track engineer tied to a pilot.
    pub fn engineer_for(&self, pilot: CompetitorId) -> Result<CompetitorId> {
        self.engineer_by_pilot
            .get(&pilot)
            .map(|e| *e)
            .ok_or(RegistryError::EngineerNotFound(pilot))
    }

    pub fn owner_of(&self, league: LeagueId, competitor: CompetitorId) -> Option<Ownership> {
        self.ownership.get(&(league, competitor)).map(|o| *o)
    }

    /// Record an ownership change; returns the previous owner, if any.
    pub fn transfer_owner(
        &self,
        league: LeagueId,
        competitor: CompetitorId,
        new_owner: ParticipantId,
        price: Funds,
        at: DateTime<Utc>,
    ) -> Result<Option<ParticipantId>> {
        if !self.competitors.contains_key(&competitor) {
            return Err(RegistryError::CompetitorNotFound(competitor));
        }
        let previous = self
            .ownership
            .insert(
                (league, competitor),
                Ownership { owner: new_owner, acquired_price: price, acquired_at: at },
            )
            .map(|o| o.owner);
        info!(league, competitor, new_owner, ?previous, %price, "ownership transferred");
        Ok(previous)
    }

    /// Every (owner, competitor) pair in a league.
    pub fn owned_entries(&self, league: LeagueId) -> Vec<(ParticipantId, CompetitorId)> {
        self.ownership
            .iter()
            .filter(|entry| entry.key().0 == league)
            .map(|entry| (entry.value().owner, entry.key().1))
            .collect()
    }
}
