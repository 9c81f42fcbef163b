//! Actual session outcomes, keyed per grand prix and session.

use crate::bonus::BonusSet;
use crate::types::SessionKey;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Outcome of one session for one competitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub finish_position: u32,
    pub bonuses: BonusSet,
}

/// One result per (grand prix, session, competitor); upsert semantics.
#[derive(Debug, Default)]
pub struct SessionResultStore {
    results: DashMap<SessionKey, SessionResult>,
}

impl SessionResultStore {
    pub fn new() -> Self {
        Self { results: DashMap::new() }
    }

    pub fn upsert(&self, key: SessionKey, result: SessionResult) {
        self.results.insert(key, result);
    }

    pub fn get(&self, key: &SessionKey) -> Option<SessionResult> {
        self.results.get(key).map(|r| *r)
    }

    pub fn contains(&self, key: &SessionKey) -> bool {
        self.results.contains_key(key)
    }
}
