//! Pre-session ranking predictions, keyed per grand prix and session.

use crate::error::{Result, StewardError};
use crate::types::SessionKey;
use dashmap::DashMap;

/// Expected finishing position per (grand prix, session, competitor).
#[derive(Debug, Default)]
pub struct ExpectedPositionBook {
    ranks: DashMap<SessionKey, u32>,
}

impl ExpectedPositionBook {
    pub fn new() -> Self {
        Self { ranks: DashMap::new() }
    }

    /// Record a prediction. Ranks are 1-based.
    pub fn set(&self, key: SessionKey, rank: u32) -> Result<()> {
        if rank == 0 {
            return Err(StewardError::InvalidRank);
        }
        self.ranks.insert(key, rank);
        Ok(())
    }

    pub fn get(&self, key: &SessionKey) -> Option<u32> {
        self.ranks.get(key).map(|r| *r)
    }

    pub fn contains(&self, key: &SessionKey) -> bool {
        self.ranks.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
