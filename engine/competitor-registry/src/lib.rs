//! Competitor catalog and per-league ownership.

mod error;
mod registry;
mod types;

pub use error::{RegistryError, Result};
pub use registry::CompetitorRegistry;
pub use types::{Competitor, CompetitorCatalog, Ownership, Role};
