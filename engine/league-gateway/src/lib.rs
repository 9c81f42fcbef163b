//! Request/response boundary for the fantasy grand-prix league core.
//!
//! The surrounding API layer owns transport, sessions and rendering; it
//! calls into this crate with explicit identifiers and gets typed
//! responses or an [`ErrorMessage`] reason code back.

mod config;
mod error;
mod gateway;
mod logging;
mod messages;
mod normalization;

pub use config::{GatewayConfig, LoggingConfig};
pub use error::{GatewayError, Result};
pub use gateway::LeagueGateway;
pub use logging::initialize_logging;
pub use messages::*;
pub use normalization::{BonusFields, LooseBool};
