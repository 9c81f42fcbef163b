//! Gateway configuration

use account_ledger::Funds;
use serde::{Deserialize, Serialize};
use transfer_market::MarketConfig;

/// Top-level configuration for the league core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Auction and clause tunables.
    pub market: MarketConfig,

    /// Opening balance for newly opened participant accounts.
    pub default_opening_balance: Funds,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Log format (json, pretty).
    pub format: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            market: MarketConfig::default(),
            default_opening_balance: Funds::from_cents(200_000_000),
            logging: LoggingConfig { level: "info".to_string(), format: "pretty".to_string() },
        }
    }
}

impl GatewayConfig {
    /// Defaults with scalar overrides from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(level) = std::env::var("LEAGUE_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(balance) = std::env::var("LEAGUE_OPENING_BALANCE")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
        {
            config.default_opening_balance = Funds::from_cents(balance);
        }
        if let Some(hours) = std::env::var("LEAGUE_AUCTION_DURATION_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
        {
            config.market.auction_duration_hours = hours;
        }
        config
    }
}
