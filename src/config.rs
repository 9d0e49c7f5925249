use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::ledger::ProgramRules;

/// Configuration for the rewards service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Rewards program configuration
    pub program: ProgramConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub postgres_url: String,
    /// Enable PostgreSQL (if false, uses the in-memory store)
    pub postgres_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    pub level: String,
    /// Enable request/response span logging
    pub log_requests: bool,
}

/// Point amounts granted by the rewards program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramConfig {
    /// Points granted by the sign-up earn action on account creation
    pub welcome_bonus_points: u64,
    /// Points granted to the redeeming account for a referral code
    pub referral_bonus_points: u64,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            welcome_bonus_points: 500,
            referral_bonus_points: 500,
        }
    }
}

impl ProgramConfig {
    /// Convert to ProgramRules for use by RewardsLedger
    pub fn to_rules(&self) -> ProgramRules {
        ProgramRules {
            welcome_bonus_points: self.welcome_bonus_points,
            referral_bonus_points: self.referral_bonus_points,
        }
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8780,
            },
            database: DatabaseConfig {
                postgres_url: "postgresql://localhost:5432/techtrove_rewards".to_string(),
                postgres_enabled: false,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                log_requests: false,
            },
            program: ProgramConfig::default(),
        }
    }
}

impl RewardsConfig {
    /// Load configuration from environment variables and validate it
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Server configuration
        if let Ok(host) = env::var("TROVE_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = env::var("TROVE_PORT") {
            config.server.port = port.parse().context("Invalid TROVE_PORT value")?;
        }

        // Database configuration
        if let Ok(url) = env::var("TROVE_POSTGRES_URL") {
            config.database.postgres_url = url;
        }

        if let Ok(enabled) = env::var("TROVE_POSTGRES_ENABLED") {
            config.database.postgres_enabled = enabled
                .parse()
                .context("Invalid TROVE_POSTGRES_ENABLED value")?;
        }

        // Logging configuration
        if let Ok(level) = env::var("TROVE_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(log_requests) = env::var("TROVE_LOG_REQUESTS") {
            config.logging.log_requests = log_requests
                .parse()
                .context("Invalid TROVE_LOG_REQUESTS value")?;
        }

        // Program configuration
        if let Ok(points) = env::var("TROVE_WELCOME_BONUS_POINTS") {
            config.program.welcome_bonus_points = points
                .parse()
                .context("Invalid TROVE_WELCOME_BONUS_POINTS value")?;
        }

        if let Ok(points) = env::var("TROVE_REFERRAL_BONUS_POINTS") {
            config.program.referral_bonus_points = points
                .parse()
                .context("Invalid TROVE_REFERRAL_BONUS_POINTS value")?;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration for consistency
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(anyhow::anyhow!("Server host cannot be empty"));
        }

        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port must be non-zero"));
        }

        if self.database.postgres_enabled && self.database.postgres_url.is_empty() {
            return Err(anyhow::anyhow!(
                "PostgreSQL is enabled but no connection string is configured"
            ));
        }

        if self.program.welcome_bonus_points == 0 {
            return Err(anyhow::anyhow!("Welcome bonus must be a positive amount"));
        }

        if self.program.referral_bonus_points == 0 {
            return Err(anyhow::anyhow!("Referral bonus must be a positive amount"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(RewardsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = RewardsConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_welcome_bonus_rejected() {
        let mut config = RewardsConfig::default();
        config.program.welcome_bonus_points = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_postgres_enabled_requires_url() {
        let mut config = RewardsConfig::default();
        config.database.postgres_enabled = true;
        config.database.postgres_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_program_config_to_rules() {
        let program = ProgramConfig {
            welcome_bonus_points: 250,
            referral_bonus_points: 100,
        };
        let rules = program.to_rules();
        assert_eq!(rules.welcome_bonus_points, 250);
        assert_eq!(rules.referral_bonus_points, 100);
    }
}
