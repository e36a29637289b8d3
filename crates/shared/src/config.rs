//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Report derivation configuration.
    #[serde(default)]
    pub reports: ReportsConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Report derivation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    /// Debit/credit totals closer than this are treated as balanced.
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Decimal,
    /// Hide zero-valued accounts when rendering the balance sheet.
    #[serde(default)]
    pub hide_zero_balances: bool,
}

fn default_balance_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            balance_tolerance: default_balance_tolerance(),
            hide_zero_balances: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "ledgerlab=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Every key has a default, so a missing config directory is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if a source exists but cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERLAB").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
