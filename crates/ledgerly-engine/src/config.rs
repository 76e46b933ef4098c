//! # Ledger Configuration
//!
//! Presentation and tuning knobs for the engines.
//!
//! ## Configuration File Format
//! ```json
//! {
//!   "currency_symbol": "Rs",
//!   "date_format": "%Y-%m-%d",
//!   "default_threshold": 5,
//!   "forecast_lookback_days": 14
//! }
//! ```
//!
//! Missing fields fall back to the defaults above, so a partial file (or no
//! file at all) is fine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use ledgerly_core::{LedgerError, Money, ValidationError, DEFAULT_FORECAST_LOOKBACK_DAYS};

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Symbol prefixed to formatted amounts.
    pub currency_symbol: String,

    /// `chrono` format string used when parsing and printing dates.
    pub date_format: String,

    /// Threshold assigned to stock items created without one.
    pub default_threshold: i64,

    /// Trailing window of daily sales totals the forecast is fitted over.
    pub forecast_lookback_days: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            currency_symbol: "Rs".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            default_threshold: 5,
            forecast_lookback_days: DEFAULT_FORECAST_LOOKBACK_DAYS,
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from a JSON file, falling back to defaults for
    /// any missing field. A missing file is not an error; a malformed one is.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            return Ok(LedgerConfig::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: LedgerConfig = serde_json::from_str(&contents)?;

        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Formats an amount with the configured currency symbol, e.g. `Rs 10.99`.
    pub fn format_currency(&self, amount: Money) -> String {
        format!("{} {}", self.currency_symbol, amount)
    }

    /// Parses a date string using the configured format.
    pub fn parse_date(&self, input: &str) -> EngineResult<NaiveDate> {
        NaiveDate::parse_from_str(input.trim(), &self.date_format).map_err(|e| {
            EngineError::Ledger(LedgerError::Validation(ValidationError::InvalidFormat {
                field: "date".to_string(),
                reason: e.to_string(),
            }))
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.currency_symbol, "Rs");
        assert_eq!(config.default_threshold, 5);
        assert_eq!(config.forecast_lookback_days, 14);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: LedgerConfig = serde_json::from_str(r#"{"currency_symbol": "$"}"#).unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.forecast_lookback_days, 14);
    }

    #[test]
    fn test_format_currency() {
        let config = LedgerConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(109900)), "Rs 1099.00");
    }

    #[test]
    fn test_parse_date() {
        let config = LedgerConfig::default();
        let date = config.parse_date(" 2024-03-15 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        assert!(config.parse_date("15/03/2024").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = LedgerConfig::load("/nonexistent/ledgerly.json").unwrap();
        assert_eq!(config.currency_symbol, "Rs");
    }
}
