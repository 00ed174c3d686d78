//! # Engine Configuration
//!
//! Tolerances and labels shared by every component of the core.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. TOML text handed in by the caller (highest priority)               │
//! │     The app decides where it lives (bundle, settings table, ...)       │
//! │                                                                         │
//! │  2. Default Values (lowest priority)                                   │
//! │     0.5 pp percentage tolerance, 0.01 epsilon, USD                     │
//! │                                                                         │
//! │  The core never reads files or environment variables itself.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration Format
//! ```toml
//! # engine.toml
//! percentage_tolerance = 50   # basis points: 100% ± 0.5 is accepted
//! epsilon = 1                 # minor units: |net| <= 0.01 counts as settled
//! custom_sum_tolerance = 1    # minor units a custom split may be off by
//! default_currency = "EUR"
//! unknown_participant_label = "Someone"
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Percentage;
use crate::{
    DEFAULT_CURRENCY, DEFAULT_CUSTOM_SUM_TOLERANCE_CENTS, DEFAULT_EPSILON_CENTS,
    DEFAULT_PERCENTAGE_TOLERANCE_BPS, DEFAULT_UNKNOWN_PARTICIPANT_LABEL,
};

// =============================================================================
// Engine Configuration
// =============================================================================

/// Tunables for splitting, netting and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How far the percentage sum may stray from 100%.
    #[serde(default = "default_percentage_tolerance")]
    pub percentage_tolerance: Percentage,

    /// Amounts with `|x| <= epsilon` are treated as zero when netting.
    #[serde(default = "default_epsilon")]
    pub epsilon: Money,

    /// How far custom amounts may stray from the expense total.
    #[serde(default = "default_custom_sum_tolerance")]
    pub custom_sum_tolerance: Money,

    /// Currency stamped on balances when the inputs carry none.
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Name shown for ids missing from the participant roster.
    #[serde(default = "default_unknown_participant_label")]
    pub unknown_participant_label: String,
}

fn default_percentage_tolerance() -> Percentage {
    Percentage::from_bps(DEFAULT_PERCENTAGE_TOLERANCE_BPS)
}

fn default_epsilon() -> Money {
    Money::from_cents(DEFAULT_EPSILON_CENTS)
}

fn default_custom_sum_tolerance() -> Money {
    Money::from_cents(DEFAULT_CUSTOM_SUM_TOLERANCE_CENTS)
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_unknown_participant_label() -> String {
    DEFAULT_UNKNOWN_PARTICIPANT_LABEL.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            percentage_tolerance: default_percentage_tolerance(),
            epsilon: default_epsilon(),
            custom_sum_tolerance: default_custom_sum_tolerance(),
            default_currency: default_currency(),
            unknown_participant_label: default_unknown_participant_label(),
        }
    }
}

impl EngineConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates TOML text. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> CoreResult<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        debug!(
            percentage_tolerance = %config.percentage_tolerance,
            epsilon = %config.epsilon,
            currency = %config.default_currency,
            "Loaded engine config"
        );
        Ok(config)
    }

    /// Renders the config back to TOML (for the app's settings screen).
    pub fn to_toml_string(&self) -> CoreResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CoreResult<()> {
        if self.percentage_tolerance.is_negative() {
            return Err(CoreError::InvalidConfig(
                "percentage_tolerance must not be negative".into(),
            ));
        }

        if self.epsilon.is_negative() {
            return Err(CoreError::InvalidConfig(
                "epsilon must not be negative".into(),
            ));
        }

        if self.custom_sum_tolerance.is_negative() {
            return Err(CoreError::InvalidConfig(
                "custom_sum_tolerance must not be negative".into(),
            ));
        }

        if self.default_currency.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "default_currency must not be empty".into(),
            ));
        }

        if self.unknown_participant_label.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "unknown_participant_label must not be empty".into(),
            ));
        }

        Ok(())
    }

    // =========================================================================
    // Builder-style overrides (mostly for tests)
    // =========================================================================

    pub fn with_epsilon(mut self, epsilon: Money) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_percentage_tolerance(mut self, tolerance: Percentage) -> Self {
        self.percentage_tolerance = tolerance;
        self
    }

    pub fn with_custom_sum_tolerance(mut self, tolerance: Money) -> Self {
        self.custom_sum_tolerance = tolerance;
        self
    }

    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.percentage_tolerance.bps(), 50);
        assert_eq!(config.epsilon.cents(), 1);
        assert_eq!(config.custom_sum_tolerance.cents(), 1);
        assert_eq!(config.default_currency, "USD");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            percentage_tolerance = 100
            default_currency = "EUR"
            "#,
        )
        .unwrap();

        assert_eq!(config.percentage_tolerance.bps(), 100);
        assert_eq!(config.default_currency, "EUR");
        assert_eq!(config.epsilon.cents(), 1);
        assert_eq!(config.unknown_participant_label, "Unknown participant");
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig::default();

        config.epsilon = Money::from_cents(-1);
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));

        config.epsilon = Money::zero();
        assert!(config.validate().is_ok());

        config.default_currency = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_is_rejected() {
        let err = EngineConfig::from_toml_str("epsilon = \"one cent\"").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse(_)));

        let err = EngineConfig::from_toml_str("percentage_tolerance = -10").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = EngineConfig::default().to_toml_string().unwrap();
        assert!(toml_str.contains("percentage_tolerance = 50"));
        assert!(toml_str.contains("default_currency = \"USD\""));
    }
}
