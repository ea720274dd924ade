use crate::error::ConfigError;
use core_types::PeriodPreset;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub budget: BudgetSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// How reports are produced when the command line does not say otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Window used when no explicit dates are given. One of 1, 7, 15 or 30.
    pub default_period_days: u32,
    /// Prefix printed before money amounts (e.g. "R$").
    pub currency_symbol: String,
    pub format: OutputFormat,
}

/// Parameters for the daily budget check.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BudgetSettings {
    /// Share of the daily budget at which a warning is raised (0.9 = 90%).
    pub warning_ratio: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

/// The output encodings supported by the report commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_period_days: PeriodPreset::default().days(),
            currency_symbol: "R$".to_string(),
            format: OutputFormat::default(),
        }
    }
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            warning_ratio: Decimal::new(9, 1), // Warn at 90% of the daily budget
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl ReportSettings {
    /// The preset matching `default_period_days`.
    pub fn default_period(&self) -> Result<PeriodPreset, ConfigError> {
        PeriodPreset::from_days(self.default_period_days).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "report.default_period_days must be 1, 7, 15 or 30 (got {})",
                self.default_period_days
            ))
        })
    }
}

impl Config {
    /// Checks the cross-field rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.report.default_period()?;

        let ratio = self.budget.warning_ratio;
        if ratio <= Decimal::ZERO || ratio > Decimal::ONE {
            return Err(ConfigError::ValidationError(format!(
                "budget.warning_ratio must be greater than 0 and at most 1 (got {ratio})"
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
