use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional; a missing section or key falls back to its default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub chain: ChainLimits,
    pub analysis: Thresholds,
    pub report: ReportSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Checks the cross-field rules that serde alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain.min_actors == 0 {
            return Err(ConfigError::ValidationError(
                "chain.min_actors must be at least 1".to_string(),
            ));
        }
        if self.chain.min_actors > self.chain.max_actors {
            return Err(ConfigError::ValidationError(format!(
                "chain.min_actors ({}) must not exceed chain.max_actors ({})",
                self.chain.min_actors, self.chain.max_actors
            )));
        }
        if self.report.chart_width == 0 || self.report.chart_height == 0 {
            return Err(ConfigError::ValidationError(
                "report chart dimensions must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Bounds on the number of actors accepted in one chain.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChainLimits {
    pub min_actors: usize,
    pub max_actors: usize,
}

/// Thresholds below which an actor gets a recommendation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Gross margin percentage below which the actor is flagged.
    pub low_margin_pct: Decimal,
    /// Value share percentage below which the actor is flagged.
    pub low_value_share_pct: Decimal,
}

/// Layout and output options for the PDF report.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub title: String,
    /// Logo placed at the top of the first page. Skipped if the file is absent.
    pub logo_path: PathBuf,
    pub output_file: PathBuf,
    /// Pixel size of each rendered chart.
    pub chart_width: u32,
    pub chart_height: u32,
}

/// Log output options. `RUST_LOG` still takes precedence over `level`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for ChainLimits {
    fn default() -> Self {
        Self {
            min_actors: 2,
            max_actors: 10,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_margin_pct: dec!(20),
            low_value_share_pct: dec!(10),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "Agricultural Value Chain Analysis Report".to_string(),
            logo_path: PathBuf::from("logo.png"),
            output_file: PathBuf::from("value_chain_report.pdf"),
            chart_width: 900,
            chart_height: 500,
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
