//! User settings
//!
//! Settings are resolved in two layers. Defaults are compiled in from
//! `config/pricetrack.toml`; an override file (passed explicitly, or found at
//! `~/.local/share/pricetrack/config.toml`) replaces any keys it sets.
//!
//! ```toml
//! salary = 3500.0
//! forecast_months = 6
//! anomaly_threshold_percent = 5.0
//! currency_symbol = "€"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

const DEFAULT_CONFIG: &str = include_str!("../../../config/pricetrack.toml");

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Monthly income for the purchasing power report
    pub salary: Option<f64>,
    pub forecast_months: u32,
    /// Anomalies whose absolute change is below this are hidden
    pub anomaly_threshold_percent: f64,
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            salary: None,
            forecast_months: 12,
            anomaly_threshold_percent: 0.0,
            currency_symbol: "$".to_string(),
        }
    }
}

/// Keys as they appear in a TOML file; any may be missing
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSettings {
    salary: Option<f64>,
    forecast_months: Option<u32>,
    anomaly_threshold_percent: Option<f64>,
    currency_symbol: Option<String>,
}

impl Settings {
    /// Default location of the override file
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|d| d.join("pricetrack").join("config.toml"))
    }

    /// Compiled-in defaults
    pub fn embedded() -> Result<Self> {
        Self::default().merge_toml(DEFAULT_CONFIG)
    }

    /// Load settings
    ///
    /// An explicit `path` must exist. Without one, the default override
    /// file is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = Self::embedded()?;

        let override_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::Config(format!(
                        "Settings file not found: {}",
                        p.display()
                    )));
                }
                Some(p.to_path_buf())
            }
            None => Self::default_path().filter(|p| p.exists()),
        };

        match override_path {
            Some(p) => {
                debug!(path = %p.display(), "Loading settings override");
                let content = std::fs::read_to_string(&p)?;
                base.merge_toml(&content)
            }
            None => Ok(base),
        }
    }

    /// Apply the keys present in `content` on top of `self`
    pub fn merge_toml(mut self, content: &str) -> Result<Self> {
        let raw: RawSettings = toml::from_str(content)?;

        if let Some(salary) = raw.salary {
            self.salary = Some(salary);
        }
        if let Some(months) = raw.forecast_months {
            self.forecast_months = months;
        }
        if let Some(threshold) = raw.anomaly_threshold_percent {
            self.anomaly_threshold_percent = threshold;
        }
        if let Some(symbol) = raw.currency_symbol {
            self.currency_symbol = symbol;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if let Some(salary) = self.salary {
            if !salary.is_finite() || salary < 0.0 {
                return Err(Error::Config(format!("salary must be >= 0, got {}", salary)));
            }
            if salary == 0.0 {
                warn!("salary is 0; purchasing power will be empty");
            }
        }
        if !self.anomaly_threshold_percent.is_finite() || self.anomaly_threshold_percent < 0.0 {
            return Err(Error::Config(format!(
                "anomaly_threshold_percent must be >= 0, got {}",
                self.anomaly_threshold_percent
            )));
        }
        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_embedded_matches_default() {
        assert_eq!(Settings::embedded().unwrap(), Settings::default());
    }

    #[test]
    fn test_merge_keeps_unset_keys() {
        let settings = Settings::default()
            .merge_toml("salary = 2500.0\nforecast_months = 6\n")
            .unwrap();
        assert_eq!(settings.salary, Some(2500.0));
        assert_eq!(settings.forecast_months, 6);
        assert_eq!(settings.anomaly_threshold_percent, 0.0);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_rejects_negative_values() {
        let result = Settings::default().merge_toml("salary = -1.0");
        assert!(matches!(result, Err(Error::Config(_))));

        let result = Settings::default().merge_toml("anomaly_threshold_percent = -5.0");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_bad_toml() {
        assert!(matches!(
            Settings::default().merge_toml("forecast_months = \"soon\""),
            Err(Error::Toml(_))
        ));
        assert!(Settings::default().merge_toml("salray = 10.0").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "currency_symbol = \"€\"").unwrap();
        writeln!(file, "anomaly_threshold_percent = 2.5").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.anomaly_threshold_percent, 2.5);
        assert_eq!(settings.forecast_months, 12);
        assert_eq!(settings.money(3.456), "€3.46");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = Settings::load(Some(Path::new("/nonexistent/pricetrack.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
