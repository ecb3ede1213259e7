//! Environment-driven configuration for the `pharmastock` binary.

use std::path::PathBuf;

use thiserror::Error;

use pharmastock_infra::DEFAULT_INVENTORY_FILE;
use pharmastock_inventory::DEFAULT_NEAR_EXPIRATION_DAYS;

pub const FILE_VAR: &str = "PHARMASTOCK_FILE";
pub const NEAR_EXPIRATION_VAR: &str = "PHARMASTOCK_NEAR_EXPIRATION_DAYS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative whole number of days, got {value:?}")]
    InvalidDays { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub inventory_file: PathBuf,
    pub near_expiration_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            inventory_file: PathBuf::from(DEFAULT_INVENTORY_FILE),
            near_expiration_days: DEFAULT_NEAR_EXPIRATION_DAYS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset or empty variables fall
    /// back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(file) = lookup(FILE_VAR).filter(|v| !v.trim().is_empty()) {
            config.inventory_file = PathBuf::from(file);
        }

        if let Some(raw) = lookup(NEAR_EXPIRATION_VAR).filter(|v| !v.trim().is_empty()) {
            config.near_expiration_days = raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|d| *d >= 0)
                .ok_or(ConfigError::InvalidDays {
                    var: NEAR_EXPIRATION_VAR,
                    value: raw.clone(),
                })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])).unwrap(), AppConfig::default());
        assert_eq!(
            AppConfig::default().inventory_file,
            PathBuf::from("inventory.json")
        );
        assert_eq!(AppConfig::default().near_expiration_days, 30);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (FILE_VAR, "/var/lib/farmacia/stock.json"),
            (NEAR_EXPIRATION_VAR, " 60 "),
        ]))
        .unwrap();
        assert_eq!(
            config.inventory_file,
            PathBuf::from("/var/lib/farmacia/stock.json")
        );
        assert_eq!(config.near_expiration_days, 60);
    }

    #[test]
    fn rejects_bad_day_counts() {
        for bad in ["soon", "-1", "1.5"] {
            let err = AppConfig::from_lookup(lookup(&[(NEAR_EXPIRATION_VAR, bad)])).unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidDays {
                    var: NEAR_EXPIRATION_VAR,
                    value: bad.to_string(),
                }
            );
        }
    }
}
