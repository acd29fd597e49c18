use crate::units::{Result, UnitRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Output formatting
    #[serde(default)]
    pub display: DisplayConfig,

    // Extra units layered over the SI defaults, keyed by symbol
    #[serde(default)]
    pub units: BTreeMap<String, UnitConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    // Decimal places for magnitudes; full precision when absent
    #[serde(default)]
    pub precision: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnitConfig {
    // Unit string in terms of already known symbols, e.g. "kg m^-1 s^-2"
    pub base: String,
    pub scale: f64,
}

impl Config {
    pub fn load_from_file<P: AsRef<std::path::Path>>(
        path: P,
    ) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the registry described by this config: SI defaults plus `[units]`
    pub fn registry(&self) -> Result<UnitRegistry> {
        if self.units.is_empty() {
            return Ok(UnitRegistry::si().clone());
        }
        UnitRegistry::si().extend(
            self.units
                .iter()
                .map(|(symbol, unit)| (symbol.as_str(), unit.base.as_str(), unit.scale)),
        )
    }
}
