//! Configuration System
//!
//! Loads model, run and population settings from a TOML file. Every section
//! and field is optional and falls back to its default.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::components::WealthLedger;
use crate::engine::{ModelParams, DEFAULT_ROUNDS};
use crate::error::ConfigurationError;
use crate::setup::{explicit_population, random_population, uniform_population};

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "yard_sale.toml";

/// Complete simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub population: PopulationConfig,
}

/// Exchange, tax, bias and debt parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub win_percentage: f64,
    pub chi: f64,
    pub zeta: f64,
    pub kappa: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            win_percentage: 0.2,
            chi: 0.0,
            zeta: 0.0,
            kappa: 0.0,
        }
    }
}

/// Round count, seeding and snapshot cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub rounds: u64,
    pub seed: u64,
    pub snapshot_interval: u64,
    pub collect_snapshots: bool,
    /// When non-empty, one independent run per seed instead of `seed`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub batch_seeds: Vec<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            seed: 0,
            snapshot_interval: 1000,
            collect_snapshots: true,
            batch_seeds: Vec::new(),
        }
    }
}

/// Uniform range for randomly drawn starting balances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WealthRange {
    pub min: f64,
    pub max: f64,
}

/// Starting population.
///
/// Explicit `balances` win over `random_wealth`, which wins over the
/// uniform `agents` x `initial_wealth` population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub agents: usize,
    pub initial_wealth: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_wealth: Option<WealthRange>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub balances: BTreeMap<String, f64>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            agents: 100,
            initial_wealth: 100.0,
            random_wealth: None,
            balances: BTreeMap::new(),
        }
    }
}

impl SaleConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Serializes the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Engine parameters for the primary seed.
    pub fn model_params(&self) -> ModelParams {
        ModelParams::new(self.model.win_percentage)
            .with_chi(self.model.chi)
            .with_zeta(self.model.zeta)
            .with_kappa(self.model.kappa)
            .with_rounds(self.run.rounds)
            .with_seed(self.run.seed)
    }

    /// Builds the starting ledger. Random balances are drawn from a
    /// generator seeded with the run seed.
    pub fn build_ledger(&self) -> crate::error::Result<WealthLedger<String>> {
        let population = &self.population;
        if !population.balances.is_empty() {
            return Ok(explicit_population(&population.balances)?);
        }
        if let Some(range) = population.random_wealth {
            let mut rng = SmallRng::seed_from_u64(self.run.seed);
            return random_population(population.agents, range.min, range.max, &mut rng);
        }
        Ok(uniform_population(population.agents, population.initial_wealth)?)
    }
}

/// `count` consecutive seeds starting at `first`, wrapping past `u64::MAX`.
pub fn consecutive_seeds(first: u64, count: u64) -> Result<Vec<u64>, ConfigurationError> {
    if count == 0 {
        return Err(ConfigurationError::NoSeeds);
    }
    Ok((0..count).map(|offset| first.wrapping_add(offset)).collect())
}

impl FromStr for SaleConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: SaleConfig = "".parse().unwrap();

        assert_eq!(config, SaleConfig::default());
        assert_eq!(config.run.rounds, 10_000);
        assert_eq!(config.model.win_percentage, 0.2);
        assert_eq!(config.population.agents, 100);
    }

    #[test]
    fn test_partial_sections() {
        let config: SaleConfig = r#"
            [model]
            chi = 0.1
            zeta = 0.05

            [run]
            rounds = 500
            seed = 7
        "#
        .parse()
        .unwrap();

        assert_eq!(config.model.chi, 0.1);
        assert_eq!(config.model.win_percentage, 0.2);
        assert_eq!(config.run.snapshot_interval, 1000);

        let params = config.model_params();
        assert_eq!(params.rounds, 500);
        assert_eq!(params.seed, 7);
        assert_eq!(params.zeta, 0.05);
    }

    #[test]
    fn test_explicit_balances() {
        let config: SaleConfig = r#"
            [population.balances]
            A = 50.0
            B = 150.0
        "#
        .parse()
        .unwrap();

        let ledger = config.build_ledger().unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.balance(&"B".to_string()), Some(150.0));
    }

    #[test]
    fn test_random_population_from_config() {
        let config: SaleConfig = r#"
            [population]
            agents = 20
            random_wealth = { min = 0.0, max = 200.0 }
        "#
        .parse()
        .unwrap();

        let first = config.build_ledger().unwrap();
        let second = config.build_ledger().unwrap();
        assert_eq!(first.len(), 20);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_toml() {
        let result = "[model\nchi = ".parse::<SaleConfig>();
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_from_file_and_roundtrip() {
        let mut config = SaleConfig::default();
        config.model.kappa = 0.25;
        config.run.batch_seeds = vec![1, 2, 3];

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", config.to_toml().unwrap()).unwrap();

        let loaded = SaleConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_consecutive_seeds() {
        assert_eq!(consecutive_seeds(5, 3).unwrap(), vec![5, 6, 7]);
        assert_eq!(consecutive_seeds(u64::MAX, 2).unwrap(), vec![u64::MAX, 0]);
        assert_eq!(consecutive_seeds(9, 0).unwrap_err(), ConfigurationError::NoSeeds);
    }

    #[test]
    fn test_missing_file() {
        let result = SaleConfig::from_file(Path::new("/nonexistent/yard_sale.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
