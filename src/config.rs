use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::household::{
    ConservationMeasure, GeneratorParams, RegionalBaselines, CALIFORNIA_POPULATION,
    COST_PER_GALLON, DEFAULT_HOUSEHOLDS, DEFAULT_SEED, NATIONAL_BASELINE,
};
use crate::tips::DEFAULT_TIPS_PER_REQUEST;

/// Synthetic dataset settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_households")]
    pub num_households: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub params: GeneratorParams,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_households: DEFAULT_HOUSEHOLDS,
            seed: DEFAULT_SEED,
            params: GeneratorParams::default(),
        }
    }
}

fn default_households() -> usize {
    DEFAULT_HOUSEHOLDS
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Savings calculator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsConfig {
    #[serde(default = "default_baseline")]
    pub baseline_gallons: f64,
    #[serde(default = "default_cost_per_gallon")]
    pub cost_per_gallon: f64,
    #[serde(default = "ConservationMeasure::defaults")]
    pub measures: Vec<ConservationMeasure>,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            baseline_gallons: NATIONAL_BASELINE,
            cost_per_gallon: COST_PER_GALLON,
            measures: ConservationMeasure::defaults(),
        }
    }
}

fn default_baseline() -> f64 {
    NATIONAL_BASELINE
}

fn default_cost_per_gallon() -> f64 {
    COST_PER_GALLON
}

/// Regional insights settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionsConfig {
    #[serde(default)]
    pub baselines: RegionalBaselines,
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default = "default_reference")]
    pub reference: String,
    #[serde(default = "default_population")]
    pub population: u64,
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            baselines: RegionalBaselines::default(),
            state: default_state(),
            reference: default_reference(),
            population: CALIFORNIA_POPULATION,
        }
    }
}

fn default_state() -> String {
    "California".to_string()
}

fn default_reference() -> String {
    "National Average".to_string()
}

fn default_population() -> u64 {
    CALIFORNIA_POPULATION
}

/// Language-model advisor settings. The key itself is never stored here,
/// only the name of the environment variable holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Dashboard configuration from config.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub savings: SavingsConfig,
    #[serde(default)]
    pub regions: RegionsConfig,
    #[serde(default)]
    pub advisor: AdvisorConfig,
    #[serde(default = "default_tips_per_request")]
    pub tips_per_request: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            savings: SavingsConfig::default(),
            regions: RegionsConfig::default(),
            advisor: AdvisorConfig::default(),
            tips_per_request: DEFAULT_TIPS_PER_REQUEST,
        }
    }
}

fn default_tips_per_request() -> usize {
    DEFAULT_TIPS_PER_REQUEST
}

impl DashboardConfig {
    /// Load a configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .context(format!("Failed to read config: {:?}", path.as_ref()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: DashboardConfig =
            serde_yaml::from_str(content).context("Failed to parse config YAML")?;
        Ok(config)
    }

    /// Load from the explicit path, else the user config file, else defaults.
    /// A file that exists but does not parse is an error.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "loading dashboard config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/jadewater/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("jadewater").join("config.yaml"))
}
