//! Configuration types for agent construction
//!
//! Every tunable component has a serde-backed config with the defaults the
//! agents were designed around. Configs can be built in code with the
//! `with_*` setters or loaded from a JSON file; missing fields fall back to
//! their defaults.
//!
//! ```
//! use classic_agents::config::{AgentsConfig, MiraConfig};
//!
//! let config = AgentsConfig::default().with_mira(MiraConfig::default().with_auto_tune(true));
//! assert!(config.validate().is_ok());
//! assert_eq!(config.mira.candidates(), vec![0.002, 0.004, 0.008]);
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{Error, Result},
    game::AdversarialStrategy,
    search::SearchStrategy,
};

/// Graph search settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: SearchStrategy,
}

impl SearchConfig {
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Game-tree search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdversarialConfig {
    pub strategy: AdversarialStrategy,
    /// Search depth in full rounds (every agent moves once per round)
    pub depth: usize,
}

impl AdversarialConfig {
    pub fn with_strategy(mut self, strategy: AdversarialStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

impl Default for AdversarialConfig {
    fn default() -> Self {
        Self {
            strategy: AdversarialStrategy::default(),
            depth: 2,
        }
    }
}

/// Value iteration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueIterationConfig {
    /// Discount factor γ in [0, 1]
    pub discount: f64,
    /// Number of Bellman sweeps
    pub iterations: usize,
}

impl ValueIterationConfig {
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(Error::InvalidDiscount {
                value: self.discount,
            });
        }
        Ok(())
    }
}

impl Default for ValueIterationConfig {
    fn default() -> Self {
        Self {
            discount: 0.9,
            iterations: 100,
        }
    }
}

/// MIRA classifier settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiraConfig {
    /// Step-size cap used when `auto_tune` is off
    pub c: f64,
    /// Select C from `c_grid` by validation accuracy
    pub auto_tune: bool,
    pub c_grid: Vec<f64>,
    /// Passes over the training set per candidate
    pub max_iterations: usize,
}

impl MiraConfig {
    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    pub fn with_auto_tune(mut self, auto_tune: bool) -> Self {
        self.auto_tune = auto_tune;
        self
    }

    pub fn with_c_grid(mut self, grid: Vec<f64>) -> Self {
        self.c_grid = grid;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Values of C that training will try, in order
    pub fn candidates(&self) -> Vec<f64> {
        if self.auto_tune {
            self.c_grid.clone()
        } else {
            vec![self.c]
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_grid("C", &self.candidates(), |c| c.is_finite() && c > 0.0)
    }
}

impl Default for MiraConfig {
    fn default() -> Self {
        Self {
            c: 0.001,
            auto_tune: false,
            c_grid: vec![0.002, 0.004, 0.008],
            max_iterations: 3,
        }
    }
}

/// Naive Bayes classifier settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    /// Laplace smoothing constant used when `auto_tune` is off
    pub k: f64,
    /// Select k from `k_grid` by validation accuracy
    pub auto_tune: bool,
    pub k_grid: Vec<f64>,
}

impl NaiveBayesConfig {
    pub fn with_k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    pub fn with_auto_tune(mut self, auto_tune: bool) -> Self {
        self.auto_tune = auto_tune;
        self
    }

    pub fn with_k_grid(mut self, grid: Vec<f64>) -> Self {
        self.k_grid = grid;
        self
    }

    /// Values of k that training will try, in order
    pub fn candidates(&self) -> Vec<f64> {
        if self.auto_tune {
            self.k_grid.clone()
        } else {
            vec![self.k]
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_grid("k", &self.candidates(), valid_smoothing)
    }
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        Self {
            k: 1.0,
            auto_tune: false,
            k_grid: vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0],
        }
    }
}

/// Laplace smoothing constants are finite and non-negative
pub(crate) fn valid_smoothing(k: f64) -> bool {
    k.is_finite() && k >= 0.0
}

pub(crate) fn validate_grid(
    parameter: &str,
    grid: &[f64],
    valid: impl Fn(f64) -> bool,
) -> Result<()> {
    if grid.is_empty() {
        return Err(Error::EmptyCandidateGrid {
            parameter: parameter.to_string(),
        });
    }
    if let Some(bad) = grid.iter().copied().find(|value| !valid(*value)) {
        return Err(Error::InvalidConfiguration {
            message: format!("{parameter} candidate {bad} is out of range"),
        });
    }
    Ok(())
}

/// Settings for every agent in the crate
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    pub search: SearchConfig,
    pub adversarial: AdversarialConfig,
    pub value_iteration: ValueIterationConfig,
    pub mira: MiraConfig,
    pub naive_bayes: NaiveBayesConfig,
}

impl AgentsConfig {
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_adversarial(mut self, adversarial: AdversarialConfig) -> Self {
        self.adversarial = adversarial;
        self
    }

    pub fn with_value_iteration(mut self, value_iteration: ValueIterationConfig) -> Self {
        self.value_iteration = value_iteration;
        self
    }

    pub fn with_mira(mut self, mira: MiraConfig) -> Self {
        self.mira = mira;
        self
    }

    pub fn with_naive_bayes(mut self, naive_bayes: NaiveBayesConfig) -> Self {
        self.naive_bayes = naive_bayes;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.value_iteration.validate()?;
        self.mira.validate()?;
        self.naive_bayes.validate()
    }

    /// Load and validate a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        let config: AgentsConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        info!(path = %path.display(), "loaded agents config");
        Ok(config)
    }

    /// Write the config as pretty-printed JSON
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| Error::Io {
            operation: format!("write config {}", path.display()),
            source,
        })
    }
}
