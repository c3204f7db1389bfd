//! Configuration for model shape and training hyperparameters
//!
//! Every field is fixed at construction time. Missing fields fall back to the
//! Iris defaults (12 discretized features, 3 classes, 10 hidden units).

use crate::error::{RbmError, Result};
use serde::Deserialize;
use std::fs;

/// Model and training configuration.
///
/// # Example
///
/// ```json
/// {
///   "num_hidden": 10,
///   "learning_rate": 0.08,
///   "epochs": 100,
///   "batch_size": 10,
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RbmConfig {
    /// Width of the discretized feature block; three slots per raw feature.
    pub num_visible_features: usize,

    /// Number of class units appended after the feature block.
    pub num_classes: usize,

    /// Number of hidden units.
    pub num_hidden: usize,

    pub learning_rate: f64,

    pub epochs: usize,

    /// Samples per batch. Updates are still applied per sample.
    pub batch_size: usize,

    /// Seed for the model's random source; `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Standard deviation of the Gaussian used for weight and bias init.
    pub init_std_dev: f64,
}

impl Default for RbmConfig {
    fn default() -> Self {
        Self {
            num_visible_features: 12,
            num_classes: 3,
            num_hidden: 10,
            learning_rate: 0.08,
            epochs: 100,
            batch_size: 10,
            seed: None,
            init_std_dev: 0.01,
        }
    }
}

impl RbmConfig {
    /// Number of raw continuous features the discretizer consumes.
    pub fn num_raw_features(&self) -> usize {
        self.num_visible_features / 3
    }

    /// Total visible units: discretized features plus class units.
    pub fn num_visible(&self) -> usize {
        self.num_visible_features + self.num_classes
    }
}

/// Loads a configuration from a JSON file and validates it.
///
/// # Examples
///
/// ```no_run
/// use rust_rbm::config::load_config;
///
/// let cfg = load_config("config/iris.json").unwrap();
/// assert_eq!(cfg.num_classes, 3);
/// ```
pub fn load_config(path: &str) -> Result<RbmConfig> {
    let contents = fs::read_to_string(path)?;
    let config: RbmConfig = serde_json::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks that every field is usable.
pub fn validate_config(config: &RbmConfig) -> Result<()> {
    if config.num_visible_features == 0 || config.num_visible_features % 3 != 0 {
        return Err(RbmError::InvalidConfig(format!(
            "num_visible_features must be a positive multiple of 3, got {}",
            config.num_visible_features
        )));
    }

    if config.num_classes == 0 {
        return Err(RbmError::InvalidConfig(
            "num_classes must be positive".to_string(),
        ));
    }

    if config.num_hidden == 0 {
        return Err(RbmError::InvalidConfig(
            "num_hidden must be positive".to_string(),
        ));
    }

    if !config.learning_rate.is_finite() || config.learning_rate < 0.0 {
        return Err(RbmError::InvalidConfig(format!(
            "learning_rate must be finite and non-negative, got {}",
            config.learning_rate
        )));
    }

    if config.batch_size == 0 {
        return Err(RbmError::InvalidConfig(
            "batch_size must be at least 1".to_string(),
        ));
    }

    if !config.init_std_dev.is_finite() || config.init_std_dev <= 0.0 {
        return Err(RbmError::InvalidConfig(format!(
            "init_std_dev must be finite and positive, got {}",
            config.init_std_dev
        )));
    }

    Ok(())
}
