//! Restricted Boltzmann Machine over binary visible and hidden units
//!
//! The visible layer is a discretized feature block followed by one unit per
//! class. The model owns its parameters and its random source; parameters
//! change only through [`CdTrainer`].
//!
//! # Example
//!
//! ```ignore
//! use rust_rbm::rbm::{Rbm, RbmShape};
//! use rust_rbm::utils::SeededRng;
//!
//! let shape = RbmShape::new(12, 3, 10);
//! let mut rbm = Rbm::new(shape, SeededRng::new(42), 0.01)?;
//! let result = rbm.infer(&visible)?;
//! println!("predicted class {}", result.predicted_class);
//! ```

mod inference;
mod trainer;

pub use inference::InferenceResult;
pub use trainer::{CdTrainer, EpochReport};

use crate::config::{validate_config, RbmConfig};
use crate::error::{ensure_len, RbmError, Result};
use crate::utils::SeededRng;

/// Layer sizes of an RBM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RbmShape {
    pub num_visible_features: usize,
    pub num_classes: usize,
    pub num_hidden: usize,
}

impl RbmShape {
    pub fn new(num_visible_features: usize, num_classes: usize, num_hidden: usize) -> Self {
        Self {
            num_visible_features,
            num_classes,
            num_hidden,
        }
    }

    pub fn from_config(config: &RbmConfig) -> Self {
        Self::new(
            config.num_visible_features,
            config.num_classes,
            config.num_hidden,
        )
    }

    /// Feature units plus class units.
    pub fn num_visible(&self) -> usize {
        self.num_visible_features + self.num_classes
    }

    fn validate(&self) -> Result<()> {
        if self.num_classes == 0 || self.num_hidden == 0 {
            return Err(RbmError::InvalidInput(format!(
                "RBM needs at least one class unit and one hidden unit, got {:?}",
                self
            )));
        }
        Ok(())
    }
}

/// RBM parameters and random source.
///
/// `weights` is row-major `num_visible x num_hidden`: `W[i][j]` sits at
/// `i * num_hidden + j`.
#[derive(Debug, Clone)]
pub struct Rbm {
    shape: RbmShape,
    weights: Vec<f64>,
    visible_bias: Vec<f64>,
    hidden_bias: Vec<f64>,
    rng: SeededRng,
}

impl Rbm {
    /// Create a model with every weight and bias drawn from N(0, init_std_dev²).
    ///
    /// Weights are drawn first (row by row), then visible biases, then
    /// hidden biases, so a seed fixes the whole parameter set.
    pub fn new(shape: RbmShape, mut rng: SeededRng, init_std_dev: f64) -> Result<Self> {
        shape.validate()?;
        if !init_std_dev.is_finite() || init_std_dev < 0.0 {
            return Err(RbmError::InvalidInput(format!(
                "init_std_dev must be finite and non-negative, got {}",
                init_std_dev
            )));
        }

        let num_visible = shape.num_visible();
        let weights = (0..num_visible * shape.num_hidden)
            .map(|_| rng.gaussian(init_std_dev))
            .collect();
        let visible_bias = (0..num_visible).map(|_| rng.gaussian(init_std_dev)).collect();
        let hidden_bias = (0..shape.num_hidden)
            .map(|_| rng.gaussian(init_std_dev))
            .collect();

        Ok(Self {
            shape,
            weights,
            visible_bias,
            hidden_bias,
            rng,
        })
    }

    /// Create a model from a validated configuration.
    pub fn from_config(config: &RbmConfig) -> Result<Self> {
        validate_config(config)?;
        Self::new(
            RbmShape::from_config(config),
            SeededRng::from_optional_seed(config.seed),
            config.init_std_dev,
        )
    }

    /// Create a model from explicit parameters.
    ///
    /// Fails with `DimensionMismatch` if any tensor disagrees with `shape`.
    pub fn from_parameters(
        shape: RbmShape,
        weights: Vec<f64>,
        visible_bias: Vec<f64>,
        hidden_bias: Vec<f64>,
        rng: SeededRng,
    ) -> Result<Self> {
        shape.validate()?;
        let rbm = Self {
            shape,
            weights,
            visible_bias,
            hidden_bias,
            rng,
        };
        rbm.check_dimensions()?;
        Ok(rbm)
    }

    pub(crate) fn check_dimensions(&self) -> Result<()> {
        let num_visible = self.shape.num_visible();
        ensure_len("weights", num_visible * self.shape.num_hidden, self.weights.len())?;
        ensure_len("visible bias", num_visible, self.visible_bias.len())?;
        ensure_len("hidden bias", self.shape.num_hidden, self.hidden_bias.len())
    }

    pub fn shape(&self) -> RbmShape {
        self.shape
    }

    pub fn num_visible(&self) -> usize {
        self.shape.num_visible()
    }

    pub fn num_hidden(&self) -> usize {
        self.shape.num_hidden
    }

    /// Row-major weight matrix.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Coupling between visible unit `i` and hidden unit `j`.
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[i * self.shape.num_hidden + j]
    }

    /// Weight matrix row for visible unit `i`.
    pub fn weight_row(&self, i: usize) -> &[f64] {
        let start = i * self.shape.num_hidden;
        &self.weights[start..start + self.shape.num_hidden]
    }

    pub fn visible_bias(&self) -> &[f64] {
        &self.visible_bias
    }

    pub fn hidden_bias(&self) -> &[f64] {
        &self.hidden_bias
    }

    /// Weights plus both bias vectors.
    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.visible_bias.len() + self.hidden_bias.len()
    }

    pub(crate) fn rng_mut(&mut self) -> &mut SeededRng {
        &mut self.rng
    }
}
