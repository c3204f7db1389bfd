//! Contrastive Divergence (CD-1) training
//!
//! Each sample is encoded, run through a positive phase, reconstructed by a
//! Bernoulli draw, run through a negative phase, and applied to the model
//! immediately. Batches only group samples; gradients are never averaged.

use super::Rbm;
use crate::config::RbmConfig;
use crate::dataset::{validate_samples, Sample};
use crate::discretizer::{encode_visible, raw_feature_count, QuantileThresholds};
use crate::error::{RbmError, Result};
use tracing::{debug, info};

/// Summed reconstruction error of one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochReport {
    /// 1-based epoch number.
    pub epoch: usize,
    pub reconstruction_error: f64,
}

/// CD-1 hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdTrainer {
    learning_rate: f64,
    epochs: usize,
    batch_size: usize,
}

impl CdTrainer {
    /// Fails with `InvalidInput` for a zero batch size or a negative or
    /// non-finite learning rate.
    pub fn new(learning_rate: f64, epochs: usize, batch_size: usize) -> Result<Self> {
        if !learning_rate.is_finite() || learning_rate < 0.0 {
            return Err(RbmError::InvalidInput(format!(
                "learning rate must be finite and non-negative, got {}",
                learning_rate
            )));
        }
        if batch_size == 0 {
            return Err(RbmError::InvalidInput(
                "batch size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            learning_rate,
            epochs,
            batch_size,
        })
    }

    pub fn from_config(config: &RbmConfig) -> Result<Self> {
        Self::new(config.learning_rate, config.epochs, config.batch_size)
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Runs `epochs` passes over `samples`, updating `rbm` in place.
    ///
    /// Thresholds are fitted once from `samples` in the caller's order. Each
    /// epoch shuffles an index permutation (carried over from the previous
    /// epoch) and walks it in batches of `batch_size`. Samples are validated
    /// before any update, so an invalid sample aborts the run with the model
    /// untouched.
    pub fn train(&self, rbm: &mut Rbm, samples: &[Sample]) -> Result<Vec<EpochReport>> {
        if samples.is_empty() {
            return Err(RbmError::InvalidInput(
                "cannot train on an empty dataset".to_string(),
            ));
        }
        rbm.check_dimensions()?;

        let shape = rbm.shape();
        let num_raw_features = raw_feature_count(shape.num_visible_features)?;
        // Every sample feeds the percentile columns, so all must be valid first.
        validate_samples(samples, num_raw_features, shape.num_classes)?;
        let thresholds = QuantileThresholds::fit(samples, num_raw_features)?;

        debug!(
            num_samples = samples.len(),
            num_visible = shape.num_visible(),
            num_hidden = shape.num_hidden,
            learning_rate = self.learning_rate,
            epochs = self.epochs,
            batch_size = self.batch_size,
            "starting CD-1 training"
        );

        let mut order: Vec<usize> = (0..samples.len()).collect();
        let mut reports = Vec::with_capacity(self.epochs);

        for epoch in 0..self.epochs {
            let mut epoch_error = 0.0;
            rbm.rng_mut().shuffle(&mut order);

            for batch in order.chunks(self.batch_size) {
                for &index in batch {
                    let v0 = encode_visible(&thresholds, &samples[index], shape.num_classes)
                        .map_err(|e| match e {
                            RbmError::InvalidInput(msg) => {
                                RbmError::InvalidInput(format!("sample {}: {}", index, msg))
                            }
                            other => other,
                        })?;
                    epoch_error += self.step(rbm, &v0)?;
                }
            }

            info!(
                "Epoch {}/{}, Reconstruction Error: {:.2}",
                epoch + 1,
                self.epochs,
                epoch_error
            );
            reports.push(EpochReport {
                epoch: epoch + 1,
                reconstruction_error: epoch_error,
            });
        }

        Ok(reports)
    }

    /// One CD-1 update on an encoded visible vector.
    ///
    /// Returns Σ (v0 - v1_prob)², measured against the positive phase's
    /// reconstruction probabilities.
    pub fn step(&self, rbm: &mut Rbm, v0: &[f64]) -> Result<f64> {
        // Positive phase.
        let positive = rbm.infer(v0)?;
        let h0_prob = positive.hidden_probs;
        let v1_prob = positive.visible_probs;

        // Reconstruction and negative phase.
        let v1_sample = rbm.sample_units(&v1_prob);
        let h1_prob = rbm.infer(&v1_sample)?.hidden_probs;

        let lr = self.learning_rate;
        let num_hidden = rbm.num_hidden();
        for (n, row) in rbm.weights.chunks_exact_mut(num_hidden).enumerate() {
            for (m, w) in row.iter_mut().enumerate() {
                *w += lr * (v0[n] * h0_prob[m] - v1_sample[n] * h1_prob[m]);
            }
        }
        for (n, b) in rbm.visible_bias.iter_mut().enumerate() {
            *b += lr * (v0[n] - v1_sample[n]);
        }
        for (m, c) in rbm.hidden_bias.iter_mut().enumerate() {
            *c += lr * (h0_prob[m] - h1_prob[m]);
        }

        Ok(v0
            .iter()
            .zip(&v1_prob)
            .map(|(&v, &p)| (v - p) * (v - p))
            .sum())
    }
}
