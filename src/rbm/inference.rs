//! Gibbs half-step: visible -> hidden -> visible.

use super::Rbm;
use crate::dataset::{validate_samples, Sample};
use crate::discretizer::{encode_unlabeled, QuantileThresholds};
use crate::error::{ensure_len, Result};
use crate::utils::{argmax, sigmoid};

/// Output of one inference call.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResult {
    /// P(h_j = 1 | v) for every hidden unit.
    pub hidden_probs: Vec<f64>,
    /// Bernoulli sample of the hidden layer.
    pub hidden_sample: Vec<f64>,
    /// P(v_i = 1 | h_sample) for every visible unit.
    pub visible_probs: Vec<f64>,
    /// Argmax over the class units of `visible_probs`, first maximum on ties.
    pub predicted_class: usize,
}

impl Rbm {
    /// P(h_j = 1 | v) = sigmoid(c_j + Σ_i v_i W_ij).
    pub fn hidden_probabilities(&self, visible: &[f64]) -> Result<Vec<f64>> {
        ensure_len("visible vector", self.num_visible(), visible.len())?;
        self.check_dimensions()?;

        let mut activations = self.hidden_bias.clone();
        for (i, &v) in visible.iter().enumerate() {
            for (activation, &w) in activations.iter_mut().zip(self.weight_row(i)) {
                *activation += v * w;
            }
        }
        Ok(activations.into_iter().map(sigmoid).collect())
    }

    /// P(v_i = 1 | h) = sigmoid(b_i + Σ_j h_j W_ij).
    pub fn visible_probabilities(&self, hidden: &[f64]) -> Result<Vec<f64>> {
        ensure_len("hidden vector", self.num_hidden(), hidden.len())?;
        self.check_dimensions()?;

        Ok((0..self.num_visible())
            .map(|i| {
                let activation = self.visible_bias[i]
                    + self
                        .weight_row(i)
                        .iter()
                        .zip(hidden)
                        .map(|(&w, &h)| w * h)
                        .sum::<f64>();
                sigmoid(activation)
            })
            .collect())
    }

    /// Bernoulli sample of every unit against its probability.
    pub fn sample_units(&mut self, probs: &[f64]) -> Vec<f64> {
        probs.iter().map(|&p| self.rng.bernoulli(p)).collect()
    }

    /// One visible -> hidden -> visible pass.
    ///
    /// Parameters are only read; the random source advances by one draw per
    /// hidden unit.
    pub fn infer(&mut self, visible: &[f64]) -> Result<InferenceResult> {
        let hidden_probs = self.hidden_probabilities(visible)?;
        let hidden_sample = self.sample_units(&hidden_probs);
        let visible_probs = self.visible_probabilities(&hidden_sample)?;

        let class_probs = &visible_probs[self.shape.num_visible_features..];
        let predicted_class = argmax(class_probs).unwrap_or(0);

        Ok(InferenceResult {
            hidden_probs,
            hidden_sample,
            visible_probs,
            predicted_class,
        })
    }

    /// Predicted class for an encoded visible vector.
    pub fn predict(&mut self, visible: &[f64]) -> Result<usize> {
        Ok(self.infer(visible)?.predicted_class)
    }

    /// Fraction of `samples` whose class, predicted from the encoding with
    /// all class units off, matches the label. Every label must name one of
    /// the model's classes.
    pub fn accuracy(&mut self, samples: &[Sample], thresholds: &QuantileThresholds) -> Result<f64> {
        let num_classes = self.shape.num_classes;
        validate_samples(samples, thresholds.num_raw_features(), num_classes)?;

        let mut correct = 0usize;
        for sample in samples {
            let visible = encode_unlabeled(thresholds, &sample.features, num_classes)?;
            if self.predict(&visible)? == sample.label {
                correct += 1;
            }
        }
        Ok(correct as f64 / samples.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::super::RbmShape;
    use super::*;
    use crate::error::RbmError;
    use crate::utils::SeededRng;

    fn zero_model(features: usize, classes: usize, hidden: usize) -> Rbm {
        let shape = RbmShape::new(features, classes, hidden);
        let visible = shape.num_visible();
        Rbm::from_parameters(
            shape,
            vec![0.0; visible * hidden],
            vec![0.0; visible],
            vec![0.0; hidden],
            SeededRng::new(5),
        )
        .unwrap()
    }

    #[test]
    fn test_zero_model_gives_half_probabilities() {
        let mut rbm = zero_model(0, 2, 1);
        let result = rbm.infer(&[1.0, 0.0]).unwrap();

        assert_eq!(result.hidden_probs, vec![0.5]);
        assert_eq!(result.visible_probs, vec![0.5, 0.5]);
        assert_eq!(result.predicted_class, 0);
    }

    #[test]
    fn test_hidden_sample_is_binary() {
        let mut rbm = Rbm::new(RbmShape::new(3, 2, 8), SeededRng::new(11), 0.5).unwrap();
        let result = rbm.infer(&[1.0, 0.0, 0.0, 0.0, 1.0]).unwrap();

        assert!(result
            .hidden_sample
            .iter()
            .all(|&h| h == 0.0 || h == 1.0));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let mut rbm = zero_model(3, 2, 2);
        let err = rbm.infer(&[1.0, 0.0]).unwrap_err();

        assert!(matches!(
            err,
            RbmError::DimensionMismatch {
                expected: 5,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_hidden_probabilities_use_weights() {
        let shape = RbmShape::new(0, 2, 1);
        let mut rbm = Rbm::from_parameters(
            shape,
            vec![2.0, -2.0],
            vec![0.0, 0.0],
            vec![0.0],
            SeededRng::new(1),
        )
        .unwrap();

        let probs = rbm.hidden_probabilities(&[1.0, 0.0]).unwrap();
        assert!((probs[0] - sigmoid(2.0)).abs() < 1e-12);

        let probs = rbm.hidden_probabilities(&[0.0, 1.0]).unwrap();
        assert!((probs[0] - sigmoid(-2.0)).abs() < 1e-12);

        assert!(rbm.predict(&[1.0, 1.0]).unwrap() < 2);
    }
}
