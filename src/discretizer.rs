//! Quantile discretizer
//!
//! Turns each raw continuous feature into a one-hot triplet (low, mid, high)
//! by comparing it against that feature's 33rd and 67th percentiles over the
//! training set. The percentiles are fitted once into a [`QuantileThresholds`]
//! table and reused unchanged for every later encoding.

use crate::dataset::{validate_sample, Sample};
use crate::error::{ensure_len, RbmError, Result};
use tracing::debug;

/// Percentile used as the low/mid cut-point.
pub const LOWER_PERCENTILE: f64 = 33.0;
/// Percentile used as the mid/high cut-point.
pub const UPPER_PERCENTILE: f64 = 67.0;
/// Binary slots per raw feature.
pub const SLOTS_PER_FEATURE: usize = 3;

/// Raw features behind `num_visible_features` discretized slots.
///
/// Fails with `DimensionMismatch` unless the slot count is a whole number of
/// triplets.
pub fn raw_feature_count(num_visible_features: usize) -> Result<usize> {
    let num_raw_features = num_visible_features / SLOTS_PER_FEATURE;
    ensure_len(
        "discretized features",
        num_visible_features,
        num_raw_features * SLOTS_PER_FEATURE,
    )?;
    Ok(num_raw_features)
}

/// Value at percentile `p` of feature column `feature` across `samples`.
///
/// Sorts the column and reads index `ceil(p / 100 * N) - 1`, clamped to the
/// column, so `p = 0` gives the minimum and `p = 100` the maximum.
pub fn percentile(samples: &[Sample], feature: usize, p: f64) -> Result<f64> {
    if samples.is_empty() {
        return Err(RbmError::InvalidInput(
            "cannot compute a percentile of an empty dataset".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&p) {
        return Err(RbmError::InvalidInput(format!(
            "percentile must lie in [0, 100], got {}",
            p
        )));
    }

    let mut column = samples
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            sample.features.get(feature).copied().ok_or_else(|| {
                RbmError::InvalidInput(format!(
                    "sample {} has no feature {} ({} features)",
                    index,
                    feature,
                    sample.features.len()
                ))
            })
        })
        .collect::<Result<Vec<f64>>>()?;
    column.sort_by(f64::total_cmp);

    let rank = (p / 100.0 * column.len() as f64).ceil() as usize;
    let index = rank.saturating_sub(1).min(column.len() - 1);
    Ok(column[index])
}

/// Per-feature (lower, upper) cut-points, shape `num_raw_features x 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileThresholds {
    thresholds: Vec<[f64; 2]>,
}

impl QuantileThresholds {
    /// Fits the 33rd/67th percentile of the first `num_raw_features` columns.
    pub fn fit(samples: &[Sample], num_raw_features: usize) -> Result<Self> {
        if samples.is_empty() {
            return Err(RbmError::InvalidInput(
                "cannot fit thresholds on an empty dataset".to_string(),
            ));
        }

        let thresholds = (0..num_raw_features)
            .map(|feature| -> Result<[f64; 2]> {
                Ok([
                    percentile(samples, feature, LOWER_PERCENTILE)?,
                    percentile(samples, feature, UPPER_PERCENTILE)?,
                ])
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            num_samples = samples.len(),
            num_raw_features, "fitted quantile thresholds"
        );
        Ok(Self { thresholds })
    }

    /// Builds a table from explicit cut-points.
    pub fn from_table(thresholds: Vec<[f64; 2]>) -> Self {
        Self { thresholds }
    }

    pub fn as_table(&self) -> &[[f64; 2]] {
        &self.thresholds
    }

    pub fn num_raw_features(&self) -> usize {
        self.thresholds.len()
    }

    /// Length of a discretized vector: three slots per raw feature.
    pub fn encoded_len(&self) -> usize {
        self.thresholds.len() * SLOTS_PER_FEATURE
    }

    /// Bucket of a single value: 0 when `<= lower`, 1 when `<= upper`, else 2.
    pub fn bucket(&self, feature: usize, value: f64) -> Result<usize> {
        let [lower, upper] = *self.thresholds.get(feature).ok_or_else(|| {
            RbmError::InvalidInput(format!(
                "feature {} out of range for {} thresholds",
                feature,
                self.thresholds.len()
            ))
        })?;
        Ok(if value <= lower {
            0
        } else if value <= upper {
            1
        } else {
            2
        })
    }

    /// One-hot triplets for the first `num_raw_features` values of `raw`.
    pub fn discretize(&self, raw: &[f64]) -> Result<Vec<f64>> {
        if raw.len() < self.thresholds.len() {
            return Err(RbmError::InvalidInput(format!(
                "sample has {} features, discretizer needs at least {}",
                raw.len(),
                self.thresholds.len()
            )));
        }

        let mut encoded = vec![0.0; self.encoded_len()];
        for (feature, &value) in raw.iter().take(self.thresholds.len()).enumerate() {
            encoded[feature * SLOTS_PER_FEATURE + self.bucket(feature, value)?] = 1.0;
        }
        Ok(encoded)
    }
}

/// Discretizes `raw` against fresh percentiles of `dataset`.
///
/// Pure function of its arguments; repeated calls return identical vectors.
/// `num_visible_features` must be a multiple of [`SLOTS_PER_FEATURE`].
pub fn discretize_sample(
    raw: &[f64],
    dataset: &[Sample],
    num_visible_features: usize,
) -> Result<Vec<f64>> {
    let num_raw_features = raw_feature_count(num_visible_features)?;
    let thresholds = QuantileThresholds::fit(dataset, num_raw_features)?;
    thresholds.discretize(raw)
}

/// Full visible vector: discretized features followed by the one-hot label.
pub fn encode_visible(
    thresholds: &QuantileThresholds,
    sample: &Sample,
    num_classes: usize,
) -> Result<Vec<f64>> {
    validate_sample(sample, thresholds.num_raw_features(), num_classes)
        .map_err(RbmError::InvalidInput)?;

    let mut visible = thresholds.discretize(&sample.features)?;
    let label_offset = visible.len();
    visible.resize(label_offset + num_classes, 0.0);
    visible[label_offset + sample.label] = 1.0;
    Ok(visible)
}

/// Visible vector with every class unit left at zero, for classification.
pub fn encode_unlabeled(
    thresholds: &QuantileThresholds,
    raw: &[f64],
    num_classes: usize,
) -> Result<Vec<f64>> {
    let mut visible = thresholds.discretize(raw)?;
    visible.resize(visible.len() + num_classes, 0.0);
    Ok(visible)
}
