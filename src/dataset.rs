//! Labelled samples and the Iris CSV provider.
//!
//! The core only needs a finite, non-empty, ordered sequence of
//! [`Sample`]s. Loading from disk and scaling live here so the demo binary
//! stays thin.

use crate::error::{RbmError, Result};
use std::fmt;
use std::fs;

/// One raw record: continuous features and an integer class label.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub features: Vec<f64>,
    pub label: usize,
}

impl Sample {
    pub fn new(features: Vec<f64>, label: usize) -> Self {
        Self { features, label }
    }
}

/// Iris species, in label order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().trim_matches('"') {
            "setosa" | "Iris-setosa" => Some(Species::Setosa),
            "versicolor" | "Iris-versicolor" => Some(Species::Versicolor),
            "virginica" | "Iris-virginica" => Some(Species::Virginica),
            _ => None,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Setosa => "setosa",
            Species::Versicolor => "versicolor",
            Species::Virginica => "virginica",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for a class index; out-of-range indices read "Unknown".
pub fn species_name(index: usize) -> &'static str {
    Species::from_index(index).map_or("Unknown", Species::name)
}

/// Checks that `samples` is non-empty, every sample carries at least
/// `num_raw_features` finite features, and every label is below `num_classes`.
pub fn validate_samples(
    samples: &[Sample],
    num_raw_features: usize,
    num_classes: usize,
) -> Result<()> {
    if samples.is_empty() {
        return Err(RbmError::InvalidInput("dataset is empty".to_string()));
    }
    for (index, sample) in samples.iter().enumerate() {
        validate_sample(sample, num_raw_features, num_classes)
            .map_err(|e| RbmError::InvalidInput(format!("sample {}: {}", index, e)))?;
    }
    Ok(())
}

pub(crate) fn validate_sample(
    sample: &Sample,
    num_raw_features: usize,
    num_classes: usize,
) -> std::result::Result<(), String> {
    if sample.features.len() < num_raw_features {
        return Err(format!(
            "expected at least {} features, got {}",
            num_raw_features,
            sample.features.len()
        ));
    }
    if let Some(bad) = sample.features[..num_raw_features]
        .iter()
        .find(|value| !value.is_finite())
    {
        return Err(format!("non-finite feature value {}", bad));
    }
    if sample.label >= num_classes {
        return Err(format!(
            "label {} out of range for {} classes",
            sample.label, num_classes
        ));
    }
    Ok(())
}

/// Divides every feature by `divisor`, leaving labels untouched.
pub fn scale_features(samples: &[Sample], divisor: f64) -> Result<Vec<Sample>> {
    if divisor == 0.0 || !divisor.is_finite() {
        return Err(RbmError::InvalidInput(format!(
            "feature divisor must be finite and non-zero, got {}",
            divisor
        )));
    }
    Ok(samples
        .iter()
        .map(|sample| Sample {
            features: sample.features.iter().map(|&x| x / divisor).collect(),
            label: sample.label,
        })
        .collect())
}

/// Parses Iris CSV text: a header line, then numeric columns followed by
/// the species name.
pub fn parse_iris_csv(contents: &str) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();

    // Header line is skipped.
    for (line_index, line) in contents.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_number = line_index + 1;
        let fields: Vec<&str> = line.split(',').collect();
        let Some((species, numeric)) = fields.split_last() else {
            continue;
        };
        if numeric.is_empty() {
            return Err(RbmError::InvalidInput(format!(
                "line {}: expected feature columns before the species",
                line_number
            )));
        }

        let species = Species::from_name(species).ok_or_else(|| {
            RbmError::InvalidInput(format!(
                "line {}: unknown species {:?}",
                line_number, species
            ))
        })?;

        let features = numeric
            .iter()
            .map(|field| {
                field.trim().parse::<f64>().map_err(|_| {
                    RbmError::InvalidInput(format!(
                        "line {}: cannot parse {:?} as a number",
                        line_number, field
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        samples.push(Sample::new(features, species.index()));
    }

    Ok(samples)
}

/// Reads and parses an Iris CSV file from disk.
pub fn load_iris_csv(path: &str) -> Result<Vec<Sample>> {
    let contents = fs::read_to_string(path)?;
    parse_iris_csv(&contents)
}
