//! Restricted Boltzmann Machine classifier
//!
//! A binary RBM jointly models a discretized feature vector and a one-hot
//! class label; a sample is classified by reading which class unit has the
//! highest reconstructed activation.
//!
//! # Modules
//!
//! - `rbm`: the model, Gibbs inference and the CD-1 trainer
//! - `discretizer`: percentile thresholds and one-hot feature encoding
//! - `dataset`: labelled samples and the Iris CSV provider
//! - `config`: JSON configuration of shape and hyperparameters
//! - `utils`: seeded random source and activation helpers
//! - `error`: the crate error type

pub mod config;
pub mod dataset;
pub mod discretizer;
pub mod error;
pub mod rbm;
pub mod utils;

pub use error::{RbmError, Result};
