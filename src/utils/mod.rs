//! Shared utilities: the seeded random source and activation helpers.

pub mod activations;
pub mod rng;

pub use activations::{argmax, sigmoid};
pub use rng::SeededRng;
