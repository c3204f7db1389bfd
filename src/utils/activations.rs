//! Activation functions for the model's binary units.

/// Sigmoid activation function.
///
/// Returns 1 / (1 + exp(-x)) in double precision. No overflow guard: the
/// pre-activations of a small RBM stay far inside the f64 exponent range,
/// and `exp` saturating to infinity still yields 0.0.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Index of the first maximum in `values`, or `None` when empty.
///
/// Ties resolve to the lowest index.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in values.iter().enumerate() {
        match best {
            Some((_, max_value)) if value <= max_value => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}
