//! Error type shared by every component of the crate.

/// Errors raised by the discretizer, the model, the trainer and the loaders.
#[derive(Debug, thiserror::Error)]
pub enum RbmError {
    /// Empty dataset, malformed sample, out-of-range label or bad argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A vector or parameter tensor whose length disagrees with the model shape.
    #[error("dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Configuration file parsed but holds unusable values.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RbmError>;

/// Fails with `DimensionMismatch` unless `actual == expected`.
pub(crate) fn ensure_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(RbmError::DimensionMismatch {
            what,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_len_ok() {
        assert!(ensure_len("visible vector", 15, 15).is_ok());
    }

    #[test]
    fn test_ensure_len_mismatch_message() {
        let err = ensure_len("visible vector", 15, 14).unwrap_err();
        assert_eq!(
            err.to_string(),
            "dimension mismatch for visible vector: expected 15, got 14"
        );
    }
}
