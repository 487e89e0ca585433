//! Error types.
//!
//! - `FitError` is what the engine returns. Every variant is final: the engine never
//!   substitutes a default for a mathematically undefined result.
//! - `AppError` is the binary-facing error carrying a process exit code.

/// Errors raised by the fitting and propagation engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Malformed or insufficient input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The weighted normal equations have no unique solution.
    ///
    /// Happens when all x-values are identical (fewer than 2 distinct x-values).
    #[error(
        "Weighted normal equations are singular; need at least 2 distinct x-values [n: {n}, distinct_x: {distinct_x}]"
    )]
    SingularFit {
        /// Number of observations.
        n: usize,
        /// Number of distinct x-values.
        distinct_x: usize,
    },

    /// A derived-quantity transform (or its derivative) is undefined at the fitted parameters.
    #[error("Derived quantity is undefined: {0}")]
    UndefinedTransform(String),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, FitError>;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    /// Prefix the message (e.g. with the dataset it concerns), keeping the exit code.
    pub fn with_context(self, context: &str) -> Self {
        Self {
            exit_code: self.exit_code,
            message: format!("{context}: {}", self.message),
        }
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let exit_code = match err {
            FitError::Validation(_) => 3,
            FitError::SingularFit { .. } | FitError::UndefinedTransform(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_errors_map_to_exit_codes() {
        let validation: AppError = FitError::Validation("too few points".to_string()).into();
        assert_eq!(validation.exit_code(), 3);
        assert!(validation.to_string().contains("too few points"));

        let singular: AppError = FitError::SingularFit { n: 3, distinct_x: 1 }.into();
        assert_eq!(singular.exit_code(), 4);

        let undefined: AppError = FitError::UndefinedTransform("1/k at k = 0".to_string()).into();
        assert_eq!(undefined.exit_code(), 4);
    }
}
