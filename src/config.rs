//! Solver tolerances and their JSON representation.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::ConfigError;

/// Tolerances used by [`solve`](crate::solver::solve) to reject unstable systems.
///
/// # Examples
/// ```
/// use trusseq::SolverOptions;
///
/// let options: SolverOptions =
///     serde_json::from_str(r#"{ "residual_tolerance": 1e-6 }"#).expect("valid JSON");
/// assert_eq!(options.residual_tolerance, 1e-6);
/// assert_eq!(
///     options.min_reciprocal_condition,
///     SolverOptions::default().min_reciprocal_condition
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverOptions {
    /// Smallest accepted estimate of the 1-norm reciprocal condition number.
    pub min_reciprocal_condition: f64,
    /// Largest accepted `‖A·x − b‖ / (1 + ‖b‖)` of a computed solution.
    pub residual_tolerance: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            min_reciprocal_condition: 1.0e-12,
            residual_tolerance: 1.0e-9,
        }
    }
}

impl SolverOptions {
    /// Read options from a JSON file; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, is not valid JSON
    /// or holds a negative or non-finite tolerance.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse options from JSON text; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text is not valid JSON or holds a
    /// negative or non-finite tolerance.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(text)?;
        options.validate()
    }

    /// Check that both tolerances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTolerance`] naming the first bad option.
    pub fn validate(self) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("min_reciprocal_condition", self.min_reciprocal_condition),
            ("residual_tolerance", self.residual_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTolerance { name, value });
            }
        }
        Ok(self)
    }
}
