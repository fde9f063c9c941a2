//! Error types for qedxs-core.

use thiserror::Error;

/// Result type alias for qedxs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for qedxs operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Real decomposition requested for a matrix that is not Hermitian.
    #[error("cannot decompose non-Hermitian matrix into real coefficients")]
    NonHermitian,

    /// Inversion requested for a matrix whose determinant is below resolution.
    #[error("matrix is singular: |det| = {determinant:e}")]
    SingularMatrix { determinant: f64 },

    /// Photon polarization index outside {1, 2}.
    #[error("invalid photon polarization index: {0} (expected 1 or 2)")]
    InvalidPolarizationIndex(usize),

    /// Helicity index outside {0, 1}.
    #[error("invalid helicity index: {0} (expected 0 or 1)")]
    InvalidHelicityIndex(usize),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
