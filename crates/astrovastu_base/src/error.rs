//! Error types for the pure calculation layer.

use thiserror::Error;

/// Errors from base calculations.
///
/// These all indicate invalid input or a broken invariant; valid chart
/// data never produces them.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// Longitude was NaN or infinite.
    #[error("invalid longitude: {0}")]
    InvalidLongitude(f64),
    /// A period duration was non-finite or not positive.
    #[error("invalid duration: {0} years")]
    InvalidDuration(f64),
    /// Divisional chart divisor must be >= 1.
    #[error("invalid varga divisor: {0}")]
    InvalidDivisor(u16),
    /// Computed value fell outside its legal range.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}
