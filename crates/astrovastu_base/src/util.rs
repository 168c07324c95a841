//! Shared angle utilities.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Normalize an angle, rejecting non-numeric input.
///
/// Returns `None` for NaN or infinite values. Callers treat this as
/// "position unavailable" and propagate it rather than failing hard.
pub fn normalize_checked(deg: f64) -> Option<f64> {
    if deg.is_finite() {
        Some(normalize_360(deg))
    } else {
        None
    }
}

/// Shortest angular separation between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let diff = (normalize_360(a) - normalize_360(b)).abs();
    diff.min(360.0 - diff)
}
