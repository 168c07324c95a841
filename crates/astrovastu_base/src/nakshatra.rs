//! Nakshatra (lunar mansion) location.
//!
//! The ecliptic circle is divided into 27 equal nakshatras of 13 deg 20'
//! (13.3333... deg) each. The Moon's nakshatra at birth, together with the
//! fraction already traversed, anchors the Vimshottari dasha cycle.

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::util::normalize_checked;

/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;

/// The Moon's position expressed in nakshatra terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NakshatraPosition {
    /// 0-based nakshatra index (0 = Ashwini .. 26 = Revati).
    pub index: u8,
    /// Fraction of the nakshatra already traversed, [0, 1).
    pub fraction: f64,
}

/// Locate a lunar longitude within the 27 nakshatras.
///
/// Rejects non-finite input rather than normalizing it away; an index
/// outside 0..=26 after normalization is a computation error, never
/// silently clamped.
pub fn nakshatra_position(moon_lon_deg: f64) -> Result<NakshatraPosition, VedicError> {
    let lon = normalize_checked(moon_lon_deg).ok_or(VedicError::InvalidLongitude(moon_lon_deg))?;
    let slot = lon / NAKSHATRA_SPAN;
    let index = slot.floor();
    if !(0.0..27.0).contains(&index) {
        return Err(VedicError::InvalidInput("nakshatra index out of range"));
    }
    Ok(NakshatraPosition {
        index: index as u8,
        fraction: slot - index,
    })
}
