//! Varga (divisional chart) computation.
//!
//! A Dn chart subdivides each 30-degree sign into n equal slots and expands
//! the slot index back onto the full circle, producing a derived longitude.
//! D9 (navamsa) and D10 (dashamsa) are the most commonly read charts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::graha::Graha;
use crate::rashi::{Rashi, deg_in_sign, rashi_from_longitude};
use crate::util::{normalize_360, normalize_checked};

/// Divisor list requested for a standard natal report.
pub const DEFAULT_VARGA_DIVISORS: [u16; 11] = [2, 3, 4, 7, 9, 10, 12, 16, 30, 45, 60];

/// One planet's position in a divisional chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VargaEntry {
    /// Derived longitude in the Dn chart, [0, 360).
    pub longitude: f64,
    /// Sign holding the derived longitude.
    pub rashi: Rashi,
    /// Position within that sign, [0, 30).
    pub deg_in_sign: f64,
}

/// A complete divisional chart: planet -> derived position.
pub type VargaChart = BTreeMap<Graha, VargaEntry>;

/// Project a single longitude through the Dn division.
fn project(lon: f64, n: u16) -> VargaEntry {
    let n_f = n as f64;
    let slot_width = 30.0 / n_f;

    let lon = normalize_360(lon);
    let sign_idx = (lon / 30.0).floor().min(11.0);
    let pos_in_sign = lon - sign_idx * 30.0;
    let sub_slot = (pos_in_sign / slot_width).floor().min(n_f - 1.0);
    let fraction_inside_slot = (pos_in_sign - sub_slot * slot_width) / slot_width;

    let expanded_index = sign_idx * n_f + sub_slot; // 0 .. 12n-1
    let dn_longitude = normalize_360(expanded_index * slot_width + fraction_inside_slot * slot_width);

    VargaEntry {
        longitude: dn_longitude,
        rashi: rashi_from_longitude(dn_longitude),
        deg_in_sign: deg_in_sign(dn_longitude),
    }
}

/// Derived Dn longitude for a single natal longitude.
pub fn varga_longitude(lon: f64, n: u16) -> Result<f64, VedicError> {
    if n == 0 {
        return Err(VedicError::InvalidDivisor(n));
    }
    normalize_checked(lon)
        .map(|lon| project(lon, n).longitude)
        .ok_or(VedicError::InvalidLongitude(lon))
}

/// Compute the Dn chart for a set of natal longitudes.
///
/// Planets with non-finite longitudes are skipped (position unavailable),
/// matching the degrade-rather-than-fail contract of the chart pipeline.
pub fn compute_varga(
    natal_longitudes: &BTreeMap<Graha, f64>,
    n: u16,
) -> Result<VargaChart, VedicError> {
    if n == 0 {
        return Err(VedicError::InvalidDivisor(n));
    }
    let mut chart = VargaChart::new();
    for (&graha, &lon) in natal_longitudes {
        if normalize_checked(lon).is_none() {
            continue;
        }
        chart.insert(graha, project(lon, n));
    }
    Ok(chart)
}

/// Compute a family of divisional charts, keyed "D2", "D9", ...
pub fn generate_varga_set(
    natal_longitudes: &BTreeMap<Graha, f64>,
    divisors: &[u16],
) -> Result<BTreeMap<String, VargaChart>, VedicError> {
    let mut out = BTreeMap::new();
    for &n in divisors {
        out.insert(format!("D{n}"), compute_varga(natal_longitudes, n)?);
    }
    Ok(out)
}
