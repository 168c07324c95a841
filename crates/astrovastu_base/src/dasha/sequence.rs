//! Mahadasha and antardasha sequence generation.
//!
//! Both walks share the same shape: rotate the 9-graha order from a start
//! position and accumulate contiguous periods through a running cursor.
//! The mahadasha walk truncates its first period by the fraction of the
//! nakshatra already traversed at birth; the antardasha walk scales every
//! period by its share of the 120-year cycle instead.

use chrono::{DateTime, Utc};

use super::tables::{NAK_TO_START, TOTAL_CYCLE_YEARS, VIMSHOTTARI_ORDER, VIMSHOTTARI_YEARS};
use super::types::{DashaLevel, DashaPeriod, years_to_delta};
use crate::error::VedicError;
use crate::graha::Graha;
use crate::nakshatra::nakshatra_position;

/// Build the 9 mahadasha periods anchored at birth.
///
/// The rotation starts at the graha ruling the Moon's nakshatra; the first
/// period is truncated to its remaining balance `allocation * (1 - fraction)`.
/// The sequence therefore spans 120 years minus the elapsed part of the
/// first period: the remaining-plus-current dasha span, per classical
/// convention.
pub fn mahadasha_sequence(
    moon_lon_deg: f64,
    birth_utc: DateTime<Utc>,
) -> Result<Vec<DashaPeriod>, VedicError> {
    let pos = nakshatra_position(moon_lon_deg)?;
    let start_idx = NAK_TO_START[pos.index as usize] as usize;

    let mut periods = Vec::with_capacity(VIMSHOTTARI_ORDER.len());
    let mut cursor = birth_utc;

    for i in 0..VIMSHOTTARI_ORDER.len() {
        let seq_idx = (start_idx + i) % VIMSHOTTARI_ORDER.len();
        let graha = VIMSHOTTARI_ORDER[seq_idx];
        let full_years = VIMSHOTTARI_YEARS[seq_idx];
        let years = if i == 0 {
            full_years * (1.0 - pos.fraction)
        } else {
            full_years
        };

        let end = cursor + years_to_delta(years);
        periods.push(DashaPeriod {
            graha,
            start: cursor,
            end,
            level: DashaLevel::Mahadasha,
            duration_years: years,
        });
        cursor = end;
    }

    Ok(periods)
}

/// Subdivide one mahadasha into its 9 antardashas.
///
/// The rotation always begins with the mahadasha's own graha and proceeds
/// through the full canonical cycle; each sub-period gets
/// `maha_years * allocation / 120`. The last sub-period's end is snapped to
/// the mahadasha's end to absorb floating-point drift, so the partition is
/// exact by construction.
pub fn antardasha_sequence(
    maha_graha: Graha,
    maha_start: DateTime<Utc>,
    maha_years: f64,
) -> Result<Vec<DashaPeriod>, VedicError> {
    if !maha_years.is_finite() || maha_years <= 0.0 {
        return Err(VedicError::InvalidDuration(maha_years));
    }

    let start_idx = maha_graha.index() as usize;
    let maha_end = maha_start + years_to_delta(maha_years);

    let mut periods = Vec::with_capacity(VIMSHOTTARI_ORDER.len());
    let mut cursor = maha_start;

    for i in 0..VIMSHOTTARI_ORDER.len() {
        let seq_idx = (start_idx + i) % VIMSHOTTARI_ORDER.len();
        let graha = VIMSHOTTARI_ORDER[seq_idx];
        let sub_years = maha_years * (VIMSHOTTARI_YEARS[seq_idx] / TOTAL_CYCLE_YEARS);

        let end = cursor + years_to_delta(sub_years);
        periods.push(DashaPeriod {
            graha,
            start: cursor,
            end,
            level: DashaLevel::Antardasha,
            duration_years: sub_years,
        });
        cursor = end;
    }

    // Snap the final boundary onto the parent's end.
    if let Some(last) = periods.last_mut() {
        last.end = maha_end;
    }

    Ok(periods)
}
