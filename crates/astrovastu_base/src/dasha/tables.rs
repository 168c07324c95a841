//! Const configuration data for the Vimshottari dasha system.
//!
//! These tables are fixed classical convention: 9 grahas in a set rotation
//! with year allocations summing to exactly 120, and a 27-entry map from
//! nakshatra index to the rotation start position (the 9-graha order cycled
//! three times around the zodiac).

use crate::graha::{ALL_GRAHAS, Graha};

/// Mean Gregorian year in days, used for all dasha date arithmetic.
pub const DAYS_PER_YEAR: f64 = 365.2425;

/// Total Vimshottari cycle length in years.
pub const TOTAL_CYCLE_YEARS: f64 = 120.0;

/// The 9 grahas in Vimshottari rotation order.
pub const VIMSHOTTARI_ORDER: [Graha; 9] = ALL_GRAHAS;

/// Full-cycle year allocation for each graha, in rotation order.
/// Ketu 7, Venus 20, Sun 6, Moon 10, Mars 7, Rahu 18, Jupiter 16,
/// Saturn 19, Mercury 17. Sum = 120.
pub const VIMSHOTTARI_YEARS: [f64; 9] = [7.0, 20.0, 6.0, 10.0, 7.0, 18.0, 16.0, 19.0, 17.0];

/// Nakshatra index (0-26) to rotation start position (every 9th nakshatra
/// shares a starting graha).
pub const NAK_TO_START: [u8; 27] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, // Ashwini..Ashlesha
    0, 1, 2, 3, 4, 5, 6, 7, 8, // Magha..Jyeshtha
    0, 1, 2, 3, 4, 5, 6, 7, 8, // Mula..Revati
];

/// Canonical year allocation for a graha.
pub const fn graha_allocation_years(graha: Graha) -> f64 {
    VIMSHOTTARI_YEARS[graha.index() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocations_sum_to_120() {
        let total: f64 = VIMSHOTTARI_YEARS.iter().sum();
        assert!((total - TOTAL_CYCLE_YEARS).abs() < 1e-12);
    }

    #[test]
    fn nak_map_cycles_three_times() {
        for (i, &start) in NAK_TO_START.iter().enumerate() {
            assert_eq!(start as usize, i % 9);
        }
    }

    #[test]
    fn allocation_lookup_matches_order() {
        assert!((graha_allocation_years(Graha::Ketu) - 7.0).abs() < 1e-12);
        assert!((graha_allocation_years(Graha::Venus) - 20.0).abs() < 1e-12);
        assert!((graha_allocation_years(Graha::Mercury) - 17.0).abs() < 1e-12);
    }
}
