//! Vimshottari dasha (planetary period) calculations.
//!
//! The 120-year Vimshottari cycle is partitioned into 9 mahadashas whose
//! rotation is anchored by the Moon's nakshatra at birth; each mahadasha is
//! subdivided proportionally into 9 antardashas. All periods are absolute
//! UTC intervals, contiguous at shared boundary instants.

pub mod sequence;
pub mod tables;
pub mod timeline;
pub mod types;

pub use sequence::{antardasha_sequence, mahadasha_sequence};
pub use tables::{
    DAYS_PER_YEAR, NAK_TO_START, TOTAL_CYCLE_YEARS, VIMSHOTTARI_ORDER, VIMSHOTTARI_YEARS,
    graha_allocation_years,
};
pub use timeline::{MahaPeriod, MahadashaTimeline, active_period, vimshottari_timeline};
pub use types::{DashaLevel, DashaPeriod, years_to_delta};
