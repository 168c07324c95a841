//! Pure calculation library for AstroVastu chart computation.
//!
//! This crate provides:
//! - Vimshottari dasha timelines (mahadasha + antardasha)
//! - Nakshatra location from a sidereal lunar longitude
//! - Divisional (varga) chart derivation
//! - Transit-vs-natal aspect detection
//! - Pythagorean numerology scores
//! - Vastu sector analysis
//!
//! Everything here is deterministic and free of I/O; ephemeris queries,
//! geocoding, and rendering live in `astrovastu_service`.

pub mod dasha;
pub mod error;
pub mod graha;
pub mod nakshatra;
pub mod numerology;
pub mod rashi;
pub mod transit;
pub mod util;
pub mod varga;
pub mod vastu;

pub use dasha::{
    DAYS_PER_YEAR, DashaLevel, DashaPeriod, MahaPeriod, MahadashaTimeline, NAK_TO_START,
    TOTAL_CYCLE_YEARS, VIMSHOTTARI_ORDER, VIMSHOTTARI_YEARS, active_period, antardasha_sequence,
    mahadasha_sequence, vimshottari_timeline,
};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha, NATAL_GRAHAS};
pub use nakshatra::{NAKSHATRA_SPAN, NakshatraPosition, nakshatra_position};
pub use rashi::{ALL_RASHIS, Rashi, deg_in_sign, rashi_from_longitude};
pub use transit::{Aspect, AspectHit, DEFAULT_ORB, compare_transit_to_natal, find_aspect};
pub use util::{angular_separation, normalize_360, normalize_checked};
pub use varga::{
    DEFAULT_VARGA_DIVISORS, VargaChart, VargaEntry, compute_varga, generate_varga_set,
    varga_longitude,
};
pub use vastu::{Sector, SectorElement, VastuInput, VastuReport, VastuRoom, analyze_vastu};
