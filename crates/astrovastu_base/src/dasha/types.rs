//! Core types for dasha periods.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::tables::DAYS_PER_YEAR;
use crate::graha::Graha;

/// The two hierarchy depths produced by the timeline builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashaLevel {
    Mahadasha,
    Antardasha,
}

impl DashaLevel {
    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
        }
    }
}

/// A single dasha period. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    /// The graha ruling this period.
    pub graha: Graha,
    /// Start instant (UTC), inclusive.
    pub start: DateTime<Utc>,
    /// End instant (UTC), exclusive.
    pub end: DateTime<Utc>,
    /// Hierarchy depth.
    pub level: DashaLevel,
    /// Assigned length in fractional years.
    pub duration_years: f64,
}

impl DashaPeriod {
    /// Duration of the period in days.
    pub fn duration_days(&self) -> f64 {
        (self.end - self.start).num_microseconds().unwrap_or(0) as f64 / 86_400_000_000.0
    }

    /// Whether `at` falls inside the half-open [start, end) interval.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// Convert fractional years to a time delta, rounded to whole microseconds.
///
/// Period boundaries are computed once and shared between adjacent periods,
/// so the rounding here never introduces gaps or overlaps.
pub fn years_to_delta(years: f64) -> TimeDelta {
    let micros = (years * DAYS_PER_YEAR * 86_400_000_000.0).round() as i64;
    TimeDelta::microseconds(micros)
}
