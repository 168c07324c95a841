//! Timeline orchestration: the nested mahadasha/antardasha structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sequence::{antardasha_sequence, mahadasha_sequence};
use super::types::DashaPeriod;
use crate::error::VedicError;
use crate::nakshatra::{NakshatraPosition, nakshatra_position};

/// One mahadasha with its 9 nested antardashas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MahaPeriod {
    pub period: DashaPeriod,
    pub antardashas: Vec<DashaPeriod>,
}

/// The full nested Vimshottari timeline for one birth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MahadashaTimeline {
    /// The Moon's nakshatra position that anchored the rotation.
    pub nakshatra: NakshatraPosition,
    /// 9 mahadashas in rotation order, each carrying its antardashas.
    pub mahadashas: Vec<MahaPeriod>,
}

/// Build the complete nested timeline from a lunar longitude and birth instant.
///
/// Pure function of its inputs; safe to call concurrently.
pub fn vimshottari_timeline(
    moon_lon_deg: f64,
    birth_utc: DateTime<Utc>,
) -> Result<MahadashaTimeline, VedicError> {
    let nakshatra = nakshatra_position(moon_lon_deg)?;
    let majors = mahadasha_sequence(moon_lon_deg, birth_utc)?;

    let mut mahadashas = Vec::with_capacity(majors.len());
    for period in majors {
        let antardashas = antardasha_sequence(period.graha, period.start, period.duration_years)?;
        mahadashas.push(MahaPeriod {
            period,
            antardashas,
        });
    }

    Ok(MahadashaTimeline {
        nakshatra,
        mahadashas,
    })
}

/// Find the mahadasha and antardasha active at `at`, if the instant falls
/// within the timeline's span.
pub fn active_period(
    timeline: &MahadashaTimeline,
    at: DateTime<Utc>,
) -> Option<(&MahaPeriod, &DashaPeriod)> {
    let maha = timeline.mahadashas.iter().find(|m| m.period.contains(at))?;
    let antar = maha.antardashas.iter().find(|a| a.contains(at))?;
    Some((maha, antar))
}
