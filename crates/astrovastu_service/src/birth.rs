//! Birth input parsing.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use astrovastu_base::VastuInput;

use crate::error::ServiceError;

/// Birth details as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Local time of birth, `HH:MM` or `HH:MM:SS`.
    pub time: String,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Offset of the birth time from UTC, in minutes. When absent, a
    /// resolver-supplied offset is used; failing that the time is taken
    /// as UTC.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
    #[serde(default)]
    pub sidereal: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vastu: Option<VastuInput>,
}

impl BirthData {
    /// Birth date as a `NaiveDate`.
    pub fn birth_date(&self) -> Result<NaiveDate, ServiceError> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| ServiceError::InvalidDateTime(format!("{}: {e}", self.date)))
    }

    /// Resolve the birth instant to UTC.
    ///
    /// `resolved_offset` comes from geocoding, when available; an explicit
    /// `utc_offset_minutes` on the input always wins over it.
    pub fn birth_instant(
        &self,
        resolved_offset: Option<FixedOffset>,
    ) -> Result<DateTime<Utc>, ServiceError> {
        let date = self.birth_date()?;
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&self.time, "%H:%M"))
            .map_err(|e| ServiceError::InvalidDateTime(format!("{}: {e}", self.time)))?;
        let naive = date.and_time(time);

        let offset = match self.utc_offset_minutes {
            Some(minutes) => FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
                ServiceError::InvalidDateTime(format!("utc offset out of range: {minutes} min"))
            })?,
            None => resolved_offset.unwrap_or_else(|| Utc.fix()),
        };

        offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| {
                ServiceError::InvalidDateTime(format!("ambiguous local datetime: {naive}"))
            })
    }
}

/// Interpret a place string of the form `"lat,lon"`, if it is one.
///
/// Out-of-range values are rejected so a stray comma in a real place name
/// never turns into coordinates.
pub fn parse_place_latlon(place: &str) -> Option<(f64, f64)> {
    let mut parts = place.split(',').map(str::trim);
    let lat: f64 = parts.next()?.parse().ok()?;
    let lon: f64 = parts.next()?.parse().ok()?;
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
        Some((lat, lon))
    } else {
        None
    }
}
