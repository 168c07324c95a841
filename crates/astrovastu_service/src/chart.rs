//! Natal chart assembly and dasha computation.
//!
//! A chart is assembled field by field. A single body the ephemeris cannot
//! deliver becomes a `None` entry and the pipeline continues; only the
//! structurally required pieces (Jupiter's longitude, the 5th house cusp,
//! the ascendant) escalate to a hard `IncompleteChart` error, because the
//! downstream interpretation is built around them.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use log::warn;
use serde::Serialize;

use astrovastu_base::{
    AspectHit, DEFAULT_ORB, DEFAULT_VARGA_DIVISORS, Graha, MahadashaTimeline, NATAL_GRAHAS,
    VargaChart, VastuReport, compare_transit_to_natal, generate_varga_set, normalize_360,
    numerology, vimshottari_timeline,
};

use crate::birth::{BirthData, parse_place_latlon};
use crate::error::ServiceError;
use crate::providers::{CoordinateResolver, Ephemeris, HouseCusps, ProviderError};

/// Echo of the person block of the input, kept in the normalized payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonInfo {
    pub name: Option<String>,
    pub date: String,
    pub time: String,
    pub place: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// One planet's entry in the natal chart. All fields may be absent when the
/// ephemeris failed for this body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlanetEntry {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub speed_longitude: Option<f64>,
}

/// Numerology block of the normalized payload; computed only when the input
/// carries a name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumerologySummary {
    pub life_path: u32,
    pub name_vibration: u32,
    pub soul_urge: u32,
    pub personality: u32,
    pub personal_year: u32,
}

/// Normalized natal chart: the single payload the report pipeline and any
/// transport layer consume.
#[derive(Debug, Clone, Serialize)]
pub struct NatalChart {
    pub person: PersonInfo,
    pub utc_birth: DateTime<Utc>,
    pub planets: BTreeMap<Graha, PlanetEntry>,
    /// Cusps for houses 1..=12; partial backend data leaves holes.
    pub houses: [Option<f64>; 12],
    pub ascendant: f64,
    /// Absent when the Moon's longitude could not be computed.
    pub dasha: Option<MahadashaTimeline>,
    pub divisional: BTreeMap<String, VargaChart>,
    pub numerology: Option<NumerologySummary>,
    pub transits: Vec<AspectHit>,
    pub vastu: Option<VastuReport>,
}

/// Dasha-only output for callers that do not need the full chart.
#[derive(Debug, Clone, Serialize)]
pub struct DashaReport {
    pub utc_birth: DateTime<Utc>,
    pub moon_longitude: f64,
    pub timeline: MahadashaTimeline,
}

/// Pick coordinates for the request: explicit lat/lon first, then a
/// `"lat,lon"` place string, then the geocoder.
async fn resolve_location<R: CoordinateResolver>(
    birth: &BirthData,
    resolver: Option<&R>,
) -> Result<(f64, f64, Option<chrono::FixedOffset>), ServiceError> {
    if let (Some(lat), Some(lon)) = (birth.lat, birth.lon) {
        return Ok((lat, lon, None));
    }
    let Some(place) = birth.place.as_deref() else {
        return Err(ServiceError::MissingCoordinates);
    };
    if let Some((lat, lon)) = parse_place_latlon(place) {
        return Ok((lat, lon, None));
    }
    let Some(resolver) = resolver else {
        return Err(ServiceError::MissingCoordinates);
    };
    match resolver.resolve(place).await {
        Ok(resolved) => Ok((resolved.lat, resolved.lon, resolved.utc_offset)),
        Err(ProviderError::NotFound(_)) => Err(ServiceError::UnresolvedPlace(place.to_string())),
        Err(e) => Err(ServiceError::Provider(e)),
    }
}

fn query_positions(
    eph: &dyn Ephemeris,
    at: DateTime<Utc>,
) -> BTreeMap<Graha, PlanetEntry> {
    let mut planets = BTreeMap::new();
    for graha in NATAL_GRAHAS {
        let entry = match eph.body_position(at, graha) {
            Ok(pos) => PlanetEntry {
                longitude: Some(normalize_360(pos.longitude)),
                latitude: pos.latitude,
                speed_longitude: pos.speed_longitude,
            },
            Err(e) => {
                warn!("ephemeris failed for {graha} at {at}: {e}");
                PlanetEntry::default()
            }
        };
        planets.insert(graha, entry);
    }
    // Ketu is always the point opposite Rahu, never a backend query.
    let ketu = match planets.get(&Graha::Rahu).and_then(|p| p.longitude) {
        Some(rahu) => PlanetEntry {
            longitude: Some(normalize_360(rahu + 180.0)),
            latitude: None,
            speed_longitude: None,
        },
        None => PlanetEntry::default(),
    };
    planets.insert(Graha::Ketu, ketu);
    planets
}

fn longitudes_of(planets: &BTreeMap<Graha, PlanetEntry>) -> BTreeMap<Graha, f64> {
    planets
        .iter()
        .filter_map(|(&g, p)| p.longitude.map(|lon| (g, lon)))
        .collect()
}

fn numerology_summary(name: &str, birth: &BirthData, now: DateTime<Utc>) -> NumerologySummary {
    // Date validity was established by birth_instant; fall back to a digit
    // sum of zero only if it somehow is not.
    let dob = birth.birth_date().ok();
    NumerologySummary {
        life_path: dob.map(numerology::life_path).unwrap_or(0),
        name_vibration: numerology::name_vibration(name),
        soul_urge: numerology::soul_urge(name),
        personality: numerology::personality_number(name),
        personal_year: dob
            .map(|d| numerology::personal_year(d, now.year()))
            .unwrap_or(0),
    }
}

/// Assemble the natal chart with coordinates already in hand.
///
/// `now` is the instant used for the transit comparison; pass `Utc::now()`
/// in production.
pub fn compute_chart_at(
    birth: &BirthData,
    lat: f64,
    lon: f64,
    eph: &dyn Ephemeris,
    now: DateTime<Utc>,
) -> Result<NatalChart, ServiceError> {
    let utc_birth = birth.birth_instant(None)?;
    compute_chart_inner(birth, lat, lon, utc_birth, eph, now)
}

fn compute_chart_inner(
    birth: &BirthData,
    lat: f64,
    lon: f64,
    utc_birth: DateTime<Utc>,
    eph: &dyn Ephemeris,
    now: DateTime<Utc>,
) -> Result<NatalChart, ServiceError> {
    let planets = query_positions(eph, utc_birth);

    let cusps = match eph.house_cusps(utc_birth, lat, lon) {
        Ok(h) => h,
        Err(e) => {
            warn!("house calculation failed: {e}");
            HouseCusps {
                cusps: [None; 12],
                ascendant: None,
            }
        }
    };
    let houses: [Option<f64>; 12] = cusps.cusps.map(|c| c.map(normalize_360));
    let ascendant = cusps.ascendant.map(normalize_360);

    let mut missing = Vec::new();
    if planets.get(&Graha::Jupiter).and_then(|p| p.longitude).is_none() {
        missing.push("planet:Jupiter".to_string());
    }
    if houses[4].is_none() {
        missing.push("house:5".to_string());
    }
    if ascendant.is_none() {
        missing.push("ascendant".to_string());
    }
    if !missing.is_empty() {
        return Err(ServiceError::IncompleteChart { missing });
    }
    let ascendant = ascendant.unwrap_or_default();

    let natal_longitudes = longitudes_of(&planets);
    let divisional = generate_varga_set(&natal_longitudes, &DEFAULT_VARGA_DIVISORS)?;

    let dasha = match natal_longitudes.get(&Graha::Moon) {
        Some(&moon) => match vimshottari_timeline(moon, utc_birth) {
            Ok(timeline) => Some(timeline),
            Err(e) => {
                warn!("dasha timeline failed: {e}");
                None
            }
        },
        None => {
            warn!("moon longitude unavailable; omitting dasha timeline");
            None
        }
    };

    let numerology = birth
        .name
        .as_deref()
        .map(|name| numerology_summary(name, birth, now));

    let transit_longitudes = longitudes_of(&query_positions(eph, now));
    let transits = compare_transit_to_natal(&natal_longitudes, &transit_longitudes, DEFAULT_ORB);

    let vastu = birth.vastu.as_ref().map(astrovastu_base::analyze_vastu);

    Ok(NatalChart {
        person: PersonInfo {
            name: birth.name.clone(),
            date: birth.date.clone(),
            time: birth.time.clone(),
            place: birth.place.clone(),
            lat,
            lon,
        },
        utc_birth,
        planets,
        houses,
        ascendant,
        dasha,
        divisional,
        numerology,
        transits,
        vastu,
    })
}

/// Full chart computation: resolve coordinates, then assemble.
pub async fn compute_chart<R: CoordinateResolver>(
    birth: &BirthData,
    eph: &dyn Ephemeris,
    resolver: Option<&R>,
    now: DateTime<Utc>,
) -> Result<NatalChart, ServiceError> {
    let (lat, lon, offset) = resolve_location(birth, resolver).await?;
    let utc_birth = birth.birth_instant(offset)?;
    compute_chart_inner(birth, lat, lon, utc_birth, eph, now)
}

/// Dasha timeline with coordinates already in hand.
///
/// Unlike single-planet degradation in the chart, a Moon the ephemeris
/// cannot deliver is fatal here: the timeline is the whole output.
pub fn compute_dasha_at(
    birth: &BirthData,
    eph: &dyn Ephemeris,
) -> Result<DashaReport, ServiceError> {
    let utc_birth = birth.birth_instant(None)?;
    let moon = eph.body_position(utc_birth, Graha::Moon)?;
    let moon_longitude = normalize_360(moon.longitude);
    let timeline = vimshottari_timeline(moon_longitude, utc_birth)?;
    Ok(DashaReport {
        utc_birth,
        moon_longitude,
        timeline,
    })
}

/// Dasha timeline, resolving coordinates first when only a place is given.
pub async fn compute_dasha<R: CoordinateResolver>(
    birth: &BirthData,
    eph: &dyn Ephemeris,
    resolver: Option<&R>,
) -> Result<DashaReport, ServiceError> {
    let (_, _, offset) = resolve_location(birth, resolver).await?;
    let utc_birth = birth.birth_instant(offset)?;
    let moon = eph.body_position(utc_birth, Graha::Moon)?;
    let moon_longitude = normalize_360(moon.longitude);
    let timeline = vimshottari_timeline(moon_longitude, utc_birth)?;
    Ok(DashaReport {
        utc_birth,
        moon_longitude,
        timeline,
    })
}
