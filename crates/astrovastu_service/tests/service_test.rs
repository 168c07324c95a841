//! End-to-end pipeline tests over stub providers.

use std::cell::Cell;
use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use chrono::{DateTime, FixedOffset, Utc};

use astrovastu_base::Graha;
use astrovastu_service::{
    BirthData, BodyPosition, CoordinateResolver, Ephemeris, HouseCusps, NarrativeGenerator,
    NatalChart, NoResolver, ProviderError, ReportOptions, ReportRenderer, ResolvedPlace,
    ServiceError, compute_chart, compute_chart_at, compute_dasha_at, generate_report,
};

/// Fixed-sky ephemeris; selected bodies can be made to fail.
struct StubEphemeris {
    failing: Vec<Graha>,
    fail_houses: bool,
}

impl StubEphemeris {
    fn new() -> Self {
        Self {
            failing: Vec::new(),
            fail_houses: false,
        }
    }

    fn failing(grahas: &[Graha]) -> Self {
        Self {
            failing: grahas.to_vec(),
            fail_houses: false,
        }
    }

    fn longitude_for(graha: Graha) -> f64 {
        match graha {
            Graha::Sun => 280.0,
            Graha::Moon => 0.0,
            Graha::Mars => 150.0,
            Graha::Mercury => 275.0,
            Graha::Jupiter => 35.0,
            Graha::Venus => 310.0,
            Graha::Saturn => 40.0,
            Graha::Rahu => 120.0,
            Graha::Ketu => 300.0,
        }
    }
}

impl Ephemeris for StubEphemeris {
    fn body_position(
        &self,
        _at: DateTime<Utc>,
        graha: Graha,
    ) -> Result<BodyPosition, ProviderError> {
        if self.failing.contains(&graha) {
            return Err(ProviderError::Backend(format!("no data for {graha}")));
        }
        Ok(BodyPosition {
            longitude: Self::longitude_for(graha),
            latitude: Some(0.0),
            speed_longitude: Some(1.0),
        })
    }

    fn house_cusps(
        &self,
        _at: DateTime<Utc>,
        _lat: f64,
        _lon: f64,
    ) -> Result<HouseCusps, ProviderError> {
        if self.fail_houses {
            return Err(ProviderError::Unavailable("house backend down".into()));
        }
        let mut cusps = [None; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = Some(i as f64 * 30.0);
        }
        Ok(HouseCusps {
            cusps,
            ascendant: Some(12.5),
        })
    }
}

struct StubResolver;

impl CoordinateResolver for StubResolver {
    async fn resolve(&self, place: &str) -> Result<ResolvedPlace, ProviderError> {
        if place == "Delhi" {
            Ok(ResolvedPlace {
                lat: 28.61,
                lon: 77.21,
                utc_offset: FixedOffset::east_opt(330 * 60),
            })
        } else {
            Err(ProviderError::NotFound(place.to_string()))
        }
    }
}

/// Fails the first `failures` calls, then succeeds.
struct FlakyNarrator {
    failures: u32,
    calls: Cell<u32>,
}

impl NarrativeGenerator for FlakyNarrator {
    fn interpret(&self, _prompt: &str) -> Result<String, ProviderError> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        if n <= self.failures {
            Err(ProviderError::Unavailable("rate limited".into()))
        } else {
            Ok("**Summary**\nAll is well.".to_string())
        }
    }
}

struct StubRenderer {
    fail_pdf: bool,
}

impl ReportRenderer for StubRenderer {
    fn render_html(
        &self,
        _chart: &NatalChart,
        _narrative: &str,
        stem: &str,
    ) -> Result<PathBuf, ProviderError> {
        Ok(PathBuf::from(format!("{stem}.html")))
    }

    fn render_pdf(
        &self,
        _chart: &NatalChart,
        _narrative: &str,
        stem: &str,
    ) -> Result<PathBuf, ProviderError> {
        if self.fail_pdf {
            Err(ProviderError::Backend("wkhtmltopdf missing".into()))
        } else {
            Ok(PathBuf::from(format!("{stem}.pdf")))
        }
    }
}

fn birth_data() -> BirthData {
    BirthData {
        date: "1990-01-01".to_string(),
        time: "06:30".to_string(),
        lat: Some(28.61),
        lon: Some(77.21),
        name: Some("Aarav Sharma".to_string()),
        ..BirthData::default()
    }
}

fn now() -> DateTime<Utc> {
    "2024-06-01T00:00:00Z".parse().unwrap()
}

fn quick_report_opts() -> ReportOptions {
    ReportOptions {
        retry_base_delay: std::time::Duration::ZERO,
        now: Some(now()),
        ..ReportOptions::default()
    }
}

#[test]
fn chart_assembles_with_all_sections() {
    let chart = compute_chart_at(&birth_data(), 28.61, 77.21, &StubEphemeris::new(), now())
        .unwrap();
    assert_eq!(chart.planets.len(), 9);
    assert_eq!(chart.ascendant, 12.5);
    assert!(chart.dasha.is_some());
    assert!(chart.numerology.is_some());
    assert!(chart.divisional.contains_key("D9"));
}

#[test]
fn ketu_is_opposite_rahu() {
    let chart = compute_chart_at(&birth_data(), 28.61, 77.21, &StubEphemeris::new(), now())
        .unwrap();
    let rahu = chart.planets[&Graha::Rahu].longitude.unwrap();
    let ketu = chart.planets[&Graha::Ketu].longitude.unwrap();
    assert_abs_diff_eq!(ketu, (rahu + 180.0) % 360.0, epsilon = 1e-9);
    assert!(chart.planets[&Graha::Ketu].latitude.is_none());
}

#[test]
fn single_failed_body_degrades() {
    let eph = StubEphemeris::failing(&[Graha::Mercury]);
    let chart = compute_chart_at(&birth_data(), 28.61, 77.21, &eph, now()).unwrap();
    assert!(chart.planets[&Graha::Mercury].longitude.is_none());
    assert!(chart.planets[&Graha::Sun].longitude.is_some());
}

#[test]
fn missing_jupiter_is_fatal() {
    let eph = StubEphemeris::failing(&[Graha::Jupiter]);
    let err = compute_chart_at(&birth_data(), 28.61, 77.21, &eph, now()).unwrap_err();
    match err {
        ServiceError::IncompleteChart { missing } => {
            assert_eq!(missing, vec!["planet:Jupiter".to_string()]);
        }
        other => panic!("expected IncompleteChart, got {other:?}"),
    }
}

#[test]
fn missing_houses_and_ascendant_are_fatal() {
    let eph = StubEphemeris {
        failing: Vec::new(),
        fail_houses: true,
    };
    let err = compute_chart_at(&birth_data(), 28.61, 77.21, &eph, now()).unwrap_err();
    match err {
        ServiceError::IncompleteChart { missing } => {
            assert!(missing.contains(&"house:5".to_string()));
            assert!(missing.contains(&"ascendant".to_string()));
            assert!(!missing.contains(&"planet:Jupiter".to_string()));
        }
        other => panic!("expected IncompleteChart, got {other:?}"),
    }
}

#[test]
fn failed_moon_omits_dasha_only() {
    let eph = StubEphemeris::failing(&[Graha::Moon]);
    let chart = compute_chart_at(&birth_data(), 28.61, 77.21, &eph, now()).unwrap();
    assert!(chart.dasha.is_none());
}

#[test]
fn dasha_golden_scenario() {
    let mut birth = birth_data();
    birth.date = "2000-01-01".to_string();
    birth.time = "00:00".to_string();
    let report = compute_dasha_at(&birth, &StubEphemeris::new()).unwrap();
    // Moon at 0 deg: nakshatra 0, fraction 0, full 7-year Ketu mahadasha.
    assert_eq!(report.moon_longitude, 0.0);
    let first = &report.timeline.mahadashas[0].period;
    assert_eq!(first.graha, Graha::Ketu);
    assert_abs_diff_eq!(first.duration_years, 7.0, epsilon = 1e-9);
    // Mean-year arithmetic lands within a day of the calendar date.
    let expected_end: DateTime<Utc> = "2007-01-01T00:00:00Z".parse().unwrap();
    assert!((first.end - expected_end).num_seconds().abs() < 86_400);
}

#[test]
fn dasha_moon_failure_is_provider_error() {
    let eph = StubEphemeris::failing(&[Graha::Moon]);
    let err = compute_dasha_at(&birth_data(), &eph).unwrap_err();
    assert!(matches!(err, ServiceError::Provider(_)));
    assert!(!err.is_client_error());
}

#[tokio::test(flavor = "current_thread")]
async fn place_resolved_and_offset_applied() {
    let mut birth = birth_data();
    birth.lat = None;
    birth.lon = None;
    birth.place = Some("Delhi".to_string());
    let chart = compute_chart(&birth, &StubEphemeris::new(), Some(&StubResolver), now())
        .await
        .unwrap();
    assert_eq!(chart.person.lat, 28.61);
    // 06:30 IST is 01:00 UTC.
    assert_eq!(chart.utc_birth.to_rfc3339(), "1990-01-01T01:00:00+00:00");
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_place_is_client_error() {
    let mut birth = birth_data();
    birth.lat = None;
    birth.lon = None;
    birth.place = Some("Atlantis".to_string());
    let err = compute_chart(&birth, &StubEphemeris::new(), Some(&StubResolver), now())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::UnresolvedPlace(_)));
    assert!(err.is_client_error());
}

#[tokio::test(flavor = "current_thread")]
async fn no_coordinates_no_resolver_rejected() {
    let mut birth = birth_data();
    birth.lat = None;
    birth.lon = None;
    birth.place = Some("Delhi".to_string());
    let err = compute_chart(&birth, &StubEphemeris::new(), None::<&NoResolver>, now())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::MissingCoordinates));
}

#[tokio::test(flavor = "current_thread")]
async fn latlon_place_string_skips_resolver() {
    let mut birth = birth_data();
    birth.lat = None;
    birth.lon = None;
    birth.place = Some("28.61, 77.21".to_string());
    let chart = compute_chart(&birth, &StubEphemeris::new(), None::<&NoResolver>, now())
        .await
        .unwrap();
    assert_eq!(chart.person.lon, 77.21);
}

#[test]
fn narrative_retries_until_success() {
    let chart = compute_chart_at(&birth_data(), 28.61, 77.21, &StubEphemeris::new(), now())
        .unwrap();
    let narrator = FlakyNarrator {
        failures: 2,
        calls: Cell::new(0),
    };
    let outcome = generate_report(
        &chart,
        &narrator,
        &StubRenderer { fail_pdf: false },
        &quick_report_opts(),
    )
    .unwrap();
    assert_eq!(narrator.calls.get(), 3);
    assert_eq!(outcome.summary, "Summary\nAll is well.");
    assert!(outcome.pdf_path.is_some());
}

#[test]
fn narrative_gives_up_after_limit() {
    let chart = compute_chart_at(&birth_data(), 28.61, 77.21, &StubEphemeris::new(), now())
        .unwrap();
    let narrator = FlakyNarrator {
        failures: 10,
        calls: Cell::new(0),
    };
    let err = generate_report(
        &chart,
        &narrator,
        &StubRenderer { fail_pdf: false },
        &quick_report_opts(),
    )
    .unwrap_err();
    assert_eq!(narrator.calls.get(), 3);
    assert!(matches!(err, ServiceError::Report(_)));
}

#[test]
fn pdf_failure_degrades_to_html_only() {
    let chart = compute_chart_at(&birth_data(), 28.61, 77.21, &StubEphemeris::new(), now())
        .unwrap();
    let narrator = FlakyNarrator {
        failures: 0,
        calls: Cell::new(0),
    };
    let outcome = generate_report(
        &chart,
        &narrator,
        &StubRenderer { fail_pdf: true },
        &quick_report_opts(),
    )
    .unwrap();
    assert!(outcome.pdf_path.is_none());
    let html = outcome.html_path.to_string_lossy().to_string();
    assert_eq!(html, "AaravSharma_20240601T000000Z.html");
}

#[test]
fn chart_serializes_to_json() {
    let chart = compute_chart_at(&birth_data(), 28.61, 77.21, &StubEphemeris::new(), now())
        .unwrap();
    let json = serde_json::to_value(&chart).unwrap();
    assert!(json["planets"]["Jupiter"]["longitude"].is_number());
    assert!(json["dasha"]["mahadashas"].is_array());
}
