//! Capability traits for external backends.
//!
//! The pipeline depends on these traits rather than on any concrete
//! ephemeris, geocoder, language model, or renderer. A caller wires in what
//! it has; a missing optional capability means the corresponding output
//! section is omitted, never guessed.

use chrono::{DateTime, FixedOffset, Utc};
use thiserror::Error;

use astrovastu_base::Graha;

use crate::chart::NatalChart;

/// Failure reported by any provider backend.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// The backend could not be reached or refused the request.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    /// The backend answered but had no result for the query.
    #[error("no result for {0:?}")]
    NotFound(String),

    /// Any other backend-reported failure.
    #[error("{0}")]
    Backend(String),
}

/// A single body's position as reported by an ephemeris backend.
///
/// Longitude is required; latitude and speed are backend-dependent extras.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPosition {
    pub longitude: f64,
    pub latitude: Option<f64>,
    pub speed_longitude: Option<f64>,
}

/// House cusps and ascendant for a birth chart.
///
/// Individual cusps may be absent when the backend returns partial data;
/// chart assembly decides which gaps are fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseCusps {
    /// Cusps for houses 1 through 12.
    pub cusps: [Option<f64>; 12],
    pub ascendant: Option<f64>,
}

/// A geocoded place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPlace {
    pub lat: f64,
    pub lon: f64,
    /// UTC offset at the place, when the resolver knows it.
    pub utc_offset: Option<FixedOffset>,
}

/// Planetary position source.
pub trait Ephemeris {
    fn body_position(&self, at: DateTime<Utc>, graha: Graha)
    -> Result<BodyPosition, ProviderError>;

    fn house_cusps(
        &self,
        at: DateTime<Utc>,
        lat: f64,
        lon: f64,
    ) -> Result<HouseCusps, ProviderError>;
}

/// Place-name geocoder.
///
/// Resolution is awaitable so a request handler can abandon a slow lookup
/// by dropping the future.
#[allow(async_fn_in_trait)]
pub trait CoordinateResolver {
    async fn resolve(&self, place: &str) -> Result<ResolvedPlace, ProviderError>;
}

/// The no-geocoder capability: every lookup reports no result.
pub struct NoResolver;

impl CoordinateResolver for NoResolver {
    async fn resolve(&self, place: &str) -> Result<ResolvedPlace, ProviderError> {
        Err(ProviderError::NotFound(place.to_string()))
    }
}

/// Narrative text source (a language model in production).
pub trait NarrativeGenerator {
    fn interpret(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Report output writer. `stem` is the filename without extension; the
/// renderer picks the directory and extension and returns the written path.
pub trait ReportRenderer {
    fn render_html(
        &self,
        chart: &NatalChart,
        narrative: &str,
        stem: &str,
    ) -> Result<std::path::PathBuf, ProviderError>;

    fn render_pdf(
        &self,
        chart: &NatalChart,
        narrative: &str,
        stem: &str,
    ) -> Result<std::path::PathBuf, ProviderError>;
}
