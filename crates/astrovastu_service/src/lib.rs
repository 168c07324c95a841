//! Orchestration layer for AstroVastu: natal chart assembly, dasha timelines,
//! and report generation over pluggable providers.
//!
//! The calculations themselves live in `astrovastu_base`; this crate wires
//! them to an ephemeris backend, an optional geocoder, a narrative generator,
//! and a report renderer. Each external capability is a trait so callers can
//! plug in real backends or test stubs, and absent capabilities degrade the
//! output instead of failing the request (except where a chart would be
//! structurally unusable).

pub mod birth;
pub mod chart;
pub mod error;
pub mod providers;
pub mod report;

pub use birth::{BirthData, parse_place_latlon};
pub use chart::{
    DashaReport, NatalChart, NumerologySummary, PersonInfo, PlanetEntry, compute_chart,
    compute_chart_at, compute_dasha, compute_dasha_at,
};
pub use error::ServiceError;
pub use providers::{
    BodyPosition, CoordinateResolver, Ephemeris, HouseCusps, NarrativeGenerator, NoResolver,
    ProviderError, ReportRenderer, ResolvedPlace,
};
pub use report::{ReportOptions, ReportOutcome, build_prompt, clean_narrative, generate_report};
