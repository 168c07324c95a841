//! Service-level error taxonomy.

use thiserror::Error;

use astrovastu_base::VedicError;

use crate::providers::ProviderError;

/// Failures surfaced by the orchestration layer.
///
/// Client-side input problems are distinguished from upstream degradation so
/// a transport layer can map them to 4xx vs 5xx responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// No usable coordinates: neither lat/lon nor a resolvable place.
    #[error("missing valid coordinates; provide lat/lon or a resolvable place")]
    MissingCoordinates,

    /// Birth date or time could not be parsed.
    #[error("invalid birth date/time: {0}")]
    InvalidDateTime(String),

    /// A place string was given but the resolver found nothing for it.
    #[error("could not resolve place: {0}")]
    UnresolvedPlace(String),

    /// The chart is missing a structurally required field and would be
    /// unusable downstream.
    #[error("incomplete chart; missing fields: {missing:?}")]
    IncompleteChart { missing: Vec<String> },

    /// An upstream provider failed in a way the pipeline cannot absorb.
    #[error("provider failure: {0}")]
    Provider(#[from] ProviderError),

    /// A calculation invariant was violated.
    #[error("calculation failed: {0}")]
    Calculation(#[from] VedicError),

    /// The report pipeline failed after exhausting its retries.
    #[error("report generation failed: {0}")]
    Report(String),
}

impl ServiceError {
    /// True when the failure is attributable to the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingCoordinates | Self::InvalidDateTime(_) | Self::UnresolvedPlace(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_vs_server_split() {
        assert!(ServiceError::MissingCoordinates.is_client_error());
        assert!(ServiceError::InvalidDateTime("bad".into()).is_client_error());
        assert!(ServiceError::UnresolvedPlace("Atlantis".into()).is_client_error());
        assert!(!ServiceError::IncompleteChart { missing: vec![] }.is_client_error());
        assert!(!ServiceError::Report("boom".into()).is_client_error());
    }
}
