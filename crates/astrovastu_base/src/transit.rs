//! Transit-vs-natal aspect detection.
//!
//! Compares two sets of ecliptic longitudes (transiting vs natal) and
//! reports every major aspect within the allowed orb. Position lookup is
//! the caller's concern; this module is pure angular arithmetic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::util::angular_separation;

/// Default orb (allowed deviation from the exact aspect angle) in degrees.
pub const DEFAULT_ORB: f64 = 2.0;

/// The six major aspects checked between transit and natal positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aspect {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Quincunx,
    Opposition,
}

/// All aspects in ascending-angle order.
pub const ALL_ASPECTS: [Aspect; 6] = [
    Aspect::Conjunction,
    Aspect::Sextile,
    Aspect::Square,
    Aspect::Trine,
    Aspect::Quincunx,
    Aspect::Opposition,
];

impl Aspect {
    /// Exact angle of the aspect in degrees.
    pub const fn angle(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Quincunx => 150.0,
            Self::Opposition => 180.0,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Sextile => "sextile",
            Self::Square => "square",
            Self::Trine => "trine",
            Self::Quincunx => "quincunx",
            Self::Opposition => "opposition",
        }
    }
}

/// One detected aspect between a transiting and a natal planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectHit {
    pub transiting: Graha,
    pub natal: Graha,
    pub aspect: Aspect,
    /// Actual angular separation in degrees.
    pub separation: f64,
    /// Deviation from the exact aspect angle.
    pub orb: f64,
    pub transit_longitude: f64,
    pub natal_longitude: f64,
}

/// Check which major aspect, if any, exists between two longitudes.
///
/// Returns the aspect and its deviation from exact. Aspects are tested in
/// ascending-angle order, so the tightest-angle match wins when orbs of
/// adjacent aspects would overlap.
pub fn find_aspect(deg1: f64, deg2: f64, orb: f64) -> Option<(Aspect, f64)> {
    let sep = angular_separation(deg1, deg2);
    for aspect in ALL_ASPECTS {
        let diff = (sep - aspect.angle()).abs();
        if diff <= orb {
            return Some((aspect, diff));
        }
    }
    None
}

/// Compare every transiting planet against every natal planet.
///
/// Returned hits follow the map iteration order, so output is deterministic
/// for a given input.
pub fn compare_transit_to_natal(
    natal: &BTreeMap<Graha, f64>,
    transiting: &BTreeMap<Graha, f64>,
    orb: f64,
) -> Vec<AspectHit> {
    let mut hits = Vec::new();
    for (&t_graha, &t_lon) in transiting {
        for (&n_graha, &n_lon) in natal {
            if let Some((aspect, diff)) = find_aspect(t_lon, n_lon, orb) {
                hits.push(AspectHit {
                    transiting: t_graha,
                    natal: n_graha,
                    aspect,
                    separation: angular_separation(t_lon, n_lon),
                    orb: diff,
                    transit_longitude: t_lon,
                    natal_longitude: n_lon,
                });
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_trine() {
        let (aspect, diff) = find_aspect(10.0, 130.0, DEFAULT_ORB).unwrap();
        assert_eq!(aspect, Aspect::Trine);
        assert!(diff.abs() < 1e-12);
    }

    #[test]
    fn aspect_within_orb() {
        let (aspect, diff) = find_aspect(0.0, 91.5, DEFAULT_ORB).unwrap();
        assert_eq!(aspect, Aspect::Square);
        assert!((diff - 1.5).abs() < 1e-12);
    }

    #[test]
    fn no_aspect_outside_orb() {
        assert_eq!(find_aspect(0.0, 45.0, DEFAULT_ORB), None);
    }

    #[test]
    fn opposition_across_wrap() {
        let (aspect, _) = find_aspect(350.0, 170.0, DEFAULT_ORB).unwrap();
        assert_eq!(aspect, Aspect::Opposition);
    }

    #[test]
    fn conjunction_at_wrap() {
        let (aspect, diff) = find_aspect(359.5, 0.5, DEFAULT_ORB).unwrap();
        assert_eq!(aspect, Aspect::Conjunction);
        assert!((diff - 1.0).abs() < 1e-12);
    }

    #[test]
    fn compare_reports_all_pairs() {
        let natal = BTreeMap::from([(Graha::Sun, 45.0), (Graha::Moon, 210.0)]);
        let transiting = BTreeMap::from([(Graha::Jupiter, 165.0)]);
        // Jupiter 165 vs Sun 45: trine (120). Vs Moon 210: sep 45, no aspect.
        let hits = compare_transit_to_natal(&natal, &transiting, DEFAULT_ORB);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].transiting, Graha::Jupiter);
        assert_eq!(hits[0].natal, Graha::Sun);
        assert_eq!(hits[0].aspect, Aspect::Trine);
        assert!((hits[0].separation - 120.0).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs_no_hits() {
        let empty = BTreeMap::new();
        assert!(compare_transit_to_natal(&empty, &empty, DEFAULT_ORB).is_empty());
    }
}
