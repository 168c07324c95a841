//! The 9 grahas (planets) used throughout chart computation.
//!
//! The enum order is the Vimshottari rotation order, which doubles as the
//! canonical cycle order for dasha sequencing. Rahu and Ketu are the lunar
//! nodes; Ketu has no ephemeris entry of its own and is always derived as
//! Rahu + 180 degrees.

use serde::{Deserialize, Serialize};

/// The 9 grahas in Vimshottari rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Graha {
    Ketu,
    Venus,
    Sun,
    Moon,
    Mars,
    Rahu,
    Jupiter,
    Saturn,
    Mercury,
}

/// All 9 grahas in Vimshottari rotation order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Ketu,
    Graha::Venus,
    Graha::Sun,
    Graha::Moon,
    Graha::Mars,
    Graha::Rahu,
    Graha::Jupiter,
    Graha::Saturn,
    Graha::Mercury,
];

/// The 8 bodies queried from an ephemeris for a natal chart.
///
/// Ketu is excluded: it is derived from Rahu, never queried.
pub const NATAL_GRAHAS: [Graha; 8] = [
    Graha::Sun,
    Graha::Moon,
    Graha::Mercury,
    Graha::Venus,
    Graha::Mars,
    Graha::Jupiter,
    Graha::Saturn,
    Graha::Rahu,
];

impl Graha {
    /// Display name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ketu => "Ketu",
            Self::Venus => "Venus",
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Rahu => "Rahu",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Mercury => "Mercury",
        }
    }

    /// 0-based index into ALL_GRAHAS (the Vimshottari rotation position).
    pub const fn index(self) -> u8 {
        match self {
            Self::Ketu => 0,
            Self::Venus => 1,
            Self::Sun => 2,
            Self::Moon => 3,
            Self::Mars => 4,
            Self::Rahu => 5,
            Self::Jupiter => 6,
            Self::Saturn => 7,
            Self::Mercury => 8,
        }
    }

    /// Whether this body has its own ephemeris entry.
    pub const fn has_ephemeris_entry(self) -> bool {
        !matches!(self, Self::Ketu)
    }
}

impl std::fmt::Display for Graha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_grahas_count() {
        assert_eq!(ALL_GRAHAS.len(), 9);
    }

    #[test]
    fn graha_indices_sequential() {
        for (i, g) in ALL_GRAHAS.iter().enumerate() {
            assert_eq!(g.index() as usize, i);
        }
    }

    #[test]
    fn natal_grahas_exclude_ketu() {
        assert!(!NATAL_GRAHAS.contains(&Graha::Ketu));
        assert_eq!(NATAL_GRAHAS.len(), 8);
    }

    #[test]
    fn ketu_has_no_ephemeris_entry() {
        assert!(!Graha::Ketu.has_ephemeris_entry());
        assert!(Graha::Rahu.has_ephemeris_entry());
    }

    #[test]
    fn graha_names_nonempty() {
        for g in ALL_GRAHAS {
            assert!(!g.name().is_empty());
        }
    }
}
