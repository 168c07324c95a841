//! Rashi (zodiac sign) computation.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each.
//! Divisional charts re-project longitudes back through this division.

use serde::{Deserialize, Serialize};

use crate::util::normalize_360;

/// The 12 signs starting from Aries at 0 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rashi {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in order (0 = Aries, 11 = Pisces).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Aries,
    Rashi::Taurus,
    Rashi::Gemini,
    Rashi::Cancer,
    Rashi::Leo,
    Rashi::Virgo,
    Rashi::Libra,
    Rashi::Scorpio,
    Rashi::Sagittarius,
    Rashi::Capricorn,
    Rashi::Aquarius,
    Rashi::Pisces,
];

impl Rashi {
    /// Display name of the sign.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// 0-based index into ALL_RASHIS.
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Rashi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sign containing the given longitude.
pub fn rashi_from_longitude(lon_deg: f64) -> Rashi {
    let idx = (normalize_360(lon_deg) / 30.0).floor() as usize % 12;
    ALL_RASHIS[idx]
}

/// Position within the sign, [0, 30).
pub fn deg_in_sign(lon_deg: f64) -> f64 {
    normalize_360(lon_deg) % 30.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_boundaries() {
        assert_eq!(rashi_from_longitude(0.0), Rashi::Aries);
        assert_eq!(rashi_from_longitude(29.999), Rashi::Aries);
        assert_eq!(rashi_from_longitude(30.0), Rashi::Taurus);
        assert_eq!(rashi_from_longitude(359.999), Rashi::Pisces);
    }

    #[test]
    fn sign_wraps_negative() {
        assert_eq!(rashi_from_longitude(-10.0), Rashi::Pisces);
    }

    #[test]
    fn deg_in_sign_values() {
        assert!((deg_in_sign(45.0) - 15.0).abs() < 1e-12);
        assert!((deg_in_sign(359.5) - 29.5).abs() < 1e-12);
    }

    #[test]
    fn indices_sequential() {
        for (i, r) in ALL_RASHIS.iter().enumerate() {
            assert_eq!(r.index() as usize, i);
        }
    }
}
