//! Pythagorean numerology scores.
//!
//! Letters map A..Z onto 1..9 in the Pythagorean scheme; totals reduce by
//! repeated digit-summing, except the master numbers 11 and 22 which are
//! kept unreduced. Non-ASCII-alphabetic characters are ignored everywhere.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// Pythagorean value of an uppercase letter, 0 for anything else.
pub fn letter_value(ch: char) -> u32 {
    match ch {
        'A' | 'J' | 'S' => 1,
        'B' | 'K' | 'T' => 2,
        'C' | 'L' | 'U' => 3,
        'D' | 'M' | 'V' => 4,
        'E' | 'N' | 'W' => 5,
        'F' | 'O' | 'X' => 6,
        'G' | 'P' | 'Y' => 7,
        'H' | 'Q' | 'Z' => 8,
        'I' | 'R' => 9,
        _ => 0,
    }
}

/// Uppercase a name and drop everything outside A-Z.
fn clean_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn digit_sum(mut n: u32) -> u32 {
    let mut s = 0;
    while n > 0 {
        s += n % 10;
        n /= 10;
    }
    s
}

/// Reduce a total to a core number in 1..9.
///
/// The master numbers 11 and 22 are kept as-is when passed in directly;
/// totals that merely pass through them while reducing are not.
pub fn reduce_to_core(n: u32) -> u32 {
    if n == 11 || n == 22 {
        return n;
    }
    let mut s = n;
    while s > 9 {
        s = digit_sum(s);
    }
    s
}

/// Life path number: digit sum of the full YYYYMMDD date, reduced.
pub fn life_path(dob: NaiveDate) -> u32 {
    let total = digit_sum(dob.year().unsigned_abs())
        + digit_sum(dob.month())
        + digit_sum(dob.day());
    reduce_to_core(total)
}

/// Destiny / expression number from all letters of the name. 0 if no letters.
pub fn name_vibration(name: &str) -> u32 {
    let total: u32 = clean_name(name).chars().map(letter_value).sum();
    if total == 0 { 0 } else { reduce_to_core(total) }
}

/// Soul urge number from the vowels only. 0 if the name has no vowels.
pub fn soul_urge(name: &str) -> u32 {
    let total: u32 = clean_name(name)
        .chars()
        .filter(|c| VOWELS.contains(c))
        .map(letter_value)
        .sum();
    if total == 0 { 0 } else { reduce_to_core(total) }
}

/// Personality number from the consonants only. 0 if none.
pub fn personality_number(name: &str) -> u32 {
    let total: u32 = clean_name(name)
        .chars()
        .filter(|c| !VOWELS.contains(c))
        .map(letter_value)
        .sum();
    if total == 0 { 0 } else { reduce_to_core(total) }
}

/// Personal year for a calendar year: month + day digits plus year digits.
pub fn personal_year(dob: NaiveDate, year: i32) -> u32 {
    let md = digit_sum(dob.month()) + digit_sum(dob.day());
    let ysum = digit_sum(year.unsigned_abs());
    reduce_to_core(md + ysum)
}

/// Letter-by-letter breakdown of a name's vibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameBreakdown {
    /// Each counted letter with its Pythagorean value.
    pub letters: Vec<(char, u32)>,
    /// Raw sum before reduction.
    pub total_raw: u32,
    /// Reduced core vibration.
    pub reduced: u32,
}

/// Detailed breakdown for a name.
pub fn name_breakdown(name: &str) -> NameBreakdown {
    let letters: Vec<(char, u32)> = clean_name(name)
        .chars()
        .map(|c| (c, letter_value(c)))
        .collect();
    let total_raw: u32 = letters.iter().map(|&(_, v)| v).sum();
    let reduced = if total_raw == 0 {
        0
    } else {
        reduce_to_core(total_raw)
    };
    NameBreakdown {
        letters,
        total_raw,
        reduced,
    }
}

/// A single-initial name adjustment candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweakSuggestion {
    pub suggested_name: String,
    pub added_letter: char,
    pub added_value: u32,
    pub new_vibration: u32,
    /// Change relative to the original vibration.
    pub delta: i32,
    /// Distance of the new vibration from the target.
    pub distance_to_target: u32,
}

/// Outcome of a name-tweak search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TweakOutcome {
    /// Empty name, nothing to do.
    NoName,
    /// The name already carries the target vibration; idempotent no-op.
    AlreadyMatching { vibration: u32 },
    /// No candidate initial produced a usable change.
    NoSuggestion { vibration: u32 },
    /// Ranked suggestions, best first.
    Suggestions {
        vibration: u32,
        suggestions: Vec<TweakSuggestion>,
    },
}

/// Suggest minimal single-initial prefixes that move a name's vibration
/// toward `target`.
///
/// Exact matches rank first, then closeness to target, then smallest
/// absolute change. Candidates are deduplicated by resulting vibration, and
/// the initial already leading the name is never re-suggested.
pub fn suggest_name_tweaks(name: &str, target: u32, max_changes: usize) -> TweakOutcome {
    let base = name.trim();
    if base.is_empty() {
        return TweakOutcome::NoName;
    }

    let base_vibration = name_breakdown(base).reduced;
    if base_vibration == target {
        return TweakOutcome::AlreadyMatching {
            vibration: base_vibration,
        };
    }

    let existing_initial = base
        .split_whitespace()
        .next()
        .and_then(|t| t.chars().next())
        .map(|c| c.to_ascii_uppercase());

    let mut seen_vibrations = std::collections::BTreeSet::new();
    let mut candidates = Vec::new();

    for ch in 'A'..='Z' {
        if existing_initial == Some(ch) {
            continue;
        }
        let pattern = format!("{ch} {base}");
        let new_vibration = name_breakdown(&pattern).reduced;
        if !seen_vibrations.insert(new_vibration) {
            continue;
        }
        candidates.push(TweakSuggestion {
            suggested_name: pattern,
            added_letter: ch,
            added_value: letter_value(ch),
            new_vibration,
            delta: new_vibration as i32 - base_vibration as i32,
            distance_to_target: new_vibration.abs_diff(target),
        });
    }

    if candidates.is_empty() {
        return TweakOutcome::NoSuggestion {
            vibration: base_vibration,
        };
    }

    candidates.sort_by_key(|c| {
        (
            c.distance_to_target != 0,
            c.distance_to_target,
            c.delta.unsigned_abs(),
            c.new_vibration,
        )
    });
    candidates.truncate(max_changes);

    TweakOutcome::Suggestions {
        vibration: base_vibration,
        suggestions: candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_values_cover_alphabet() {
        for ch in 'A'..='Z' {
            let v = letter_value(ch);
            assert!((1..=9).contains(&v), "{ch} -> {v}");
        }
        assert_eq!(letter_value('3'), 0);
    }

    #[test]
    fn reduce_plain_numbers() {
        assert_eq!(reduce_to_core(5), 5);
        assert_eq!(reduce_to_core(10), 1);
        // 38 -> 11 -> 2: intermediate masters do not stop reduction.
        assert_eq!(reduce_to_core(38), 2);
    }

    #[test]
    fn reduce_keeps_direct_masters() {
        assert_eq!(reduce_to_core(11), 11);
        assert_eq!(reduce_to_core(22), 22);
    }

    #[test]
    fn life_path_simple() {
        // 1990-01-01: 1+9+9+0 + 0+1 + 0+1 = 21 -> 3
        let dob = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        assert_eq!(life_path(dob), 3);
    }

    #[test]
    fn name_vibration_john_doe() {
        // JOHNDOE = 1+6+8+5+4+6+5 = 35 -> 8
        assert_eq!(name_vibration("John Doe"), 8);
    }

    #[test]
    fn soul_urge_vowels_only() {
        // Vowels of JOHNDOE: O,O,E = 6+6+5 = 17 -> 8
        assert_eq!(soul_urge("John Doe"), 8);
    }

    #[test]
    fn personality_consonants_only() {
        // Consonants of JOHNDOE: J,H,N,D = 1+8+5+4 = 18 -> 9
        assert_eq!(personality_number("John Doe"), 9);
    }

    #[test]
    fn empty_name_scores_zero() {
        assert_eq!(name_vibration(""), 0);
        assert_eq!(soul_urge("xyz"), 0); // no vowels
        assert_eq!(personality_number("aeiou"), 0); // no consonants
    }

    #[test]
    fn personal_year_example() {
        // dob month+day digits: 0+1 + 1+5 = 7; year 2024 -> 8; 15 -> 6
        let dob = NaiveDate::from_ymd_opt(1990, 1, 15).unwrap();
        assert_eq!(personal_year(dob, 2024), 6);
    }

    #[test]
    fn breakdown_totals() {
        let b = name_breakdown("Abc");
        assert_eq!(b.letters, vec![('A', 1), ('B', 2), ('C', 3)]);
        assert_eq!(b.total_raw, 6);
        assert_eq!(b.reduced, 6);
    }

    #[test]
    fn tweaks_empty_name() {
        assert_eq!(suggest_name_tweaks("  ", 5, 1), TweakOutcome::NoName);
    }

    #[test]
    fn tweaks_already_matching_is_idempotent() {
        let vib = name_vibration("John Doe");
        assert_eq!(
            suggest_name_tweaks("John Doe", vib, 1),
            TweakOutcome::AlreadyMatching { vibration: vib }
        );
    }

    #[test]
    fn tweaks_prefer_exact_match() {
        let target = 5;
        let outcome = suggest_name_tweaks("John Doe", target, 3);
        let TweakOutcome::Suggestions { suggestions, .. } = outcome else {
            panic!("expected suggestions");
        };
        assert!(!suggestions.is_empty());
        // Best suggestion must hit the target exactly if any candidate does.
        assert_eq!(suggestions[0].distance_to_target, 0);
        assert_eq!(suggestions[0].new_vibration, target);
    }

    #[test]
    fn tweaks_do_not_reuse_existing_initial() {
        let outcome = suggest_name_tweaks("John Doe", 1, 26);
        let TweakOutcome::Suggestions { suggestions, .. } = outcome else {
            panic!("expected suggestions");
        };
        assert!(suggestions.iter().all(|s| s.added_letter != 'J'));
    }

    #[test]
    fn tweaks_dedupe_by_vibration() {
        let outcome = suggest_name_tweaks("John Doe", 1, 26);
        let TweakOutcome::Suggestions { suggestions, .. } = outcome else {
            panic!("expected suggestions");
        };
        let mut seen = std::collections::BTreeSet::new();
        for s in &suggestions {
            assert!(seen.insert(s.new_vibration));
        }
    }
}
