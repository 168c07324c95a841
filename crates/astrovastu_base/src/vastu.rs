//! Vastu sector mapping and activation suggestions.
//!
//! Deterministic, conservative heuristics: rooms are bucketed into the 8
//! compass sectors, empty non-entrance sectors are flagged weak, and a small
//! fixed rule table produces prioritized activation suggestions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The 8 compass sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sector {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

/// All sectors in table order.
pub const ALL_SECTORS: [Sector; 8] = [
    Sector::N,
    Sector::NE,
    Sector::E,
    Sector::SE,
    Sector::S,
    Sector::SW,
    Sector::W,
    Sector::NW,
];

/// Element associated with a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectorElement {
    Water,
    Earth,
    Air,
    Fire,
}

impl Sector {
    /// Short compass label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }

    /// Element of the sector.
    pub const fn element(self) -> SectorElement {
        match self {
            Self::N | Self::W => SectorElement::Water,
            Self::NE | Self::SW => SectorElement::Earth,
            Self::E | Self::NW => SectorElement::Air,
            Self::SE | Self::S => SectorElement::Fire,
        }
    }

    /// Qualities traditionally supported by the sector.
    pub const fn qualities(self) -> &'static [&'static str] {
        match self {
            Self::N => &["career", "flow"],
            Self::NE => &["spirituality", "study"],
            Self::E => &["health", "family"],
            Self::SE => &["wealth", "kitchen"],
            Self::S => &["fame", "energy"],
            Self::SW => &["stability", "relationships"],
            Self::W => &["children", "creativity"],
            Self::NW => &["network", "travel"],
        }
    }

    /// Default activation suggestion for the sector.
    pub const fn default_activation(self) -> (&'static str, &'static str, u8) {
        match self {
            Self::NE => (
                "keep clutter free",
                "NE supports spiritual/study activities",
                1,
            ),
            Self::SW => (
                "strengthen with heavy furniture or earth tones",
                "SW supports stability and relationships",
                1,
            ),
            Self::SE => (
                "kitchen or fire element here is good; if not, use bright lights",
                "SE represents fire and wealth",
                1,
            ),
            Self::N => (
                "water features (small) or mirror carefully",
                "N supports flow and career",
                2,
            ),
            Self::E => (
                "place plants, morning light area",
                "E supports health",
                2,
            ),
            Self::W => (
                "use creative displays for children and hobbies",
                "W supports creativity/children",
                3,
            ),
            Self::NW => (
                "keep for guest/transport functions; avoid heavy storage",
                "NW supports movement/network",
                3,
            ),
            Self::S => (
                "avoid heavy water in south; use colors for fame",
                "S supports reputation",
                3,
            ),
        }
    }
}

/// Parse a sector from a compass label or full direction name.
///
/// Unknown strings yield `None`; room placement input is user-supplied and
/// a bad direction just drops that room from the analysis.
pub fn parse_sector(s: &str) -> Option<Sector> {
    let upper = s.trim().to_ascii_uppercase().replace('-', "");
    match upper.as_str() {
        "N" | "NORTH" => Some(Sector::N),
        "NE" | "NORTHEAST" => Some(Sector::NE),
        "E" | "EAST" => Some(Sector::E),
        "SE" | "SOUTHEAST" => Some(Sector::SE),
        "S" | "SOUTH" => Some(Sector::S),
        "SW" | "SOUTHWEST" => Some(Sector::SW),
        "W" | "WEST" => Some(Sector::W),
        "NW" | "NORTHWEST" => Some(Sector::NW),
        _ => None,
    }
}

/// A room placement supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VastuRoom {
    pub name: String,
    /// Compass label or full direction name; parsed leniently.
    pub sector: String,
}

/// Input for a Vastu analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VastuInput {
    #[serde(default)]
    pub plot_facing: Option<String>,
    #[serde(default)]
    pub main_entrance: Option<String>,
    #[serde(default)]
    pub rooms: Vec<VastuRoom>,
    #[serde(default)]
    pub plot_type: Option<String>,
}

/// Per-sector summary in the analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorInfo {
    pub element: SectorElement,
    pub qualities: Vec<String>,
    pub occupancy_count: usize,
    pub rooms: Vec<VastuRoom>,
}

/// One activation recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    pub sector: Sector,
    pub action: String,
    /// Lower is more urgent; output is sorted ascending.
    pub priority: u8,
    pub why: String,
}

/// Full Vastu analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VastuReport {
    pub plot_facing: Option<Sector>,
    pub entrance: Option<Sector>,
    pub plot_type: String,
    pub sectors: BTreeMap<Sector, SectorInfo>,
    pub weak_sectors: Vec<Sector>,
    pub recommended_activations: Vec<Activation>,
}

/// Analyze a room layout against the sector rule tables.
pub fn analyze_vastu(input: &VastuInput) -> VastuReport {
    let plot_facing = input.plot_facing.as_deref().and_then(parse_sector);
    let entrance = input.main_entrance.as_deref().and_then(parse_sector);
    let plot_type = input
        .plot_type
        .clone()
        .unwrap_or_else(|| "house".to_string())
        .to_ascii_lowercase();

    // Bucket rooms into sectors; unparseable directions drop out.
    let mut room_map: BTreeMap<Sector, Vec<VastuRoom>> =
        ALL_SECTORS.iter().map(|&s| (s, Vec::new())).collect();
    for room in &input.rooms {
        if let Some(sector) = parse_sector(&room.sector) {
            room_map.entry(sector).or_default().push(room.clone());
        }
    }

    let weak_sectors: Vec<Sector> = ALL_SECTORS
        .iter()
        .copied()
        .filter(|&s| room_map[&s].is_empty() && Some(s) != entrance)
        .collect();

    let mut recs = Vec::new();

    if let Some(ent) = entrance {
        let (action, _, _) = ent.default_activation();
        recs.push(Activation {
            sector: ent,
            action: action.to_string(),
            priority: 0,
            why: format!("Main entrance is at {}", ent.label()),
        });
    }

    for (idx, &sector) in weak_sectors.iter().enumerate() {
        let (action, _, _) = sector.default_activation();
        recs.push(Activation {
            sector,
            action: action.to_string(),
            priority: 2 + idx as u8,
            why: format!(
                "Sector {} currently has no rooms; suggested activation to balance energy.",
                sector.label()
            ),
        });
    }

    // Room-specific rules: misplaced kitchen and puja placements.
    for (&sector, rooms) in &room_map {
        for room in rooms {
            let name = room.name.to_ascii_lowercase();
            if name.contains("kitchen") && sector == Sector::NE {
                recs.push(Activation {
                    sector,
                    action: "Consider relocating kitchen (NE not ideal for fire); if not \
                             possible, mitigate with white tiles and ventilation"
                        .to_string(),
                    priority: 1,
                    why: "Kitchen (fire) in NE (spiritual sector) - mitigation suggested"
                        .to_string(),
                });
            }
            if (name.contains("puja") || name.contains("altar") || name.contains("temple"))
                && !matches!(sector, Sector::NE | Sector::E)
            {
                recs.push(Activation {
                    sector,
                    action: "Prefer moving puja/meditation to NE/E if possible; otherwise \
                             keep clean and elevated"
                        .to_string(),
                    priority: 1,
                    why: "Puja best suited to NE/E".to_string(),
                });
            }
        }
    }

    recs.sort_by_key(|r| r.priority);

    let sectors = ALL_SECTORS
        .iter()
        .map(|&s| {
            let rooms = room_map[&s].clone();
            (
                s,
                SectorInfo {
                    element: s.element(),
                    qualities: s.qualities().iter().map(|q| q.to_string()).collect(),
                    occupancy_count: rooms.len(),
                    rooms,
                },
            )
        })
        .collect();

    VastuReport {
        plot_facing,
        entrance,
        plot_type,
        sectors,
        weak_sectors,
        recommended_activations: recs,
    }
}
