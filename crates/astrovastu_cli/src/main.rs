use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use astrovastu_base::{
    NAKSHATRA_SPAN, VastuInput, active_period, analyze_vastu, deg_in_sign, nakshatra_position,
    numerology, rashi_from_longitude, varga_longitude, vimshottari_timeline,
};

#[derive(Parser)]
#[command(name = "astrovastu", about = "AstroVastu calculation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Vimshottari dasha timeline from a lunar longitude
    Dasha {
        /// Sidereal lunar longitude in degrees
        moon_lon: f64,
        /// Birth instant, UTC (YYYY-MM-DDThh:mm:ssZ)
        birth: String,
        /// Also list antardashas under each mahadasha
        #[arg(long)]
        bhukti: bool,
        /// Show the period active at this instant (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        at: Option<String>,
    },
    /// Nakshatra slot and fraction from a longitude
    Nakshatra {
        /// Sidereal ecliptic longitude in degrees
        lon: f64,
    },
    /// Divisional chart position for a single longitude
    Varga {
        /// Natal longitude in degrees
        lon: f64,
        /// Divisor (e.g. 9 for navamsa)
        #[arg(long, default_value = "9")]
        n: u16,
    },
    /// Numerology profile for a name and date of birth
    Numerology {
        /// Full name
        name: String,
        /// Date of birth (YYYY-MM-DD)
        dob: String,
        /// Suggest initial tweaks toward this target vibration
        #[arg(long)]
        target: Option<u32>,
    },
    /// Vastu analysis from a JSON layout file
    Vastu {
        /// Path to a JSON file with plot_facing, main_entrance, rooms
        input: PathBuf,
    },
}

fn parse_utc(s: &str) -> Result<DateTime<Utc>, String> {
    s.parse::<DateTime<Utc>>()
        .map_err(|e| format!("invalid UTC datetime {s:?}: {e}"))
}

fn print_dasha(moon_lon: f64, birth: &str, bhukti: bool, at: Option<&str>) -> Result<(), String> {
    let birth_utc = parse_utc(birth)?;
    let timeline = vimshottari_timeline(moon_lon, birth_utc).map_err(|e| e.to_string())?;

    println!(
        "Nakshatra {} (fraction {:.4})",
        timeline.nakshatra.index, timeline.nakshatra.fraction
    );
    for maha in &timeline.mahadashas {
        let p = &maha.period;
        println!(
            "{:<8} {:>7.3}y  {}  to  {}",
            p.graha.name(),
            p.duration_years,
            p.start.format("%Y-%m-%d"),
            p.end.format("%Y-%m-%d"),
        );
        if bhukti {
            for antar in &maha.antardashas {
                println!(
                    "  {:<8} {:>7.4}y  {}  to  {}",
                    antar.graha.name(),
                    antar.duration_years,
                    antar.start.format("%Y-%m-%d"),
                    antar.end.format("%Y-%m-%d"),
                );
            }
        }
    }

    if let Some(at) = at {
        let at = parse_utc(at)?;
        match active_period(&timeline, at) {
            Some((maha, antar)) => println!(
                "Active at {}: {} mahadasha / {} antardasha",
                at.format("%Y-%m-%d"),
                maha.period.graha.name(),
                antar.graha.name(),
            ),
            None => println!("Instant {} is outside the timeline", at.format("%Y-%m-%d")),
        }
    }
    Ok(())
}

fn print_numerology(name: &str, dob: &str, target: Option<u32>) -> Result<(), String> {
    let dob = NaiveDate::parse_from_str(dob, "%Y-%m-%d")
        .map_err(|e| format!("invalid date {dob:?}: {e}"))?;
    let year = Utc::now().year();

    println!("Life path:    {}", numerology::life_path(dob));
    println!("Name:         {}", numerology::name_vibration(name));
    println!("Soul urge:    {}", numerology::soul_urge(name));
    println!("Personality:  {}", numerology::personality_number(name));
    println!("Year {year}:    {}", numerology::personal_year(dob, year));

    if let Some(target) = target {
        use numerology::TweakOutcome;
        match numerology::suggest_name_tweaks(name, target, 3) {
            TweakOutcome::NoName => println!("No name to tweak."),
            TweakOutcome::AlreadyMatching { vibration } => {
                println!("Name already vibrates at {vibration}.");
            }
            TweakOutcome::NoSuggestion { vibration } => {
                println!("No single-initial tweak improves on {vibration}.");
            }
            TweakOutcome::Suggestions { suggestions, .. } => {
                for s in suggestions {
                    println!(
                        "{} (add '{}', value {}): vibration {} ({} from target)",
                        s.suggested_name,
                        s.added_letter,
                        s.added_value,
                        s.new_vibration,
                        s.distance_to_target,
                    );
                }
            }
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Dasha {
            moon_lon,
            birth,
            bhukti,
            at,
        } => print_dasha(moon_lon, &birth, bhukti, at.as_deref()),

        Commands::Nakshatra { lon } => {
            let pos = nakshatra_position(lon).map_err(|e| e.to_string())?;
            println!(
                "Nakshatra index {} (fraction {:.4}, {:.4} deg into the slot)",
                pos.index,
                pos.fraction,
                pos.fraction * NAKSHATRA_SPAN,
            );
            Ok(())
        }

        Commands::Varga { lon, n } => {
            let derived = varga_longitude(lon, n).map_err(|e| e.to_string())?;
            let rashi = rashi_from_longitude(derived);
            println!(
                "D{n}: {derived:.4} deg ({} {:.4} deg)",
                rashi.name(),
                deg_in_sign(derived),
            );
            Ok(())
        }

        Commands::Numerology { name, dob, target } => print_numerology(&name, &dob, target),

        Commands::Vastu { input } => {
            let raw = std::fs::read_to_string(&input)
                .map_err(|e| format!("cannot read {}: {e}", input.display()))?;
            let parsed: VastuInput =
                serde_json::from_str(&raw).map_err(|e| format!("invalid layout JSON: {e}"))?;
            let report = analyze_vastu(&parsed);
            let out = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("serialization failed: {e}"))?;
            println!("{out}");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}
