//! Report pipeline: prompt assembly, narrative generation with bounded
//! retry, and HTML/PDF rendering.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::chart::NatalChart;
use crate::error::ServiceError;
use crate::providers::{NarrativeGenerator, ReportRenderer};

/// System preamble sent ahead of every narrative prompt.
const SYSTEM_PREAMBLE: &str = "\
You are AstroVastu Pro, an expert astrologer, vastu consultant, and numerologist.
Provide calm, actionable, and spiritually aligned guidance. Avoid fatalistic
predictions and always end with a positive, empowering message.

Response structure:
1. Summary of chart & numerology.
2. Observations (strengths, challenges).
3. Remedies: (A) planetary/dasha guidance, (B) vastu activations,
   (C) numerology corrections.
4. Balanced conclusion.";

/// Knobs for the report pipeline.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Narrative generation attempts before giving up.
    pub max_attempts: u32,
    /// Delay before retry `n` is `n * retry_base_delay`.
    pub retry_base_delay: Duration,
    /// Filename prefix; defaults to the person's name or `astro_report`.
    pub name_prefix: Option<String>,
    /// Timestamp used in output filenames; defaults to the current instant.
    pub now: Option<DateTime<Utc>>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_base_delay: Duration::from_secs(2),
            name_prefix: None,
            now: None,
        }
    }
}

/// Result of a successful (possibly degraded) report run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub html_path: PathBuf,
    /// Absent when PDF rendering failed; the report degrades to HTML-only.
    pub pdf_path: Option<PathBuf>,
    /// Leading excerpt of the narrative, for response payloads.
    pub summary: String,
}

fn summarize_chart_positions(chart: &NatalChart) -> String {
    let mut parts = vec![format!("Ascendant at {:.2}\u{b0}", chart.ascendant)];
    for (graha, entry) in &chart.planets {
        if let Some(lon) = entry.longitude {
            parts.push(format!("{graha} at {lon:.2}\u{b0}"));
        }
    }
    parts.join("; ")
}

fn summarize_dasha(chart: &NatalChart) -> String {
    let Some(dasha) = &chart.dasha else {
        return "Dasha timeline unavailable.".to_string();
    };
    let mut lines = vec!["Mahadasha sequence:".to_string()];
    for maha in &dasha.mahadashas {
        lines.push(format!(
            " - {} {:.2}y ({} to {})",
            maha.period.graha,
            maha.period.duration_years,
            maha.period.start.format("%Y-%m-%d"),
            maha.period.end.format("%Y-%m-%d"),
        ));
    }
    lines.join("\n")
}

fn summarize_numerology(chart: &NatalChart) -> String {
    match &chart.numerology {
        Some(n) => format!(
            "Life path {}, name vibration {}, soul urge {}, personality {}, personal year {}.",
            n.life_path, n.name_vibration, n.soul_urge, n.personality, n.personal_year
        ),
        None => "No numerology data (name not provided).".to_string(),
    }
}

fn summarize_vastu(chart: &NatalChart) -> String {
    let Some(vastu) = &chart.vastu else {
        return "No Vastu data provided.".to_string();
    };
    let facing = vastu
        .plot_facing
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let mut lines = vec![format!("Plot facing: {facing}.")];
    if !vastu.weak_sectors.is_empty() {
        let weak: Vec<&str> = vastu.weak_sectors.iter().map(|s| s.label()).collect();
        lines.push(format!("Weak sectors: {}.", weak.join(", ")));
    }
    if !vastu.recommended_activations.is_empty() {
        lines.push("Key activations/remedies:".to_string());
        for rec in vastu.recommended_activations.iter().take(5) {
            lines.push(format!(" - {}: {} ({})", rec.sector.label(), rec.action, rec.why));
        }
    }
    lines.join("\n")
}

fn summarize_transits(chart: &NatalChart) -> String {
    if chart.transits.is_empty() {
        return "No notable transits within orb.".to_string();
    }
    let mut lines = vec!["Current transits:".to_string()];
    for hit in chart.transits.iter().take(8) {
        lines.push(format!(
            " - transiting {} {} natal {} (orb {:.2}\u{b0})",
            hit.transiting,
            hit.aspect.name(),
            hit.natal,
            hit.orb,
        ));
    }
    lines.join("\n")
}

/// Assemble the full narrative prompt from the normalized chart.
pub fn build_prompt(chart: &NatalChart) -> String {
    let person = &chart.person;
    let who = person.name.as_deref().unwrap_or("the client");
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Client: {who}, born {} {} (UTC {}).\n\n\
         Chart: {}\n\n{}\n\nNumerology: {}\n\nVastu:\n{}\n\n{}\n\n\
         Write the interpretive report.",
        person.date,
        person.time,
        chart.utc_birth.format("%Y-%m-%dT%H:%M:%SZ"),
        summarize_chart_positions(chart),
        summarize_dasha(chart),
        summarize_numerology(chart),
        summarize_vastu(chart),
        summarize_transits(chart),
    )
}

/// Strip markup artifacts and duplicated lines from generated text.
pub fn clean_narrative(text: &str) -> String {
    let text = text.replace("**", "").replace("##", "");
    let mut seen = std::collections::BTreeSet::new();
    let mut lines = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if !line.is_empty() && seen.insert(line.to_string()) {
            lines.push(line.to_string());
        }
    }
    lines.join("\n")
}

fn sanitize_prefix(prefix: &str) -> String {
    let cleaned: String = prefix
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == '-' || c == '_')
        .collect();
    if cleaned.is_empty() {
        "astro_report".to_string()
    } else {
        cleaned
    }
}

fn generate_narrative(
    narrator: &dyn NarrativeGenerator,
    prompt: &str,
    opts: &ReportOptions,
) -> Result<String, ServiceError> {
    let attempts = opts.max_attempts.max(1);
    let mut last_err = None;
    for attempt in 1..=attempts {
        match narrator.interpret(prompt) {
            Ok(text) => return Ok(clean_narrative(&text)),
            Err(e) => {
                debug!("narrative attempt {attempt}/{attempts} failed: {e}");
                last_err = Some(e);
                if attempt < attempts {
                    std::thread::sleep(opts.retry_base_delay * attempt);
                }
            }
        }
    }
    let cause = last_err.map(|e| e.to_string()).unwrap_or_default();
    Err(ServiceError::Report(format!(
        "narrative generation failed after {attempts} attempts: {cause}"
    )))
}

fn truncate_summary(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}

/// Run the full report pipeline over an assembled chart.
///
/// Narrative generation retries with an increasing delay; HTML rendering is
/// required; PDF rendering failure degrades the outcome to HTML-only.
pub fn generate_report(
    chart: &NatalChart,
    narrator: &dyn NarrativeGenerator,
    renderer: &dyn ReportRenderer,
    opts: &ReportOptions,
) -> Result<ReportOutcome, ServiceError> {
    let prompt = build_prompt(chart);
    let narrative = generate_narrative(narrator, &prompt, opts)?;

    let prefix = opts
        .name_prefix
        .as_deref()
        .or(chart.person.name.as_deref())
        .unwrap_or("astro_report");
    let stamp = opts.now.unwrap_or_else(Utc::now);
    let stem = format!(
        "{}_{}",
        sanitize_prefix(prefix),
        stamp.format("%Y%m%dT%H%M%SZ")
    );

    let html_path = renderer
        .render_html(chart, &narrative, &stem)
        .map_err(|e| ServiceError::Report(format!("html rendering failed: {e}")))?;
    let pdf_path = match renderer.render_pdf(chart, &narrative, &stem) {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("pdf rendering failed, report degrades to html-only: {e}");
            None
        }
    };

    Ok(ReportOutcome {
        html_path,
        pdf_path,
        summary: truncate_summary(&narrative, 300),
    })
}
