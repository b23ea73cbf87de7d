use serde::Serialize;

use crate::listing::SourceLine;
use crate::units::{NO_DATA, parse_magnitude_f64};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Cold,
    Low,
    Medium,
    High,
}

impl Intensity {
    /// Tiered on the larger raw number of the two tokens, ignoring units, so
    /// `150ms` and `150MB` both read as high.
    pub fn of(line: &SourceLine) -> Self {
        let flat = parse_magnitude_f64(&line.flat_token);
        let cum = parse_magnitude_f64(&line.cum_token);
        Self::from_value(flat.max(cum))
    }

    pub fn from_value(value: f64) -> Self {
        if value >= 100.0 {
            Intensity::High
        } else if value >= 10.0 {
            Intensity::Medium
        } else if value > 0.0 {
            Intensity::Low
        } else {
            Intensity::Cold
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Intensity::High => "high hotspot",
            Intensity::Medium => "medium hotspot",
            Intensity::Low => "low hotspot",
            Intensity::Cold => "no samples",
        }
    }
}

/// End-of-line annotation such as `  // flat: 10ms, cum: 20ms`. Empty when the
/// line has no sample data.
pub fn inlay_hint_text(line: &SourceLine) -> String {
    let parts = [("flat", &line.flat_token), ("cum", &line.cum_token)]
        .into_iter()
        .filter(|(_, token)| token.as_str() != NO_DATA)
        .map(|(label, token)| format!("{label}: {token}"))
        .collect::<Vec<_>>();
    if parts.is_empty() {
        return String::new();
    }
    format!("  // {}", parts.join(", "))
}

pub fn tooltip(line: &SourceLine) -> String {
    let intensity = Intensity::of(line);
    [
        "Performance data".to_string(),
        format!("Line: {}", line.line_number),
        format!("Flat: {}", line.flat_token),
        format!("Cumulative: {}", line.cum_token),
        format!("Status: {}", intensity.label()),
    ]
    .join("\n")
}
