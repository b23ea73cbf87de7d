//! Decoder for `go tool pprof -list=<pattern>` output.
//!
//! ```text
//! Total: 10.50s
//! ROUTINE ======================== main.fibonacci in /path/to/main.go
//!       10ms       10ms (flat, cum)  0.10% of Total
//!          .          .     10:func fibonacci(n int) int {
//!       10ms       10ms     12:        return n
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::units::NO_DATA;

static CODE_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\S+)\s+(\S+)\s+(\d+):(.*)$").unwrap());

const ROUTINE_MARKER: &str = "ROUTINE";
const PATH_SEPARATOR: &str = " in ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLine {
    pub line_number: u32,
    pub source_text: String,
    pub flat_token: String,
    pub cum_token: String,
    pub is_hot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutineListing {
    /// Routine name as printed between the `=` rule and ` in `.
    pub routine: String,
    /// File path as reported by the profiler (absolute, GOPATH or module relative).
    pub source_file_path: String,
    pub lines: Vec<SourceLine>,
}

impl RoutineListing {
    pub fn hot_lines(&self) -> impl Iterator<Item = &SourceLine> {
        self.lines.iter().filter(|line| line.is_hot)
    }

    /// First hot line, else the first listed line, else line 1.
    pub fn target_line(&self) -> u32 {
        self.hot_lines()
            .next()
            .or_else(|| self.lines.first())
            .map(|line| line.line_number)
            .unwrap_or(1)
    }
}

/// Decodes the first ROUTINE block that carries at least one code line.
///
/// `None` means the query pattern produced nothing usable and the caller
/// should try its next pattern.
pub fn decode_listing(text: &str) -> Option<RoutineListing> {
    let listing = decode_listings(text)
        .into_iter()
        .find(|listing| !listing.lines.is_empty());
    if listing.is_none() {
        tracing::debug!("listing output had no ROUTINE block with code lines");
    }
    listing
}

/// One listing per ROUTINE block. A pattern that matches several routines
/// makes pprof print several blocks; each keeps only its own lines.
pub fn decode_listings(text: &str) -> Vec<RoutineListing> {
    let mut listings: Vec<RoutineListing> = Vec::new();
    for line in text.lines() {
        if let Some((routine, path)) = parse_routine_header(line) {
            tracing::trace!(routine, path, "found ROUTINE header");
            listings.push(RoutineListing {
                routine: routine.to_string(),
                source_file_path: path.to_string(),
                lines: Vec::new(),
            });
            continue;
        }
        let Some(current) = listings.last_mut() else {
            continue;
        };
        if let Some(source_line) = parse_code_line(line) {
            current.lines.push(source_line);
        }
    }
    listings
}

fn parse_routine_header(line: &str) -> Option<(&str, &str)> {
    let marker_at = line.find(ROUTINE_MARKER)?;
    let (before_path, path) = line.split_once(PATH_SEPARATOR)?;
    let routine = before_path
        .get(marker_at + ROUTINE_MARKER.len()..)
        .unwrap_or("")
        .trim_start_matches(|c: char| c.is_whitespace() || c == '=')
        .trim();
    Some((routine, path.trim()))
}

fn parse_code_line(line: &str) -> Option<SourceLine> {
    let caps = CODE_LINE_RE.captures(line)?;
    let flat_token = caps.get(1)?.as_str();
    let cum_token = caps.get(2)?.as_str();
    let line_number = caps.get(3)?.as_str().parse::<u32>().ok()?;
    let source_text = caps.get(4).map(|m| m.as_str()).unwrap_or("");
    Some(SourceLine {
        line_number,
        source_text: source_text.to_string(),
        flat_token: flat_token.to_string(),
        cum_token: cum_token.to_string(),
        is_hot: flat_token != NO_DATA || cum_token != NO_DATA,
    })
}
