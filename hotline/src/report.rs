//! Decoder for the ranked `flat flat% sum% cum cum% symbol` table printed by
//! `go tool pprof -top` / `-text`.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::HotlineError;
use crate::units::{parse_magnitude, parse_percent};

static ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\S+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(.+)$").unwrap()
});

const DEFAULT_UNIT: &str = "samples";

/// Sampling unit from the report's `Type:` line (`cpu`, `alloc_space`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProfileUnit(pub String);

impl Default for ProfileUnit {
    fn default() -> Self {
        Self(DEFAULT_UNIT.to_string())
    }
}

impl ProfileUnit {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProfileUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionRecord {
    pub flat: i64,
    pub flat_percent: f64,
    /// Running total of `flat_percent` down the table ("sum%").
    pub sum_percent: f64,
    pub cum: i64,
    pub cum_percent: f64,
    pub symbol: String,
}

/// Report metadata lines, kept verbatim for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportHeader {
    pub file: Option<String>,
    pub kind: Option<String>,
    pub time: Option<String>,
    pub duration: Option<String>,
    pub showing: Option<String>,
}

impl ReportHeader {
    /// Captured lines in pprof's order, labelled as pprof prints them.
    pub fn lines(&self) -> Vec<String> {
        let labelled = [
            ("File", &self.file),
            ("Type", &self.kind),
            ("Time", &self.time),
            ("Duration", &self.duration),
        ];
        labelled
            .into_iter()
            .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}: {v}")))
            .chain(self.showing.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTable {
    pub records: Vec<FunctionRecord>,
    pub total_flat: i64,
    pub unit: ProfileUnit,
    pub header: ReportHeader,
}

impl ReportTable {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn top(&self, limit: usize) -> &[FunctionRecord] {
        &self.records[..limit.min(self.records.len())]
    }

    pub fn find(&self, symbol: &str) -> Option<&FunctionRecord> {
        self.records.iter().find(|record| record.symbol == symbol)
    }

    /// The table cut to `limit` rows, with header and totals kept.
    pub fn view(&self, limit: usize) -> ReportView<'_> {
        ReportView {
            header: &self.header,
            unit: &self.unit,
            total_flat: self.total_flat,
            total_rows: self.records.len(),
            records: self.top(limit),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportView<'a> {
    pub header: &'a ReportHeader,
    pub unit: &'a ProfileUnit,
    pub total_flat: i64,
    pub total_rows: usize,
    pub records: &'a [FunctionRecord],
}

pub fn decode_report(text: &str) -> ReportTable {
    let mut table = ReportTable::default();
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        if absorb_metadata_line(line, &mut table) {
            continue;
        }
        let Some(record) = parse_row(line) else {
            tracing::trace!(line, "dropping non-row report line");
            continue;
        };
        table.total_flat = table.total_flat.saturating_add(record.flat);
        table.records.push(record);
    }
    tracing::debug!(
        rows = table.records.len(),
        total = table.total_flat,
        unit = %table.unit,
        "decoded pprof report"
    );
    table
}

pub fn read_report_file(path: &Path) -> Result<ReportTable, HotlineError> {
    let raw = std::fs::read_to_string(path).map_err(|source| HotlineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_report(&raw))
}

fn absorb_metadata_line(line: &str, table: &mut ReportTable) -> bool {
    let trimmed = line.trim_start();
    if is_rule_line(trimmed) {
        return true;
    }
    if let Some(value) = trimmed.strip_prefix("Type:") {
        let value = value.trim();
        if !value.is_empty() {
            table.unit = ProfileUnit(value.to_string());
        }
        table.header.kind = Some(value.to_string());
        return true;
    }
    if let Some(value) = trimmed.strip_prefix("File:") {
        table.header.file = Some(value.trim().to_string());
        return true;
    }
    if let Some(value) = trimmed.strip_prefix("Time:") {
        table.header.time = Some(value.trim().to_string());
        return true;
    }
    if let Some(value) = trimmed.strip_prefix("Duration:") {
        table.header.duration = Some(value.trim().to_string());
        return true;
    }
    if trimmed.starts_with("Showing") {
        table.header.showing = Some(trimmed.trim_end().to_string());
        return true;
    }
    // `Dropped 12 nodes (cum <= 0.05s)` happens to have six fields.
    trimmed.starts_with("Dropped ")
}

fn is_rule_line(trimmed: &str) -> bool {
    let body = trimmed.trim_end();
    body.len() >= 3 && body.chars().all(|c| c == '-')
}

fn parse_row(line: &str) -> Option<FunctionRecord> {
    let caps = ROW_RE.captures(line)?;
    let field = |idx: usize| caps.get(idx).map(|m| m.as_str()).unwrap_or("");
    let symbol = field(6).trim();
    if symbol.is_empty() {
        return None;
    }
    Some(FunctionRecord {
        flat: parse_magnitude(field(1)),
        flat_percent: parse_percent(field(2)),
        sum_percent: parse_percent(field(3)),
        cum: parse_magnitude(field(4)),
        cum_percent: parse_percent(field(5)),
        symbol: symbol.to_string(),
    })
}
