//! Magnitude tokens as printed by `go tool pprof` (`10.50s`, `512kB`, `36.84%`).
//!
//! Every function here is total: profiler output is free-form tool text, so a
//! token that cannot be read degrades to zero instead of failing.

/// Recognised unit suffixes, longest first so `ms` wins over `s` and `MB`
/// over `B`. Time normalises to milliseconds, sizes to bytes.
const SUFFIX_SCALES: [(&str, f64); 5] = [
    ("ms", 1.0),
    ("MB", 1024.0 * 1024.0),
    ("KB", 1024.0),
    ("s", 1000.0),
    ("B", 1.0),
];

/// The token pprof prints for "no sample data on this row".
pub const NO_DATA: &str = ".";

pub fn parse_magnitude(token: &str) -> i64 {
    let token = token.trim();
    let (digits, scale) = SUFFIX_SCALES
        .iter()
        .find_map(|(suffix, scale)| token.strip_suffix(suffix).map(|rest| (rest, *scale)))
        .unwrap_or((token, 1.0));
    let value = parse_number(digits);
    // `as` saturates on overflow and maps NaN to 0.
    (value * scale) as i64
}

/// Numeric part of a token without any unit scaling (`"10ms"` -> `10.0`).
pub fn parse_magnitude_f64(token: &str) -> f64 {
    let token = token.trim();
    if token == NO_DATA {
        return 0.0;
    }
    parse_number(token)
}

pub fn parse_percent(token: &str) -> f64 {
    let token = token.trim();
    let digits = token.strip_suffix('%').unwrap_or(token);
    digits
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn parse_number(raw: &str) -> f64 {
    let digits = raw
        .chars()
        .filter(|c| !c.is_ascii_alphabetic() && *c != '%')
        .collect::<String>();
    digits
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
