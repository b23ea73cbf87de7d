//! Alternative `-list` query patterns for one displayed symbol.
//!
//! pprof matches `-list` against its internal symbol names as a regex, and
//! those rarely equal the display name: closures get `.funcN` suffixes,
//! methods render as `pkg.(*Type).Method`, and names carry regex
//! metacharacters. Patterns are ordered from most to least specific.

use indexmap::IndexSet;

const CLOSURE_MARKER: &str = "func";
const RECEIVER_OPEN: &str = "(*";
const REGEX_METACHARS: [char; 7] = ['\\', '.', '*', '(', ')', '[', ']'];

pub fn expand_patterns(symbol: &str) -> Vec<String> {
    if symbol.trim().is_empty() {
        return Vec::new();
    }

    let mut patterns: IndexSet<String> = IndexSet::new();
    patterns.insert(symbol.to_string());

    if let Some(method) = trailing_component(symbol) {
        patterns.insert(method.to_string());
    }
    if let Some(fragment) = receiver_method_fragment(symbol) {
        patterns.insert(fragment);
    }
    patterns.insert(escape_regex(symbol));
    if let Some(tail) = last_two_path_segments(symbol) {
        patterns.insert(tail);
    }
    if let Some(package_and_name) = after_last_slash(symbol) {
        patterns.insert(package_and_name.to_string());
    }

    patterns.into_iter().collect()
}

/// `pkg.(*T).Method` -> `Method`; closure markers such as `func1` are skipped.
fn trailing_component(symbol: &str) -> Option<&str> {
    let (_, last) = symbol.rsplit_once('.')?;
    (!last.is_empty() && !last.starts_with(CLOSURE_MARKER)).then_some(last)
}

/// `pkg.(*T).Method.func1` -> `(*T).Method`.
fn receiver_method_fragment(symbol: &str) -> Option<String> {
    let (_, after_open) = symbol.split_once(RECEIVER_OPEN)?;
    let (fragment, _) = after_open.split_once(".func")?;
    (!fragment.is_empty()).then(|| format!("{RECEIVER_OPEN}{fragment}"))
}

pub fn escape_regex(symbol: &str) -> String {
    let mut escaped = String::with_capacity(symbol.len() * 2);
    for c in symbol.chars() {
        if REGEX_METACHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn last_two_path_segments(symbol: &str) -> Option<String> {
    let segments = symbol.split('/').collect::<Vec<_>>();
    if segments.len() < 2 {
        return None;
    }
    Some(segments[segments.len() - 2..].join("/"))
}

fn after_last_slash(symbol: &str) -> Option<&str> {
    let (_, tail) = symbol.rsplit_once('/')?;
    (tail != symbol).then_some(tail)
}
