use crate::format::ansi;
use crate::hotness::{Intensity, inlay_hint_text, tooltip};
use crate::listing::{RoutineListing, SourceLine};

pub fn render_listing(listing: &RoutineListing, color: bool) -> String {
    let mut out = String::new();
    let header = format!(
        "ROUTINE {} in {}",
        listing.routine, listing.source_file_path
    );
    out.push_str(&ansi::paint(color, ansi::cyan, &header));
    out.push('\n');
    for line in &listing.lines {
        out.push_str(&render_line(line, color));
        out.push('\n');
    }
    out
}

fn render_line(line: &SourceLine, color: bool) -> String {
    let body = format!(
        "{:>10} {:>10} {:>6}:{}",
        line.flat_token, line.cum_token, line.line_number, line.source_text
    );
    if !line.is_hot {
        return ansi::paint(color, ansi::dim, &body);
    }
    let style: fn(&str) -> String = match Intensity::of(line) {
        Intensity::High => ansi::red,
        Intensity::Medium => ansi::yellow,
        Intensity::Low => ansi::green,
        Intensity::Cold => ansi::bold,
    };
    let hint = inlay_hint_text(line);
    format!(
        "{}{}",
        ansi::paint(color, style, &body),
        ansi::paint(color, ansi::gray, &hint)
    )
}

/// Hover details for every hot line, one blank-line separated block each.
pub fn render_explanations(listing: &RoutineListing) -> String {
    listing
        .hot_lines()
        .map(|line| format!("{}\n", tooltip(line)))
        .collect::<Vec<_>>()
        .join("\n")
}
