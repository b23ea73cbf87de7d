use crate::format::ansi;
use crate::report::{FunctionRecord, ReportTable};

/// Report header lines, then the ranked table in pprof's column order,
/// limited to `limit` rows.
pub fn render_report_table(table: &ReportTable, limit: usize, color: bool) -> String {
    let mut out = String::new();
    for line in table.header.lines() {
        out.push_str(&ansi::paint(color, ansi::gray, &line));
        out.push('\n');
    }
    let summary = format!(
        "unit: {}  total flat: {}  rows: {}",
        table.unit,
        table.total_flat,
        table.records.len()
    );
    out.push_str(&ansi::paint(color, ansi::gray, &summary));
    out.push('\n');

    let heading = format!(
        "{:>10} {:>7} {:>7} {:>10} {:>7}  {}",
        "flat", "flat%", "sum%", "cum", "cum%", "symbol"
    );
    out.push_str(&ansi::paint(color, ansi::bold, &heading));
    out.push('\n');

    for record in table.top(limit) {
        out.push_str(&render_row(record));
        out.push('\n');
    }

    let hidden = table.records.len().saturating_sub(limit);
    if hidden > 0 {
        out.push_str(&ansi::paint(color, ansi::dim, &format!("... {hidden} more")));
        out.push('\n');
    }
    out
}

fn render_row(record: &FunctionRecord) -> String {
    format!(
        "{:>10} {:>6.2}% {:>6.2}% {:>10} {:>6.2}%  {}",
        record.flat,
        record.flat_percent,
        record.sum_percent,
        record.cum,
        record.cum_percent,
        record.symbol
    )
}
