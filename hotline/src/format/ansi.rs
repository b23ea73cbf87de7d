pub fn bold(text: &str) -> String {
    format!("\u{1b}[1m{text}\u{1b}[22m")
}

pub fn dim(text: &str) -> String {
    format!("\u{1b}[2m{text}\u{1b}[22m")
}

pub fn red(text: &str) -> String {
    format!("\u{1b}[31m{text}\u{1b}[39m")
}

pub fn yellow(text: &str) -> String {
    format!("\u{1b}[33m{text}\u{1b}[39m")
}

pub fn green(text: &str) -> String {
    format!("\u{1b}[32m{text}\u{1b}[39m")
}

pub fn gray(text: &str) -> String {
    format!("\u{1b}[90m{text}\u{1b}[39m")
}

pub fn cyan(text: &str) -> String {
    format!("\u{1b}[36m{text}\u{1b}[39m")
}

/// Applies `style` only when colour output is enabled.
pub fn paint(enabled: bool, style: fn(&str) -> String, text: &str) -> String {
    if enabled { style(text) } else { text.to_string() }
}
