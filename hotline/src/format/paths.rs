use std::env;
use std::path::{Path, PathBuf};

use path_slash::PathExt;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorKind {
    /// Pick from the environment (`HOTLINE_EDITOR`, `TERM_PROGRAM`, ...).
    #[default]
    Auto,
    Vscode,
    File,
}

impl EditorKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Some(Self::Auto),
            "code" | "vscode" => Some(Self::Vscode),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

fn prefer_vscode(editor: EditorKind) -> bool {
    match editor {
        EditorKind::Vscode => true,
        EditorKind::File => false,
        EditorKind::Auto => {
            let hint = env::var("HOTLINE_EDITOR").unwrap_or_default();
            matches!(hint.to_lowercase().as_str(), "code" | "vscode")
                || env::var("TERM_PROGRAM")
                    .ok()
                    .is_some_and(|v| v.to_lowercase() == "vscode")
                || env::var("VSCODE_IPC_HOOK").is_ok()
        }
    }
}

pub fn preferred_editor_href(abs_path: &str, line: Option<u32>, editor: EditorKind) -> String {
    let absolute: PathBuf = Path::new(abs_path).to_path_buf();
    let absolute = dunce::canonicalize(&absolute).unwrap_or(absolute);
    let absolute = absolute.to_slash_lossy();
    if prefer_vscode(editor) {
        match line {
            Some(l) => format!("vscode://file/{absolute}:{l}"),
            None => format!("vscode://file/{absolute}"),
        }
    } else {
        match line {
            Some(l) => format!("file://{absolute}#L{l}"),
            None => format!("file://{absolute}"),
        }
    }
}

/// Wraps `text` in an OSC 8 terminal hyperlink to the file and line.
pub fn linkify(abs_path: &str, line: Option<u32>, editor: EditorKind, text: &str) -> String {
    let url = preferred_editor_href(abs_path, line, editor);
    format!("\u{1b}]8;;{url}\u{7}{text}\u{1b}]8;;\u{7}")
}
