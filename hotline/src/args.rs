use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::HotlineConfig;
use crate::format::paths::EditorKind;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "hotline",
    version,
    about = "Read Go pprof reports and jump from hot symbols to local source"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Project root used to resolve reported source paths.
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Go executable used to run `go tool pprof`.
    #[arg(long = "go", global = true, value_name = "PROGRAM")]
    pub go_binary: Option<String>,

    #[arg(long = "timeout-ms", global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Editor link style: auto, vscode or file.
    #[arg(long, global = true, value_parser = parse_editor_kind)]
    pub editor: Option<EditorKind>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the ranked function table.
    Top {
        #[arg(required_unless_present = "report", conflicts_with = "report")]
        profile: Option<PathBuf>,

        /// Decode an already captured `-top` report instead of running pprof.
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },
    /// Print the annotated listing for a symbol.
    List {
        profile: PathBuf,
        symbol: String,

        #[arg(long)]
        json: bool,

        /// Follow the listing with per-line sample details for each hot line.
        #[arg(long, conflicts_with = "json")]
        explain: bool,
    },
    /// Resolve a symbol to a local file and line.
    Locate {
        profile: PathBuf,
        symbol: String,

        #[arg(long)]
        json: bool,
    },
    /// Print the query patterns tried for a symbol.
    Patterns { symbol: String },
    /// Resolve a reported source path against the project.
    Resolve { path: String },
}

fn parse_editor_kind(raw: &str) -> Result<EditorKind, String> {
    EditorKind::parse(raw).ok_or_else(|| format!("unknown editor `{raw}` (expected auto, vscode or file)"))
}

impl GlobalArgs {
    /// Flags win over config values.
    pub fn apply_to(&self, config: &mut HotlineConfig) {
        if let Some(go_binary) = &self.go_binary {
            config.go_binary = Some(go_binary.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = Some(timeout_ms);
        }
        if let Some(editor) = self.editor {
            config.editor = Some(editor);
        }
    }
}
