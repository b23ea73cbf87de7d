use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use hotline::args::{Cli, Command};
use hotline::config::{HotlineConfig, find_repo_root, load_hotline_config};
use hotline::error::HotlineError;
use hotline::file_index::WalkFileIndex;
use hotline::format::listing::{render_explanations, render_listing};
use hotline::format::report::render_report_table;
use hotline::navigate::{EditorHost, Navigator, TerminalEditorHost};
use hotline::patterns::expand_patterns;
use hotline::query::{PprofTool, find_listing};
use hotline::report::{ReportTable, decode_report, read_report_file};
use hotline::resolve::resolve_source_file;

struct Context {
    config: HotlineConfig,
    project_root: PathBuf,
    color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    hotline::logging::init(cli.global.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let repo_root = cli
        .global
        .root
        .clone()
        .unwrap_or_else(|| find_repo_root(&cwd));
    let mut config = match load_hotline_config(&repo_root) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("hotline: {err}");
            return ExitCode::from(1);
        }
    };
    cli.global.apply_to(&mut config);
    let project_root = match &cli.global.root {
        Some(root) => root.clone(),
        None => config.project_root(&repo_root),
    };
    let color = !cli.global.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();
    tracing::debug!(root = %project_root.display(), color, "starting");

    let ctx = Context {
        config,
        project_root,
        color,
    };
    match run(&ctx, &cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(HotlineError::Navigation(failure)) => {
            eprintln!("hotline: {failure}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("hotline: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(ctx: &Context, command: &Command) -> Result<(), HotlineError> {
    match command {
        Command::Top {
            profile,
            report,
            limit,
            json,
        } => {
            let table = match (report, profile) {
                (Some(report), _) => read_report_file(report)?,
                (None, Some(profile)) => decode_report(&pprof_tool(ctx, profile)?.top()?),
                (None, None) => ReportTable::default(),
            };
            let limit = limit.unwrap_or_else(|| ctx.config.top());
            if *json {
                let view = table.view(limit);
                write_stdout(&format!("{}\n", serde_json::to_string_pretty(&view)?))
            } else {
                write_stdout(&render_report_table(&table, limit, ctx.color))
            }
        }
        Command::List {
            profile,
            symbol,
            json,
            explain,
        } => {
            let tool = pprof_tool(ctx, profile)?;
            let hit = find_listing(symbol, &tool).ok_or_else(|| {
                hotline::navigate::NavigationFailure::NoListing {
                    symbol: symbol.clone(),
                }
            })?;
            tracing::info!(pattern = %hit.pattern, attempt = hit.attempt, "listing found");
            if *json {
                write_stdout(&format!(
                    "{}\n",
                    serde_json::to_string_pretty(&hit.listing)?
                ))
            } else if *explain {
                write_stdout(&format!(
                    "{}\n{}",
                    render_listing(&hit.listing, ctx.color),
                    render_explanations(&hit.listing)
                ))
            } else {
                write_stdout(&render_listing(&hit.listing, ctx.color))
            }
        }
        Command::Locate {
            profile,
            symbol,
            json,
        } => {
            let tool = pprof_tool(ctx, profile)?;
            let index = build_index(ctx);
            let navigator = Navigator::new(&tool, &index, &ctx.project_root);
            if *json {
                let location = navigator.on_symbol_selected(symbol)?;
                return write_stdout(&format!(
                    "{}\n",
                    serde_json::to_string_pretty(&location)?
                ));
            }
            let host = TerminalEditorHost::new(Vec::new(), ctx.config.editor(), ctx.color);
            navigator.navigate(symbol, &host as &dyn EditorHost)?;
            write_stdout(&String::from_utf8_lossy(&host.into_inner()))
        }
        Command::Patterns { symbol } => {
            let text = expand_patterns(symbol)
                .into_iter()
                .map(|pattern| format!("{pattern}\n"))
                .collect::<String>();
            write_stdout(&text)
        }
        Command::Resolve { path } => {
            let index = build_index(ctx);
            let resolution = resolve_source_file(path, &ctx.project_root, &index).ok_or_else(
                || hotline::navigate::NavigationFailure::SourceNotFound {
                    reported_path: path.clone(),
                },
            )?;
            write_stdout(&format!(
                "{}\t{:?}\t{:?}\n",
                resolution.file.display(),
                resolution.strategy,
                resolution.confidence
            ))
        }
    }
}

fn pprof_tool(ctx: &Context, profile: &Path) -> Result<PprofTool, HotlineError> {
    let tool = PprofTool::locate(ctx.config.go_binary(), profile)?
        .with_extra_args(ctx.config.pprof_args.clone().unwrap_or_default())
        .with_timeout(ctx.config.timeout())
        .with_working_dir(&ctx.project_root);
    Ok(tool)
}

fn build_index(ctx: &Context) -> WalkFileIndex {
    WalkFileIndex::build_with_excludes(
        &ctx.project_root,
        ctx.config.exclude.as_deref().unwrap_or_default(),
    )
}

fn write_stdout(text: &str) -> Result<(), HotlineError> {
    let mut out = std::io::stdout().lock();
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(HotlineError::Output)
}

