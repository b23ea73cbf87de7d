//! From a selected symbol to an addressable local file and line.

use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::error::HotlineError;
use crate::file_index::FileIndex;
use crate::format::listing::render_listing;
use crate::format::paths::{EditorKind, linkify};
use crate::listing::RoutineListing;
use crate::query::{QueryExecutor, find_listing};
use crate::resolve::{Confidence, ResolveStrategy, resolve_source_file};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationFailure {
    #[error("could not locate source for symbol {symbol}")]
    NoListing { symbol: String },

    #[error("source file not found in project: {reported_path}")]
    SourceNotFound { reported_path: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocation {
    pub file: PathBuf,
    /// 1-based line to scroll to.
    pub target_line: u32,
    pub strategy: ResolveStrategy,
    pub confidence: Confidence,
    /// The `-list` pattern that produced `listing`.
    pub pattern: String,
    pub listing: RoutineListing,
}

/// Receives resolved locations: opens, scrolls to and highlights them.
pub trait EditorHost {
    fn open(&self, location: &ResolvedLocation) -> Result<(), HotlineError>;
}

pub struct Navigator<'a> {
    executor: &'a dyn QueryExecutor,
    index: &'a dyn FileIndex,
    project_root: &'a Path,
}

impl<'a> Navigator<'a> {
    pub fn new(
        executor: &'a dyn QueryExecutor,
        index: &'a dyn FileIndex,
        project_root: &'a Path,
    ) -> Self {
        Self {
            executor,
            index,
            project_root,
        }
    }

    /// One failure per selection, never one per attempted pattern.
    pub fn on_symbol_selected(&self, symbol: &str) -> Result<ResolvedLocation, NavigationFailure> {
        let _span = crate::profile::span("on_symbol_selected");
        let hit = find_listing(symbol, self.executor).ok_or_else(|| NavigationFailure::NoListing {
            symbol: symbol.to_string(),
        })?;
        let reported_path = hit.listing.source_file_path.clone();
        let resolution = resolve_source_file(&reported_path, self.project_root, self.index)
            .ok_or(NavigationFailure::SourceNotFound { reported_path })?;
        if resolution.confidence.is_low() {
            tracing::warn!(
                file = %resolution.file.display(),
                "low-confidence match for the reported path"
            );
        }
        Ok(ResolvedLocation {
            file: resolution.file,
            target_line: hit.listing.target_line(),
            strategy: resolution.strategy,
            confidence: resolution.confidence,
            pattern: hit.pattern,
            listing: hit.listing,
        })
    }

    pub fn navigate(
        &self,
        symbol: &str,
        host: &dyn EditorHost,
    ) -> Result<ResolvedLocation, HotlineError> {
        let location = self.on_symbol_selected(symbol)?;
        host.open(&location)?;
        Ok(location)
    }
}

/// Prints a clickable editor link followed by the annotated listing.
pub struct TerminalEditorHost<W: Write> {
    out: RefCell<W>,
    editor: EditorKind,
    color: bool,
}

impl<W: Write> TerminalEditorHost<W> {
    pub fn new(out: W, editor: EditorKind, color: bool) -> Self {
        Self {
            out: RefCell::new(out),
            editor,
            color,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> EditorHost for TerminalEditorHost<W> {
    fn open(&self, location: &ResolvedLocation) -> Result<(), HotlineError> {
        let file = location.file.to_string_lossy();
        let shown = format!("{file}:{}", location.target_line);
        let link = if self.color {
            linkify(&file, Some(location.target_line), self.editor, &shown)
        } else {
            shown
        };
        let confidence = match location.confidence {
            Confidence::Exact => String::new(),
            Confidence::Scored(0 | 1) => " (low confidence: only the file name matched)".to_string(),
            Confidence::Scored(score) => format!(" (matched {score} path segments)"),
            Confidence::Guess => " (low confidence: picked the first file with this name)".to_string(),
        };
        let mut out = self.out.borrow_mut();
        writeln!(out, "{link}{confidence}").map_err(HotlineError::Output)?;
        out.write_all(render_listing(&location.listing, self.color).as_bytes())
            .map_err(HotlineError::Output)?;
        out.flush().map_err(HotlineError::Output)
    }
}
