//! Maps the file path embedded in a pprof listing onto a file in the local
//! checkout.
//!
//! Reported paths are frequently foreign to the current machine: absolute
//! build-host paths, `$GOPATH/src/...` paths, or module-relative paths. The
//! resolver tries a cascade of strategies, first success wins, and reports
//! which one matched so callers can flag low-confidence results.

use std::path::{Path, PathBuf};

use path_slash::PathExt;
use serde::Serialize;

use crate::file_index::FileIndex;

const SOURCE_TREE_MARKER: &str = "/src/";
const SUFFIX_MATCH_DEPTH: usize = 4;
const MIN_OVERLAP_SCORE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveStrategy {
    AbsolutePath,
    RootRelative,
    SourceTreeStripped,
    UniqueBasename,
    SuffixMatch,
    BestOverlap,
    FirstCandidate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Exact,
    /// Number of trailing path segments shared with the reported path.
    Scored(usize),
    /// Arbitrary pick among same-named files; may be the wrong file.
    Guess,
}

impl Confidence {
    /// A guess, or a match on the file name alone.
    pub fn is_low(self) -> bool {
        match self {
            Confidence::Exact => false,
            Confidence::Scored(score) => score < MIN_OVERLAP_SCORE,
            Confidence::Guess => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub file: PathBuf,
    pub strategy: ResolveStrategy,
    pub confidence: Confidence,
}

impl Resolution {
    fn exact(file: PathBuf, strategy: ResolveStrategy) -> Self {
        Self {
            file,
            strategy,
            confidence: Confidence::Exact,
        }
    }
}

#[derive(Debug, Clone)]
struct MatchCandidate<'a> {
    file: &'a Path,
    score: usize,
}

/// `None` means the basename exists nowhere in the index: the source is not
/// part of this project.
pub fn resolve_source_file(
    reported_path: &str,
    project_root: &Path,
    index: &dyn FileIndex,
) -> Option<Resolution> {
    let _span = crate::profile::span("resolve_source_file");
    if let Some(found) = find_on_disk(reported_path, project_root) {
        return Some(found);
    }

    let file_name = reported_path.rsplit('/').next().unwrap_or(reported_path);
    let candidates = index.files_named(file_name);
    tracing::debug!(
        file_name,
        candidates = candidates.len(),
        "basename search"
    );
    match candidates.as_slice() {
        [] => {
            tracing::warn!(reported_path, "no file with this name in the project");
            None
        }
        [only] => Some(take_unique_candidate(reported_path, only)),
        many => Some(pick_among_candidates(reported_path, many)),
    }
}

/// The only same-named file is taken, but it is `Exact` only when the
/// reported path's trailing segments agree with it.
fn take_unique_candidate(reported_path: &str, only: &Path) -> Resolution {
    let segments = reported_segments(reported_path);
    let slash = only.to_slash_lossy().to_string();
    let confidence = if ends_with_segments(&slash, &match_suffix(&segments)) {
        Confidence::Exact
    } else {
        Confidence::Scored(overlap_score(&slash, &segments))
    };
    tracing::debug!(file = %only.display(), ?confidence, "only file with this name");
    Resolution {
        file: only.to_path_buf(),
        strategy: ResolveStrategy::UniqueBasename,
        confidence,
    }
}

fn find_on_disk(reported_path: &str, project_root: &Path) -> Option<Resolution> {
    let reported = Path::new(reported_path);
    if reported.is_absolute() && reported.is_file() {
        tracing::debug!(reported_path, "resolved as absolute path");
        return Some(Resolution::exact(
            reported.to_path_buf(),
            ResolveStrategy::AbsolutePath,
        ));
    }

    let root_relative = join_under_root(project_root, reported_path);
    if root_relative.is_file() {
        tracing::debug!(reported_path, "resolved relative to project root");
        return Some(Resolution::exact(
            root_relative,
            ResolveStrategy::RootRelative,
        ));
    }

    let (_, package_path) = reported_path.split_once(SOURCE_TREE_MARKER)?;
    let stripped = join_under_root(project_root, package_path);
    if stripped.is_file() {
        tracing::debug!(package_path, "resolved after stripping source tree prefix");
        return Some(Resolution::exact(
            stripped,
            ResolveStrategy::SourceTreeStripped,
        ));
    }
    None
}

/// `root + "/" + rel`, keeping `rel` under the root even when it is absolute.
fn join_under_root(project_root: &Path, rel: &str) -> PathBuf {
    let rel = rel.trim_start_matches('/');
    if rel.is_empty() {
        return project_root.to_path_buf();
    }
    project_root.join(rel)
}

fn pick_among_candidates(reported_path: &str, candidates: &[PathBuf]) -> Resolution {
    let segments = reported_segments(reported_path);
    let suffix = match_suffix(&segments);

    let slash_paths = candidates
        .iter()
        .map(|candidate| (candidate.as_path(), candidate.to_slash_lossy().to_string()))
        .collect::<Vec<_>>();

    if let Some((file, _)) = slash_paths
        .iter()
        .find(|(_, slash)| ends_with_segments(slash, &suffix))
    {
        tracing::debug!(suffix = %suffix, file = %file.display(), "resolved by path suffix");
        return Resolution::exact(file.to_path_buf(), ResolveStrategy::SuffixMatch);
    }

    let best = slash_paths
        .iter()
        .map(|(file, slash)| MatchCandidate {
            file: *file,
            score: overlap_score(slash, &segments),
        })
        .inspect(|candidate| {
            tracing::debug!(
                file = %candidate.file.display(),
                score = candidate.score,
                of = segments.len(),
                "scored candidate"
            );
        })
        .fold(None::<MatchCandidate<'_>>, |best, candidate| match best {
            Some(current) if current.score >= candidate.score => Some(current),
            _ => Some(candidate),
        });
    if let Some(best) = best.filter(|best| best.score >= MIN_OVERLAP_SCORE) {
        return Resolution {
            file: best.file.to_path_buf(),
            strategy: ResolveStrategy::BestOverlap,
            confidence: Confidence::Scored(best.score),
        };
    }

    tracing::warn!(
        reported_path,
        file = %candidates[0].display(),
        "falling back to the first same-named file; it may be the wrong one"
    );
    Resolution {
        file: candidates[0].clone(),
        strategy: ResolveStrategy::FirstCandidate,
        confidence: Confidence::Guess,
    }
}

fn reported_segments(reported_path: &str) -> Vec<&str> {
    clean_reported_path(reported_path)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Last `SUFFIX_MATCH_DEPTH` segments joined with `/`.
fn match_suffix(segments: &[&str]) -> String {
    let depth = SUFFIX_MATCH_DEPTH.min(segments.len());
    segments[segments.len() - depth..].join("/")
}

fn clean_reported_path(reported_path: &str) -> &str {
    reported_path
        .split_once(SOURCE_TREE_MARKER)
        .map(|(_, rest)| rest)
        .unwrap_or(reported_path)
}

/// Suffix match on whole path segments: `b/main.go` matches `/x/b/main.go`
/// but not `/x/ab/main.go`.
fn ends_with_segments(candidate: &str, suffix: &str) -> bool {
    if suffix.is_empty() {
        return false;
    }
    candidate == suffix
        || candidate
            .strip_suffix(suffix)
            .is_some_and(|head| head.ends_with('/'))
}

/// Trailing segments of the reported path that also appear as components of
/// the candidate, counted from the end and stopping at the first miss.
fn overlap_score(candidate: &str, segments: &[&str]) -> usize {
    segments
        .iter()
        .rev()
        .take_while(|segment| {
            candidate.contains(&format!("/{segment}/")) || candidate.ends_with(&format!("/{segment}"))
        })
        .count()
}
