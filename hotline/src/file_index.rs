//! Basename lookup over a project tree.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use path_slash::PathExt;

pub trait FileIndex: Send + Sync {
    /// Every indexed file whose final path component equals `file_name`.
    fn files_named(&self, file_name: &str) -> Vec<PathBuf>;
}

/// Files grouped by basename. Each bucket is kept in sorted path order so
/// resolution never depends on directory iteration order.
#[derive(Debug, Clone, Default)]
pub struct StaticFileIndex {
    by_name: BTreeMap<String, Vec<PathBuf>>,
}

impl StaticFileIndex {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut by_name: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for path in paths {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            by_name.entry(name.to_string()).or_default().push(path);
        }
        by_name.values_mut().for_each(|paths| {
            paths.sort();
            paths.dedup();
        });
        Self { by_name }
    }

    pub fn len(&self) -> usize {
        self.by_name.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl FileIndex for StaticFileIndex {
    fn files_named(&self, file_name: &str) -> Vec<PathBuf> {
        self.by_name.get(file_name).cloned().unwrap_or_default()
    }
}

/// Index built by walking a project root, honouring `.gitignore`.
#[derive(Debug, Clone, Default)]
pub struct WalkFileIndex {
    inner: StaticFileIndex,
}

impl WalkFileIndex {
    pub fn build(project_root: &Path) -> Self {
        Self::build_with_excludes(project_root, &[])
    }

    pub fn build_with_excludes(project_root: &Path, exclude_globs: &[String]) -> Self {
        let _span = crate::profile::span("file_index.build");
        let exclude = build_exclude_globset(exclude_globs);
        let files = ignore::WalkBuilder::new(project_root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .filter_entry(|dent| dent.file_name() != ".git")
            .build()
            .filter_map(Result::ok)
            .filter(|dent| dent.file_type().is_some_and(|t| t.is_file()))
            .map(|dent| dent.into_path())
            .filter(|path| {
                let rel = path
                    .strip_prefix(project_root)
                    .map(|p| p.to_slash_lossy().to_string())
                    .unwrap_or_default();
                rel.is_empty() || !exclude.is_match(rel.as_str())
            });
        let inner = StaticFileIndex::new(files);
        tracing::debug!(
            root = %project_root.display(),
            files = inner.len(),
            "built project file index"
        );
        Self { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FileIndex for WalkFileIndex {
    fn files_named(&self, file_name: &str) -> Vec<PathBuf> {
        self.inner.files_named(file_name)
    }
}

fn build_exclude_globset(exclude_globs: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pat in exclude_globs {
        match Glob::new(pat) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(err) => tracing::warn!(pattern = %pat, "ignoring invalid exclude glob: {err}"),
        }
    }
    builder.build().unwrap_or_else(|_| GlobSet::empty())
}
