use std::path::{Path, PathBuf};

use crate::file_index::{FileIndex, StaticFileIndex};
use crate::resolve::{Confidence, ResolveStrategy, resolve_source_file};

struct UnreachableIndex;

impl FileIndex for UnreachableIndex {
    fn files_named(&self, file_name: &str) -> Vec<PathBuf> {
        panic!("index consulted for {file_name}");
    }
}

fn write_text_file(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, "package main\n").expect("write");
}

fn index_of(paths: &[&str]) -> StaticFileIndex {
    StaticFileIndex::new(paths.iter().map(PathBuf::from))
}

#[test]
fn existing_absolute_path_wins_without_index_lookup() {
    let project = tempfile::tempdir().expect("tempdir");
    let file = project.path().join("pkg/fib/fib.go");
    write_text_file(&file);
    let reported = file.to_string_lossy().to_string();

    let resolution =
        resolve_source_file(&reported, Path::new("/nonexistent-root"), &UnreachableIndex)
            .expect("resolved");

    assert_eq!(resolution.file, file);
    assert_eq!(resolution.strategy, ResolveStrategy::AbsolutePath);
    assert_eq!(resolution.confidence, Confidence::Exact);
}

#[test]
fn module_relative_path_resolves_under_root() {
    let project = tempfile::tempdir().expect("tempdir");
    write_text_file(&project.path().join("internal/db/conn.go"));

    let resolution =
        resolve_source_file("internal/db/conn.go", project.path(), &UnreachableIndex)
            .expect("resolved");

    assert_eq!(resolution.file, project.path().join("internal/db/conn.go"));
    assert_eq!(resolution.strategy, ResolveStrategy::RootRelative);
}

#[test]
fn gopath_prefix_is_stripped_at_first_src_marker() {
    let project = tempfile::tempdir().expect("tempdir");
    write_text_file(&project.path().join("github.com/acme/app/main.go"));

    let resolution = resolve_source_file(
        "/home/ci/go/src/github.com/acme/app/main.go",
        project.path(),
        &UnreachableIndex,
    )
    .expect("resolved");

    assert_eq!(
        resolution.file,
        project.path().join("github.com/acme/app/main.go")
    );
    assert_eq!(resolution.strategy, ResolveStrategy::SourceTreeStripped);
}

#[test]
fn single_same_named_file_is_taken_but_scored_by_overlap() {
    let project = tempfile::tempdir().expect("tempdir");
    let index = index_of(&["/work/cmd/server/handler.go"]);

    let resolution =
        resolve_source_file("/build/host/cmd/api/handler.go", project.path(), &index)
            .expect("resolved");

    assert_eq!(resolution.file, PathBuf::from("/work/cmd/server/handler.go"));
    assert_eq!(resolution.strategy, ResolveStrategy::UniqueBasename);
    assert_eq!(resolution.confidence, Confidence::Scored(1));
    assert!(resolution.confidence.is_low());
}

#[test]
fn single_same_named_file_with_matching_suffix_is_exact() {
    let project = tempfile::tempdir().expect("tempdir");
    let index = index_of(&["/work/app/cmd/api/handler.go"]);

    let resolution =
        resolve_source_file("/build/host/app/cmd/api/handler.go", project.path(), &index)
            .expect("resolved");

    assert_eq!(resolution.strategy, ResolveStrategy::UniqueBasename);
    assert_eq!(resolution.confidence, Confidence::Exact);
}

#[test]
fn single_same_named_file_with_partial_overlap_is_not_low() {
    let project = tempfile::tempdir().expect("tempdir");
    let index = index_of(&["/work/svc/api/handler.go"]);

    let resolution =
        resolve_source_file("/build/host/cmd/api/handler.go", project.path(), &index)
            .expect("resolved");

    assert_eq!(resolution.confidence, Confidence::Scored(2));
    assert!(!resolution.confidence.is_low());
}

#[test]
fn four_segment_suffix_picks_the_matching_candidate() {
    let project = tempfile::tempdir().expect("tempdir");
    let index = index_of(&[
        "/work/aa/internal/db/conn.go",
        "/work/zz/app/internal/db/conn.go",
    ]);

    for _ in 0..3 {
        let resolution = resolve_source_file(
            "/build/go/src/github.com/acme/app/internal/db/conn.go",
            project.path(),
            &index,
        )
        .expect("resolved");

        assert_eq!(
            resolution.file,
            PathBuf::from("/work/zz/app/internal/db/conn.go")
        );
        assert_eq!(resolution.strategy, ResolveStrategy::SuffixMatch);
    }
}

#[test]
fn suffix_match_respects_segment_boundaries() {
    let project = tempfile::tempdir().expect("tempdir");
    let index = index_of(&["/work/a/myapp/db/conn.go", "/work/b/app/db/conn.go"]);

    let resolution = resolve_source_file("app/db/conn.go", project.path(), &index)
        .expect("resolved");

    assert_eq!(resolution.file, PathBuf::from("/work/b/app/db/conn.go"));
    assert_eq!(resolution.strategy, ResolveStrategy::SuffixMatch);
}

#[test]
fn highest_overlap_wins_when_no_suffix_matches() {
    let project = tempfile::tempdir().expect("tempdir");
    let index = index_of(&["/repo/a/cache/lru.go", "/repo/b/store/cache/lru.go"]);

    let resolution =
        resolve_source_file("/other/host/pkg/store/cache/lru.go", project.path(), &index)
            .expect("resolved");

    assert_eq!(resolution.file, PathBuf::from("/repo/b/store/cache/lru.go"));
    assert_eq!(resolution.strategy, ResolveStrategy::BestOverlap);
    assert_eq!(resolution.confidence, Confidence::Scored(3));
}

#[test]
fn single_segment_overlap_falls_back_to_a_flagged_guess() {
    let project = tempfile::tempdir().expect("tempdir");
    let index = index_of(&["/repo/one/helpers.go", "/repo/two/helpers.go"]);

    let resolution = resolve_source_file("/x/util/helpers.go", project.path(), &index)
        .expect("resolved");

    assert_eq!(resolution.file, PathBuf::from("/repo/one/helpers.go"));
    assert_eq!(resolution.strategy, ResolveStrategy::FirstCandidate);
    assert_eq!(resolution.confidence, Confidence::Guess);
    assert!(resolution.confidence.is_low());
}

#[test]
fn unknown_basename_is_not_found() {
    let project = tempfile::tempdir().expect("tempdir");
    let index = index_of(&["/repo/main.go"]);

    assert_eq!(
        resolve_source_file("/elsewhere/runtime/proc.go", project.path(), &index),
        None
    );
}

#[test]
fn relative_path_is_only_tried_under_the_project_root() {
    // `src/resolve.rs` exists relative to the test's working directory.
    assert!(Path::new("src/resolve.rs").is_file());
    let project = tempfile::tempdir().expect("tempdir");

    let resolution = resolve_source_file("src/resolve.rs", project.path(), &index_of(&[]));

    assert_eq!(resolution, None);
}
