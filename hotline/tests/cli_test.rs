use std::path::Path;
use std::process::{Command, Output};

fn hotline(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hotline"))
        .current_dir(cwd)
        .args(["--no-color", "--root"])
        .arg(cwd)
        .args(args)
        .env_remove("HOTLINE_LOG")
        .env_remove("HOTLINE_PROFILE")
        .output()
        .expect("run hotline")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn patterns_prints_one_pattern_per_line() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = hotline(dir.path(), &["patterns", "github.com/x/y.(*T).M.func1"]);

    assert!(output.status.success());
    similar_asserts::assert_eq!(
        stdout_of(&output),
        "github.com/x/y.(*T).M.func1\n\
         (*T).M\n\
         github\\.com/x/y\\.\\(\\*T\\)\\.M\\.func1\n\
         x/y.(*T).M.func1\n\
         y.(*T).M.func1\n"
    );
}

#[test]
fn top_renders_a_captured_report_with_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report = dir.path().join("top.txt");
    std::fs::write(
        &report,
        "Type: alloc_space\n\
         \x20 1024KB 50.00% 50.00%  2MB 100%  bytes.growSlice\n\
         \x20  512KB 25.00% 75.00%  512KB 25.00%  main.load\n",
    )
    .expect("write");

    let output = hotline(
        dir.path(),
        &["top", "--report", report.to_str().expect("utf8"), "--limit", "1"],
    );

    assert!(output.status.success());
    insta::assert_snapshot!(stdout_of(&output), @r"
    Type: alloc_space
    unit: alloc_space  total flat: 1572864  rows: 2
          flat   flat%    sum%        cum    cum%  symbol
       1048576  50.00%  50.00%    2097152 100.00%  bytes.growSlice
    ... 1 more
    ");
}

#[test]
fn top_json_keeps_header_unit_and_totals() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report = dir.path().join("top.txt");
    std::fs::write(&report, "Type: cpu\n10 50% 50% 20 100% main.main\n").expect("write");

    let output = hotline(
        dir.path(),
        &["top", "--report", report.to_str().expect("utf8"), "--json"],
    );

    assert!(output.status.success());
    insta::assert_snapshot!(stdout_of(&output), @r#"
    {
      "header": {
        "file": null,
        "kind": "cpu",
        "time": null,
        "duration": null,
        "showing": null
      },
      "unit": "cpu",
      "total_flat": 10,
      "total_rows": 1,
      "records": [
        {
          "flat": 10,
          "flat_percent": 50.0,
          "sum_percent": 50.0,
          "cum": 20,
          "cum_percent": 100.0,
          "symbol": "main.main"
        }
      ]
    }
    "#);
}

#[test]
fn top_json_limit_cuts_records_but_not_totals() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report = dir.path().join("top.txt");
    std::fs::write(
        &report,
        "10 50% 50% 20 100% main.main\n10 50% 100% 10 50% main.work\n",
    )
    .expect("write");

    let output = hotline(
        dir.path(),
        &["top", "--report", report.to_str().expect("utf8"), "--json", "--limit", "1"],
    );

    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(view["records"].as_array().map(Vec::len), Some(1));
    assert_eq!(view["records"][0]["symbol"], "main.main");
    assert_eq!(view["total_flat"], 20);
    assert_eq!(view["total_rows"], 2);
    assert_eq!(view["unit"], "samples");
}

#[test]
fn resolve_prints_file_and_strategy() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("internal/db")).expect("mkdir");
    std::fs::write(dir.path().join("internal/db/conn.go"), "package db\n").expect("write");

    let output = hotline(dir.path(), &["resolve", "/ci/build/internal/db/conn.go"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("internal/db/conn.go\tUniqueBasename\tScored(3)"));
}

#[test]
fn unresolvable_path_exits_with_navigation_failure() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = hotline(dir.path(), &["resolve", "/nowhere/missing.go"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("source file not found in project: /nowhere/missing.go")
    );
}

#[test]
fn missing_report_file_exits_with_error() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = hotline(dir.path(), &["top", "--report", "absent.txt"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn malformed_config_exits_with_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("hotline.toml"), "top = [").expect("write");

    let output = hotline(dir.path(), &["patterns", "main.main"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("hotline.toml"));
}

#[cfg(unix)]
fn write_stub_go(dir: &Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let go = dir.join("go");
    std::fs::write(
        &go,
        "#!/bin/sh\n\
         case \"$3\" in\n\
         \x20 -list=*) printf 'ROUTINE ======== main.fib in /x/main.go\\n      10ms       30ms     12:\\treturn n\\n' ;;\n\
         esac\n",
    )
    .expect("write stub");
    let mut perms = std::fs::metadata(&go).expect("metadata").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&go, perms).expect("chmod");
    go
}

#[cfg(unix)]
#[test]
fn list_explain_appends_line_details() {
    let dir = tempfile::tempdir().expect("tempdir");
    let go = write_stub_go(dir.path());

    let output = hotline(
        dir.path(),
        &[
            "--go",
            go.to_str().expect("utf8"),
            "list",
            "cpu.pprof",
            "main.fib",
            "--explain",
        ],
    );

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("ROUTINE main.fib in /x/main.go\n"));
    assert!(stdout.contains("return n  // flat: 10ms, cum: 30ms\n\n"));
    similar_asserts::assert_eq!(
        stdout.split_once("\n\n").map(|(_, tail)| tail),
        Some("Performance data\nLine: 12\nFlat: 10ms\nCumulative: 30ms\nStatus: medium hotspot\n")
    );
}
