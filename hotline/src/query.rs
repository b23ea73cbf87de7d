//! Running `go tool pprof` and retrying `-list` over expanded symbol patterns.

use std::path::PathBuf;
use std::process::Command;
use std::time::{Duration, Instant};

use crate::listing::{RoutineListing, decode_listing};
use crate::patterns::expand_patterns;
use crate::process::{ProcessError, display_command, run_command_capture_with_timeout};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of `-list` output for a symbol pattern.
///
/// Failures are reported as empty text: the caller only ever needs to know
/// "try the next pattern".
pub trait QueryExecutor {
    fn list(&self, pattern: &str) -> String;
}

impl<F> QueryExecutor for F
where
    F: Fn(&str) -> String,
{
    fn list(&self, pattern: &str) -> String {
        self(pattern)
    }
}

#[derive(Debug, Clone)]
pub struct PprofTool {
    go_binary: PathBuf,
    profile: PathBuf,
    extra_args: Vec<String>,
    timeout: Duration,
    working_dir: Option<PathBuf>,
}

impl PprofTool {
    pub fn new(go_binary: impl Into<PathBuf>, profile: impl Into<PathBuf>) -> Self {
        Self {
            go_binary: go_binary.into(),
            profile: profile.into(),
            extra_args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            working_dir: None,
        }
    }

    /// Looks `go_binary` up on `PATH` (or accepts it as a path) before use.
    pub fn locate(go_binary: &str, profile: impl Into<PathBuf>) -> Result<Self, ProcessError> {
        let resolved = which::which(go_binary).map_err(|_| ProcessError::MissingTool {
            tool: go_binary.to_string(),
            hint: "install Go or point `goBinary` at the go executable".to_string(),
        })?;
        Ok(Self::new(resolved, profile))
    }

    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Ranked table text (`go tool pprof -top <profile>`).
    pub fn top(&self) -> Result<String, ProcessError> {
        self.run_report("-top")
    }

    fn args_for(&self, report_flag: &str) -> Vec<String> {
        let mut args = vec!["tool".to_string(), "pprof".to_string(), report_flag.to_string()];
        args.extend(self.extra_args.iter().cloned());
        args.push(self.profile.to_string_lossy().to_string());
        args
    }

    fn run_report(&self, report_flag: &str) -> Result<String, ProcessError> {
        let args = self.args_for(report_flag);
        let program = self.go_binary.to_string_lossy().to_string();
        let shown = display_command(&program, &args);
        let mut command = Command::new(&self.go_binary);
        command.args(&args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let started = Instant::now();
        let output = run_command_capture_with_timeout(command, shown.clone(), self.timeout)?;
        let code = output.status.code();
        tracing::debug!(
            command = %shown,
            code = ?code,
            elapsed_ms = started.elapsed().as_millis() as u64,
            stdout_bytes = output.stdout.len(),
            "pprof finished"
        );
        let stderr = output.stderr_text();
        if !output.status.success() {
            return Err(ProcessError::CommandFailed {
                command: shown,
                code,
                stderr,
            });
        }
        if !stderr.trim().is_empty() {
            tracing::warn!(command = %shown, "pprof wrote to stderr: {}", stderr.trim());
        }
        Ok(output.stdout_text())
    }
}

impl QueryExecutor for PprofTool {
    fn list(&self, pattern: &str) -> String {
        match self.run_report(&format!("-list={pattern}")) {
            Ok(stdout) => stdout,
            Err(err) => {
                tracing::warn!(pattern, "pprof -list failed: {err}");
                String::new()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingHit {
    pub pattern: String,
    /// 1-based position of `pattern` among the expanded patterns.
    pub attempt: usize,
    pub listing: RoutineListing,
}

/// Tries each expanded pattern in order and stops at the first one whose
/// output decodes to a usable listing. Attempts have no side effects, so a
/// caller may abandon the sequence between patterns.
pub fn find_listing(symbol: &str, executor: &dyn QueryExecutor) -> Option<ListingHit> {
    let _span = crate::profile::span("find_listing");
    let patterns = expand_patterns(symbol);
    let total = patterns.len();
    for (idx, pattern) in patterns.into_iter().enumerate() {
        let attempt = idx + 1;
        tracing::info!(attempt, total, pattern = %pattern, "trying -list pattern");
        let output = executor.list(&pattern);
        if output.trim().is_empty() {
            continue;
        }
        let Some(listing) = decode_listing(&output) else {
            tracing::debug!(pattern = %pattern, "output had no usable ROUTINE block");
            continue;
        };
        tracing::info!(attempt, pattern = %pattern, path = %listing.source_file_path, "pattern matched");
        return Some(ListingHit {
            pattern,
            attempt,
            listing,
        });
    }
    tracing::warn!(symbol, "no -list pattern produced a listing");
    None
}
