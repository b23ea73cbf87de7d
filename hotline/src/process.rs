use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use thiserror::Error;
use wait_timeout::ChildExt;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("missing tool: {tool} ({hint})")]
    MissingTool { tool: String, hint: String },

    #[error("command failed with exit code {code:?}: {command}\n{stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("command timed out after {timeout_ms}ms: {command}")]
    TimedOut { command: String, timeout_ms: u64 },

    #[error("failed to spawn process: {0}")]
    SpawnFailed(std::io::Error),

    #[error("failed to wait on process: {0}")]
    WaitFailed(std::io::Error),

    #[error("io error: {0}")]
    Io(std::io::Error),
}

#[derive(Debug)]
pub struct CapturedProcessOutput {
    pub status: std::process::ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CapturedProcessOutput {
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

fn join_capture_thread(
    handle: Option<JoinHandle<Result<Vec<u8>, std::io::Error>>>,
) -> Result<Vec<u8>, ProcessError> {
    let Some(handle) = handle else {
        return Ok(vec![]);
    };
    handle
        .join()
        .map_err(|_| ProcessError::Io(std::io::Error::other("capture thread panicked")))?
        .map_err(ProcessError::Io)
}

fn spawn_capture_thread(
    reader: Option<impl std::io::Read + Send + 'static>,
) -> Option<JoinHandle<Result<Vec<u8>, std::io::Error>>> {
    reader.map(|mut r| {
        std::thread::spawn(move || {
            let mut buf: Vec<u8> = vec![];
            r.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

/// Runs `command` to completion, capturing both streams. The child runs in its
/// own process group; once `timeout` elapses the whole group is killed and
/// the capture threads are abandoned, since a surviving grandchild may still
/// hold the pipes open.
pub fn run_command_capture_with_timeout(
    mut command: Command,
    display_command: String,
    timeout: Duration,
) -> Result<CapturedProcessOutput, ProcessError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    isolate_process_group(&mut command);
    let mut child = command.spawn().map_err(ProcessError::SpawnFailed)?;

    let stdout_thread = spawn_capture_thread(child.stdout.take());
    let stderr_thread = spawn_capture_thread(child.stderr.take());

    let maybe_status =
        ChildExt::wait_timeout(&mut child, timeout).map_err(ProcessError::WaitFailed)?;
    let Some(status) = maybe_status else {
        kill_process_group(&mut child);
        let _ = child.wait();
        drop(stdout_thread);
        drop(stderr_thread);
        tracing::warn!(command = %display_command, "killed after timeout");
        return Err(ProcessError::TimedOut {
            command: display_command,
            timeout_ms: timeout.as_millis() as u64,
        });
    };

    let stdout = join_capture_thread(stdout_thread)?;
    let stderr = join_capture_thread(stderr_thread)?;
    Ok(CapturedProcessOutput {
        status,
        stdout,
        stderr,
    })
}

#[cfg(unix)]
fn isolate_process_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn isolate_process_group(_command: &mut Command) {}

#[cfg(unix)]
fn kill_process_group(child: &mut Child) {
    let Ok(pgid) = libc::pid_t::try_from(child.id()) else {
        let _ = child.kill();
        return;
    };
    // The child leads its own group (`process_group(0)`), so `-pgid` reaches
    // it and every descendant that did not detach.
    let rc = unsafe { libc::kill(-pgid, libc::SIGKILL) };
    if rc != 0 {
        let _ = child.kill();
    }
}

#[cfg(not(unix))]
fn kill_process_group(child: &mut Child) {
    let _ = child.kill();
}

pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program.to_string())
        .chain(args.iter().map(|arg| {
            if arg.contains(char::is_whitespace) {
                format!("{arg:?}")
            } else {
                arg.clone()
            }
        }))
        .collect::<Vec<_>>()
        .join(" ")
}
