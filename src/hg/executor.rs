//! hg command executor
//!
//! Runs a command line in a working directory and captures its output.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::HgError;

/// How stderr output of a finished command is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StderrPolicy {
    /// Any byte on stderr fails the command, regardless of exit status
    #[default]
    AnyOutputFails,
    /// Only a non-zero exit status fails the command
    ExitStatusOnly,
}

/// A command line bound to the directory it runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    /// Full command line, split with shell-word rules before spawning
    pub command_line: String,
    /// Directory the process is launched in
    pub working_dir: PathBuf,
    pub stderr_policy: StderrPolicy,
    /// Kill the process if it runs longer than this
    pub timeout: Option<Duration>,
}

impl CommandRequest {
    pub fn new(command_line: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            command_line: command_line.into(),
            working_dir: working_dir.into(),
            stderr_policy: StderrPolicy::default(),
            timeout: None,
        }
    }

    pub fn with_stderr_policy(mut self, policy: StderrPolicy) -> Self {
        self.stderr_policy = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Split the command line into an argument vector
    pub fn argv(&self) -> Result<Vec<String>, HgError> {
        let argv = shlex::split(&self.command_line)
            .ok_or_else(|| HgError::InvalidCommand(self.command_line.clone()))?;
        if argv.is_empty() {
            return Err(HgError::InvalidCommand(self.command_line.clone()));
        }
        Ok(argv)
    }
}

/// Something that can run a [`CommandRequest`] to completion
///
/// The pipeline and the worker pool only see this trait, so tests swap in
/// scripted executors.
pub trait CommandExecutor: Send + Sync {
    fn execute(&self, request: &CommandRequest) -> Result<String, HgError>;
}

/// Executor that spawns real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

/// Interval between exit checks while a timeout is armed
const POLL_INTERVAL: Duration = Duration::from_millis(20);

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    fn spawn(argv: &[String], working_dir: &Path) -> Result<Child, HgError> {
        if !working_dir.is_dir() {
            return Err(HgError::MissingWorkingDir(working_dir.to_path_buf()));
        }

        Command::new(&argv[0])
            .args(&argv[1..])
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    HgError::ToolNotFound(argv[0].clone())
                } else {
                    HgError::IoError(e)
                }
            })
    }
}

/// Captured result of a finished child process
struct Captured {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    exit_code: Option<i32>,
}

/// Wait for the child, killing it once `timeout` elapses
///
/// stdout/stderr are drained on helper threads so a chatty child cannot
/// block on a full pipe while we poll.
fn wait_with_timeout(mut child: Child, timeout: Duration) -> Result<Option<Captured>, HgError> {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let out_reader = thread::spawn(move || drain(stdout));
    let err_reader = thread::spawn(move || drain(stderr));

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break Some(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            break None;
        }
        thread::sleep(POLL_INTERVAL);
    };

    let stdout = join_reader(out_reader)?;
    let stderr = join_reader(err_reader)?;

    Ok(status.map(|status| Captured {
        stdout,
        stderr,
        exit_code: status.code(),
    }))
}

fn drain<R: Read>(pipe: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).inspect_err(|e| {
            tracing::debug!(error = %e, "failed to read child output");
        })?;
    }
    Ok(buf)
}

fn join_reader(
    reader: thread::JoinHandle<std::io::Result<Vec<u8>>>,
) -> Result<Vec<u8>, HgError> {
    reader
        .join()
        .map_err(|_| std::io::Error::other("output reader thread panicked"))?
        .map_err(HgError::IoError)
}

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, request: &CommandRequest) -> Result<String, HgError> {
        let argv = request.argv()?;
        tracing::debug!(
            command = %request.command_line,
            cwd = %request.working_dir.display(),
            "running command"
        );

        let child = Self::spawn(&argv, &request.working_dir)?;
        let captured = match request.timeout {
            Some(timeout) => wait_with_timeout(child, timeout)?.ok_or_else(|| HgError::Timeout {
                command: request.command_line.clone(),
                secs: timeout.as_secs(),
            })?,
            None => {
                let output = child.wait_with_output()?;
                Captured {
                    stdout: output.stdout,
                    stderr: output.stderr,
                    exit_code: output.status.code(),
                }
            }
        };

        judge(request, captured)
    }
}

/// Apply the stderr policy and decode stdout
fn judge(request: &CommandRequest, captured: Captured) -> Result<String, HgError> {
    let stderr = String::from_utf8_lossy(&captured.stderr).into_owned();
    let exit_code = captured.exit_code.unwrap_or(-1);

    match request.stderr_policy {
        StderrPolicy::AnyOutputFails if !captured.stderr.is_empty() => {
            tracing::warn!(command = %request.command_line, %stderr, "command wrote to stderr");
            return Err(HgError::ProcessFailure {
                command: request.command_line.clone(),
                stderr,
            });
        }
        _ if exit_code != 0 => {
            tracing::warn!(command = %request.command_line, exit_code, %stderr, "command failed");
            return Err(HgError::CommandFailed {
                command: request.command_line.clone(),
                stderr,
                exit_code,
            });
        }
        StderrPolicy::ExitStatusOnly if !captured.stderr.is_empty() => {
            tracing::debug!(command = %request.command_line, %stderr, "ignoring stderr output");
        }
        _ => {}
    }

    String::from_utf8(captured.stdout).map_err(|_| HgError::Decode {
        command: request.command_line.clone(),
    })
}
