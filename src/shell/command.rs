//! Running probe subprocesses with captured output.
//!
//! Standard output and standard error are both redirected into one anonymous
//! temporary file, so the captured text interleaves the two streams in the
//! order the child wrote them. The file is dropped (and removed by the OS) on
//! every return path.

use std::ffi::OsStr;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::Result;

/// Interval between exit polls while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

const SPAWN_RETRIES: usize = 5;

/// Result of a captured subprocess run.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Combined standard output and standard error.
    pub output: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,

    /// Whether the child was killed because the timeout elapsed.
    pub timed_out: bool,
}

impl CommandResult {
    /// First line of the captured output, trimmed.
    pub fn first_line(&self) -> Option<&str> {
        self.output
            .lines()
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

/// Options for captured execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Kill the child after this long (None = wait indefinitely).
    pub timeout: Option<Duration>,
}

/// Run `program` with `args`, capturing combined output.
///
/// Returns `Err` only if the process could not be started or the capture
/// file could not be read. A non-zero exit is reported through
/// [`CommandResult::success`].
pub fn execute_captured<P, I, S>(
    program: P,
    args: I,
    options: &CommandOptions,
) -> Result<CommandResult>
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let start = Instant::now();
    let mut capture = tempfile::tempfile()?;

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(capture.try_clone()?))
        .stderr(Stdio::from(capture.try_clone()?));

    let mut child = spawn(&mut cmd)?;
    let (status, timed_out) = wait(&mut child, options.timeout)?;
    let duration = start.elapsed();

    capture.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    capture.read_to_end(&mut bytes)?;
    let output = String::from_utf8_lossy(&bytes).into_owned();

    let success = !timed_out && status.map(|s| s.success()).unwrap_or(false);
    Ok(CommandResult {
        exit_code: status.and_then(|s| s.code()),
        output,
        duration,
        success,
        timed_out,
    })
}

/// Spawn, retrying while the executable is still open for writing elsewhere.
fn spawn(cmd: &mut Command) -> std::io::Result<Child> {
    let mut attempts = 0;
    loop {
        match cmd.spawn() {
            Err(e) if e.kind() == ErrorKind::ExecutableFileBusy && attempts < SPAWN_RETRIES => {
                attempts += 1;
                thread::sleep(POLL_INTERVAL);
            }
            other => return other,
        }
    }
}

/// Wait for the child, killing it if `timeout` elapses first.
fn wait(child: &mut Child, timeout: Option<Duration>) -> Result<(Option<ExitStatus>, bool)> {
    let Some(timeout) = timeout else {
        return Ok((Some(child.wait()?), false));
    };

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok((Some(status), false));
        }
        if Instant::now() >= deadline {
            tracing::debug!("Killing child {} after {:?}", child.id(), timeout);
            let _ = child.kill();
            let _ = child.wait();
            return Ok((None, true));
        }
        thread::sleep(POLL_INTERVAL);
    }
}
