use std::ffi::OsString;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured output of one external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Compiler diagnostics: `stdout` then `stderr`, newline-separated.
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) if self.stdout.ends_with('\n') => {
                format!("{}{}", self.stdout, self.stderr)
            }
            (false, false) => format!("{}\n{}", self.stdout, self.stderr),
        }
    }
}

/// Runs external programs. Injected so compilation can be exercised without
/// spawning processes.
pub trait CommandRunner: Send + Sync + std::fmt::Debug {
    fn run(&self, cwd: &Path, program: &Path, args: &[OsString]) -> io::Result<CommandOutput>;
}

#[derive(Debug, Clone, Default)]
pub struct DefaultCommandRunner {
    /// Kill the child when it runs longer than this. `None` waits forever.
    /// Only the direct child is killed.
    pub timeout: Option<Duration>,
}

impl CommandRunner for DefaultCommandRunner {
    fn run(&self, cwd: &Path, program: &Path, args: &[OsString]) -> io::Result<CommandOutput> {
        let command = format_command(program, args);
        tracing::debug!(target: "implgen.build", command = %command, "running command");

        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| io::Error::new(err.kind(), format!("failed to spawn `{command}`: {err}")))?;

        let (stdout_pipe, stderr_pipe) = match (child.stdout.take(), child.stderr.take()) {
            (Some(stdout), Some(stderr)) => (stdout, stderr),
            _ => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(io::Error::other(format!("failed to capture output of `{command}`")));
            }
        };

        // Pipes are drained concurrently so a chatty compiler cannot block on a
        // full pipe while we wait for it.
        let (status, stdout, stderr) = thread::scope(|scope| {
            let stdout = scope.spawn(|| drain(stdout_pipe));
            let stderr = scope.spawn(|| drain(stderr_pipe));
            let status = wait(&mut child, self.timeout, &command);
            (
                status,
                stdout.join().unwrap_or_default(),
                stderr.join().unwrap_or_default(),
            )
        });

        match status {
            Ok(status) => Ok(CommandOutput {
                status,
                stdout,
                stderr,
            }),
            Err(err) => {
                let output = [("stdout", &stdout), ("stderr", &stderr)]
                    .into_iter()
                    .filter(|(_, text)| !text.is_empty())
                    .map(|(label, text)| format!("\n{label}:\n{text}"))
                    .collect::<String>();
                Err(io::Error::new(err.kind(), format!("{err}{output}")))
            }
        }
    }
}

/// Wait for `child`, killing it on timeout or wait failure.
fn wait(child: &mut Child, timeout: Option<Duration>, command: &str) -> io::Result<ExitStatus> {
    let result = match timeout {
        None => child.wait(),
        Some(timeout) => {
            let deadline = Instant::now() + timeout;
            loop {
                match child.try_wait() {
                    Ok(Some(status)) => break Ok(status),
                    Ok(None) if Instant::now() >= deadline => {
                        break Err(io::Error::new(
                            io::ErrorKind::TimedOut,
                            format!("`{command}` timed out after {timeout:?}"),
                        ))
                    }
                    Ok(None) => thread::sleep(POLL_INTERVAL),
                    Err(err) => break Err(err),
                }
            }
        }
    };
    if result.is_err() {
        let _ = child.kill();
        let _ = child.wait();
    }
    result
}

fn drain(mut pipe: impl Read) -> String {
    let mut buf = Vec::new();
    let _ = pipe.read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

pub(crate) fn format_command(program: &Path, args: &[OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
