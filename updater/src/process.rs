//! Process runner - spawns a child, captures its stdout and classifies the exit.
//!
//! A call resolves exactly once:
//! - `Ok(stdout)` when the child exits with code 0
//! - `ProcessError::Spawn` when the child could not be started
//! - `ProcessError::Io` when reading stdout or waiting failed (first error wins)
//! - `ProcessError::Exited` for a nonzero exit code or a kill by signal

use std::ffi::OsStr;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::ProcessError;

/// Spawn `command` with `args` and wait for it to terminate.
pub async fn spawn<S: AsRef<OsStr>>(command: &Path, args: &[S]) -> Result<String, ProcessError> {
    tracing::debug!(
        "[Process] Spawning {} {:?}",
        command.display(),
        args.iter().map(|a| a.as_ref().to_string_lossy()).collect::<Vec<_>>()
    );

    let mut cmd = Command::new(command);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(false);

    apply_creation_flags(&mut cmd);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(source) => {
            tracing::debug!("[Process] Failed to spawn {}: {}", command.display(), source);
            return Err(ProcessError::Spawn {
                command: command.to_path_buf(),
                source,
            });
        }
    };

    let stdout_pipe = child.stdout.take();
    let read_stdout = async move {
        let mut buf = Vec::new();
        let result = match stdout_pipe {
            Some(mut pipe) => pipe.read_to_end(&mut buf).await.map(|_| ()),
            None => Ok(()),
        };
        (buf, result)
    };

    let ((buf, read_result), wait_result) = tokio::join!(read_stdout, child.wait());
    let stdout = String::from_utf8_lossy(&buf).into_owned();

    let mut first_error = read_result.err();
    let status = match wait_result {
        Ok(status) => Some(status),
        Err(e) => {
            first_error.get_or_insert(e);
            None
        }
    };
    let code = status.and_then(|s| s.code());

    if let Some(source) = first_error {
        tracing::debug!("[Process] I/O error from {}: {}", command.display(), source);
        return Err(ProcessError::Io {
            command: command.to_path_buf(),
            source,
            code,
            stdout,
        });
    }

    match status {
        Some(status) if status.success() => Ok(stdout),
        status => {
            let err = ProcessError::Exited {
                command: command.to_path_buf(),
                code,
                signal: status.and_then(signal_name),
                stdout,
            };
            tracing::debug!("[Process] {} exited abnormally: {}", command.display(), err);
            Err(err)
        }
    }
}

#[cfg(unix)]
fn signal_name(status: ExitStatus) -> Option<String> {
    use std::os::unix::process::ExitStatusExt;

    let raw = status.signal()?;
    Some(match nix::sys::signal::Signal::try_from(raw) {
        Ok(signal) => signal.as_str().to_string(),
        Err(_) => format!("signal {}", raw),
    })
}

#[cfg(not(unix))]
fn signal_name(_status: ExitStatus) -> Option<String> {
    None
}

/// Hide the console window Update.exe would otherwise flash on Windows.
#[cfg(target_os = "windows")]
fn apply_creation_flags(cmd: &mut Command) -> &mut Command {
    const CREATE_NO_WINDOW: u32 = 0x08000000;
    cmd.creation_flags(CREATE_NO_WINDOW)
}

#[cfg(not(target_os = "windows"))]
fn apply_creation_flags(cmd: &mut Command) -> &mut Command {
    cmd
}
