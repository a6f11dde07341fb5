//! Process and filesystem capabilities used by the shortcut manager and dispatcher.
//!
//! `SystemEnv` talks to the real OS; tests plug in an in-memory implementation.

use std::future::Future;
use std::io;
use std::path::Path;

use squirrel_updater_lib::{process, ProcessError};

pub trait InstallerEnv: Send + Sync + 'static {
    /// Run `command` to completion, returning its stdout on exit code 0.
    fn spawn(
        &self,
        command: &Path,
        args: &[String],
    ) -> impl Future<Output = Result<String, ProcessError>> + Send;

    /// Any stat failure counts as "does not exist".
    fn exists(&self, path: &Path) -> impl Future<Output = bool> + Send;

    /// Byte-for-byte copy, overwriting `to`.
    fn copy(&self, from: &Path, to: &Path) -> impl Future<Output = io::Result<()>> + Send;

    fn remove(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl InstallerEnv for SystemEnv {
    async fn spawn(&self, command: &Path, args: &[String]) -> Result<String, ProcessError> {
        process::spawn(command, args).await
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    async fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        tokio::fs::copy(from, to).await.map(|_| ())
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }
}
