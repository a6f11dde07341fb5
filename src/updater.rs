//! Update.exe invoker bound to the install's fixed `Update.exe` path.

use std::path::PathBuf;
use std::sync::Arc;

use squirrel_updater_lib::{ProcessError, UpdateCommand};

use crate::env::InstallerEnv;

pub struct Updater<E> {
    env: Arc<E>,
    update_exe: PathBuf,
}

impl<E> Clone for Updater<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
            update_exe: self.update_exe.clone(),
        }
    }
}

impl<E: InstallerEnv> Updater<E> {
    pub fn new(env: Arc<E>, update_exe: PathBuf) -> Self {
        Self { env, update_exe }
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub async fn spawn_update(&self, command: &UpdateCommand) -> Result<String, ProcessError> {
        self.env.spawn(&self.update_exe, &command.args()).await
    }

    /// `Update.exe --update <url>`
    pub async fn install_update(&self, url: &str) -> Result<String, ProcessError> {
        tracing::info!("[Updater] Checking for updates at {}", url);
        let result = self.spawn_update(&UpdateCommand::update(url)).await;
        match &result {
            Ok(_) => tracing::info!("[Updater] Update check finished"),
            Err(e) => tracing::warn!("[Updater] Update failed: {} (stdout: {:?})", e, e.stdout()),
        }
        result
    }
}
