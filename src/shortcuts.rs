//! Shortcut manager - Start-Menu, Desktop and Taskbar links.
//!
//! Start-Menu and Desktop links are always produced by `Update.exe`.
//! `Update.exe` has no Taskbar target, so the pinned Taskbar link is refreshed
//! by copying the freshly recreated Start-Menu link over it.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use squirrel_updater_lib::{ProcessError, ShortcutLocation, UpdateCommand};

use crate::env::InstallerEnv;
use crate::paths::InstallPaths;
use crate::updater::Updater;

const REMOVE_LOCATIONS: [ShortcutLocation; 3] = [
    ShortcutLocation::Desktop,
    ShortcutLocation::Startup,
    ShortcutLocation::StartMenu,
];

#[derive(Error, Debug)]
pub enum ShortcutError {
    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("failed to copy '{}' to '{}': {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove '{}': {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub struct ShortcutManager<E> {
    updater: Updater<E>,
    paths: Arc<InstallPaths>,
}

impl<E> Clone for ShortcutManager<E> {
    fn clone(&self) -> Self {
        Self {
            updater: self.updater.clone(),
            paths: self.paths.clone(),
        }
    }
}

impl<E: InstallerEnv> ShortcutManager<E> {
    pub fn new(updater: Updater<E>, paths: Arc<InstallPaths>) -> Self {
        Self { updater, paths }
    }

    pub async fn create_start_shortcut(&self) -> Result<String, ProcessError> {
        self.create_shortcut(ShortcutLocation::StartMenu).await
    }

    pub async fn create_desktop_shortcut(&self) -> Result<String, ProcessError> {
        self.create_shortcut(ShortcutLocation::Desktop).await
    }

    async fn create_shortcut(&self, location: ShortcutLocation) -> Result<String, ProcessError> {
        tracing::debug!("[Shortcut] Creating {} shortcut", location);
        let command = UpdateCommand::create_shortcut(&self.paths.exe_name, &[location]);
        self.updater.spawn_update(&command).await
    }

    /// Recreate the Desktop link only if the user still has one.
    ///
    /// `None` means no link existed and nothing was run.
    pub async fn update_desktop_shortcut(&self) -> Option<Result<String, ProcessError>> {
        if !self.updater.env().exists(&self.paths.desktop_link).await {
            return None;
        }
        Some(self.create_desktop_shortcut().await)
    }

    /// Refresh a pinned Taskbar link from a freshly recreated Start-Menu link.
    ///
    /// `None` means no Taskbar link existed and nothing was run.
    pub async fn update_taskbar_shortcut(&self) -> Option<Result<(), ShortcutError>> {
        let paths = &self.paths;
        if !self.updater.env().exists(&paths.taskbar_link).await {
            return None;
        }

        if let Err(e) = self.create_start_shortcut().await {
            tracing::warn!("[Shortcut] Recreating Start-Menu shortcut failed: {}", e);
        }

        let copied = self
            .updater
            .env()
            .copy(&paths.start_link, &paths.taskbar_link)
            .await
            .map_err(|source| ShortcutError::Copy {
                from: paths.start_link.clone(),
                to: paths.taskbar_link.clone(),
                source,
            });
        Some(copied)
    }

    /// Remove Desktop, Startup and Start-Menu links, then the Taskbar link.
    ///
    /// A missing Taskbar link is not an error. A spawn failure takes
    /// precedence over a deletion failure in the returned error.
    pub async fn remove_shortcuts(&self) -> Result<(), ShortcutError> {
        let command = UpdateCommand::remove_shortcut(&self.paths.exe_name, &REMOVE_LOCATIONS);
        let removed = self.updater.spawn_update(&command).await;

        let taskbar_link = &self.paths.taskbar_link;
        let deleted = match self.updater.env().remove(taskbar_link).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(ShortcutError::Remove {
                path: taskbar_link.clone(),
                source: e,
            }),
            _ => Ok(()),
        };

        removed?;
        deleted
    }
}
