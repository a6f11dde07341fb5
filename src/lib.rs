//! Squirrel install/update/uninstall event handling for Windows desktop apps.
//!
//! - **dispatcher**: routes `--squirrel-*` arguments
//! - **shortcuts**: Start-Menu / Desktop / Taskbar links through Update.exe
//! - **scheduler**: delayed + periodic `Update.exe --update`
//! - **legacy**: old startup-folder link cleanup
//! - **instance**: single-instance lock deciding `should_quit`
//! - **paths** / **config** / **env**: inputs and OS capabilities

pub mod app_id;
pub mod config;
pub mod dispatcher;
pub mod env;
pub mod instance;
pub mod legacy;
pub mod paths;
pub mod scheduler;
pub mod shortcuts;
pub mod updater;

pub use config::SquirrelConfig;
pub use dispatcher::{EventDispatcher, LifecycleSignal};
pub use env::{InstallerEnv, SystemEnv};
pub use instance::SingleInstance;
pub use paths::{InstallPaths, PathError};
pub use scheduler::{ScheduledUpdates, UpdateScheduler};
pub use shortcuts::{ShortcutError, ShortcutManager};
pub use updater::Updater;

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Wire shortcut manager, scheduler and dispatcher around one environment.
pub fn build_dispatcher<E: InstallerEnv>(
    env: Arc<E>,
    config: &SquirrelConfig,
    paths: Arc<InstallPaths>,
    quit: CancellationToken,
) -> EventDispatcher<E> {
    let updater = Updater::new(env, paths.update_exe.clone());
    let scheduler = UpdateScheduler::new(
        updater.clone(),
        config.update_url.clone(),
        config.update_delay(),
        config.update_interval(),
    );
    let shortcuts = ShortcutManager::new(updater, paths);
    EventDispatcher::new(shortcuts, scheduler, quit)
}
