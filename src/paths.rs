//! Installation paths derived once from the running executable and the environment.
//!
//! Squirrel layout:
//! ```text
//! %LOCALAPPDATA%\<App>\
//!   Update.exe            <- root_folder
//!   app-1.2.3\            <- app_folder
//!     <App>.exe           <- current_exe()
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
    #[error("'{}' has no parent directory", .0.display())]
    NoParent(PathBuf),
}

/// Every path the lifecycle handler touches. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    pub app_folder: PathBuf,
    pub root_folder: PathBuf,
    pub update_exe: PathBuf,
    pub exe_name: String,
    pub link_name: String,
    pub home_folder: PathBuf,
    pub start_folder: PathBuf,
    pub taskbar_folder: PathBuf,
    pub start_link: PathBuf,
    pub desktop_link: PathBuf,
    pub taskbar_link: PathBuf,
    pub legacy_startup_link: PathBuf,
}

impl InstallPaths {
    /// Resolve from the real process executable and environment.
    pub fn from_current_exe(product: &str) -> anyhow::Result<Self> {
        let exec_path = std::env::current_exe()?;
        Ok(Self::resolve(&exec_path, product, |key| std::env::var_os(key))?)
    }

    /// Derive all paths from `exec_path` and an environment lookup.
    pub fn resolve<F>(exec_path: &Path, product: &str, env: F) -> Result<Self, PathError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let app_folder = exec_path
            .parent()
            .ok_or_else(|| PathError::NoParent(exec_path.to_path_buf()))?
            .to_path_buf();
        let root_folder = app_folder
            .parent()
            .ok_or_else(|| PathError::NoParent(app_folder.clone()))?
            .to_path_buf();
        let update_exe = root_folder.join("Update.exe");

        let exe_name = format!("{}.exe", product);
        let link_name = format!("{}.lnk", product);

        // HOMEPATH carries no drive letter ("\Users\name")
        let home_folder = match (env("HOMEDRIVE"), env("HOMEPATH")) {
            (Some(drive), Some(home_path)) => {
                let mut joined = drive;
                joined.push(&home_path);
                PathBuf::from(joined)
            }
            (None, Some(home_path)) => PathBuf::from(home_path),
            (_, None) => PathBuf::from(env("USERPROFILE").ok_or(PathError::MissingEnv("HOMEPATH"))?),
        };

        // Windows default when APPDATA is unset
        let appdata = env("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| home_folder.join("AppData").join("Roaming"));
        let start_folder = appdata
            .join("Microsoft")
            .join("Windows")
            .join("Start Menu")
            .join("Programs");
        let taskbar_folder = appdata
            .join("Microsoft")
            .join("Internet Explorer")
            .join("Quick Launch")
            .join("User Pinned")
            .join("TaskBar");

        let start_link = start_folder.join(product).join(&link_name);
        let desktop_link = home_folder.join("Desktop").join(&link_name);
        let taskbar_link = taskbar_folder.join(&link_name);
        let legacy_startup_link = start_folder.join("Startup").join(&link_name);

        Ok(Self {
            app_folder,
            root_folder,
            update_exe,
            exe_name,
            link_name,
            home_folder,
            start_folder,
            taskbar_folder,
            start_link,
            desktop_link,
            taskbar_link,
            legacy_startup_link,
        })
    }
}
