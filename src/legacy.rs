//! One-time cleanup of the startup shortcut left by the old installer layout.

use crate::paths::InstallPaths;

/// Delete `<Start Menu>\Programs\Startup\<name>.lnk` if present.
///
/// Returns whether the legacy link existed. Deletion errors are ignored.
pub fn check_for_old_startup(paths: &InstallPaths) -> bool {
    let link = &paths.legacy_startup_link;
    let exists = link.exists();
    if exists {
        tracing::info!("[Squirrel] Removing legacy startup shortcut {}", link.display());
        if let Err(e) = std::fs::remove_file(link) {
            tracing::warn!("[Squirrel] Could not remove {}: {}", link.display(), e);
        }
    }
    exists
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::path::Path;

    fn paths_in(dir: &Path) -> InstallPaths {
        let appdata = dir.join("appdata");
        let home = dir.join("home");
        InstallPaths::resolve(&dir.join("root/app-1.0.0/Wire.exe"), "Wire", |key| match key {
            "APPDATA" => Some(OsString::from(&appdata)),
            "HOMEPATH" => Some(OsString::from(&home)),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn removes_existing_legacy_link() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        std::fs::create_dir_all(paths.legacy_startup_link.parent().unwrap()).unwrap();
        std::fs::write(&paths.legacy_startup_link, b"lnk").unwrap();

        assert!(check_for_old_startup(&paths));
        assert!(!paths.legacy_startup_link.exists());
    }

    #[test]
    fn missing_legacy_link_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let startup = paths.legacy_startup_link.parent().unwrap().to_path_buf();
        std::fs::create_dir_all(&startup).unwrap();
        std::fs::write(startup.join("Other.lnk"), b"lnk").unwrap();

        assert!(!check_for_old_startup(&paths));
        let remaining: Vec<_> = std::fs::read_dir(&startup).unwrap().collect();
        assert_eq!(remaining.len(), 1);
    }
}
