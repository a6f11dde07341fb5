//! Explicit AppUserModelID registration.
//!
//! Shortcuts created by Update.exe carry `com.squirrel.<package_id>.<name>`;
//! the running process must use the same id or Windows groups its taskbar
//! button apart from the pinned shortcut.

use std::io;

use crate::config::SquirrelConfig;

pub fn app_user_model_id(config: &SquirrelConfig) -> String {
    let package_id = if config.package_id.is_empty() {
        config.name.to_lowercase()
    } else {
        config.package_id.clone()
    };
    format!("com.squirrel.{}.{}", package_id, config.name.to_lowercase())
}

#[cfg(target_os = "windows")]
pub fn register_app_user_model_id(id: &str) -> io::Result<()> {
    use winapi::um::shobjidl_core::SetCurrentProcessExplicitAppUserModelID;

    let wide: Vec<u16> = id.encode_utf16().chain(std::iter::once(0)).collect();
    let hr = unsafe { SetCurrentProcessExplicitAppUserModelID(wide.as_ptr()) };
    if hr < 0 {
        return Err(hresult_error(hr));
    }
    tracing::debug!("[Squirrel] AppUserModelID set to {}", id);
    Ok(())
}

/// HRESULT는 Win32 오류 코드가 아니므로 16진수 그대로 보고
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn hresult_error(hr: i32) -> io::Error {
    io::Error::new(
        io::ErrorKind::Other,
        format!("SetCurrentProcessExplicitAppUserModelID failed: 0x{:08X}", hr as u32),
    )
}

#[cfg(not(target_os = "windows"))]
pub fn register_app_user_model_id(id: &str) -> io::Result<()> {
    tracing::debug!("[Squirrel] AppUserModelID {} ignored on this platform", id);
    Ok(())
}
