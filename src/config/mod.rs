//! Squirrel 설정 파일 관리
//!
//! `config/squirrel.toml`에서 제품 이름과 업데이트 주소/주기를 로드합니다.
//!
//! ```toml
//! name = "Wire"
//! package_id = "wire"
//! update_url = "https://example.com/win/prod/"
//! update_delay_secs = 300
//! update_interval_secs = 21600
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 설정 파일 경로를 덮어쓰는 환경 변수
pub const CONFIG_ENV: &str = "SQUIRREL_CONFIG";

const DEFAULT_UPDATE_DELAY_SECS: u64 = 5 * 60;
const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 6 * 60 * 60;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SquirrelConfig {
    /// 제품 표시 이름 (`<name>.exe`, `<name>.lnk`)
    pub name: String,
    /// AppUserModelID 가운데 부분. 비어 있으면 `name` 소문자
    pub package_id: String,
    /// `Update.exe --update`에 전달할 릴리스 주소
    pub update_url: String,
    /// 시작 후 첫 업데이트 확인까지 대기 (초)
    pub update_delay_secs: u64,
    /// 주기적 업데이트 확인 간격 (초)
    pub update_interval_secs: u64,
}

impl Default for SquirrelConfig {
    fn default() -> Self {
        Self {
            name: default_product_name(),
            package_id: String::new(),
            update_url: String::new(),
            update_delay_secs: DEFAULT_UPDATE_DELAY_SECS,
            update_interval_secs: DEFAULT_UPDATE_INTERVAL_SECS,
        }
    }
}

impl SquirrelConfig {
    /// 기본 경로에서 설정 로드 (파일이 없으면 기본값)
    pub fn load() -> Result<Self> {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::info!("[Config] No squirrel.toml found, using defaults");
                Self::default().validated()
            }
        }
    }

    /// [`load`](Self::load)와 같지만 실패하면 경고 후 기본값 사용
    ///
    /// 설치/제거 신호 처리가 잘못된 설정 파일 때문에 건너뛰어지지 않도록 합니다.
    pub fn load_or_default() -> Self {
        Self::or_default(Self::load())
    }

    pub fn load_from_or_default(path: &Path) -> Self {
        Self::or_default(Self::load_from(path))
    }

    fn or_default(result: Result<Self>) -> Self {
        result.unwrap_or_else(|e| {
            tracing::warn!("[Config] Invalid squirrel config, using defaults: {:#}", e);
            Self::default().validated().unwrap_or_default()
        })
    }

    /// 지정한 TOML 파일에서 설정 로드
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let cfg: Self = toml::from_str(&content)?;
        tracing::info!("[Config] Loaded from {}", path.display());
        cfg.validated()
    }

    fn validated(mut self) -> Result<Self> {
        if self.name.trim().is_empty() {
            anyhow::bail!("product name must not be empty");
        }
        if self.update_interval_secs == 0 {
            anyhow::bail!("update_interval_secs must be greater than zero");
        }
        if self.package_id.is_empty() {
            self.package_id = self.name.to_lowercase();
        }
        Ok(self)
    }

    pub fn update_delay(&self) -> Duration {
        Duration::from_secs(self.update_delay_secs)
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }
}

/// 설정 파일 경로 결정
///
/// 1. `SQUIRREL_CONFIG` 환경 변수
/// 2. 실행 파일 옆 `config/squirrel.toml`, `squirrel.toml`
/// 3. CWD의 `config/squirrel.toml`
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            for candidate in [dir.join("config").join("squirrel.toml"), dir.join("squirrel.toml")] {
                if candidate.exists() {
                    return Some(candidate);
                }
            }
        }
    }

    let cwd_cfg = PathBuf::from("config").join("squirrel.toml");
    cwd_cfg.exists().then_some(cwd_cfg)
}

fn default_product_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_full_config() {
        let file = write_config(
            r#"
            name = "Wire"
            package_id = "wire"
            update_url = "https://example.com/win/prod/"
            update_delay_secs = 10
            update_interval_secs = 60
            "#,
        );
        let cfg = SquirrelConfig::load_from(file.path()).unwrap();
        assert_eq!(cfg.name, "Wire");
        assert_eq!(cfg.update_url, "https://example.com/win/prod/");
        assert_eq!(cfg.update_delay(), Duration::from_secs(10));
        assert_eq!(cfg.update_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_defaults_fill_missing_keys() {
        let file = write_config("name = \"Wire\"\n");
        let cfg = SquirrelConfig::load_from(file.path()).unwrap();
        assert_eq!(cfg.package_id, "wire");
        assert_eq!(cfg.update_url, "");
        assert_eq!(cfg.update_delay_secs, 300);
        assert_eq!(cfg.update_interval_secs, 21600);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let file = write_config("name = \"Wire\"\nupdate_interval_secs = 0\n");
        assert!(SquirrelConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        let file = write_config("name = \"  \"\n");
        assert!(SquirrelConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let file = write_config("name = [\n");
        assert!(SquirrelConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_invalid_toml_falls_back_to_defaults() {
        let file = write_config("name = [\n");
        let cfg = SquirrelConfig::load_from_or_default(file.path());
        assert_eq!(cfg.name, default_product_name());
        assert_eq!(cfg.update_delay_secs, 300);
        assert_eq!(cfg.update_interval_secs, 21600);
    }

    #[test]
    fn test_zero_interval_falls_back_to_defaults() {
        let file = write_config("name = \"Wire\"\nupdate_interval_secs = 0\n");
        let cfg = SquirrelConfig::load_from_or_default(file.path());
        assert_eq!(cfg.update_interval(), Duration::from_secs(21600));
    }
}
