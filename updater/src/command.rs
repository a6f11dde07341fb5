//! Update.exe 커맨드라인 어휘
//!
//! ```text
//! Update.exe --createShortcut Wire.exe -l=StartMenu
//! Update.exe --removeShortcut Wire.exe -l=Desktop,Startup,StartMenu
//! Update.exe --update https://example.com/win/
//! ```

use std::fmt;

/// 바로가기 생성/삭제 대상 위치 (`-l=` 플래그 값)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutLocation {
    Desktop,
    StartMenu,
    Startup,
}

impl fmt::Display for ShortcutLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShortcutLocation::Desktop => "Desktop",
            ShortcutLocation::StartMenu => "StartMenu",
            ShortcutLocation::Startup => "Startup",
        };
        f.write_str(name)
    }
}

/// Update.exe에 전달하는 명령
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCommand {
    /// 지정 위치에 바로가기 생성 (이미 있으면 덮어씀)
    CreateShortcut {
        exe_name: String,
        locations: Vec<ShortcutLocation>,
    },
    /// 지정 위치의 바로가기 삭제
    RemoveShortcut {
        exe_name: String,
        locations: Vec<ShortcutLocation>,
    },
    /// 업데이트 서버 확인 후 새 버전 설치
    Update { url: String },
}

impl UpdateCommand {
    pub fn create_shortcut(exe_name: impl Into<String>, locations: &[ShortcutLocation]) -> Self {
        Self::CreateShortcut {
            exe_name: exe_name.into(),
            locations: locations.to_vec(),
        }
    }

    pub fn remove_shortcut(exe_name: impl Into<String>, locations: &[ShortcutLocation]) -> Self {
        Self::RemoveShortcut {
            exe_name: exe_name.into(),
            locations: locations.to_vec(),
        }
    }

    pub fn update(url: impl Into<String>) -> Self {
        Self::Update { url: url.into() }
    }

    /// 프로세스 인자 목록으로 변환
    pub fn args(&self) -> Vec<String> {
        match self {
            UpdateCommand::CreateShortcut { exe_name, locations } => {
                vec!["--createShortcut".to_string(), exe_name.clone(), location_flag(locations)]
            }
            UpdateCommand::RemoveShortcut { exe_name, locations } => {
                vec!["--removeShortcut".to_string(), exe_name.clone(), location_flag(locations)]
            }
            UpdateCommand::Update { url } => vec!["--update".to_string(), url.clone()],
        }
    }
}

fn location_flag(locations: &[ShortcutLocation]) -> String {
    let joined: Vec<String> = locations.iter().map(|l| l.to_string()).collect();
    format!("-l={}", joined.join(","))
}
