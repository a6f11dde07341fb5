//! 프로세스 실행 에러
//!
//! ## 에러 종류
//! - 실행 자체 실패 (파일 없음, 권한 없음)
//! - 비정상 종료 (0이 아닌 종료 코드 / 시그널)
//! - 출력 읽기 또는 종료 대기 중 I/O 오류

use std::io;
use std::path::{Path, PathBuf};

/// Update.exe 등 외부 프로세스 실행 결과 에러
#[derive(thiserror::Error, Debug)]
pub enum ProcessError {
    /// 프로세스를 시작하지 못함. 종료 코드와 출력이 없습니다.
    #[error("Failed to spawn '{}': {source}", command.display())]
    Spawn {
        command: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 0이 아닌 코드로 종료했거나 시그널로 종료됨
    #[error("Command failed: {}", describe_exit(*code, signal.as_deref()))]
    Exited {
        command: PathBuf,
        code: Option<i32>,
        signal: Option<String>,
        stdout: String,
    },

    /// 실행은 되었지만 출력 읽기나 종료 대기 중 오류 발생
    #[error("I/O error while running '{}': {source}", command.display())]
    Io {
        command: PathBuf,
        #[source]
        source: io::Error,
        code: Option<i32>,
        stdout: String,
    },
}

impl ProcessError {
    /// 관측된 종료 코드 (실행 실패나 시그널 종료 시 None)
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Spawn { .. } => None,
            Self::Exited { code, .. } | Self::Io { code, .. } => *code,
        }
    }

    /// 프로세스를 종료시킨 시그널 이름 (예: "SIGKILL")
    pub fn signal(&self) -> Option<&str> {
        match self {
            Self::Exited { signal, .. } => signal.as_deref(),
            _ => None,
        }
    }

    /// 종료 시점까지 수집된 표준 출력
    pub fn stdout(&self) -> &str {
        match self {
            Self::Spawn { .. } => "",
            Self::Exited { stdout, .. } | Self::Io { stdout, .. } => stdout,
        }
    }

    /// 실행한 명령 경로
    pub fn command(&self) -> &Path {
        match self {
            Self::Spawn { command, .. } | Self::Exited { command, .. } | Self::Io { command, .. } => {
                command
            }
        }
    }
}

fn describe_exit(code: Option<i32>, signal: Option<&str>) -> String {
    match (signal, code) {
        (Some(signal), _) => signal.to_string(),
        (None, Some(code)) => code.to_string(),
        (None, None) => "unknown exit status".to_string(),
    }
}
