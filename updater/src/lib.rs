//! # Squirrel 업데이터 라이브러리
//!
//! 설치 루트의 `Update.exe`를 실행하여 바로가기 생성/삭제와
//! 업데이트 설치를 요청합니다. 업데이트 다운로드와 적용은 전부
//! `Update.exe`가 담당하며, 이 크레이트는 인자 구성과 프로세스 실행만 합니다.
//!
//! ## 구성
//! - **process.rs**: 프로세스 실행, stdout 수집, 종료 상태 분류
//! - **command.rs**: `--createShortcut` / `--removeShortcut` / `--update` 인자
//! - **error.rs**: 실행 실패 / 비정상 종료 / I/O 오류

pub mod command;
pub mod error;
pub mod process;

#[cfg(test)]
mod tests;

pub use command::{ShortcutLocation, UpdateCommand};
pub use error::ProcessError;
