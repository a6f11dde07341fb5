//! 업데이터 라이브러리 테스트
//!
//! ## 테스트 시나리오
//! 1. 커맨드 인자: Update.exe 플래그 구성
//! 2. 프로세스 실행: 성공 / 실행 실패 / 비정상 종료 / 시그널 종료
//! 3. 에러 표시: Display 메시지와 접근자

use crate::{process, ProcessError, ShortcutLocation, UpdateCommand};
use std::path::Path;

// ═══════════════════════════════════════════════════════
// 테스트 1: 커맨드 인자
// ═══════════════════════════════════════════════════════

#[test]
fn test_create_shortcut_args() {
    let cmd = UpdateCommand::create_shortcut("Wire.exe", &[ShortcutLocation::StartMenu]);
    assert_eq!(cmd.args(), vec!["--createShortcut", "Wire.exe", "-l=StartMenu"]);

    let cmd = UpdateCommand::create_shortcut("Wire.exe", &[ShortcutLocation::Desktop]);
    assert_eq!(cmd.args(), vec!["--createShortcut", "Wire.exe", "-l=Desktop"]);
}

#[test]
fn test_remove_shortcut_args_join_locations() {
    let cmd = UpdateCommand::remove_shortcut(
        "Wire.exe",
        &[ShortcutLocation::Desktop, ShortcutLocation::Startup, ShortcutLocation::StartMenu],
    );
    assert_eq!(
        cmd.args(),
        vec!["--removeShortcut", "Wire.exe", "-l=Desktop,Startup,StartMenu"]
    );
}

#[test]
fn test_update_args() {
    let cmd = UpdateCommand::update("https://example.com/win/prod/");
    assert_eq!(cmd.args(), vec!["--update", "https://example.com/win/prod/"]);
}

// ═══════════════════════════════════════════════════════
// 테스트 2: 프로세스 실행
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_spawn_missing_executable() {
    let missing = Path::new("/definitely/not/here/Update.exe");
    let err = process::spawn(missing, &["--update", "x"]).await.unwrap_err();

    assert!(matches!(err, ProcessError::Spawn { .. }), "got {:?}", err);
    assert_eq!(err.code(), None);
    assert_eq!(err.stdout(), "");
    assert_eq!(err.command(), missing);
}

#[cfg(unix)]
#[tokio::test]
async fn test_spawn_success_captures_stdout() {
    let out = process::spawn(Path::new("/bin/sh"), &["-c", "printf 'hello '; printf world"])
        .await
        .expect("sh should succeed");
    assert_eq!(out, "hello world");
}

#[cfg(unix)]
#[tokio::test]
async fn test_spawn_nonzero_exit_keeps_code_and_stdout() {
    let err = process::spawn(
        Path::new("/bin/sh"),
        &["-c", "printf one; printf two; printf three; exit 3"],
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ProcessError::Exited { .. }), "got {:?}", err);
    assert_eq!(err.code(), Some(3));
    assert_eq!(err.stdout(), "onetwothree");
    assert_eq!(err.signal(), None);
    assert_eq!(err.to_string(), "Command failed: 3");
}

#[cfg(unix)]
#[tokio::test]
async fn test_spawn_killed_by_signal() {
    let err = process::spawn(Path::new("/bin/sh"), &["-c", "printf partial; kill -9 $$"])
        .await
        .unwrap_err();

    assert_eq!(err.code(), None);
    assert_eq!(err.signal(), Some("SIGKILL"));
    assert_eq!(err.stdout(), "partial");
    assert_eq!(err.to_string(), "Command failed: SIGKILL");
}

#[cfg(unix)]
#[tokio::test]
async fn test_spawn_same_command_twice() {
    for _ in 0..2 {
        let out = process::spawn(Path::new("/bin/sh"), &["-c", "printf ok"]).await;
        assert_eq!(out.unwrap(), "ok");
    }
}

// ═══════════════════════════════════════════════════════
// 테스트 3: 에러 표시
// ═══════════════════════════════════════════════════════

#[test]
fn test_display_all_variants() {
    let variants = vec![
        ProcessError::Spawn {
            command: "Update.exe".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        },
        ProcessError::Exited {
            command: "Update.exe".into(),
            code: Some(1),
            signal: None,
            stdout: String::new(),
        },
        ProcessError::Exited {
            command: "Update.exe".into(),
            code: None,
            signal: None,
            stdout: String::new(),
        },
        ProcessError::Io {
            command: "Update.exe".into(),
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe"),
            code: Some(0),
            stdout: "partial".into(),
        },
    ];

    for err in &variants {
        assert!(!err.to_string().is_empty());
    }
    assert_eq!(variants[3].code(), Some(0));
    assert_eq!(variants[3].stdout(), "partial");
}
