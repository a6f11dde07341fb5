//! Squirrel 이벤트 디스패처
//!
//! Squirrel은 설치/업데이트/제거 단계마다 앱을 특수 인자와 함께 실행합니다.
//!
//! | 인자 | 동작 | 종료 요청 |
//! |---|---|---|
//! | `--squirrel-install` | 시작 메뉴 → 바탕화면 바로가기 생성 | 두 단계 완료 후 |
//! | `--squirrel-updated` | 바탕화면 바로가기 갱신, 작업표시줄 갱신은 기다리지 않음 | 바탕화면 단계 후 |
//! | `--squirrel-uninstall` | 모든 바로가기 삭제 | 삭제 완료 후 |
//! | `--squirrel-obsolete` | 없음 | 즉시 |
//! | 그 외 | 업데이트 스케줄 시작 + 작업표시줄 갱신 | `should_quit`일 때만 |
//!
//! 기다리지 않는 작업표시줄 갱신은 `TaskTracker`에 기록되며,
//! 호스트는 종료 전에 [`EventDispatcher::drain`]으로 마무리를 기다립니다.

use std::fmt;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::env::InstallerEnv;
use crate::scheduler::UpdateScheduler;
use crate::shortcuts::ShortcutManager;

/// Squirrel이 전달하는 수명주기 신호
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleSignal {
    Install,
    Updated,
    Uninstall,
    Obsolete,
}

impl LifecycleSignal {
    pub fn parse(arg: &str) -> Option<Self> {
        match arg {
            "--squirrel-install" => Some(Self::Install),
            "--squirrel-updated" => Some(Self::Updated),
            "--squirrel-uninstall" => Some(Self::Uninstall),
            "--squirrel-obsolete" => Some(Self::Obsolete),
            _ => None,
        }
    }

    /// 프로그램 이름 다음의 첫 번째 인자만 확인
    pub fn from_args<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter().nth(1).and_then(|arg| Self::parse(arg.as_ref()))
    }

    pub fn as_arg(&self) -> &'static str {
        match self {
            Self::Install => "--squirrel-install",
            Self::Updated => "--squirrel-updated",
            Self::Uninstall => "--squirrel-uninstall",
            Self::Obsolete => "--squirrel-obsolete",
        }
    }
}

impl fmt::Display for LifecycleSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

pub struct EventDispatcher<E> {
    shortcuts: ShortcutManager<E>,
    scheduler: UpdateScheduler<E>,
    quit: CancellationToken,
    tasks: TaskTracker,
}

impl<E: InstallerEnv> EventDispatcher<E> {
    /// `quit`은 호스트와 공유하는 종료 요청 토큰
    pub fn new(
        shortcuts: ShortcutManager<E>,
        scheduler: UpdateScheduler<E>,
        quit: CancellationToken,
    ) -> Self {
        Self {
            shortcuts,
            scheduler,
            quit,
            tasks: TaskTracker::new(),
        }
    }

    /// 새 작업을 막고 남은 작업을 최대 `grace`만큼 기다림
    ///
    /// 모두 끝났으면 `true`, 시간 초과면 `false`.
    pub async fn drain(&self, grace: Duration) -> bool {
        self.tasks.close();
        tokio::time::timeout(grace, self.tasks.wait()).await.is_ok()
    }

    /// 신호를 처리하고, 알려진 신호였으면 `true` 반환
    ///
    /// 바로가기 작업 실패는 로그만 남기고 흐름을 막지 않습니다.
    pub async fn handle_squirrel_event(
        &self,
        signal: Option<LifecycleSignal>,
        should_quit: bool,
    ) -> bool {
        let Some(signal) = signal else {
            self.continue_startup(should_quit);
            return false;
        };

        tracing::info!("[Squirrel] Handling {}", signal);
        match signal {
            LifecycleSignal::Install => {
                if let Err(e) = self.shortcuts.create_start_shortcut().await {
                    tracing::warn!("[Squirrel] Start-Menu shortcut failed: {}", e);
                }
                if let Err(e) = self.shortcuts.create_desktop_shortcut().await {
                    tracing::warn!("[Squirrel] Desktop shortcut failed: {}", e);
                }
            }
            LifecycleSignal::Updated => {
                match self.shortcuts.update_desktop_shortcut().await {
                    Some(Ok(_)) => {}
                    Some(Err(e)) => tracing::warn!("[Squirrel] Desktop shortcut refresh failed: {}", e),
                    None => tracing::debug!("[Squirrel] No desktop shortcut to refresh"),
                }
                self.spawn_taskbar_refresh();
            }
            LifecycleSignal::Uninstall => {
                if let Err(e) = self.shortcuts.remove_shortcuts().await {
                    tracing::warn!("[Squirrel] Shortcut removal failed: {}", e);
                }
            }
            LifecycleSignal::Obsolete => {}
        }

        self.request_quit();
        true
    }

    fn continue_startup(&self, should_quit: bool) {
        if should_quit {
            self.request_quit();
        }
        // 핸들은 버림: 타이머는 프로세스 수명 동안 계속 동작
        let _ = self.scheduler.schedule();
        self.spawn_taskbar_refresh();
    }

    /// 작업표시줄 갱신은 기다리지 않음
    fn spawn_taskbar_refresh(&self) {
        let shortcuts = self.shortcuts.clone();
        self.tasks.spawn(async move {
            if let Some(Err(e)) = shortcuts.update_taskbar_shortcut().await {
                tracing::warn!("[Squirrel] Taskbar shortcut refresh failed: {}", e);
            }
        });
    }

    fn request_quit(&self) {
        tracing::info!("[Squirrel] Requesting application quit");
        self.quit.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_signals() {
        assert_eq!(LifecycleSignal::parse("--squirrel-install"), Some(LifecycleSignal::Install));
        assert_eq!(LifecycleSignal::parse("--squirrel-updated"), Some(LifecycleSignal::Updated));
        assert_eq!(LifecycleSignal::parse("--squirrel-uninstall"), Some(LifecycleSignal::Uninstall));
        assert_eq!(LifecycleSignal::parse("--squirrel-obsolete"), Some(LifecycleSignal::Obsolete));
    }

    #[test]
    fn rejects_unknown_signals() {
        for arg in ["", "--squirrel-firstrun", "install", "--SQUIRREL-INSTALL", "--squirrel-install "] {
            assert_eq!(LifecycleSignal::parse(arg), None, "{:?}", arg);
        }
    }

    #[test]
    fn from_args_reads_only_first_argument() {
        assert_eq!(
            LifecycleSignal::from_args(["Wire.exe", "--squirrel-updated", "2.1.0"]),
            Some(LifecycleSignal::Updated)
        );
        assert_eq!(
            LifecycleSignal::from_args(["Wire.exe", "--hidden", "--squirrel-install"]),
            None
        );
        assert_eq!(LifecycleSignal::from_args(["Wire.exe"]), None);
        assert_eq!(LifecycleSignal::from_args(Vec::<String>::new()), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for signal in [
            LifecycleSignal::Install,
            LifecycleSignal::Updated,
            LifecycleSignal::Uninstall,
            LifecycleSignal::Obsolete,
        ] {
            assert_eq!(LifecycleSignal::parse(&signal.to_string()), Some(signal));
        }
    }
}
