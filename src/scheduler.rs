//! 업데이트 스케줄러
//!
//! 시작 후 한 번(`update_delay`), 이후 `update_interval`마다
//! `Update.exe --update <url>`을 실행합니다.
//!
//! 두 타이머는 서로 독립적이며 실행이 겹칠 수 있습니다. 동시에 실행된
//! Update.exe는 자체 단일 인스턴스 잠금으로 하나만 진행합니다.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::env::InstallerEnv;
use crate::updater::Updater;

pub struct UpdateScheduler<E> {
    updater: Updater<E>,
    url: String,
    delay: Duration,
    interval: Duration,
}

impl<E> Clone for UpdateScheduler<E> {
    fn clone(&self) -> Self {
        Self {
            updater: self.updater.clone(),
            url: self.url.clone(),
            delay: self.delay,
            interval: self.interval,
        }
    }
}

/// 예약된 타이머 태스크 핸들. 드롭해도 타이머는 계속 동작합니다.
pub struct ScheduledUpdates {
    pub initial: JoinHandle<()>,
    pub recurring: JoinHandle<()>,
}

impl ScheduledUpdates {
    pub fn abort(&self) {
        self.initial.abort();
        self.recurring.abort();
    }
}

impl<E: InstallerEnv> UpdateScheduler<E> {
    /// `interval`은 0보다 커야 합니다 (설정 로드 시 검증됨).
    pub fn new(updater: Updater<E>, url: impl Into<String>, delay: Duration, interval: Duration) -> Self {
        Self {
            updater,
            url: url.into(),
            delay,
            interval,
        }
    }

    /// 업데이트 설치 1회 실행 (결과는 로그로만 남김)
    pub async fn install_update(&self) {
        let _ = self.updater.install_update(&self.url).await;
    }

    /// 원샷 타이머와 반복 타이머를 함께 시작
    pub fn schedule(&self) -> ScheduledUpdates {
        tracing::info!(
            "[Scheduler] First update check in {}s, then every {}s",
            self.delay.as_secs(),
            self.interval.as_secs()
        );

        let once = self.clone();
        let initial = tokio::spawn(async move {
            time::sleep(once.delay).await;
            tracing::info!("[Scheduler] Initial update check triggered");
            once.spawn_install();
        });

        let every = self.clone();
        let recurring = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + every.interval, every.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tracing::info!("[Scheduler] Periodic update check triggered");
                every.spawn_install();
            }
        });

        ScheduledUpdates { initial, recurring }
    }

    fn spawn_install(&self) {
        let this = self.clone();
        tokio::spawn(async move { this.install_update().await });
    }
}
