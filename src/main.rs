#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use squirrel_lifecycle::{
    app_id, build_dispatcher, legacy, InstallPaths, LifecycleSignal, SingleInstance,
    SquirrelConfig, SystemEnv,
};

/// Squirrel은 훅 프로세스를 15초 후 강제 종료
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = SquirrelConfig::load_or_default();
    let app_id = app_id::app_user_model_id(&config);
    if let Err(e) = app_id::register_app_user_model_id(&app_id) {
        tracing::warn!("Failed to set AppUserModelID: {}", e);
    }

    // 가드는 프로세스가 끝날 때까지 보유
    let (_instance, should_quit) = match SingleInstance::acquire(&app_id) {
        Ok(Some(guard)) => (Some(guard), false),
        Ok(None) => {
            tracing::info!("{} is already running", config.name);
            (None, true)
        }
        Err(e) => {
            tracing::warn!("Single-instance check failed, continuing: {}", e);
            (None, false)
        }
    };

    let paths = Arc::new(InstallPaths::from_current_exe(&config.name)?);
    if legacy::check_for_old_startup(&paths) {
        tracing::info!("Legacy startup shortcut removed");
    }

    let quit = CancellationToken::new();
    let dispatcher = build_dispatcher(Arc::new(SystemEnv), &config, paths, quit.clone());

    let signal = LifecycleSignal::from_args(std::env::args());
    let handled = dispatcher.handle_squirrel_event(signal, should_quit).await;

    if !handled && !quit.is_cancelled() {
        tracing::info!("{} running; update checks scheduled", config.name);
        tokio::select! {
            _ = quit.cancelled() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
            }
        }
    }

    if !dispatcher.drain(SHUTDOWN_GRACE).await {
        tracing::warn!("Shortcut refresh still running after {:?}, exiting anyway", SHUTDOWN_GRACE);
    }
    tracing::info!("{} exiting", config.name);
    Ok(())
}
