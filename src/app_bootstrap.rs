//! Startup bootstrap: environment probes, logging, panic hook, update check.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::str::FromStr;

use examsim_shell::config;

use crate::logging;

/// Development-mode flag, derived from the process environment.
pub(crate) fn dev_mode() -> bool {
    std::env::var(config::env::DEV_MODE_VAR)
        .map(|value| value == config::env::DEV_MODE_VALUE)
        .unwrap_or(false)
}

/// Initialize the logging system, level taken from the environment.
pub(crate) fn init_logging() {
    let log_level = std::env::var(config::env::LOG_LEVEL_VAR)
        .ok()
        .and_then(|value| logging::LogLevel::from_str(&value).ok())
        .unwrap_or(logging::LogLevel::Info);

    if let Err(e) = logging::init_logging(log_level, true) {
        eprintln!("Failed to initialize logging: {}", e);
    } else {
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            platform = std::env::consts::OS,
            log_level = %log_level.to_string(),
            "Exam Simulator shell starting"
        );
    }

    logging::auto_cleanup_old_logs(config::logging::LOG_RETENTION_DAYS);
}

/// Log panics before handing off to the default hook.
pub(crate) fn install_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!(?panic_info, "Application panic detected");
        default_panic(panic_info);
    }));
}

#[derive(Deserialize)]
struct ReleaseManifest {
    tag_name: String,
}

/// Fire-and-forget update-availability check.
///
/// The result only ever reaches the log; nothing in the startup path waits
/// for it and its failure never affects the shell.
pub(crate) fn spawn_update_check() {
    tauri::async_runtime::spawn(async {
        match check_latest_release().await {
            Ok(Some(latest)) => {
                tracing::info!(
                    latest = %latest,
                    current = env!("CARGO_PKG_VERSION"),
                    "Update available"
                );
            }
            Ok(None) => tracing::info!("Application is up to date"),
            Err(e) => tracing::warn!("Update check failed (ignored): {:#}", e),
        }
    });
}

async fn check_latest_release() -> Result<Option<String>> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .user_agent(concat!("examsim-shell/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(config::updates::LATEST_RELEASE_URL)
        .send()
        .await
        .context("Failed to fetch release manifest")?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("Release endpoint returned status {}", status);
    }

    let manifest: ReleaseManifest = response
        .json()
        .await
        .context("Failed to parse release manifest")?;

    let latest = manifest.tag_name.trim_start_matches('v').to_string();
    if latest != env!("CARGO_PKG_VERSION") {
        Ok(Some(latest))
    } else {
        Ok(None)
    }
}
