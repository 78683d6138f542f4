//! Production adapters for the devtools resolver
//!
//! Wires the resolver's seams to the real window and filesystem/network:
//! the panel opener calls into the webview, the loader stages the selected
//! unpacked extension into the shell's extensions directory (consumed by the
//! window builder), and the network installer downloads the packed extension
//! on a detached task. Nothing here can fail startup.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tauri::WebviewWindow;

use examsim_shell::config;
use examsim_shell::devtools::{
    self, DevToolsPanel, DevToolsResolver, ExtensionLoader, NetworkInstaller, ResolveOutcome,
};

/// Directory the selected extension is staged into; the main window builder
/// points the webview at it.
pub(crate) fn staged_extensions_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| {
        dir.join(config::logging::APP_DIR_NAME)
            .join(config::devtools::STAGED_EXTENSIONS_DIR)
    })
}

struct TauriDevToolsPanel<'a>(&'a WebviewWindow);

impl DevToolsPanel for TauriDevToolsPanel<'_> {
    fn open_detached(&self) {
        self.0.open_devtools();
    }
}

/// Copies the resolved unpacked extension version directory into the staged
/// extensions dir.
struct StagedExtensionLoader;

impl ExtensionLoader for StagedExtensionLoader {
    fn load_unpacked(&self, dir: &Path) -> std::result::Result<String, String> {
        let staged_root = staged_extensions_dir().ok_or("no local data directory")?;
        let version = dir
            .file_name()
            .ok_or("version directory has no name")?
            .to_string_lossy()
            .into_owned();

        let target = staged_root
            .join(config::devtools::EXTENSION_ID)
            .join(&version);
        copy_dir_all(dir, &target).map_err(|e| e.to_string())?;

        Ok(extension_name(dir).unwrap_or_else(|| config::devtools::EXTENSION_ID.to_string()))
    }
}

/// Display name from the extension manifest, when it carries a literal one.
fn extension_name(dir: &Path) -> Option<String> {
    let raw = fs::read_to_string(dir.join(config::devtools::MANIFEST_FILE)).ok()?;
    let manifest: serde_json::Value = serde_json::from_str(&raw).ok()?;
    manifest
        .get("name")
        .and_then(|name| name.as_str())
        .map(str::to_string)
}

fn copy_dir_all(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Downloads the packed extension from the Web Store endpoint on a detached
/// task. The outcome is logged, never awaited by the startup path.
struct CrxNetworkInstaller;

impl NetworkInstaller for CrxNetworkInstaller {
    fn spawn_install(&self) {
        tauri::async_runtime::spawn(async {
            match download_packed_extension().await {
                Ok(path) => {
                    tracing::info!(path = ?path, "Devtools installer fetched extension package");
                }
                Err(e) => {
                    tracing::warn!("Devtools installer failed (ignored): {:#}", e);
                }
            }
        });
    }
}

async fn download_packed_extension() -> Result<PathBuf> {
    let url = config::devtools::crx_download_url();
    tracing::info!("Fetching devtools extension from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(&url)
        .send()
        .await
        .context("Failed to fetch extension package")?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("Extension endpoint returned status {}", status);
    }

    let bytes = response
        .bytes()
        .await
        .context("Failed to read extension package body")?;

    let cache_dir = staged_extensions_dir().context("No local data directory")?;
    fs::create_dir_all(&cache_dir)
        .with_context(|| format!("Failed to create extension cache dir: {:?}", cache_dir))?;

    let path = cache_dir.join(format!("{}.crx", config::devtools::EXTENSION_ID));
    fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write extension package: {:?}", path))?;

    Ok(path)
}

/// Run the devtools fallback chain against the freshly created window.
pub(crate) fn attach(window: &WebviewWindow, dev_mode: bool) {
    if !dev_mode {
        return;
    }

    let candidates = devtools::candidate_base_dirs();
    let resolver = DevToolsResolver::new(&candidates);
    let outcome = resolver.attach(
        dev_mode,
        &TauriDevToolsPanel(window),
        &StagedExtensionLoader,
        &CrxNetworkInstaller,
    );

    match outcome {
        ResolveOutcome::Skipped => {}
        ResolveOutcome::LoadedLocal {
            dir,
            name,
            attempts,
        } => {
            for attempt in &attempts {
                tracing::debug!(
                    browser = attempt.browser,
                    dir = ?attempt.base_dir,
                    "Devtools candidate failed: {}",
                    attempt.failure
                );
            }
            tracing::info!(dir = ?dir, name = %name, "Loaded devtools extension from local profile");
        }
        ResolveOutcome::NetworkFallback { attempts } => {
            for attempt in &attempts {
                tracing::debug!(
                    browser = attempt.browser,
                    dir = ?attempt.base_dir,
                    "Devtools candidate failed: {}",
                    attempt.failure
                );
            }
            tracing::info!("No local devtools extension found, trying online installer");
        }
    }
}
