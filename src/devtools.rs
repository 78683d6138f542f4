//! Devtools extension resolution
//!
//! Locates a development-tools browser extension for the shell's webview and
//! attaches it through a best-effort fallback chain:
//!
//! 1. open the devtools panel (always attempted in dev mode, failure ignored)
//! 2. probe platform-specific browser-profile directories for an already
//!    installed unpacked extension and load the highest version found
//! 3. if no local candidate succeeds, fire a detached network install
//!
//! Every per-candidate failure is recorded instead of silently swallowed, so
//! the final outcome explains why resolution fell through. Nothing in this
//! chain is ever fatal to startup.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::devtools::{EXTENSION_ID, MANIFEST_FILE};

/// A (browser profile, base directory) pair that may hold an unpacked copy of
/// the devtools extension.
#[derive(Debug, Clone)]
pub struct ExtensionCandidate {
    /// Profile label, used only for logging
    pub browser: &'static str,
    /// Directory expected to contain version-numbered subdirectories
    pub base_dir: PathBuf,
}

impl ExtensionCandidate {
    pub fn new(browser: &'static str, base_dir: PathBuf) -> Self {
        Self { browser, base_dir }
    }
}

/// Platform-conventional candidate directories for the devtools extension,
/// in probe order.
pub fn candidate_base_dirs() -> Vec<ExtensionCandidate> {
    let mut candidates: Vec<ExtensionCandidate> = Vec::new();

    #[cfg(target_os = "windows")]
    if let Some(local_data) = dirs::data_local_dir() {
        candidates.push(ExtensionCandidate::new(
            "chrome",
            local_data
                .join("Google")
                .join("Chrome")
                .join("User Data")
                .join("Default")
                .join("Extensions")
                .join(EXTENSION_ID),
        ));
    }

    #[cfg(target_os = "macos")]
    if let Some(home) = dirs::home_dir() {
        candidates.push(ExtensionCandidate::new(
            "chrome",
            home.join("Library")
                .join("Application Support")
                .join("Google")
                .join("Chrome")
                .join("Default")
                .join("Extensions")
                .join(EXTENSION_ID),
        ));
    }

    #[cfg(target_os = "linux")]
    if let Some(config) = dirs::config_dir() {
        // Distros split between google-chrome and chromium profiles
        candidates.push(ExtensionCandidate::new(
            "chrome",
            config
                .join("google-chrome")
                .join("Default")
                .join("Extensions")
                .join(EXTENSION_ID),
        ));
        candidates.push(ExtensionCandidate::new(
            "chromium",
            config
                .join("chromium")
                .join("Default")
                .join("Extensions")
                .join(EXTENSION_ID),
        ));
    }

    candidates
}

/// Why probing one candidate directory did not produce a loaded extension.
#[derive(Debug)]
pub enum ProbeFailure {
    /// The base directory could not be listed (missing, permissions, ...)
    Unreadable(io::Error),
    /// No version subdirectory contains a manifest marker file
    NoVersionDir,
    /// A version directory was selected but the loader rejected it
    LoadFailed(String),
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeFailure::Unreadable(e) => write!(f, "candidate directory unreadable: {}", e),
            ProbeFailure::NoVersionDir => {
                write!(f, "no version directory with a {} marker", MANIFEST_FILE)
            }
            ProbeFailure::LoadFailed(reason) => write!(f, "extension load failed: {}", reason),
        }
    }
}

/// One failed candidate probe, kept for the final outcome report.
#[derive(Debug)]
pub struct CandidateAttempt {
    pub browser: &'static str,
    pub base_dir: PathBuf,
    pub failure: ProbeFailure,
}

/// Result of a full resolution pass.
#[derive(Debug)]
pub enum ResolveOutcome {
    /// Development mode is off; nothing was touched
    Skipped,
    /// An unpacked extension was loaded from a local browser profile
    LoadedLocal {
        dir: PathBuf,
        name: String,
        attempts: Vec<CandidateAttempt>,
    },
    /// Every local candidate failed; a detached network install was spawned
    NetworkFallback { attempts: Vec<CandidateAttempt> },
}

/// Opens the window's developer-tools panel. Best-effort.
pub trait DevToolsPanel {
    fn open_detached(&self);
}

/// Loads an unpacked extension directory into the webview surface.
///
/// Returns the extension's display name on success, a reason on failure.
pub trait ExtensionLoader {
    fn load_unpacked(&self, dir: &Path) -> Result<String, String>;
}

/// Fire-and-forget online installer for the devtools extension.
///
/// Implementations schedule the install on their own runtime and only log the
/// outcome; the resolver never waits for it.
pub trait NetworkInstaller {
    fn spawn_install(&self);
}

/// Pick the highest version by plain ascending string sort.
///
/// Intentionally not a semver comparison: "2.3.1" outranks "10.0.0". This
/// matches the historical selection behavior and is asserted by tests.
fn highest_version(mut names: Vec<String>) -> Option<String> {
    names.sort();
    names.pop()
}

/// Select the highest version subdirectory of `base` that contains a manifest
/// marker file. Directories without a manifest are disqualified before the
/// highest-version selection, not merely deprioritized.
pub fn highest_version_dir(base: &Path) -> Result<PathBuf, ProbeFailure> {
    let mut versions = Vec::new();

    for entry in fs::read_dir(base).map_err(ProbeFailure::Unreadable)? {
        let entry = entry.map_err(ProbeFailure::Unreadable)?;
        let path = entry.path();
        if !path.is_dir() || !path.join(MANIFEST_FILE).is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            versions.push(name.to_string());
        }
    }

    match highest_version(versions) {
        Some(version) => Ok(base.join(version)),
        None => Err(ProbeFailure::NoVersionDir),
    }
}

/// Resolves and attaches the devtools extension to an existing window.
pub struct DevToolsResolver<'a> {
    candidates: &'a [ExtensionCandidate],
}

impl<'a> DevToolsResolver<'a> {
    pub fn new(candidates: &'a [ExtensionCandidate]) -> Self {
        Self { candidates }
    }

    /// Run the full fallback chain against one window.
    ///
    /// Complete no-op when `dev_mode` is false. Otherwise the panel is opened
    /// first, then candidates are probed in order; the first successful load
    /// short-circuits the rest. Exhaustion of all candidates triggers the
    /// network installer exactly once.
    pub fn attach(
        &self,
        dev_mode: bool,
        panel: &dyn DevToolsPanel,
        loader: &dyn ExtensionLoader,
        installer: &dyn NetworkInstaller,
    ) -> ResolveOutcome {
        if !dev_mode {
            return ResolveOutcome::Skipped;
        }

        panel.open_detached();

        let mut attempts = Vec::new();
        for candidate in self.candidates {
            let failure = match highest_version_dir(&candidate.base_dir) {
                Ok(version_dir) => match loader.load_unpacked(&version_dir) {
                    Ok(name) => {
                        return ResolveOutcome::LoadedLocal {
                            dir: version_dir,
                            name,
                            attempts,
                        };
                    }
                    Err(reason) => ProbeFailure::LoadFailed(reason),
                },
                Err(failure) => failure,
            };

            attempts.push(CandidateAttempt {
                browser: candidate.browser,
                base_dir: candidate.base_dir.clone(),
                failure,
            });
        }

        installer.spawn_install();
        ResolveOutcome::NetworkFallback { attempts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_selection_is_lexicographic_not_semver() {
        let names = vec!["1.0.0".to_string(), "2.3.1".to_string(), "10.0.0".to_string()];
        assert_eq!(highest_version(names).as_deref(), Some("2.3.1"));
    }

    #[test]
    fn no_versions_selects_nothing() {
        assert_eq!(highest_version(Vec::new()), None);
    }
}
