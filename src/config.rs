//! Application Configuration Constants
//!
//! Centralized configuration for window defaults, devtools resolution and
//! environment probes, so nothing is scattered as magic values.

/// Main window configuration
pub mod window {
    /// Tauri label of the one application window
    pub const MAIN_WINDOW_LABEL: &str = "main";

    /// Fixed window title
    pub const TITLE: &str = "Exam Simulator";

    /// Default window dimensions in logical pixels (width, height)
    pub const DEFAULT_DIMENSIONS: (f64, f64) = (1024.0, 768.0);

    /// Development content server, used when the shell runs in dev mode
    pub const DEV_SERVER_URL: &str = "http://localhost:8080/";
}

/// Devtools extension resolution
pub mod devtools {
    /// Chrome Web Store id of the React DevTools extension
    pub const EXTENSION_ID: &str = "fmkadmapgofadopljbjfkapdkoienihi";

    /// Marker file that qualifies a version directory as a loadable package
    pub const MANIFEST_FILE: &str = "manifest.json";

    /// Subdirectory (under the shell's local data dir) where resolved
    /// extensions are staged for the webview
    pub const STAGED_EXTENSIONS_DIR: &str = "extensions";

    /// Chrome Web Store CRX endpoint used by the network-installer fallback
    pub fn crx_download_url() -> String {
        format!(
            "https://clients2.google.com/service/update2/crx?response=redirect&acceptformat=crx2,crx3&prodversion=120.0&x=id%3D{}%26uc",
            EXTENSION_ID
        )
    }
}

/// Environment probes
pub mod env {
    /// Environment variable that switches the shell into development mode
    pub const DEV_MODE_VAR: &str = "EXAMSIM_ENV";

    /// Value of [`DEV_MODE_VAR`] that enables development mode
    pub const DEV_MODE_VALUE: &str = "development";

    /// Environment variable controlling the log level (error/warn/info/debug/trace)
    pub const LOG_LEVEL_VAR: &str = "EXAMSIM_LOG";
}

/// Update check
pub mod updates {
    /// Release manifest queried by the fire-and-forget update check
    pub const LATEST_RELEASE_URL: &str =
        "https://api.github.com/repos/examsim/exam-simulator/releases/latest";
}

/// Logging
pub mod logging {
    /// Log retention period in days
    pub const LOG_RETENTION_DAYS: u32 = 30;

    /// Directory name under the platform log/data location
    pub const APP_DIR_NAME: &str = "ExamSimulator";
}
