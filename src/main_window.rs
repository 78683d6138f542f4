//! Main window ownership
//!
//! The controller owns the zero-or-one live window handle. The handle is set
//! by [`MainWindowController::create`] and cleared when the OS reports the
//! window destroyed, enabling a later re-create cycle. Both mutations happen
//! on the event-loop thread.

use anyhow::{Context, Result};
use std::sync::Mutex;
use tauri::{AppHandle, Manager, WebviewWindow, WebviewWindowBuilder};

use examsim_shell::config;

use crate::window_providers;

pub(crate) struct MainWindowController {
    window: Mutex<Option<WebviewWindow>>,
}

impl MainWindowController {
    pub(crate) fn new() -> Self {
        Self {
            window: Mutex::new(None),
        }
    }

    /// Create the application window and take ownership of its handle.
    ///
    /// Dimensions, content URL and menu come from the provider module; the
    /// icon comes from the bundled app context. A failure here is fatal to
    /// startup, there is no application without a window.
    pub(crate) fn create(&self, app: &AppHandle, dev_mode: bool) -> Result<WebviewWindow> {
        let (width, height) = window_providers::window_dimensions();
        let url = window_providers::content_url(dev_mode);

        tracing::info!(width, height, dev_mode, "Creating main window");

        let mut builder =
            WebviewWindowBuilder::new(app, config::window::MAIN_WINDOW_LABEL, url)
                .title(config::window::TITLE)
                .inner_size(width, height);

        if let Some(icon) = app.default_window_icon().cloned() {
            builder = builder.icon(icon).context("Failed to set window icon")?;
        }

        // The webview only accepts an extensions directory at construction
        // time, so the staged devtools dir is wired in here.
        #[cfg(any(windows, target_os = "linux"))]
        if dev_mode {
            builder = builder.browser_extensions_enabled(true);
            if let Some(dir) = crate::devtools_setup::staged_extensions_dir() {
                builder = builder.extensions_path(dir);
            }
        }

        let window = builder.build().context("Failed to create main window")?;

        let menu = window_providers::build_menu(app).context("Failed to build window menu")?;
        app.set_menu(menu).context("Failed to apply window menu")?;

        // Replacing an existing handle is allowed; the platform owns the
        // previous window's remaining lifecycle.
        *self.window.lock().unwrap() = Some(window.clone());

        Ok(window)
    }

    /// Current live handle, if any.
    pub(crate) fn current(&self) -> Option<WebviewWindow> {
        self.window.lock().unwrap().clone()
    }

    /// Drop the stored handle after the window reported teardown.
    pub(crate) fn clear(&self) {
        *self.window.lock().unwrap() = None;
    }
}
