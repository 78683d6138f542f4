//! External collaborators consumed by the window controller
//!
//! Dimensions, content URL and menu structure are opaque providers from the
//! coordinator's point of view; the controller passes their results through
//! unmodified.

use tauri::menu::{Menu, MenuBuilder, SubmenuBuilder};
use tauri::{AppHandle, WebviewUrl, Wry};

use examsim_shell::config;

/// Initial window dimensions (width, height) in logical pixels.
pub(crate) fn window_dimensions() -> (f64, f64) {
    config::window::DEFAULT_DIMENSIONS
}

/// Content to load: the local dev server in development mode, the packaged
/// frontend otherwise.
pub(crate) fn content_url(dev_mode: bool) -> WebviewUrl {
    if dev_mode {
        match config::window::DEV_SERVER_URL.parse() {
            Ok(url) => WebviewUrl::External(url),
            Err(_) => WebviewUrl::App("index.html".into()),
        }
    } else {
        WebviewUrl::App("index.html".into())
    }
}

/// Application menu structure.
pub(crate) fn build_menu(app: &AppHandle) -> tauri::Result<Menu<Wry>> {
    let file = SubmenuBuilder::new(app, "File")
        .close_window()
        .separator()
        .quit()
        .build()?;

    let edit = SubmenuBuilder::new(app, "Edit")
        .undo()
        .redo()
        .separator()
        .cut()
        .copy()
        .paste()
        .select_all()
        .build()?;

    let view = SubmenuBuilder::new(app, "View")
        .fullscreen()
        .minimize()
        .build()?;

    MenuBuilder::new(app).items(&[&file, &edit, &view]).build()
}
