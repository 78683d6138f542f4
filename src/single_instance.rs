//! Single-instance guard
//!
//! Exclusivity is enforced by the platform single-instance primitive behind
//! tauri-plugin-single-instance; this module supplies the notification
//! handler that runs in the primary process. A duplicate process is
//! terminated by the plugin during its registration, before any window or
//! further handler exists, and that termination is a clean exit rather than
//! a failure.

use tauri::{AppHandle, Manager, WebviewWindow};

use examsim_shell::lifecycle::{self, LifecycleEvent, ShellAction, WindowOps};

use crate::app_state::ShellState;

/// Adapter making the webview window usable by the refocus logic.
pub(crate) struct FocusTarget(pub(crate) WebviewWindow);

impl WindowOps for FocusTarget {
    fn is_minimized(&self) -> bool {
        self.0.is_minimized().unwrap_or(false)
    }

    fn restore(&self) {
        let _ = self.0.unminimize();
    }

    fn focus(&self) {
        let _ = self.0.set_focus();
    }
}

/// Invoked in the primary process each time another instance tries to start.
pub(crate) fn on_second_instance(app: &AppHandle, _argv: Vec<String>, _cwd: String) {
    tracing::info!("Second instance detected, refocusing existing window");

    let state = app.state::<ShellState>();
    let action = state
        .lifecycle
        .lock()
        .unwrap()
        .apply(LifecycleEvent::SecondInstance);

    if action == ShellAction::RefocusMainWindow {
        let window = state.main_window.current().map(FocusTarget);
        lifecycle::refocus(window.as_ref());
    }
}
