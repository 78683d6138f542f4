//! Shared shell state managed by the Tauri runtime.

use std::sync::Mutex;

use examsim_shell::ShellLifecycle;

use crate::main_window::MainWindowController;

pub(crate) struct ShellState {
    /// Lifecycle state machine; mutated only on the event-loop thread
    pub(crate) lifecycle: Mutex<ShellLifecycle>,
    /// Owner of the single optional window handle
    pub(crate) main_window: MainWindowController,
    /// Development-mode flag, derived from the environment at startup
    pub(crate) dev_mode: bool,
}

impl ShellState {
    pub(crate) fn new(dev_mode: bool) -> Self {
        Self {
            lifecycle: Mutex::new(ShellLifecycle::new()),
            main_window: MainWindowController::new(),
            dev_mode,
        }
    }
}
