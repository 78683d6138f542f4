//! Routes OS window/run events into the lifecycle state machine.

use tauri::{AppHandle, Manager, RunEvent, Window, WindowEvent};

use examsim_shell::config;
use examsim_shell::lifecycle::{LifecycleEvent, ShellAction};

use crate::app_state::ShellState;

pub(crate) fn handle_window_event(window: &Window, event: &WindowEvent) {
    if window.label() != config::window::MAIN_WINDOW_LABEL {
        return;
    }

    match event {
        WindowEvent::CloseRequested { .. } => {
            tracing::info!("Main window close requested");
        }
        WindowEvent::Destroyed => {
            // Clearing the handle enables a later re-create cycle; the
            // closed window must never be used again.
            tracing::info!("Main window destroyed, clearing handle");
            let state = window.app_handle().state::<ShellState>();
            state.main_window.clear();
            let _ = state
                .lifecycle
                .lock()
                .unwrap()
                .apply(LifecycleEvent::WindowClosed);
        }
        _ => {}
    }
}

pub(crate) fn handle_run_event(app: &AppHandle, event: &RunEvent) {
    match event {
        RunEvent::ExitRequested { .. } => {
            let state = app.state::<ShellState>();
            let action = state
                .lifecycle
                .lock()
                .unwrap()
                .apply(LifecycleEvent::AllWindowsClosed);
            if action == ShellAction::Quit {
                tracing::info!("All windows closed, terminating");
            }
        }
        RunEvent::Exit => {
            tracing::info!("Shell exiting");
        }
        _ => {}
    }
}
