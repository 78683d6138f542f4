// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use tauri::Manager;

mod app_bootstrap;
mod app_lifecycle;
mod app_state;
mod devtools_setup;
mod logging;
mod main_window;
mod single_instance;
mod window_providers;

pub(crate) use app_state::ShellState;

use examsim_shell::lifecycle::{LifecycleEvent, ShellAction};

fn main() {
    let dev_mode = app_bootstrap::dev_mode();
    app_bootstrap::init_logging();
    app_bootstrap::install_panic_hook();

    tauri::Builder::default()
        // Registered first: a duplicate process is terminated inside the
        // plugin, before any window or further handler exists.
        .plugin(tauri_plugin_single_instance::init(
            single_instance::on_second_instance,
        ))
        .manage(ShellState::new(dev_mode))
        .setup(|app| {
            let state = app.state::<ShellState>();
            let _ = state
                .lifecycle
                .lock()
                .unwrap()
                .apply(LifecycleEvent::LockAcquired);

            let action = state.lifecycle.lock().unwrap().apply(LifecycleEvent::Ready);
            if action == ShellAction::CreateMainWindow {
                // No window means no usable application: failure here aborts
                // startup with a non-zero exit.
                let window = state.main_window.create(app.handle(), state.dev_mode)?;
                devtools_setup::attach(&window, state.dev_mode);
            }

            app_bootstrap::spawn_update_check();
            Ok(())
        })
        .on_window_event(|window, event| app_lifecycle::handle_window_event(window, event))
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| app_lifecycle::handle_run_event(app_handle, &event));
}
