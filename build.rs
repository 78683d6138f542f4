fn main() {
    // tauri-build requires the `tauri` dependency (app feature) to be present.
    if std::env::var_os("CARGO_FEATURE_APP").is_some() {
        tauri_build::build()
    }
}
