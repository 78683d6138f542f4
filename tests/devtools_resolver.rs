use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use examsim_shell::devtools::{
    highest_version_dir, DevToolsPanel, DevToolsResolver, ExtensionCandidate, ExtensionLoader,
    NetworkInstaller, ProbeFailure, ResolveOutcome,
};

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(label: &str) -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "examsim_test_{}_{}_{}",
            label,
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn make_version(base: &Path, version: &str, with_manifest: bool) {
    let dir = base.join(version);
    fs::create_dir_all(&dir).unwrap();
    if with_manifest {
        fs::write(
            dir.join("manifest.json"),
            r#"{"name":"React Developer Tools","version":"0.0.0"}"#,
        )
        .unwrap();
    }
}

#[derive(Default)]
struct RecordingPanel {
    opened: Cell<u32>,
}

impl DevToolsPanel for RecordingPanel {
    fn open_detached(&self) {
        self.opened.set(self.opened.get() + 1);
    }
}

struct RecordingLoader {
    loaded: RefCell<Vec<PathBuf>>,
    fail: bool,
}

impl RecordingLoader {
    fn succeeding() -> Self {
        Self {
            loaded: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            loaded: RefCell::new(Vec::new()),
            fail: true,
        }
    }
}

impl ExtensionLoader for RecordingLoader {
    fn load_unpacked(&self, dir: &Path) -> Result<String, String> {
        self.loaded.borrow_mut().push(dir.to_path_buf());
        if self.fail {
            Err("loader rejected directory".to_string())
        } else {
            Ok("React Developer Tools".to_string())
        }
    }
}

#[derive(Default)]
struct RecordingInstaller {
    spawned: Cell<u32>,
}

impl NetworkInstaller for RecordingInstaller {
    fn spawn_install(&self) {
        self.spawned.set(self.spawned.get() + 1);
    }
}

#[test]
fn version_selection_is_lexicographic_not_semver() {
    let temp = TempDir::new("lexicographic");
    make_version(&temp.path, "1.0.0", true);
    make_version(&temp.path, "2.3.1", true);
    make_version(&temp.path, "10.0.0", true);

    // Plain string sort: "2.3.1" is the documented pick, not "10.0.0".
    let selected = highest_version_dir(&temp.path).unwrap();
    assert_eq!(selected, temp.path.join("2.3.1"));
}

#[test]
fn version_dirs_without_manifest_are_disqualified() {
    let temp = TempDir::new("manifest_filter");
    make_version(&temp.path, "0.1.0", false);
    make_version(&temp.path, "0.2.0", true);

    let selected = highest_version_dir(&temp.path).unwrap();
    assert_eq!(selected, temp.path.join("0.2.0"));
}

#[test]
fn candidate_with_no_manifest_anywhere_yields_no_version_dir() {
    let temp = TempDir::new("no_manifests");
    make_version(&temp.path, "1.0.0", false);
    make_version(&temp.path, "2.0.0", false);

    match highest_version_dir(&temp.path) {
        Err(ProbeFailure::NoVersionDir) => {}
        other => panic!("expected NoVersionDir, got {:?}", other),
    }
}

#[test]
fn resolution_loads_highest_manifest_version_and_skips_network() {
    let temp = TempDir::new("local_success");
    make_version(&temp.path, "0.1.0", false);
    make_version(&temp.path, "0.2.0", true);

    let candidates = vec![ExtensionCandidate::new("chrome", temp.path.clone())];
    let panel = RecordingPanel::default();
    let loader = RecordingLoader::succeeding();
    let installer = RecordingInstaller::default();

    let outcome =
        DevToolsResolver::new(&candidates).attach(true, &panel, &loader, &installer);

    match outcome {
        ResolveOutcome::LoadedLocal { dir, name, attempts } => {
            assert_eq!(dir, temp.path.join("0.2.0"));
            assert_eq!(name, "React Developer Tools");
            assert!(attempts.is_empty());
        }
        other => panic!("expected LoadedLocal, got {:?}", other),
    }

    assert_eq!(panel.opened.get(), 1);
    assert_eq!(*loader.loaded.borrow(), vec![temp.path.join("0.2.0")]);
    assert_eq!(installer.spawned.get(), 0);
}

#[test]
fn manifestless_candidate_is_skipped_in_favor_of_the_next() {
    let empty = TempDir::new("skip_first");
    make_version(&empty.path, "1.0.0", false);

    let valid = TempDir::new("skip_second");
    make_version(&valid.path, "3.1.4", true);

    let candidates = vec![
        ExtensionCandidate::new("chrome", empty.path.clone()),
        ExtensionCandidate::new("chromium", valid.path.clone()),
    ];
    let panel = RecordingPanel::default();
    let loader = RecordingLoader::succeeding();
    let installer = RecordingInstaller::default();

    let outcome =
        DevToolsResolver::new(&candidates).attach(true, &panel, &loader, &installer);

    match outcome {
        ResolveOutcome::LoadedLocal { dir, attempts, .. } => {
            assert_eq!(dir, valid.path.join("3.1.4"));
            assert_eq!(attempts.len(), 1);
            assert_eq!(attempts[0].browser, "chrome");
            assert!(matches!(attempts[0].failure, ProbeFailure::NoVersionDir));
        }
        other => panic!("expected LoadedLocal, got {:?}", other),
    }

    assert_eq!(installer.spawned.get(), 0);
}

#[test]
fn first_successful_candidate_short_circuits_the_rest() {
    let first = TempDir::new("short_circuit_a");
    make_version(&first.path, "1.0.0", true);

    let second = TempDir::new("short_circuit_b");
    make_version(&second.path, "9.9.9", true);

    let candidates = vec![
        ExtensionCandidate::new("chrome", first.path.clone()),
        ExtensionCandidate::new("chromium", second.path.clone()),
    ];
    let panel = RecordingPanel::default();
    let loader = RecordingLoader::succeeding();
    let installer = RecordingInstaller::default();

    let outcome =
        DevToolsResolver::new(&candidates).attach(true, &panel, &loader, &installer);

    match outcome {
        ResolveOutcome::LoadedLocal { dir, .. } => assert_eq!(dir, first.path.join("1.0.0")),
        other => panic!("expected LoadedLocal, got {:?}", other),
    }

    assert_eq!(loader.loaded.borrow().len(), 1);
}

#[test]
fn exhaustion_invokes_the_network_installer_exactly_once() {
    let missing = std::env::temp_dir().join("examsim_test_does_not_exist");

    let rejected = TempDir::new("exhaustion");
    make_version(&rejected.path, "4.28.0", true);

    let candidates = vec![
        ExtensionCandidate::new("chrome", missing.clone()),
        ExtensionCandidate::new("chromium", rejected.path.clone()),
    ];
    let panel = RecordingPanel::default();
    let loader = RecordingLoader::failing();
    let installer = RecordingInstaller::default();

    let outcome =
        DevToolsResolver::new(&candidates).attach(true, &panel, &loader, &installer);

    match outcome {
        ResolveOutcome::NetworkFallback { attempts } => {
            assert_eq!(attempts.len(), 2);
            assert!(matches!(attempts[0].failure, ProbeFailure::Unreadable(_)));
            assert!(matches!(attempts[1].failure, ProbeFailure::LoadFailed(_)));
        }
        other => panic!("expected NetworkFallback, got {:?}", other),
    }

    assert_eq!(panel.opened.get(), 1);
    assert_eq!(installer.spawned.get(), 1);
}

#[test]
fn disabled_dev_mode_is_a_complete_noop() {
    let temp = TempDir::new("dev_mode_off");
    make_version(&temp.path, "1.0.0", true);

    let candidates = vec![ExtensionCandidate::new("chrome", temp.path.clone())];
    let panel = RecordingPanel::default();
    let loader = RecordingLoader::succeeding();
    let installer = RecordingInstaller::default();

    let outcome =
        DevToolsResolver::new(&candidates).attach(false, &panel, &loader, &installer);

    assert!(matches!(outcome, ResolveOutcome::Skipped));
    assert_eq!(panel.opened.get(), 0);
    assert!(loader.loaded.borrow().is_empty());
    assert_eq!(installer.spawned.get(), 0);
}
