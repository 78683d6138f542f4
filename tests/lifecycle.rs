use std::cell::RefCell;

use examsim_shell::lifecycle::{
    refocus, LifecycleEvent, LifecyclePhase, ShellAction, ShellLifecycle, WindowOps,
};

struct FakeWindow {
    minimized: bool,
    calls: RefCell<Vec<&'static str>>,
}

impl FakeWindow {
    fn new(minimized: bool) -> Self {
        Self {
            minimized,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl WindowOps for FakeWindow {
    fn is_minimized(&self) -> bool {
        self.minimized
    }

    fn restore(&self) {
        self.calls.borrow_mut().push("restore");
    }

    fn focus(&self) {
        self.calls.borrow_mut().push("focus");
    }
}

#[test]
fn lock_denied_terminates_without_creating_a_window() {
    let mut lifecycle = ShellLifecycle::new();

    assert_eq!(lifecycle.apply(LifecycleEvent::LockDenied), ShellAction::Quit);
    assert_eq!(lifecycle.phase(), LifecyclePhase::LockDenied);

    // Neither readiness nor second-instance notifications may do anything
    // after the lock was denied.
    assert_eq!(lifecycle.apply(LifecycleEvent::Ready), ShellAction::Ignore);
    assert_eq!(
        lifecycle.apply(LifecycleEvent::SecondInstance),
        ShellAction::Ignore
    );
}

#[test]
fn normal_startup_runs_through_to_termination() {
    let mut lifecycle = ShellLifecycle::new();

    assert_eq!(
        lifecycle.apply(LifecycleEvent::LockAcquired),
        ShellAction::Ignore
    );
    assert_eq!(lifecycle.phase(), LifecyclePhase::LockAcquired);

    assert_eq!(
        lifecycle.apply(LifecycleEvent::Ready),
        ShellAction::CreateMainWindow
    );
    assert_eq!(lifecycle.phase(), LifecyclePhase::WindowActive);

    assert_eq!(
        lifecycle.apply(LifecycleEvent::WindowClosed),
        ShellAction::Ignore
    );
    assert_eq!(lifecycle.phase(), LifecyclePhase::WindowClosed);

    assert_eq!(
        lifecycle.apply(LifecycleEvent::AllWindowsClosed),
        ShellAction::Quit
    );
    assert_eq!(lifecycle.phase(), LifecyclePhase::Terminated);
}

#[test]
fn ready_creates_the_window_at_most_once() {
    let mut lifecycle = ShellLifecycle::new();
    lifecycle.apply(LifecycleEvent::LockAcquired);

    assert_eq!(
        lifecycle.apply(LifecycleEvent::Ready),
        ShellAction::CreateMainWindow
    );
    assert_eq!(lifecycle.apply(LifecycleEvent::Ready), ShellAction::Ignore);
    assert_eq!(lifecycle.apply(LifecycleEvent::Ready), ShellAction::Ignore);
}

#[test]
fn second_instance_maps_to_refocus_while_lock_is_held() {
    let mut lifecycle = ShellLifecycle::new();
    lifecycle.apply(LifecycleEvent::LockAcquired);

    assert_eq!(
        lifecycle.apply(LifecycleEvent::SecondInstance),
        ShellAction::RefocusMainWindow
    );

    lifecycle.apply(LifecycleEvent::Ready);
    assert_eq!(
        lifecycle.apply(LifecycleEvent::SecondInstance),
        ShellAction::RefocusMainWindow
    );

    // Still delegated after the window closed; the handler itself no-ops
    // when no handle exists.
    lifecycle.apply(LifecycleEvent::WindowClosed);
    assert_eq!(
        lifecycle.apply(LifecycleEvent::SecondInstance),
        ShellAction::RefocusMainWindow
    );
}

#[test]
fn refocus_restores_a_minimized_window_before_focusing() {
    let window = FakeWindow::new(true);
    refocus(Some(&window));
    assert_eq!(*window.calls.borrow(), vec!["restore", "focus"]);
}

#[test]
fn refocus_focuses_a_visible_window_directly() {
    let window = FakeWindow::new(false);
    refocus(Some(&window));
    assert_eq!(*window.calls.borrow(), vec!["focus"]);
}

#[test]
fn refocus_without_a_window_is_a_noop() {
    refocus::<FakeWindow>(None);
}
