//! Lifecycle state machine for the shell process
//!
//! Process-level events (lock arbitration, readiness, window teardown) are
//! dispatched through an explicit state machine instead of ad-hoc event-loop
//! callbacks, so the coordination rules can be exercised without a real OS
//! event loop. The shell binary feeds OS events in and executes the returned
//! actions.

/// Phases of the overall process, from startup to termination.
///
/// Legal paths: `Starting -> LockDenied -> Terminated` or
/// `Starting -> LockAcquired -> WindowActive <-> WindowClosed -> Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Starting,
    LockDenied,
    LockAcquired,
    WindowActive,
    WindowClosed,
    Terminated,
}

/// Process-level events fed into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// This process obtained exclusive-instance status
    LockAcquired,
    /// Another process already holds the instance lock
    LockDenied,
    /// The platform runtime is ready for window creation
    Ready,
    /// Another process tried to start while we hold the lock
    SecondInstance,
    /// The main window reported teardown
    WindowClosed,
    /// The last window is gone; the process should terminate
    AllWindowsClosed,
}

/// What the shell must do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    CreateMainWindow,
    RefocusMainWindow,
    Quit,
    Ignore,
}

/// Deterministic event dispatcher owning the lifecycle phase.
///
/// `Ready` creates the window at most once per process; redundant or
/// out-of-phase events map to [`ShellAction::Ignore`].
#[derive(Debug)]
pub struct ShellLifecycle {
    phase: LifecyclePhase,
    ready_handled: bool,
}

impl Default for ShellLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellLifecycle {
    pub fn new() -> Self {
        Self {
            phase: LifecyclePhase::Starting,
            ready_handled: false,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Apply one event and return the action the shell must perform.
    pub fn apply(&mut self, event: LifecycleEvent) -> ShellAction {
        match event {
            LifecycleEvent::LockAcquired => {
                if self.phase == LifecyclePhase::Starting {
                    self.phase = LifecyclePhase::LockAcquired;
                }
                ShellAction::Ignore
            }
            LifecycleEvent::LockDenied => {
                // No window exists yet and none may be created.
                self.phase = LifecyclePhase::LockDenied;
                ShellAction::Quit
            }
            LifecycleEvent::Ready => {
                if self.phase == LifecyclePhase::LockAcquired && !self.ready_handled {
                    self.ready_handled = true;
                    self.phase = LifecyclePhase::WindowActive;
                    ShellAction::CreateMainWindow
                } else {
                    ShellAction::Ignore
                }
            }
            LifecycleEvent::SecondInstance => match self.phase {
                LifecyclePhase::LockAcquired
                | LifecyclePhase::WindowActive
                | LifecyclePhase::WindowClosed => ShellAction::RefocusMainWindow,
                _ => ShellAction::Ignore,
            },
            LifecycleEvent::WindowClosed => {
                if self.phase == LifecyclePhase::WindowActive {
                    self.phase = LifecyclePhase::WindowClosed;
                }
                ShellAction::Ignore
            }
            LifecycleEvent::AllWindowsClosed => {
                self.phase = LifecyclePhase::Terminated;
                ShellAction::Quit
            }
        }
    }
}

/// Minimal window surface needed by the second-instance handler.
///
/// Implemented by the shell binary for the real webview window and by tests
/// with recording fakes. All operations are best-effort; implementations
/// swallow platform errors.
pub trait WindowOps {
    fn is_minimized(&self) -> bool;
    fn restore(&self);
    fn focus(&self);
}

/// Restore-and-focus an existing window.
///
/// If the window is minimized it is restored first, then focused; if not
/// minimized it is focused directly. With no window this is an idempotent
/// no-op, never an error.
pub fn refocus<W: WindowOps>(window: Option<&W>) {
    let Some(window) = window else {
        return;
    };

    if window.is_minimized() {
        window.restore();
    }
    window.focus();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_denied_quits_before_any_window() {
        let mut lifecycle = ShellLifecycle::new();
        assert_eq!(lifecycle.apply(LifecycleEvent::LockDenied), ShellAction::Quit);
        assert_eq!(lifecycle.phase(), LifecyclePhase::LockDenied);
        // Ready after denial must never create a window
        assert_eq!(lifecycle.apply(LifecycleEvent::Ready), ShellAction::Ignore);
    }

    #[test]
    fn ready_creates_window_exactly_once() {
        let mut lifecycle = ShellLifecycle::new();
        lifecycle.apply(LifecycleEvent::LockAcquired);
        assert_eq!(
            lifecycle.apply(LifecycleEvent::Ready),
            ShellAction::CreateMainWindow
        );
        assert_eq!(lifecycle.apply(LifecycleEvent::Ready), ShellAction::Ignore);
    }

    #[test]
    fn second_instance_before_lock_is_ignored() {
        let mut lifecycle = ShellLifecycle::new();
        assert_eq!(
            lifecycle.apply(LifecycleEvent::SecondInstance),
            ShellAction::Ignore
        );
    }
}
