//! Exam Simulator Shell - Lifecycle Coordination Library
//!
//! This library provides the startup/lifecycle coordination core for the
//! desktop shell: the lifecycle state machine, single-instance refocus logic,
//! and the devtools-extension resolution chain. It has no dependency on a
//! windowing stack, so the coordination logic is testable without an OS
//! event loop.

// Configuration constants
pub mod config;

// Devtools extension resolution (local-profile probing + network fallback)
pub mod devtools;

// Lifecycle state machine and window refocus logic
pub mod lifecycle;

// Re-export commonly used types
pub use devtools::{DevToolsResolver, ExtensionCandidate, ProbeFailure, ResolveOutcome};
pub use lifecycle::{LifecycleEvent, LifecyclePhase, ShellAction, ShellLifecycle};
