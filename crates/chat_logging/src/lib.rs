#![deny(missing_docs)]
//! Shared logging utilities for the chat widget workspace.
//!
//! This crate provides the `chat_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every line is tagged
//! with the id of the submission the current thread is working on, so one
//! query can be followed from the input loop through the transport.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the submission currently being handled.
    static SUBMISSION_ID: Cell<u64> = const { Cell::new(0) };
}

/// Sets the submission id for the current thread.
/// The front end calls this whenever it dispatches or settles a query.
pub fn set_submission_id(id: u64) {
    SUBMISSION_ID.with(|v| v.set(id));
}

/// Retrieves the submission id for the current thread.
/// Returns 0 if no submission has been tagged yet.
pub fn current_submission_id() -> u64 {
    SUBMISSION_ID.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! chat_trace {
    ($($arg:tt)*) => {{
        log::trace!("[q{}] {}", $crate::current_submission_id(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! chat_info {
    ($($arg:tt)*) => {{
        log::info!("[q{}] {}", $crate::current_submission_id(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! chat_debug {
    ($($arg:tt)*) => {{
        log::debug!("[q{}] {}", $crate::current_submission_id(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! chat_warn {
    ($($arg:tt)*) => {{
        log::warn!("[q{}] {}", $crate::current_submission_id(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! chat_error {
    ($($arg:tt)*) => {{
        log::error!("[q{}] {}", $crate::current_submission_id(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
