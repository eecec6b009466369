#![deny(missing_docs)]
//! Shared logging utilities for the portfolio workspace.
//!
//! This crate provides the `site_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every record is
//! prefixed with the animation frame the page host is currently processing,
//! so scroll and reveal traces can be lined up against each other.

use std::cell::Cell;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Thread-local storage for the current animation frame number.
    static FRAME: Cell<u64> = const { Cell::new(0) };
}

/// Sets the animation frame number for the current thread.
/// The page host calls this once per delivered animation frame.
pub fn set_frame(frame: u64) {
    FRAME.with(|v| v.set(frame));
}

/// Retrieves the animation frame number for the current thread.
/// Returns 0 before the first frame has been delivered.
pub fn current_frame() -> u64 {
    FRAME.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current frame.
#[macro_export]
macro_rules! site_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("[frame {}] {}", $crate::current_frame(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current frame.
#[macro_export]
macro_rules! site_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("[frame {}] {}", $crate::current_frame(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current frame.
#[macro_export]
macro_rules! site_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("[frame {}] {}", $crate::current_frame(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current frame.
#[macro_export]
macro_rules! site_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("[frame {}] {}", $crate::current_frame(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current frame.
#[macro_export]
macro_rules! site_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("[frame {}] {}", $crate::current_frame(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
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
