//! Logging utilities with colored output and link diagnostics.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro gated on the global verbose flag
//! - [`Logger`] sink for link resolution diagnostics (warning / notice)
//!
//! # Example
//!
//! ```ignore
//! // Simple logging
//! log!("convert"; "resolved {} links", count);
//!
//! // Diagnostics sink handed to the converter
//! let logger = ConsoleLogger;
//! logger.warning("content 42 not found");
//! ```

use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
///
/// Goes to stderr; stdout is reserved for converted documents.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stderr = stderr().lock();
    writeln!(stderr, "{prefix} {message}").ok();
    stderr.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "convert" => prefix.bright_blue().bold().to_string(),
        "notice" => prefix.bright_cyan().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Diagnostics Sink
// ============================================================================

/// Receiver for diagnostics raised while resolving links.
///
/// Lookup failures never abort a conversion; they are reported here instead.
/// A missing content item is a warning, a permission problem is a notice.
pub trait Logger {
    fn warning(&self, message: &str);
    fn notice(&self, message: &str);
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn warning(&self, _message: &str) {}
    fn notice(&self, _message: &str) {}
}

/// Prints diagnostics to stderr through [`log`] with `[warning]` / `[notice]` prefixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn warning(&self, message: &str) {
        log("warning", message);
    }

    fn notice(&self, message: &str) {
        log("notice", message);
    }
}

/// Severity of a recorded diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Notice,
}

/// Collects diagnostics in memory, for hosts that render them elsewhere.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(Level, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, in order.
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.lock().clone()
    }

    /// Number of entries recorded at `level`.
    pub fn count(&self, level: Level) -> usize {
        self.entries.lock().iter().filter(|(l, _)| *l == level).count()
    }

    /// Drain the recorded entries.
    pub fn take(&self) -> Vec<(Level, String)> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl Logger for MemoryLogger {
    fn warning(&self, message: &str) {
        self.entries.lock().push((Level::Warning, message.to_string()));
    }

    fn notice(&self, message: &str) {
        self.entries.lock().push((Level::Notice, message.to_string()));
    }
}

// ============================================================================
// Tests
// ============================================================================
