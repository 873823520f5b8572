//! Logging for the culling subsystem
//!
//! - Customizable logger via the Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - File and line information for ERROR logs
//!
//! The evaluator reports skipped entities and debug run summaries through
//! this module, so hosts can route them into their own log sink.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// # Example
///
/// ```no_run
/// use low_altitude_culling::lowalt::log::{Logger, LogEntry};
///
/// struct HostConsole;
///
/// impl Logger for HostConsole {
///     fn log(&self, entry: &LogEntry) {
///         // Forward to the host's console...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "lowalt::Culler", "lowalt::Evaluator")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose tracing (per-entity decisions)
    Trace,

    /// Development/debugging information
    Debug,

    /// Run summaries and lifecycle events
    Info,

    /// Skipped entities, suspicious culling results
    Warn,

    /// Failed runs (with file:line details)
    Error,
}

/// Colored console logger.
///
/// Lines read `[timestamp] [SEVERITY] [source] message`, with ` (file:line)`
/// appended for entries that carry a location. Entries below `min_severity`
/// are dropped, so per-entity trace output can be silenced in busy scenes.
#[derive(Debug, Clone, Copy)]
pub struct DefaultLogger {
    min_severity: LogSeverity,
}

impl DefaultLogger {
    /// Logger printing every severity.
    pub fn new() -> Self {
        Self::with_min_severity(LogSeverity::Trace)
    }

    /// Logger printing `min_severity` and above.
    pub fn with_min_severity(min_severity: LogSeverity) -> Self {
        Self { min_severity }
    }

    pub fn min_severity(&self) -> LogSeverity {
        self.min_severity
    }

    /// True if entries of `severity` are printed.
    pub fn accepts(&self, severity: LogSeverity) -> bool {
        severity >= self.min_severity
    }

    /// Render one console line (without the trailing newline).
    pub fn format_line(entry: &LogEntry) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();

        let severity = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let mut line = format!(
            "[{}] [{}] [{}] {}",
            datetime.format("%Y-%m-%d %H:%M:%S%.3f"),
            severity,
            entry.source.bright_blue(),
            entry.message
        );
        if let (Some(file), Some(number)) = (entry.file, entry.line) {
            line.push_str(&format!(" ({}:{})", file, number));
        }
        line
    }
}

impl Default for DefaultLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        if self.accepts(entry.severity) {
            println!("{}", Self::format_line(entry));
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
#[macro_export]
macro_rules! lowalt_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::lowalt::Runtime::log(
            $crate::lowalt::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! lowalt_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::lowalt::Runtime::log(
            $crate::lowalt::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
///
/// # Example
///
/// ```no_run
/// low_altitude_culling::lowalt_info!("lowalt::Culler", "Culling run finished in {:.2}ms", 1.5);
/// ```
#[macro_export]
macro_rules! lowalt_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::lowalt::Runtime::log(
            $crate::lowalt::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! lowalt_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::lowalt::Runtime::log(
            $crate::lowalt::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! lowalt_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::lowalt::Runtime::log_detailed(
            $crate::lowalt::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
