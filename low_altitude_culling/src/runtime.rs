/// Runtime - process-wide hub for the logger and external engine tuning
///
/// The culling subsystem itself holds no global state. Two things are
/// process-wide in the host: the log sink, and the engine-wide request and
/// tile cache limits applied once when the globe viewer is created. Both are
/// kept here behind `OnceLock<RwLock<..>>`, away from culling state.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Engine tuning last applied by the host
static TUNING: OnceLock<RwLock<EngineTuning>> = OnceLock::new();

// ===== ENGINE TUNING =====

/// Engine-wide limits for the external globe engine.
///
/// These are applied to the rendering engine once at startup and are
/// orthogonal to culling: changing them never affects culling outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTuning {
    /// Maximum number of simultaneous tile/asset requests
    pub maximum_requests: u32,
    /// Maximum number of simultaneous requests to a single server
    pub maximum_requests_per_server: u32,
    /// Maximum number of tiles kept in the replacement cache
    pub tile_cache_size: u32,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            maximum_requests: 50,
            maximum_requests_per_server: 18,
            tile_cache_size: 2000,
        }
    }
}

impl EngineTuning {
    /// Check that all limits are usable by the engine.
    pub fn validate(&self) -> Result<()> {
        if self.maximum_requests == 0 {
            return Err(Error::ConfigurationError(
                "maximum_requests must be > 0".to_string(),
            ));
        }
        if self.maximum_requests_per_server == 0 {
            return Err(Error::ConfigurationError(
                "maximum_requests_per_server must be > 0".to_string(),
            ));
        }
        if self.maximum_requests_per_server > self.maximum_requests {
            return Err(Error::ConfigurationError(format!(
                "maximum_requests_per_server ({}) exceeds maximum_requests ({})",
                self.maximum_requests_per_server, self.maximum_requests
            )));
        }
        if self.tile_cache_size == 0 {
            return Err(Error::ConfigurationError(
                "tile_cache_size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

// ===== PUBLIC API =====

/// Process-wide hub (logger + engine tuning)
pub struct Runtime;

impl Runtime {
    /// Validate and store engine tuning.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the tuning is invalid. The previously
    /// applied tuning stays in effect.
    pub fn apply_tuning(tuning: EngineTuning) -> Result<()> {
        if let Err(error) = tuning.validate() {
            crate::lowalt_error!("lowalt::Runtime", "Rejected engine tuning: {}", error);
            return Err(error);
        }

        let lock = TUNING.get_or_init(|| RwLock::new(EngineTuning::default()));
        let mut guard = lock.write()
            .map_err(|_| Error::ConfigurationError("Engine tuning lock poisoned".to_string()))?;
        *guard = tuning;

        crate::lowalt_info!(
            "lowalt::Runtime",
            "Engine tuning applied: {} requests ({} per server), {} cached tiles",
            tuning.maximum_requests,
            tuning.maximum_requests_per_server,
            tuning.tile_cache_size
        );
        Ok(())
    }

    /// Currently applied engine tuning (defaults if never applied).
    pub fn tuning() -> EngineTuning {
        let lock = TUNING.get_or_init(|| RwLock::new(EngineTuning::default()));
        match lock.read() {
            Ok(guard) => *guard,
            Err(_) => EngineTuning::default(),
        }
    }

    // ===== LOGGING API =====

    /// Replace the default logger with a custom implementation
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::new())));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::new())));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(DefaultLogger::new());
        }
    }

    /// Log without file:line (used by lowalt_info!, lowalt_warn!, ...)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::new())));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Log with file:line (used by lowalt_error!)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::new())));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
