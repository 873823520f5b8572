//! Unit tests for the Runtime hub
//!
//! LOGGER and TUNING are global OnceLocks shared across all tests.
//! Tests touching them are marked with #[serial].

use crate::lowalt::{Runtime, EngineTuning, Error};
use crate::lowalt::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

struct TestLogger {
    entries: Arc<Mutex<Vec<(LogSeverity, String)>>>,
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        // Other tests may log concurrently; keep only this module's sources
        if entry.source.starts_with("lowalt::test") || entry.source == "lowalt::Runtime" {
            self.entries.lock().unwrap().push((entry.severity, entry.message.clone()));
        }
    }
}

fn capture() -> Arc<Mutex<Vec<(LogSeverity, String)>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Runtime::set_logger(TestLogger { entries: entries.clone() });
    entries
}

// ============================================================================
// ENGINE TUNING
// ============================================================================

#[test]
fn test_default_tuning_values() {
    let tuning = EngineTuning::default();
    assert_eq!(tuning.maximum_requests, 50);
    assert_eq!(tuning.maximum_requests_per_server, 18);
    assert_eq!(tuning.tile_cache_size, 2000);
    assert!(tuning.validate().is_ok());
}

#[test]
fn test_tuning_rejects_zero_limits() {
    let tuning = EngineTuning { maximum_requests: 0, ..EngineTuning::default() };
    assert!(matches!(tuning.validate(), Err(Error::ConfigurationError(_))));

    let tuning = EngineTuning { tile_cache_size: 0, ..EngineTuning::default() };
    assert!(matches!(tuning.validate(), Err(Error::ConfigurationError(_))));
}

#[test]
fn test_tuning_rejects_per_server_above_total() {
    let tuning = EngineTuning {
        maximum_requests: 10,
        maximum_requests_per_server: 11,
        tile_cache_size: 100,
    };
    assert!(tuning.validate().is_err());
}

#[test]
#[serial]
fn test_apply_tuning_roundtrip_and_rejection_keeps_previous() {
    let entries = capture();

    let tuning = EngineTuning {
        maximum_requests: 64,
        maximum_requests_per_server: 16,
        tile_cache_size: 4096,
    };
    Runtime::apply_tuning(tuning).unwrap();
    assert_eq!(Runtime::tuning(), tuning);

    let bad = EngineTuning { maximum_requests: 0, ..tuning };
    assert!(Runtime::apply_tuning(bad).is_err());
    assert_eq!(Runtime::tuning(), tuning);

    {
        let entries = entries.lock().unwrap();
        assert!(entries.iter().any(|(s, m)| *s == LogSeverity::Info && m.contains("64 requests")));
        assert!(entries.iter().any(|(s, _)| *s == LogSeverity::Error));
    }

    Runtime::apply_tuning(EngineTuning::default()).unwrap();
    Runtime::reset_logger();
}

// ============================================================================
// LOGGING
// ============================================================================

#[test]
#[serial]
fn test_log_macros_reach_custom_logger() {
    let entries = capture();

    crate::lowalt_trace!("lowalt::test", "trace {}", 1);
    crate::lowalt_debug!("lowalt::test", "debug {}", 2);
    crate::lowalt_info!("lowalt::test", "info {}", 3);
    crate::lowalt_warn!("lowalt::test", "warn {}", 4);
    crate::lowalt_error!("lowalt::test", "error {}", 5);

    {
        let entries = entries.lock().unwrap();
        let severities: Vec<LogSeverity> = entries.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            severities,
            vec![
                LogSeverity::Trace,
                LogSeverity::Debug,
                LogSeverity::Info,
                LogSeverity::Warn,
                LogSeverity::Error,
            ]
        );
        assert_eq!(entries[4].1, "error 5");
    }

    Runtime::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_stops_capture() {
    let entries = capture();
    Runtime::reset_logger();

    Runtime::log(LogSeverity::Info, "lowalt::test", "after reset".to_string());

    assert!(!entries.lock().unwrap().iter().any(|(_, m)| m == "after reset"));
}
