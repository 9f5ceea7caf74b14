//! Unit tests for log.rs
//!
//! Tests severity ordering, labels, log entry construction, and the
//! default logger (output goes to stdout; we only check it doesn't panic).

use std::time::SystemTime;
use super::*;

// ============================================================================
// LogSeverity
// ============================================================================

#[test]
fn test_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_severity_labels() {
    // labels are padded to a fixed width for column alignment
    assert_eq!(LogSeverity::Trace.label(), "TRACE");
    assert_eq!(LogSeverity::Debug.label(), "DEBUG");
    assert_eq!(LogSeverity::Info.label(), "INFO ");
    assert_eq!(LogSeverity::Warn.label(), "WARN ");
    assert_eq!(LogSeverity::Error.label(), "ERROR");
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
}

// ============================================================================
// LogEntry
// ============================================================================

#[test]
fn test_log_entry_clone() {
    let entry = LogEntry {
        severity: LogSeverity::Info,
        timestamp: SystemTime::now(),
        source: "nebula3d::View".to_string(),
        message: "hello".to_string(),
        file: None,
        line: None,
    };
    let cloned = entry.clone();
    assert_eq!(cloned.source, "nebula3d::View");
    assert_eq!(cloned.message, "hello");
    assert_eq!(cloned.severity, LogSeverity::Info);
}

// ============================================================================
// DefaultLogger
// ============================================================================

#[test]
fn test_default_logger_plain_entry() {
    let logger = DefaultLogger;
    logger.log(&LogEntry {
        severity: LogSeverity::Debug,
        timestamp: SystemTime::now(),
        source: "nebula3d::Test".to_string(),
        message: "plain entry".to_string(),
        file: None,
        line: None,
    });
}

#[test]
fn test_default_logger_detailed_entry() {
    let logger = DefaultLogger;
    logger.log(&LogEntry {
        severity: LogSeverity::Error,
        timestamp: SystemTime::now(),
        source: "nebula3d::Test".to_string(),
        message: "detailed entry".to_string(),
        file: Some("log_tests.rs"),
        line: Some(42),
    });
}
