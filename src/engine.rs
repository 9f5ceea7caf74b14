/// Nebula Engine - singleton host for crate-wide services
///
/// The renderer core needs exactly one crate-wide service: the logger sink
/// used by the engine_* macros. It lives behind thread-safe static storage
/// so any subsystem can log without threading a logger handle through every
/// call.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Internal state structure holding crate-wide services
struct EngineState {
    /// Logger sink (swappable at runtime via set_logger)
    logger: RwLock<Box<dyn Logger>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            logger: RwLock::new(Box::new(DefaultLogger)),
        }
    }
}

// ===== PUBLIC API =====

/// Engine singleton manager
///
/// # Example
///
/// ```no_run
/// use nebula_render::nebula3d::Engine;
///
/// Engine::initialize()?;
/// // ... create views, prepare frames ...
/// Engine::shutdown();
/// # Ok::<(), nebula_render::nebula3d::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Initialize the engine
    ///
    /// Must be called once at application startup. Calling it again is a
    /// no-op; the existing state is kept.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Shutdown the engine
    ///
    /// Restores the default logger. The static storage itself cannot be
    /// deallocated; a subsequent initialize() reuses it.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut logger) = state.logger.write() {
                *logger = Box::new(DefaultLogger);
            }
        }
    }

    /// Whether initialize() has been called
    pub fn is_initialized() -> bool {
        ENGINE_STATE.get().is_some()
    }

    /// Replace the logger sink used by the engine_* macros
    ///
    /// Returns an error if the engine was never initialized.
    pub fn set_logger(logger: Box<dyn Logger>) -> Result<()> {
        let state = ENGINE_STATE.get().ok_or_else(|| {
            Error::InitializationFailed("Engine::set_logger called before initialize".to_string())
        })?;
        let mut guard = state.logger.write().map_err(|_| {
            Error::InitializationFailed("logger lock poisoned".to_string())
        })?;
        *guard = logger;
        Ok(())
    }

    /// Log a message (used by the engine_trace!/debug!/info!/warn! macros)
    ///
    /// Messages emitted before initialize() are dropped silently.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }

    /// Log a message with file:line details (used by engine_error!)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }

    fn dispatch(entry: LogEntry) {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(logger) = state.logger.read() {
                logger.log(&entry);
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
