//! Error types for the Nebula renderer
//!
//! This module defines the error types used throughout the renderer,
//! including GPU resource creation, frame preparation, and configuration.

use std::fmt;

/// Result type for Nebula renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Nebula renderer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (Vulkan, DirectX, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (buffer, render target, light instance, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, view, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an `Error::InvalidResource` and log it with ERROR severity.
///
/// # Example
///
/// ```no_run
/// use nebula_render::engine_err;
///
/// let err = engine_err!("nebula3d::View", "buffer not created");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::nebula3d::Error::InvalidResource(message)
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
