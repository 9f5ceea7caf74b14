/// Graphics device module - the GPU/driver boundary of the renderer core
///
/// The core never talks to a GPU API directly. Buffer creation, buffer
/// updates, and pixel readback go through the GraphicsDevice trait; backend
/// implementations (Vulkan, Direct3D 12, etc.) live in separate crates.

// Module declarations
pub mod graphics_device;
pub mod buffer;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer::*;

// Mock graphics device (no GPU required) — used by unit and integration tests
pub mod mock_graphics_device;
