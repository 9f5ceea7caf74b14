/// Mock graphics device — records every call, touches no GPU.
///
/// Buffer contents are kept in shared shadow storage so tests can inspect
/// what the renderer core uploaded after the buffer box has been handed
/// over to the View.

use std::sync::{Arc, Mutex};
use crate::error::{Result, Error};
use super::buffer::{BufferDesc, BufferObject, BufferUsage};
use super::graphics_device::{GraphicsDevice, Rect2D};

/// CPU-side buffer backed by shared shadow storage
pub struct MockBuffer {
    size: u64,
    usage: BufferUsage,
    data: Arc<Mutex<Vec<u8>>>,
}

impl MockBuffer {
    pub fn new(size: u64, usage: BufferUsage) -> Self {
        Self {
            size,
            usage,
            data: Arc::new(Mutex::new(vec![0u8; size as usize])),
        }
    }

    /// Shared handle to the shadow storage (for test inspection)
    pub fn shared_data(&self) -> Arc<Mutex<Vec<u8>>> {
        Arc::clone(&self.data)
    }

    pub fn usage(&self) -> BufferUsage {
        self.usage
    }
}

impl BufferObject for MockBuffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let end = offset as usize + data.len();
        if end > self.size as usize {
            return Err(Error::InvalidResource(format!(
                "buffer update out of bounds: {} > {}",
                end, self.size
            )));
        }
        let mut storage = self.data.lock().map_err(|_| {
            Error::BackendError("mock buffer lock poisoned".to_string())
        })?;
        storage[offset as usize..end].copy_from_slice(data);
        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }
}

/// Record of one buffer created through the mock device
pub struct MockBufferRecord {
    pub size: u64,
    pub usage: BufferUsage,
    pub data: Arc<Mutex<Vec<u8>>>,
}

/// Mock graphics device
///
/// Records created buffers and readback calls. `read_pixels` returns the
/// configured `pixel_data` repeated per requested pixel.
pub struct MockGraphicsDevice {
    /// Every buffer ever created, in creation order
    pub created_buffers: Vec<MockBufferRecord>,
    /// Readback regions requested via read_pixels
    pub read_pixels_calls: Vec<Rect2D>,
    /// 8 bytes returned for each pixel of a readback
    pub pixel_data: [u8; 8],
    /// Reported frame-timing capability
    pub frame_time_supported: bool,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            created_buffers: Vec::new(),
            read_pixels_calls: Vec::new(),
            pixel_data: [0u8; 8],
            frame_time_supported: true,
        }
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer_object(&mut self, desc: &BufferDesc) -> Result<Box<dyn BufferObject>> {
        let buffer = MockBuffer::new(desc.size, desc.usage);
        self.created_buffers.push(MockBufferRecord {
            size: desc.size,
            usage: desc.usage,
            data: buffer.shared_data(),
        });
        Ok(Box::new(buffer))
    }

    fn read_pixels(&mut self, rect: Rect2D) -> Result<Vec<u8>> {
        self.read_pixels_calls.push(rect);
        let pixel_count = (rect.width * rect.height) as usize;
        let mut out = Vec::with_capacity(pixel_count * 8);
        for _ in 0..pixel_count {
            out.extend_from_slice(&self.pixel_data);
        }
        Ok(out)
    }

    fn is_frame_time_supported(&self) -> bool {
        self.frame_time_supported
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
