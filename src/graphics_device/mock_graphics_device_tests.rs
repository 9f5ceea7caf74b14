/// Unit tests for MockGraphicsDevice and MockBuffer.

use crate::graphics_device::{
    BufferDesc, BufferObject, BufferUsage, GraphicsDevice, Rect2D,
};
use super::*;

// ============================================================================
// MockBuffer
// ============================================================================

#[test]
fn test_mock_buffer_creation() {
    let buffer = MockBuffer::new(1024, BufferUsage::Uniform);
    assert_eq!(buffer.size(), 1024);
    assert_eq!(buffer.usage(), BufferUsage::Uniform);
}

#[test]
fn test_mock_buffer_update() {
    let buffer = MockBuffer::new(16, BufferUsage::Uniform);
    buffer.update(4, &[1, 2, 3, 4]).unwrap();

    let data = buffer.shared_data();
    let data = data.lock().unwrap();
    assert_eq!(&data[4..8], &[1, 2, 3, 4]);
    assert_eq!(&data[0..4], &[0, 0, 0, 0]);
}

#[test]
fn test_mock_buffer_update_out_of_bounds() {
    let buffer = MockBuffer::new(8, BufferUsage::Stream);
    assert!(buffer.update(4, &[0; 8]).is_err());
}

// ============================================================================
// MockGraphicsDevice
// ============================================================================

#[test]
fn test_mock_device_records_created_buffers() {
    let mut device = MockGraphicsDevice::new();
    let buffer = device
        .create_buffer_object(&BufferDesc { size: 256, usage: BufferUsage::Stream })
        .unwrap();

    assert_eq!(device.created_buffers.len(), 1);
    assert_eq!(device.created_buffers[0].size, 256);
    assert_eq!(device.created_buffers[0].usage, BufferUsage::Stream);

    // writes through the buffer are visible via the recorded handle
    buffer.update(0, &[7; 4]).unwrap();
    let data = device.created_buffers[0].data.lock().unwrap();
    assert_eq!(&data[0..4], &[7, 7, 7, 7]);
}

#[test]
fn test_mock_device_read_pixels() {
    let mut device = MockGraphicsDevice::new();
    device.pixel_data = [9, 0, 0, 0, 0, 0, 0, 0];

    let rect = Rect2D { x: 3, y: 5, width: 2, height: 2 };
    let data = device.read_pixels(rect).unwrap();

    assert_eq!(data.len(), 4 * 8);
    assert_eq!(data[0], 9);
    assert_eq!(device.read_pixels_calls.len(), 1);
    assert_eq!(device.read_pixels_calls[0], rect);
}

#[test]
fn test_mock_device_frame_time_support_flag() {
    let mut device = MockGraphicsDevice::new();
    assert!(device.is_frame_time_supported());
    device.frame_time_supported = false;
    assert!(!device.is_frame_time_supported());
}
