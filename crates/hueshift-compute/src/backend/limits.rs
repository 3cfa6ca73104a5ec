//! Backend resource limits.

use crate::{ComputeError, ComputeResult};

/// Resource limits of a compute backend.
#[derive(Debug, Clone)]
pub struct BackendLimits {
    /// Maximum texture dimension (width or height).
    pub max_texture_dim: u32,
    /// Maximum buffer size in bytes.
    pub max_buffer_bytes: u64,
}

impl Default for BackendLimits {
    fn default() -> Self {
        Self {
            max_texture_dim: 8192,
            max_buffer_bytes: 256 * 1024 * 1024, // 256 MB
        }
    }
}

impl BackendLimits {
    /// No limits; used by the CPU backend.
    pub fn unlimited() -> Self {
        Self {
            max_texture_dim: u32::MAX,
            max_buffer_bytes: u64::MAX,
        }
    }

    /// Check that a `width` x `height` RGBA8 image with rows padded to
    /// `row_align` bytes fits.
    pub fn check(&self, width: u32, height: u32, row_align: u64) -> ComputeResult<()> {
        let largest = width.max(height);
        if largest > self.max_texture_dim {
            return Err(ComputeError::ImageTooLarge { width, height, limit: self.max_texture_dim });
        }
        let row = (width as u64 * 4).div_ceil(row_align) * row_align;
        if row * height as u64 > self.max_buffer_bytes {
            return Err(ComputeError::ImageTooLarge { width, height, limit: self.max_texture_dim });
        }
        Ok(())
    }
}
