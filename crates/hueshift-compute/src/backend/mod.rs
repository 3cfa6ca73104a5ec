//! Hue remap backends with automatic selection.
//!
//! Every backend takes an uploaded source handle and returns a new handle for
//! the output; sources are never written, so one upload serves any number of
//! remap passes.

mod detect;
mod handle;
mod limits;
mod cpu_backend;

#[cfg(feature = "wgpu")]
mod wgpu_backend;

pub use cpu_backend::{CpuBackend, CpuImage};
pub use detect::{describe_backends, detect_backends, select_best_backend, BackendInfo};
pub use handle::{AsAny, ImageHandle};
pub use limits::BackendLimits;

#[cfg(feature = "wgpu")]
pub use wgpu_backend::{WgpuBackend, WgpuImage};

use hueshift_core::{HueRemap, RasterImage};
use tracing::info;

use crate::ComputeResult;
#[cfg(not(feature = "wgpu"))]
use crate::ComputeError;

/// Available compute backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Auto-select best available (wgpu > CPU).
    #[default]
    Auto,
    /// CPU backend running the reference kernel.
    Cpu,
    /// wgpu backend (Vulkan/Metal/DX12/GL).
    Wgpu,
}

impl Backend {
    /// Check if this backend is available on current system.
    pub fn is_available(&self) -> bool {
        match self {
            Self::Auto => true,
            Self::Cpu => true,
            #[cfg(feature = "wgpu")]
            Self::Wgpu => WgpuBackend::is_available(),
            #[cfg(not(feature = "wgpu"))]
            Self::Wgpu => false,
        }
    }

    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cpu => "cpu",
            Self::Wgpu => "wgpu",
        }
    }
}

/// Trait for hue remap backends.
pub trait ProcessingBackend: Send + Sync {
    /// Backend name.
    fn name(&self) -> &'static str;

    /// Resource limits.
    fn limits(&self) -> &BackendLimits;

    /// Upload an image to backend memory.
    fn upload(&self, image: &RasterImage) -> ComputeResult<Box<dyn ImageHandle>>;

    /// Download an image from backend memory.
    fn download(&self, handle: &dyn ImageHandle) -> ComputeResult<RasterImage>;

    /// Run one remap pass over `src` into a new handle.
    fn apply_hue_remap(&self, src: &dyn ImageHandle, remap: &HueRemap) -> ComputeResult<Box<dyn ImageHandle>>;
}

/// Create a backend instance.
pub fn create_backend(backend: Backend) -> ComputeResult<Box<dyn ProcessingBackend>> {
    match backend {
        Backend::Auto => {
            let best = select_best_backend();
            info!(backend = best.name(), "auto-selected backend");
            create_backend(best)
        }
        Backend::Cpu => Ok(Box::new(CpuBackend::new())),
        Backend::Wgpu => {
            #[cfg(feature = "wgpu")]
            {
                Ok(Box::new(WgpuBackend::new()?))
            }
            #[cfg(not(feature = "wgpu"))]
            {
                Err(ComputeError::BackendNotAvailable(
                    "wgpu feature not enabled".to_string()
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(Backend::Auto.name(), "auto");
        assert_eq!(Backend::Cpu.name(), "cpu");
        assert_eq!(Backend::Wgpu.name(), "wgpu");
    }

    #[test]
    fn cpu_always_available() {
        assert!(Backend::Cpu.is_available());
        assert!(Backend::Auto.is_available());
        assert_eq!(create_backend(Backend::Cpu).unwrap().name(), "cpu");
    }

    #[cfg(not(feature = "wgpu"))]
    #[test]
    fn wgpu_unavailable_without_feature() {
        assert!(!Backend::Wgpu.is_available());
        assert!(matches!(
            create_backend(Backend::Wgpu),
            Err(ComputeError::BackendNotAvailable(_))
        ));
    }
}
