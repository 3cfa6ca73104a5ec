//! One-shot remap API.
//!
//! ```ignore
//! use hueshift_compute::{Backend, Processor};
//!
//! let proc = Processor::auto()?;
//! let out = proc.remap(&image, &HueRemap::new(150.0, 270.0, 60.0))?;
//! ```

use hueshift_core::{HueRemap, RasterImage};
use tracing::debug;

use crate::backend::{create_backend, Backend, BackendLimits, ProcessingBackend};
use crate::ComputeResult;

/// Uploads, remaps and downloads in one call.
pub struct Processor {
    backend: Box<dyn ProcessingBackend>,
}

impl Processor {
    /// Create a processor on the given backend.
    pub fn new(backend: Backend) -> ComputeResult<Self> {
        Ok(Self { backend: create_backend(backend)? })
    }

    /// Create a processor on the best available backend.
    pub fn auto() -> ComputeResult<Self> {
        Self::new(Backend::Auto)
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Limits of the backend in use.
    pub fn limits(&self) -> &BackendLimits {
        self.backend.limits()
    }

    /// Remap `image`, leaving it untouched.
    pub fn remap(&self, image: &RasterImage, remap: &HueRemap) -> ComputeResult<RasterImage> {
        debug!(backend = self.backend_name(), width = image.width(), height = image.height(), "remap");
        let src = self.backend.upload(image)?;
        let out = self.backend.apply_hue_remap(src.as_ref(), remap)?;
        self.backend.download(out.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_processor_remaps() {
        let proc = Processor::new(Backend::Cpu).unwrap();
        assert_eq!(proc.backend_name(), "cpu");

        let img = RasterImage::from_rgba8(2, 1, vec![0, 0, 255, 10, 255, 0, 0, 20]).unwrap();
        let out = proc.remap(&img, &HueRemap::default()).unwrap();
        assert_eq!(out.data(), &[255, 255, 0, 10, 255, 0, 0, 20]);
    }
}
