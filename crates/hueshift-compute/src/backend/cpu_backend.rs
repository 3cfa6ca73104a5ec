//! CPU backend running the reference kernel.
//!
//! With the `parallel` feature the buffer is split into bands of whole rows
//! and swept on the rayon pool. Every pixel is independent, so the output is
//! identical to a single-threaded sweep.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use hueshift_core::{remap_in_place, HueRemap, RasterImage, RemapStats};

use super::handle::{AsAny, ImageHandle};
use super::{BackendLimits, ProcessingBackend};
use crate::{ComputeError, ComputeResult};

/// Rows per parallel work item.
#[cfg(feature = "parallel")]
const ROWS_PER_BAND: usize = 16;

/// CPU image handle - pixels stay in the shared raster buffer.
pub struct CpuImage {
    image: RasterImage,
}

impl CpuImage {
    pub fn new(image: RasterImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RasterImage {
        &self.image
    }
}

impl AsAny for CpuImage {
    fn as_any(&self) -> &dyn std::any::Any { self }
}

impl ImageHandle for CpuImage {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// CPU backend.
pub struct CpuBackend {
    limits: BackendLimits,
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuBackend {
    pub fn new() -> Self {
        Self { limits: BackendLimits::unlimited() }
    }

    /// Remap a copy of `src`, returning the pass counters as well.
    pub fn remap_image(&self, src: &RasterImage, remap: &HueRemap) -> ComputeResult<(RasterImage, RemapStats)> {
        let mut out = src.clone();
        let stride = out.stride();
        let stats = sweep(out.data_mut(), stride, remap)?;
        debug!(pixels = stats.pixels, remapped = stats.remapped, "cpu remap pass");
        Ok((out, stats))
    }
}

#[cfg(feature = "parallel")]
fn sweep(data: &mut [u8], stride: usize, remap: &HueRemap) -> ComputeResult<RemapStats> {
    Ok(data
        .par_chunks_mut(stride * ROWS_PER_BAND)
        .map(|band| remap_in_place(band, 4, remap))
        .try_reduce(RemapStats::default, |a, b| Ok(a + b))?)
}

#[cfg(not(feature = "parallel"))]
fn sweep(data: &mut [u8], _stride: usize, remap: &HueRemap) -> ComputeResult<RemapStats> {
    Ok(remap_in_place(data, 4, remap)?)
}

fn downcast(handle: &dyn ImageHandle) -> ComputeResult<&CpuImage> {
    handle
        .as_any()
        .downcast_ref::<CpuImage>()
        .ok_or(ComputeError::ForeignHandle { expected: "cpu" })
}

impl ProcessingBackend for CpuBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn limits(&self) -> &BackendLimits {
        &self.limits
    }

    fn upload(&self, image: &RasterImage) -> ComputeResult<Box<dyn ImageHandle>> {
        Ok(Box::new(CpuImage::new(image.clone())))
    }

    fn download(&self, handle: &dyn ImageHandle) -> ComputeResult<RasterImage> {
        Ok(downcast(handle)?.image.clone())
    }

    fn apply_hue_remap(&self, src: &dyn ImageHandle, remap: &HueRemap) -> ComputeResult<Box<dyn ImageHandle>> {
        let (out, _) = self.remap_image(&downcast(src)?.image, remap)?;
        Ok(Box::new(CpuImage::new(out)))
    }
}
