//! Stateful renderer for interactive editing.
//!
//! The source image is uploaded once by [`Renderer::set_image`]; each call to
//! [`Renderer::render`] runs a fresh pass from that source with the current
//! [`HueRemap`], so edits never compound.

use hueshift_core::{HueRemap, RasterImage};
use tracing::{debug, trace};

use crate::backend::{create_backend, Backend, ImageHandle, ProcessingBackend};
use crate::ComputeResult;

/// Holds an uploaded source and the current remap configuration.
pub struct Renderer {
    backend: Box<dyn ProcessingBackend>,
    source: Option<Box<dyn ImageHandle>>,
    remap: HueRemap,
}

impl Renderer {
    /// Create a renderer with the default configuration and no image.
    pub fn new(backend: Backend) -> ComputeResult<Self> {
        Ok(Self::with_backend(create_backend(backend)?))
    }

    /// Wrap an existing backend.
    pub fn with_backend(backend: Box<dyn ProcessingBackend>) -> Self {
        Self {
            backend,
            source: None,
            remap: HueRemap::default(),
        }
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Upload a new source, replacing the previous one.
    pub fn set_image(&mut self, image: &RasterImage) -> ComputeResult<()> {
        self.source = Some(self.backend.upload(image)?);
        debug!(backend = self.backend_name(), width = image.width(), height = image.height(), "source set");
        Ok(())
    }

    /// Drop the current source.
    pub fn clear_image(&mut self) {
        self.source = None;
    }

    /// True once a source is loaded.
    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Dimensions of the loaded source.
    pub fn image_dimensions(&self) -> Option<(u32, u32)> {
        self.source.as_ref().map(|s| s.dimensions())
    }

    /// Current configuration.
    pub fn remap(&self) -> &HueRemap {
        &self.remap
    }

    /// Replace the whole configuration.
    pub fn set_remap(&mut self, remap: HueRemap) {
        self.remap = remap;
    }

    /// Set the arc start, degrees.
    pub fn set_input_start_angle(&mut self, degrees: f64) {
        self.remap = self.remap.with_start(degrees);
    }

    /// Set the arc end, degrees.
    pub fn set_input_end_angle(&mut self, degrees: f64) {
        self.remap = self.remap.with_end(degrees);
    }

    /// Set the output hue, degrees.
    pub fn set_output_angle(&mut self, degrees: f64) {
        self.remap = self.remap.with_output(degrees);
    }

    /// Render with the current configuration; `None` without a source.
    pub fn render(&self) -> ComputeResult<Option<RasterImage>> {
        self.render_with(&self.remap)
    }

    /// Render an explicit configuration; `None` without a source.
    pub fn render_with(&self, remap: &HueRemap) -> ComputeResult<Option<RasterImage>> {
        let Some(source) = self.source.as_deref() else {
            trace!("render skipped, no image");
            return Ok(None);
        };
        let out = self.backend.apply_hue_remap(source, remap)?;
        self.backend.download(out.as_ref()).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_without_image_is_noop() {
        let r = Renderer::new(Backend::Cpu).unwrap();
        assert!(!r.has_image());
        assert!(r.render().unwrap().is_none());
    }

    #[test]
    fn angle_setters_update_config() {
        let mut r = Renderer::new(Backend::Cpu).unwrap();
        assert_eq!(*r.remap(), HueRemap::new(150.0, 270.0, 60.0));
        r.set_input_start_angle(350.0);
        r.set_input_end_angle(20.0);
        r.set_output_angle(480.0);
        assert_eq!(*r.remap(), HueRemap::new(350.0, 20.0, 120.0));
    }

    #[test]
    fn renders_do_not_compound() {
        let mut r = Renderer::new(Backend::Cpu).unwrap();
        let src = RasterImage::filled(2, 2, [0, 0, 255, 255]).unwrap();
        r.set_image(&src).unwrap();
        assert_eq!(r.image_dimensions(), Some((2, 2)));

        let first = r.render().unwrap().unwrap();
        assert_eq!(first.pixel(0, 0).unwrap(), [255, 255, 0, 255]);

        // yellow (60) is outside the default arc; a compounding renderer
        // would now leave the image untouched
        r.set_output_angle(0.0);
        let second = r.render().unwrap().unwrap();
        assert_eq!(second.pixel(0, 0).unwrap(), [255, 0, 0, 255]);
    }

    #[test]
    fn clear_image() {
        let mut r = Renderer::new(Backend::Cpu).unwrap();
        r.set_image(&RasterImage::new(1, 1).unwrap()).unwrap();
        r.clear_image();
        assert!(r.render().unwrap().is_none());
    }
}
