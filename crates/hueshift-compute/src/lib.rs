//! CPU and GPU hue remap backends.
//!
//! Both backends produce the same output for the same [`HueRemap`]: the CPU
//! backend runs the reference kernel from `hueshift-core` (split across the
//! rayon pool when the `parallel` feature is on), the wgpu backend runs the
//! equivalent WGSL fragment shader over a full-screen quad.
//!
//! # Architecture
//!
//! ```text
//! Processor (one-shot)     Renderer (source uploaded once, re-rendered per edit)
//!        \                    /
//!         ProcessingBackend trait
//!             +-- CpuBackend  (hueshift-core kernel, rayon)
//!             +-- WgpuBackend (render pipeline, Vulkan/Metal/DX12/GL)
//! ```
//!
//! # Example
//!
//! ```
//! use hueshift_compute::{Backend, Processor};
//! use hueshift_core::{HueRemap, RasterImage};
//!
//! let proc = Processor::new(Backend::Cpu).unwrap();
//! let img = RasterImage::filled(2, 2, [0, 0, 255, 255]).unwrap();
//! let out = proc.remap(&img, &HueRemap::default()).unwrap();
//! assert_eq!(out.pixel(0, 0).unwrap(), [255, 255, 0, 255]);
//! ```
//!
//! [`HueRemap`]: hueshift_core::HueRemap

pub mod backend;
pub mod processor;
pub mod renderer;
pub mod shaders;

pub use backend::{
    create_backend, describe_backends, detect_backends, select_best_backend, Backend, BackendInfo,
    BackendLimits, CpuBackend, ImageHandle, ProcessingBackend,
};
#[cfg(feature = "wgpu")]
pub use backend::WgpuBackend;
pub use processor::Processor;
pub use renderer::Renderer;

use thiserror::Error;

/// Backend errors.
#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("No suitable GPU adapter found")]
    NoAdapter,

    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("Failed to create device: {0}")]
    DeviceCreation(String),

    #[error("Image too large: {width}x{height} exceeds GPU limit {limit}")]
    ImageTooLarge { width: u32, height: u32, limit: u32 },

    #[error("Image handle belongs to a different backend (expected {expected})")]
    ForeignHandle { expected: &'static str },

    #[error("GPU operation failed: {0}")]
    OperationFailed(String),

    #[error(transparent)]
    Image(#[from] hueshift_core::Error),
}

pub type ComputeResult<T> = Result<T, ComputeError>;
