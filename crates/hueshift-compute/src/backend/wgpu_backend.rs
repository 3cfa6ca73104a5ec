//! wgpu backend implementation.
//!
//! The source image lives in an `Rgba8Unorm` texture. Each remap pass renders
//! a full-screen quad into a fresh `Rgba8Unorm` target with the
//! [`HUE_REMAP`](crate::shaders::HUE_REMAP) fragment shader; downloads copy the
//! target into a row-padded staging buffer and strip the padding.

use bytemuck::{Pod, Zeroable};
use tracing::{debug, info};
use wgpu::util::DeviceExt;

use hueshift_core::{HueRemap, RasterImage};

use super::handle::{AsAny, ImageHandle};
use super::{BackendLimits, ProcessingBackend};
use crate::shaders;
use crate::{ComputeError, ComputeResult};

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Remap parameters uniform, laid out as the shader's `Params`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct ParamsUniform {
    start: f32,
    end: f32,
    output: f32,
    _pad: f32,
}

impl From<&HueRemap> for ParamsUniform {
    fn from(r: &HueRemap) -> Self {
        Self {
            start: r.arc.start as f32,
            end: r.arc.end as f32,
            output: r.output as f32,
            _pad: 0.0,
        }
    }
}

/// GPU texture handle.
pub struct WgpuImage {
    texture: wgpu::Texture,
    width: u32,
    height: u32,
}

impl AsAny for WgpuImage {
    fn as_any(&self) -> &dyn std::any::Any { self }
}

impl ImageHandle for WgpuImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn downcast(handle: &dyn ImageHandle) -> ComputeResult<&WgpuImage> {
    handle
        .as_any()
        .downcast_ref::<WgpuImage>()
        .ok_or(ComputeError::ForeignHandle { expected: "wgpu" })
}

fn padded_row_bytes(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * 4).div_ceil(align) * align
}

fn adapter_options() -> wgpu::RequestAdapterOptions<'static, 'static> {
    wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: None,
        force_fallback_adapter: false,
    }
}

/// wgpu backend.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::RenderPipeline,
    limits: BackendLimits,
    adapter_name: String,
}

impl WgpuBackend {
    /// Check if a wgpu adapter can be found.
    pub fn is_available() -> bool {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });
            instance.request_adapter(&adapter_options()).await.is_some()
        })
    }

    /// Create a new backend on the preferred adapter.
    pub fn new() -> ComputeResult<Self> {
        pollster::block_on(Self::new_async())
    }

    /// Create a new backend asynchronously.
    pub async fn new_async() -> ComputeResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&adapter_options())
            .await
            .ok_or(ComputeError::NoAdapter)?;

        let adapter_limits = adapter.limits();
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("hueshift_device"),
                required_features: wgpu::Features::empty(),
                required_limits: adapter_limits.clone(),
                memory_hints: wgpu::MemoryHints::Performance,
                ..Default::default()
            }, None)
            .await
            .map_err(|e| ComputeError::DeviceCreation(e.to_string()))?;

        let adapter_info = adapter.get_info();
        info!(adapter = %adapter_info.name, backend = ?adapter_info.backend, "wgpu device ready");

        let limits = BackendLimits {
            max_texture_dim: adapter_limits.max_texture_dimension_2d,
            max_buffer_bytes: adapter_limits.max_buffer_size,
        };
        let pipeline = Self::create_pipeline(&device);

        Ok(Self {
            device,
            queue,
            pipeline,
            limits,
            adapter_name: adapter_info.name,
        })
    }

    /// Name reported by the driver.
    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }

    fn create_pipeline(device: &wgpu::Device) -> wgpu::RenderPipeline {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("hue_remap_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::HUE_REMAP.into()),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("hue_remap_pipeline"),
            layout: None, // Auto layout
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_texture(&self, width: u32, height: u32, label: &str) -> wgpu::Texture {
        self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        })
    }
}

impl ProcessingBackend for WgpuBackend {
    fn name(&self) -> &'static str {
        "wgpu"
    }

    fn limits(&self) -> &BackendLimits {
        &self.limits
    }

    fn upload(&self, image: &RasterImage) -> ComputeResult<Box<dyn ImageHandle>> {
        let (width, height) = image.dimensions();
        self.limits.check(width, height, wgpu::COPY_BYTES_PER_ROW_ALIGNMENT as u64)?;

        let texture = self.create_texture(width, height, "source_texture");
        // write_texture has no row alignment requirement
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.data(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            texture.size(),
        );
        debug!(width, height, "uploaded source texture");

        Ok(Box::new(WgpuImage { texture, width, height }))
    }

    fn download(&self, handle: &dyn ImageHandle) -> ComputeResult<RasterImage> {
        let img = downcast(handle)?;
        let (width, height) = (img.width, img.height);
        let padded = padded_row_bytes(width);
        let row = (width * 4) as usize;

        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("staging_buffer"),
            size: padded as u64 * height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self.device.create_command_encoder(&Default::default());
        encoder.copy_texture_to_buffer(
            img.texture.as_image_copy(),
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(height),
                },
            },
            img.texture.size(),
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        // Map and read
        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |r| { let _ = tx.send(r); });
        self.device.poll(wgpu::Maintain::Wait);

        rx.recv()
            .map_err(|_| ComputeError::OperationFailed("Map channel closed".into()))?
            .map_err(|e| ComputeError::OperationFailed(format!("Map failed: {e}")))?;

        let mapped = slice.get_mapped_range();
        let mut data = Vec::with_capacity(row * height as usize);
        for line in mapped.chunks_exact(padded as usize) {
            data.extend_from_slice(&line[..row]);
        }
        drop(mapped);
        staging.unmap();

        Ok(RasterImage::from_rgba8(width, height, data)?)
    }

    fn apply_hue_remap(&self, src: &dyn ImageHandle, remap: &HueRemap) -> ComputeResult<Box<dyn ImageHandle>> {
        let src = downcast(src)?;
        let (width, height) = (src.width, src.height);
        let target = self.create_texture(width, height, "remap_target");

        let params = ParamsUniform::from(remap);
        let params_buf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("remap_params"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        debug_assert_eq!(std::mem::size_of::<ParamsUniform>() as u64, shaders::UNIFORM_SIZE);

        let src_view = src.texture.create_view(&Default::default());
        let target_view = target.create_view(&Default::default());

        let layout = self.pipeline.get_bind_group_layout(0);
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("remap_bind_group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&src_view) },
                wgpu::BindGroupEntry { binding: 1, resource: params_buf.as_entire_binding() },
            ],
        });

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("remap_encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("remap_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.draw(0..6, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.device.poll(wgpu::Maintain::Wait);
        debug!(width, height, start = params.start, end = params.end, output = params.output, "gpu remap pass");

        Ok(Box::new(WgpuImage { texture: target, width, height }))
    }
}
