//! wgpu render backend
//!
//! Owns the surface, device, pipelines, and all uploaded GPU resources.
//! One forward pass per frame: opaque meshes front to back as
//! submitted, then the skybox behind everything.
//!
//! Per-object data lives in a single uniform buffer indexed with
//! dynamic offsets, so the backend allocates one bind group for any
//! number of draws.

use bytemuck::{Pod, Zeroable};
use slotmap::SlotMap;
use wgpu::util::DeviceExt;

use crate::assets::{CubeImageData, ImageData};
use crate::render::api::{
    BackendError, BackendResult, DrawItem, FrameDesc, MeshHandle, RenderBackend, TextureHandle,
};
use crate::render::primitives::{Mesh, Vertex};
use crate::render::resources::MaterialUbo;
use crate::render::systems::FrameLightData;
use crate::render::window::WindowHandle;

/// Depth buffer format
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Stride between per-object uniform entries
///
/// Must satisfy `min_uniform_buffer_offset_alignment`, which is at most
/// 256 on all supported adapters.
const OBJECT_STRIDE: u64 = 256;

/// Initial per-object uniform capacity, grown on demand
const INITIAL_OBJECT_CAPACITY: u32 = 64;

/// Per-frame uniform block shared by the scene and skybox pipelines
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    skybox_view_proj: [[f32; 4]; 4],
    lights: FrameLightData,
}

/// Per-object uniform block, written at a dynamic offset per draw
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    material: MaterialUbo,
}

/// A mesh uploaded to the GPU
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Distinguishes flat textures from cubemaps at draw time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextureKind {
    Flat,
    Cube,
}

/// A texture uploaded to the GPU with its ready-made bind group
struct GpuTexture {
    kind: TextureKind,
    bind_group: wgpu::BindGroup,
}

/// Forward renderer on wgpu
pub struct WgpuBackend {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    object_capacity: u32,
    object_layout: wgpu::BindGroupLayout,

    texture_layout: wgpu::BindGroupLayout,
    skybox_layout: wgpu::BindGroupLayout,
    texture_sampler: wgpu::Sampler,
    skybox_sampler: wgpu::Sampler,
    fallback_texture: wgpu::BindGroup,

    scene_pipeline: wgpu::RenderPipeline,
    scene_pipeline_no_cull: wgpu::RenderPipeline,
    skybox_pipeline: wgpu::RenderPipeline,
    skybox_mesh: GpuMesh,

    meshes: SlotMap<MeshHandle, GpuMesh>,
    textures: SlotMap<TextureHandle, GpuTexture>,
}

impl WgpuBackend {
    /// Create the backend for a window surface
    pub fn new(window: &WindowHandle, application_name: &str) -> BackendResult<Self> {
        let (width, height) = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.window())
            .map_err(|e| BackendError::InitializationFailed(format!("Surface creation: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| {
            BackendError::InitializationFailed("No compatible GPU adapter found".into())
        })?;

        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some(application_name),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        ))
        .map_err(|e| BackendError::InitializationFailed(format!("Device request: {e}")))?;

        let config = surface
            .get_default_config(&adapter, width, height)
            .ok_or_else(|| {
                BackendError::InitializationFailed("Surface is incompatible with adapter".into())
            })?;
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, width, height);

        // Group 0: frame uniforms
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<FrameUniforms>() as u64
                    ),
                },
                count: None,
            }],
        });

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        // Group 1: per-object uniforms at dynamic offsets
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ObjectUniforms>() as u64
                    ),
                },
                count: None,
            }],
        });

        let (object_buffer, object_bind_group) =
            create_object_buffer(&device, &object_layout, INITIAL_OBJECT_CAPACITY);

        // Group 2: material texture
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_layout"),
            entries: &texture_layout_entries(wgpu::TextureViewDimension::D2),
        });

        // Skybox group 1: cube texture
        let skybox_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("skybox_layout"),
            entries: &texture_layout_entries(wgpu::TextureViewDimension::Cube),
        });

        let texture_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("texture_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let skybox_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("skybox_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });
        let skybox_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("skybox_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/skybox.wgsl").into()),
        });

        let scene_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("scene_pipeline_layout"),
                bind_group_layouts: &[&frame_layout, &object_layout, &texture_layout],
                push_constant_ranges: &[],
            });
        let skybox_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("skybox_pipeline_layout"),
                bind_group_layouts: &[&frame_layout, &skybox_layout],
                push_constant_ranges: &[],
            });

        let scene_pipeline = create_scene_pipeline(
            &device,
            &scene_pipeline_layout,
            &scene_shader,
            config.format,
            Some(wgpu::Face::Back),
        );
        let scene_pipeline_no_cull = create_scene_pipeline(
            &device,
            &scene_pipeline_layout,
            &scene_shader,
            config.format,
            None,
        );
        let skybox_pipeline =
            create_skybox_pipeline(&device, &skybox_pipeline_layout, &skybox_shader, config.format);

        let skybox_mesh = upload_mesh(&device, &Mesh::skybox(1.0));

        let fallback_image = ImageData::solid_color(1, 1, [255, 255, 255, 255]);
        let fallback_texture = create_flat_texture_bind_group(
            &device,
            &queue,
            &texture_layout,
            &texture_sampler,
            &fallback_image,
        );

        log::info!(
            "wgpu backend initialized ({}x{}, {:?})",
            width,
            height,
            config.format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            frame_buffer,
            frame_bind_group,
            object_buffer,
            object_bind_group,
            object_capacity: INITIAL_OBJECT_CAPACITY,
            object_layout,
            texture_layout,
            skybox_layout,
            texture_sampler,
            skybox_sampler,
            fallback_texture,
            scene_pipeline,
            scene_pipeline_no_cull,
            skybox_pipeline,
            skybox_mesh,
            meshes: SlotMap::with_key(),
            textures: SlotMap::with_key(),
        })
    }

    /// Grow the per-object uniform buffer so `count` draws fit
    fn ensure_object_capacity(&mut self, count: usize) {
        let needed = u32::try_from(count).unwrap_or(u32::MAX);
        if needed <= self.object_capacity {
            return;
        }
        let capacity = needed.next_power_of_two();
        log::debug!(
            "Growing object uniform buffer: {} -> {} entries",
            self.object_capacity,
            capacity
        );
        let (buffer, bind_group) = create_object_buffer(&self.device, &self.object_layout, capacity);
        self.object_buffer = buffer;
        self.object_bind_group = bind_group;
        self.object_capacity = capacity;
    }

    /// Write per-draw uniforms at their dynamic offsets
    fn write_object_uniforms(&self, draws: &[DrawItem]) {
        for (index, draw) in draws.iter().enumerate() {
            let uniforms = ObjectUniforms {
                model: draw.model_matrix.into(),
                material: draw.material,
            };
            self.queue.write_buffer(
                &self.object_buffer,
                index as u64 * OBJECT_STRIDE,
                bytemuck::bytes_of(&uniforms),
            );
        }
    }
}

impl RenderBackend for WgpuBackend {
    fn create_mesh(&mut self, mesh: &Mesh) -> BackendResult<MeshHandle> {
        if mesh.vertices.is_empty() || mesh.indices.is_empty() {
            return Err(BackendError::ResourceCreationFailed(
                "Mesh has no geometry".into(),
            ));
        }
        let gpu_mesh = upload_mesh(&self.device, mesh);
        Ok(self.meshes.insert(gpu_mesh))
    }

    fn create_texture(&mut self, image: &ImageData) -> BackendResult<TextureHandle> {
        let bind_group = create_flat_texture_bind_group(
            &self.device,
            &self.queue,
            &self.texture_layout,
            &self.texture_sampler,
            image,
        );
        Ok(self.textures.insert(GpuTexture {
            kind: TextureKind::Flat,
            bind_group,
        }))
    }

    fn create_cube_texture(&mut self, image: &CubeImageData) -> BackendResult<TextureHandle> {
        let (width, height) = (image.face_width(), image.face_height());
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("cube_texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (layer, face) in image.faces.iter().enumerate() {
            self.queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                &face.data,
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("cube_texture_view"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cube_texture_bind_group"),
            layout: &self.skybox_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.skybox_sampler),
                },
            ],
        });

        Ok(self.textures.insert(GpuTexture {
            kind: TextureKind::Cube,
            bind_group,
        }))
    }

    fn resize(&mut self, width: u32, height: u32) -> BackendResult<()> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
        log::debug!("Surface resized to {}x{}", width, height);
        Ok(())
    }

    fn render_frame(&mut self, frame: &FrameDesc<'_>) -> BackendResult<()> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure and skip this frame; the next one will draw.
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface frame acquisition timed out, skipping frame");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(BackendError::SurfaceError(
                    "Out of memory acquiring surface frame".into(),
                ));
            }
        };
        let color_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let frame_uniforms = FrameUniforms {
            view_proj: frame.view_projection.into(),
            skybox_view_proj: frame.skybox_view_projection.into(),
            lights: frame.lights,
        };
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame_uniforms));

        self.ensure_object_capacity(frame.draws.len());
        self.write_object_uniforms(frame.draws);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("forward_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(frame.clear_color[0]),
                            g: f64::from(frame.clear_color[1]),
                            b: f64::from(frame.clear_color[2]),
                            a: f64::from(frame.clear_color[3]),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            for (index, draw) in frame.draws.iter().enumerate() {
                let mesh = self.meshes.get(draw.mesh).ok_or_else(|| {
                    BackendError::InvalidHandle(format!("Mesh handle {:?}", draw.mesh))
                })?;

                let texture_bind_group = match draw.texture {
                    Some(handle) => {
                        let texture = self.textures.get(handle).ok_or_else(|| {
                            BackendError::InvalidHandle(format!("Texture handle {handle:?}"))
                        })?;
                        if texture.kind != TextureKind::Flat {
                            return Err(BackendError::InvalidHandle(format!(
                                "Texture handle {handle:?} is a cubemap"
                            )));
                        }
                        &texture.bind_group
                    }
                    None => &self.fallback_texture,
                };

                if draw.back_face_culling {
                    pass.set_pipeline(&self.scene_pipeline);
                } else {
                    pass.set_pipeline(&self.scene_pipeline_no_cull);
                }
                let offset = u32::try_from(index as u64 * OBJECT_STRIDE).map_err(|_| {
                    BackendError::ResourceCreationFailed("Object uniform offset overflow".into())
                })?;
                pass.set_bind_group(1, &self.object_bind_group, &[offset]);
                pass.set_bind_group(2, texture_bind_group, &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }

            if let Some(handle) = frame.skybox {
                let texture = self.textures.get(handle).ok_or_else(|| {
                    BackendError::InvalidHandle(format!("Skybox handle {handle:?}"))
                })?;
                if texture.kind != TextureKind::Cube {
                    return Err(BackendError::InvalidHandle(format!(
                        "Skybox handle {handle:?} is not a cubemap"
                    )));
                }
                pass.set_pipeline(&self.skybox_pipeline);
                pass.set_bind_group(1, &texture.bind_group, &[]);
                pass.set_vertex_buffer(0, self.skybox_mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(
                    self.skybox_mesh.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..self.skybox_mesh.index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}

/// Vertex buffer layout shared by all pipelines
fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
    ];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

fn texture_layout_entries(
    dimension: wgpu::TextureViewDimension,
) -> [wgpu::BindGroupLayoutEntry; 2] {
    [
        wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: dimension,
                multisampled: false,
            },
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        },
    ]
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_object_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    capacity: u32,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("object_uniforms"),
        size: u64::from(capacity) * OBJECT_STRIDE,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("object_bind_group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
            }),
        }],
    });
    (buffer, bind_group)
}

fn upload_mesh(device: &wgpu::Device, mesh: &Mesh) -> GpuMesh {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("vertex_buffer"),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("index_buffer"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    GpuMesh {
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
    }
}

fn create_flat_texture_bind_group(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    image: &ImageData,
) -> wgpu::BindGroup {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("texture"),
        size: wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &image.data,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.width),
            rows_per_image: Some(image.height),
        },
        wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        },
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("texture_bind_group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

fn create_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    cull_mode: Option<wgpu::Face>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_main",
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            buffers: &[vertex_layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: "fs_main",
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_skybox_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("skybox_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_main",
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            buffers: &[vertex_layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: "fs_main",
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            // The cube is viewed from inside
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: false,
            // Depth is forced to 1.0, equal to the cleared value
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
