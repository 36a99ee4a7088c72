use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use sandbox_common::Color;
use sandbox_render::{DrawItem, MeshData, MeshError, MeshKind, cube_mesh, mvp, sphere_mesh};
use wgpu::util::DeviceExt;

const SPHERE_SECTORS: u32 = 20;
const SPHERE_STACKS: u32 = 20;
const SPHERE_RADIUS: f32 = 0.5;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    mvp_0: [f32; 4],
    mvp_1: [f32; 4],
    mvp_2: [f32; 4],
    mvp_3: [f32; 4],
    color: [f32; 4],
}

impl InstanceData {
    fn new(mvp: Mat4, color: Color) -> Self {
        let cols = mvp.to_cols_array_2d();
        Self {
            mvp_0: cols[0],
            mvp_1: cols[1],
            mvp_2: cols[2],
            mvp_3: cols[3],
            color: color.to_rgba(),
        }
    }
}

/// Static vertex and index buffers for one mesh.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertices: Vec<Vertex> = mesh
            .positions
            .iter()
            .map(|&position| Vertex { position })
            .collect();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertex_buffer")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_index_buffer")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// wgpu-based scene renderer: flat-colored cubes and spheres.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    cube: GpuMesh,
    sphere: GpuMesh,
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Result<Self, MeshError> {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("flat_pipeline_layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("flat_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::FLAT_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("flat_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            1 => Float32x4,
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let cube = GpuMesh::upload(device, "cube", &cube_mesh());
        let sphere = GpuMesh::upload(
            device,
            "sphere",
            &sphere_mesh(SPHERE_SECTORS, SPHERE_STACKS, SPHERE_RADIUS)?,
        );

        // Instance buffer (pre-allocated)
        let max_instances = 10_000u32;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (max_instances as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Ok(Self {
            pipeline,
            cube,
            sphere,
            instance_buffer,
            max_instances,
            depth_texture,
        })
    }

    /// Choose the swapchain format. `Color` values are display values, so a
    /// non-sRGB format is preferred to keep the hardware from gamma-encoding
    /// them a second time.
    pub fn pick_surface_format(
        formats: &[wgpu::TextureFormat],
    ) -> Option<wgpu::TextureFormat> {
        formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| formats.first())
            .copied()
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Render one frame. Cubes are drawn first, then spheres, each as a
    /// single instanced call.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        view_proj: Mat4,
        draws: &[DrawItem],
    ) {
        let mut cubes: Vec<InstanceData> = Vec::new();
        let mut spheres: Vec<InstanceData> = Vec::new();
        for draw in draws.iter().take(self.max_instances as usize) {
            let instance = InstanceData::new(mvp(view_proj, draw.model), draw.color);
            match draw.mesh {
                MeshKind::Cube => cubes.push(instance),
                MeshKind::Sphere => spheres.push(instance),
            }
        }
        if draws.len() > self.max_instances as usize {
            tracing::warn!(
                "draw list truncated: {} items, capacity {}",
                draws.len(),
                self.max_instances
            );
        }

        let cube_count = cubes.len() as u32;
        let sphere_count = spheres.len() as u32;
        let mut instances = cubes;
        instances.extend(spheres);
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let [r, g, b] = Color::CLEAR.0;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            if cube_count > 0 {
                pass.set_vertex_buffer(0, self.cube.vertex_buffer.slice(..));
                pass.set_index_buffer(self.cube.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.cube.index_count, 0, 0..cube_count);
            }
            if sphere_count > 0 {
                pass.set_vertex_buffer(0, self.sphere.vertex_buffer.slice(..));
                pass.set_index_buffer(
                    self.sphere.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(
                    0..self.sphere.index_count,
                    0,
                    cube_count..cube_count + sphere_count,
                );
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
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
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
