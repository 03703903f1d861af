use crate::shaders;
use bytemuck::{Pod, Zeroable};
use instgrid_common::{CameraBlock, DrawError, PerDrawTransform, Vertex};
use instgrid_render::DrawCall;
use instgrid_shading::{ColorSource, InstanceTransformStage, OutputPolicy, Placement};
use wgpu::util::DeviceExt;

/// `CameraBlock` as laid out in the uniform buffer at binding 0.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuCameraBlock {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
}

impl From<&CameraBlock> for GpuCameraBlock {
    fn from(camera: &CameraBlock) -> Self {
        Self {
            view: camera.view.to_cols_array_2d(),
            proj: camera.proj.to_cols_array_2d(),
        }
    }
}

/// Instance count plus the placement and color choices, binding 1.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuInstanceBlock {
    pub num_instances: u32,
    pub spacing: f32,
    pub placement: u32,
    pub color_source: u32,
}

impl From<&InstanceTransformStage> for GpuInstanceBlock {
    fn from(stage: &InstanceTransformStage) -> Self {
        Self {
            num_instances: stage.layout.num_instances(),
            spacing: stage.spacing,
            placement: match stage.placement {
                Placement::Grid => 0,
                Placement::Strip => 1,
            },
            color_source: match stage.color_source {
                ColorSource::Gradient => 0,
                ColorSource::Vertex => 1,
            },
        }
    }
}

/// `PerDrawTransform` at binding 2.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuPerDrawTransform {
    pub model: [[f32; 4]; 4],
}

impl From<&PerDrawTransform> for GpuPerDrawTransform {
    fn from(transform: &PerDrawTransform) -> Self {
        Self {
            model: transform.model.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl From<&Vertex> for GpuVertex {
    fn from(v: &Vertex) -> Self {
        Self {
            position: v.position.to_array(),
            color: v.color.to_array(),
            tex_coord: v.tex_coord.to_array(),
        }
    }
}

impl GpuVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Upper bound on instances per draw accepted by [`InstancedGridRenderer`].
pub const MAX_INSTANCES: u32 = 1 << 20;

/// Vertex-stage entry point implementing `policy`.
pub fn vertex_entry_point(policy: OutputPolicy) -> &'static str {
    match policy {
        OutputPolicy::Transformed => "vs_transformed",
        OutputPolicy::Untransformed => "vs_untransformed",
    }
}

/// wgpu host for the instanced grid draw.
///
/// Owns one pipeline per output policy and the three uniform blocks. Instance
/// placement happens in the shader from `instance_index`, so there is no
/// per-instance buffer.
pub struct InstancedGridRenderer {
    transformed_pipeline: wgpu::RenderPipeline,
    untransformed_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    transform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    max_instances: u32,
    target_format: wgpu::TextureFormat,
}

impl InstancedGridRenderer {
    pub fn new(device: &wgpu::Device, target_format: wgpu::TextureFormat) -> Self {
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera_block"),
            contents: bytemuck::bytes_of(&GpuCameraBlock::from(&CameraBlock::default())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_block"),
            size: std::mem::size_of::<GpuInstanceBlock>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("per_draw_transform"),
            contents: bytemuck::bytes_of(&GpuPerDrawTransform::from(&PerDrawTransform::default())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("grid_bind_group_layout"),
            entries: &[uniform_entry(0), uniform_entry(1), uniform_entry(2)],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("grid_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: instance_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: transform_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("grid_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("grid_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::GRID_SHADER.into()),
        });

        let transformed_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            target_format,
            OutputPolicy::Transformed,
        );
        let untransformed_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            target_format,
            OutputPolicy::Untransformed,
        );

        let max_instances = MAX_INSTANCES;
        tracing::debug!(?target_format, max_instances, "instanced grid renderer created");

        Self {
            transformed_pipeline,
            untransformed_pipeline,
            camera_buffer,
            instance_buffer,
            transform_buffer,
            bind_group,
            max_instances,
            target_format,
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        target_format: wgpu::TextureFormat,
        policy: OutputPolicy,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(vertex_entry_point(policy)),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(vertex_entry_point(policy)),
                compilation_options: Default::default(),
                buffers: &[GpuVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    pub fn with_max_instances(mut self, max_instances: u32) -> Self {
        self.max_instances = max_instances;
        self
    }

    pub fn target_format(&self) -> wgpu::TextureFormat {
        self.target_format
    }

    /// Record and submit one draw into `view`, clearing it to `clear` first.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        draw: &DrawCall,
        clear: wgpu::Color,
    ) -> Result<(), DrawError> {
        let _span = tracing::info_span!("gpu_draw").entered();

        let stage = draw.stage();
        let instance_count = stage.layout.num_instances();
        if instance_count > self.max_instances {
            return Err(DrawError::TooManyInstances {
                requested: instance_count,
                max: self.max_instances,
            });
        }

        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&GpuCameraBlock::from(&stage.camera)),
        );
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::bytes_of(&GpuInstanceBlock::from(stage)),
        );
        queue.write_buffer(
            &self.transform_buffer,
            0,
            bytemuck::bytes_of(&GpuPerDrawTransform::from(&stage.transform)),
        );

        let mesh = draw.mesh();
        let vertices: Vec<GpuVertex> = mesh.vertices.iter().map(GpuVertex::from).collect();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = (!mesh.indices.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("grid_index_buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let pipeline = match stage.policy {
            OutputPolicy::Transformed => &self.transformed_pipeline,
            OutputPolicy::Untransformed => &self.untransformed_pipeline,
        };

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("grid_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("grid_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(0, vertex_buffer.slice(..));
            match &index_buffer {
                Some(index_buffer) => {
                    pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                    pass.draw_indexed(0..mesh.indices.len() as u32, 0, 0..instance_count);
                }
                None => pass.draw(0..mesh.vertices.len() as u32, 0..instance_count),
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        tracing::debug!(
            instances = instance_count,
            elements = mesh.element_count(),
            policy = %stage.policy,
            "gpu draw submitted"
        );
        Ok(())
    }
}
