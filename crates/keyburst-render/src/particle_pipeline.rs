//! Point-sprite particle render pipeline
//!
//! Draws every pool slot as an instanced screen-aligned square. Position, size
//! and alpha live in three separate instance vertex buffers mirroring the
//! engine's attribute arrays, so each can be re-uploaded on its own.

use crate::camera::Camera;
use crate::context::RenderContext;
use bytemuck::{Pod, Zeroable};
use keyburst_particles::{DirtyBuffers, ParticleBlendMode, ParticleBuffers, SpriteMaterial};
use wgpu::util::DeviceExt;

/// WGSL source for `vs_particle` / `fs_particle`
pub const PARTICLE_SHADER: &str = include_str!("particle_shader.wgsl");

/// Vertices per sprite (two triangles)
const SPRITE_VERTICES: u32 = 6;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const SIZE_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32];
const ALPHA_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32];

/// Per-frame uniforms, laid out like WGSL `ParticleUniforms`.
/// 96 bytes, 16-byte aligned.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub _pad: [f32; 2],
    pub color: [f32; 4],
}

impl ParticleUniforms {
    pub fn new(camera: &Camera, viewport: [f32; 2], material: &SpriteMaterial) -> Self {
        let [r, g, b] = material.color;
        Self {
            view_proj: camera.view_projection_matrix(),
            viewport,
            _pad: [0.0; 2],
            color: [r, g, b, 1.0],
        }
    }
}

/// Blend state for a material's blend mode
pub fn blend_state(mode: ParticleBlendMode) -> wgpu::BlendState {
    match mode {
        ParticleBlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
        // src * src_alpha + dst: sprites only ever add light
        ParticleBlendMode::Additive => wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        },
    }
}

/// Instance vertex buffer layouts for the three attribute streams
pub fn instance_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    let f32_size = std::mem::size_of::<f32>() as wgpu::BufferAddress;
    [
        wgpu::VertexBufferLayout {
            array_stride: f32_size * 3,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &POSITION_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: f32_size,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &SIZE_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: f32_size,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ALPHA_ATTRIBUTES,
        },
    ]
}

/// The particle pipeline plus the GPU copies of the attribute buffers
pub struct ParticlePipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub position_buffer: wgpu::Buffer,
    pub size_buffer: wgpu::Buffer,
    pub alpha_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub uniform_bind_group: wgpu::BindGroup,
    material: SpriteMaterial,
    instance_count: u32,
}

impl ParticlePipeline {
    /// Build the pipeline and upload the initial (all dead) buffers
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        buffers: ParticleBuffers<'_>,
        material: &SpriteMaterial,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(PARTICLE_SHADER.into()),
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("Particle Uniform Bind Group Layout"),
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Particle Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let depth_stencil = wgpu::DepthStencilState {
            format: crate::DEPTH_FORMAT,
            depth_write_enabled: material.depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_particle"),
                buffers: &instance_layouts(),
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_particle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(blend_state(material.blend_mode)),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(depth_stencil),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let usage = wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST;
        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Position Buffer"),
            contents: bytemuck::cast_slice(buffers.positions),
            usage,
        });
        let size_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Size Buffer"),
            contents: bytemuck::cast_slice(buffers.sizes),
            usage,
        });
        let alpha_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Alpha Buffer"),
            contents: bytemuck::cast_slice(buffers.alphas),
            usage,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Uniform Buffer"),
            contents: bytemuck::cast_slice(&[ParticleUniforms::zeroed()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("Particle Uniform Bind Group"),
        });

        Self {
            pipeline,
            position_buffer,
            size_buffer,
            alpha_buffer,
            uniform_buffer,
            uniform_bind_group,
            material: *material,
            instance_count: buffers.sizes.len() as u32,
        }
    }

    /// Copy the changed attribute arrays to the GPU
    pub fn upload(&self, queue: &wgpu::Queue, buffers: ParticleBuffers<'_>, dirty: DirtyBuffers) {
        if dirty.position {
            queue.write_buffer(&self.position_buffer, 0, bytemuck::cast_slice(buffers.positions));
        }
        if dirty.size {
            queue.write_buffer(&self.size_buffer, 0, bytemuck::cast_slice(buffers.sizes));
        }
        if dirty.alpha {
            queue.write_buffer(&self.alpha_buffer, 0, bytemuck::cast_slice(buffers.alphas));
        }
    }

    pub fn update_uniforms(&self, queue: &wgpu::Queue, camera: &Camera, viewport: [f32; 2]) {
        let uniforms = ParticleUniforms::new(camera, viewport, &self.material);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }

    /// Record the single draw call. Every slot is drawn; there is no culling,
    /// dead slots sit at the sentinel position with zero size.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.set_vertex_buffer(0, self.position_buffer.slice(..));
        pass.set_vertex_buffer(1, self.size_buffer.slice(..));
        pass.set_vertex_buffer(2, self.alpha_buffer.slice(..));
        pass.draw(0..SPRITE_VERTICES, 0..self.instance_count);
    }

    /// Clear the target and draw the particles into it
    pub fn render(&self, context: &RenderContext, target: &wgpu::TextureView) {
        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Particle Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Particle Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &context.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.draw(&mut pass);
        }

        context.queue.submit(std::iter::once(encoder.finish()));
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout() {
        assert_eq!(std::mem::size_of::<ParticleUniforms>(), 96);
        assert_eq!(std::mem::size_of::<ParticleUniforms>() % 16, 0);
    }

    #[test]
    fn uniforms_carry_material_tint() {
        let material = SpriteMaterial::burst();
        let u = ParticleUniforms::new(&Camera::default(), [1280.0, 720.0], &material);
        assert_eq!(u.viewport, [1280.0, 720.0]);
        assert_eq!(&u.color[..3], &material.color);
        assert_eq!(u.color[3], 1.0);
    }

    #[test]
    fn additive_blend_adds_to_destination() {
        let blend = blend_state(ParticleBlendMode::Additive);
        assert_eq!(blend.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(blend.color.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(blend.color.operation, wgpu::BlendOperation::Add);
        assert_eq!(blend_state(ParticleBlendMode::Alpha), wgpu::BlendState::ALPHA_BLENDING);
    }

    #[test]
    fn instance_layouts_match_engine_arrays() {
        let layouts = instance_layouts();
        assert_eq!(layouts[0].array_stride, 12);
        assert_eq!(layouts[1].array_stride, 4);
        assert_eq!(layouts[2].array_stride, 4);
        assert!(layouts
            .iter()
            .all(|l| l.step_mode == wgpu::VertexStepMode::Instance));
        let locations: Vec<u32> = layouts
            .iter()
            .flat_map(|l| l.attributes.iter().map(|a| a.shader_location))
            .collect();
        assert_eq!(locations, vec![0, 1, 2]);
    }
}
