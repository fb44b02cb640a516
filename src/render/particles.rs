use super::helpers::scene_depth;
use crate::constants::{DUST_ALPHA, DUST_COLOR, PARTICLE_INITIAL_CAPACITY};
use crate::core::{Burst, DustField, DUST_SIZE};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleInstance {
    pos_size: [f32; 4],
    color: [f32; 4],
}

/// Instanced sprites for bursts and dust, one shared instance buffer that
/// grows by doubling.
pub(crate) struct ParticleResources {
    pipeline: wgpu::RenderPipeline,
    instances: wgpu::Buffer,
    capacity: usize,
    count: u32,
    staging: Vec<ParticleInstance>,
}

fn instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("particle_instances"),
        size: (capacity * std::mem::size_of::<ParticleInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl ParticleResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        scene_bgl: &wgpu::BindGroupLayout,
        hdr_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::PARTICLES_WGSL.into()),
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particles_pl"),
            bind_group_layouts: &[scene_bgl],
            push_constant_ranges: &[],
        });
        let attrs = wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particles_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_particle"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &attrs,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: scene_depth(false, wgpu::CompareFunction::Less),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_particle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: hdr_format,
                    blend: Some(additive),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        Self {
            pipeline,
            instances: instance_buffer(device, PARTICLE_INITIAL_CAPACITY),
            capacity: PARTICLE_INITIAL_CAPACITY,
            count: 0,
            staging: Vec::with_capacity(PARTICLE_INITIAL_CAPACITY),
        }
    }

    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bursts: &[Burst],
        dust: &DustField,
    ) {
        self.staging.clear();
        for p in &dust.positions {
            self.staging.push(ParticleInstance {
                pos_size: p.extend(DUST_SIZE).to_array(),
                color: [DUST_COLOR[0], DUST_COLOR[1], DUST_COLOR[2], DUST_ALPHA],
            });
        }
        for burst in bursts {
            let [r, g, b] = burst.color;
            for p in &burst.particles {
                self.staging.push(ParticleInstance {
                    pos_size: p.extend(burst.point_size).to_array(),
                    color: [r, g, b, burst.opacity],
                });
            }
        }
        if self.staging.len() > self.capacity {
            let mut cap = self.capacity.max(1);
            while cap < self.staging.len() {
                cap *= 2;
            }
            self.instances.destroy();
            self.instances = instance_buffer(device, cap);
            self.capacity = cap;
            log::debug!("[render] particle buffer grown to {}", cap);
        }
        if !self.staging.is_empty() {
            queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(&self.staging));
        }
        self.count = self.staging.len() as u32;
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, scene_bg: &wgpu::BindGroup) {
        if self.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, scene_bg, &[]);
        rpass.set_vertex_buffer(0, self.instances.slice(..));
        rpass.draw(0..6, 0..self.count);
    }
}
