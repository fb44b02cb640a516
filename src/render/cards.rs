use super::helpers::{linear_sampler, sampler_entry, scene_depth, texture_entry, uniform_entry};
use crate::core::{Card, CardPose, CARD_HEIGHT, CARD_WIDTH};
use crate::textures::CardTexture;
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CardVertex {
    pos: [f32; 3],
    uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CardUniforms {
    model: [[f32; 4]; 4],
    params: [f32; 4],
}

const QUAD_VERTICES: u32 = 6;

fn card_quad() -> [CardVertex; QUAD_VERTICES as usize] {
    let (w, h) = (CARD_WIDTH * 0.5, CARD_HEIGHT * 0.5);
    let v = |x: f32, y: f32, u: f32, t: f32| CardVertex {
        pos: [x, y, 0.0],
        uv: [u, t],
    };
    [
        v(-w, -h, 0.0, 1.0),
        v(w, -h, 1.0, 1.0),
        v(w, h, 1.0, 0.0),
        v(-w, -h, 0.0, 1.0),
        v(w, h, 1.0, 0.0),
        v(-w, h, 0.0, 0.0),
    ]
}

struct CardSlot {
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    epoch: u32,
}

/// Card pipeline plus one uniform buffer and bind group per card.
///
/// Bind groups point at the card's current textures, so a slot is rebuilt
/// whenever the card's `appearance_epoch` moves on.
pub(crate) struct CardResources {
    pipeline: wgpu::RenderPipeline,
    bgl: wgpu::BindGroupLayout,
    vertex_buffer: wgpu::Buffer,
    sampler: wgpu::Sampler,
    slots: Vec<CardSlot>,
}

impl CardResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        scene_bgl: &wgpu::BindGroupLayout,
        hdr_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("card_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::CARD_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("card_bgl"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT),
                texture_entry(1),
                texture_entry(2),
                texture_entry(3),
                sampler_entry(4),
            ],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("card_pl"),
            bind_group_layouts: &[scene_bgl, &bgl],
            push_constant_ranges: &[],
        });
        let attrs = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("card_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_card"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<CardVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attrs,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                // both faces are drawn; the shader picks front or back
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: scene_depth(true, wgpu::CompareFunction::Less),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_card"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: hdr_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("card_quad"),
            contents: bytemuck::cast_slice(&card_quad()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            pipeline,
            bgl,
            vertex_buffer,
            sampler: linear_sampler(device, "card_sampler"),
            slots: Vec::new(),
        }
    }

    fn bind_group(
        &self,
        device: &wgpu::Device,
        uniforms: &wgpu::Buffer,
        card: &Card<CardTexture>,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("card_bg"),
            layout: &self.bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&card.front.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&card.back.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&card.label_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    /// Match slots to `cards`, rebuilding bind groups for repainted cards.
    pub(crate) fn sync(&mut self, device: &wgpu::Device, cards: &[Card<CardTexture>]) {
        self.slots.truncate(cards.len());
        for (i, card) in cards.iter().enumerate() {
            if let Some(slot) = self.slots.get(i) {
                if slot.epoch == card.appearance_epoch {
                    continue;
                }
                let bind_group = self.bind_group(device, &slot.uniforms, card);
                let slot = &mut self.slots[i];
                slot.bind_group = bind_group;
                slot.epoch = card.appearance_epoch;
                continue;
            }
            let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("card_uniforms"),
                size: std::mem::size_of::<CardUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = self.bind_group(device, &uniforms, card);
            self.slots.push(CardSlot {
                uniforms,
                bind_group,
                epoch: card.appearance_epoch,
            });
        }
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, poses: impl Iterator<Item = CardPose>) {
        for (slot, pose) in self.slots.iter().zip(poses) {
            let model = Mat4::from_scale_rotation_translation(Vec3::ONE, pose.rotation, pose.position);
            let u = CardUniforms {
                model: model.to_cols_array_2d(),
                params: [
                    pose.label_opacity.clamp(0.0, 1.0),
                    if pose.hovered { 1.0 } else { 0.0 },
                    0.0,
                    0.0,
                ],
            };
            queue.write_buffer(&slot.uniforms, 0, bytemuck::bytes_of(&u));
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, scene_bg: &wgpu::BindGroup) {
        if self.slots.is_empty() {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, scene_bg, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        for slot in &self.slots {
            rpass.set_bind_group(1, &slot.bind_group, &[]);
            rpass.draw(0..QUAD_VERTICES, 0..1);
        }
    }
}
