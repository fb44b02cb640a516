use super::helpers::uniform_entry;
use crate::constants::{AMBIENT_LIGHT, FOG_COLOR, FOG_DENSITY, HOVER_GLOW, LIGHT_COLOR, LIGHT_POSITION};
use crate::core::Camera;

/// Per-frame values shared by the background, card and particle shaders.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
    light_pos: [f32; 4],
    light_color: [f32; 4],
    fog: [f32; 4],
    screen: [f32; 4],
}

impl SceneUniforms {
    pub(crate) fn new(camera: &Camera, time: f32, width: u32, height: u32) -> Self {
        let view = camera.view_matrix();
        // rows of the view rotation are the camera basis in world space
        let right = view.row(0).truncate();
        let up = view.row(1).truncate();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_pos: camera.eye.extend(time).to_array(),
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(0.0).to_array(),
            light_pos: [LIGHT_POSITION[0], LIGHT_POSITION[1], LIGHT_POSITION[2], AMBIENT_LIGHT],
            light_color: [LIGHT_COLOR[0], LIGHT_COLOR[1], LIGHT_COLOR[2], HOVER_GLOW],
            fog: [FOG_COLOR[0], FOG_COLOR[1], FOG_COLOR[2], FOG_DENSITY],
            screen: [width as f32, height as f32, 0.0, 0.0],
        }
    }
}

pub(crate) struct SceneResources {
    pub(crate) bgl: wgpu::BindGroupLayout,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_scene_resources(device: &wgpu::Device) -> SceneResources {
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[uniform_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_uniforms"),
        size: std::mem::size_of::<SceneUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    SceneResources {
        bgl,
        uniform_buffer,
        bind_group,
    }
}
