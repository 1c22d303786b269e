use bytemuck::{Pod, Zeroable};
use std::num::NonZeroU64;

use crate::grid::Cell;

// Uniforms for both board pipelines, in physical pixels
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BoardParams {
    pub viewport: [f32; 2],
    pub origin: [f32; 2],
    pub cell_size: f32,
    pub line_width: f32,
    pub cols: u32,
    pub rows: u32,
}

impl BoardParams {
    /// Scales logical board geometry to the surface's physical pixels.
    pub fn new(
        viewport: [u32; 2],
        scale_factor: f64,
        origin: [f64; 2],
        cell_size: u32,
        line_width: u32,
        cols: usize,
        rows: usize,
    ) -> Self {
        let scale = scale_factor as f32;
        Self {
            viewport: [viewport[0].max(1) as f32, viewport[1].max(1) as f32],
            origin: [origin[0] as f32 * scale, origin[1] as f32 * scale],
            cell_size: cell_size as f32 * scale,
            line_width: line_width as f32 * scale,
            cols: cols as u32,
            rows: rows as u32,
        }
    }
}

/// Per-instance vertex data: one marker per alive cell.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct CellInstance {
    pub position: [u32; 2],
}

impl CellInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Uint32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CellInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<&Cell> for CellInstance {
    fn from(cell: &Cell) -> Self {
        Self {
            position: [cell.x as u32, cell.y as u32],
        }
    }
}

/// Instance data for the current alive-cell list.
pub fn cell_instances(alive: &[Cell]) -> Vec<CellInstance> {
    alive.iter().map(CellInstance::from).collect()
}

/// Size of an instance buffer that can hold every cell of the grid.
pub fn instance_buffer_size(cols: usize, rows: usize) -> wgpu::BufferAddress {
    (cols * rows * std::mem::size_of::<CellInstance>()) as wgpu::BufferAddress
}

pub fn create_board_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Board Bind Group Layout"),
        entries: &[
            // BoardParams Uniform (Binding 0)
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<BoardParams>() as u64),
                },
                count: None,
            },
        ],
    })
}

pub fn create_board_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    board_param_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Board Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: board_param_buffer.as_entire_binding() },
        ],
    })
}

/// Builds the background and cell pipelines from `board.wgsl`.
pub fn create_board_pipelines(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> (wgpu::RenderPipeline, wgpu::RenderPipeline) {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Board Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("board.wgsl").into()),
    });
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Board Pipeline Layout"),
        bind_group_layouts: &[layout],
        push_constant_ranges: &[],
    });

    let background = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Board Background Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_board",
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_board",
            targets: &[Some(format.into())],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    });

    let cells = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Alive Cell Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_cell",
            buffers: &[CellInstance::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_cell",
            targets: &[Some(format.into())],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    });

    (background, cells)
}
