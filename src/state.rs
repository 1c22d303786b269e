use crate::config::{BOARD_ORIGIN, CELL_SIZE, COLS, GRID_LINE_WIDTH, ROWS};
use crate::controller::Controller;
use crate::error::AppError;
use crate::render::{
    cell_instances, create_board_bind_group, create_board_bind_group_layout,
    create_board_pipelines, instance_buffer_size, BoardParams,
};
use wgpu::util::DeviceExt;
use winit::{
    dpi::PhysicalPosition,
    window::Window,
};
use std::sync::Arc;

// GUI Imports
use egui_winit::State as EguiWinitState;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui::Context as EguiContext;

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    pub controller: Controller,

    pub background_pipeline: wgpu::RenderPipeline,
    pub cell_pipeline: wgpu::RenderPipeline,
    pub board_bind_group: wgpu::BindGroup,
    pub board_param_buffer: wgpu::Buffer,
    pub instance_buffer: wgpu::Buffer,
    pub instance_count: u32,

    pub cursor_pos: Option<PhysicalPosition<f64>>,

    // GUI state
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
}

impl State {
    pub async fn new(window: Arc<Window>, controller: Controller) -> Result<Self, AppError> {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(AppError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![surface_format.into()],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Board resources
        let board_params = Self::board_params(&config, window.scale_factor());
        let board_param_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Board Parameters"),
            contents: bytemuck::bytes_of(&board_params),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Alive Cell Instances"),
            size: instance_buffer_size(COLS, ROWS),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let board_bind_group_layout = create_board_bind_group_layout(&device);
        let board_bind_group =
            create_board_bind_group(&device, &board_bind_group_layout, &board_param_buffer);
        let (background_pipeline, cell_pipeline) =
            create_board_pipelines(&device, &board_bind_group_layout, config.format);

        log::info!("Initializing egui...");
        let egui_ctx = EguiContext::default();
        let egui_winit_state = EguiWinitState::new(egui_ctx.clone(), egui_ctx.viewport_id(), &window, None, None);
        let egui_renderer = EguiWgpuRenderer::new(&device, config.format, None, 1);
        log::info!("egui initialized.");

        log::info!("wgpu initialized successfully.");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            controller,
            background_pipeline,
            cell_pipeline,
            board_bind_group,
            board_param_buffer,
            instance_buffer,
            instance_count: 0,
            cursor_pos: None,
            egui_ctx,
            egui_winit_state,
            egui_renderer,
        })
    }

    fn board_params(config: &wgpu::SurfaceConfiguration, scale_factor: f64) -> BoardParams {
        BoardParams::new(
            [config.width, config.height],
            scale_factor,
            BOARD_ORIGIN,
            CELL_SIZE,
            GRID_LINE_WIDTH,
            COLS,
            ROWS,
        )
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            log::info!("Reconfigured surface to: {}x{}", new_size.width, new_size.height);
        } else {
            log::warn!("Ignoring resize to zero dimensions: {}x{}", new_size.width, new_size.height);
        }
    }

    /// Upload the board geometry and the alive-cell list.
    fn upload_board(&mut self) {
        let params = Self::board_params(&self.config, self.window.scale_factor());
        self.queue.write_buffer(&self.board_param_buffer, 0, bytemuck::bytes_of(&params));

        let instances = cell_instances(self.controller.store().alive());
        if !instances.is_empty() {
            self.queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
        self.instance_count = instances.len() as u32;
    }

    /// Render the board and alive cells. Returns the surface texture for egui to draw on.
    pub fn render_board(&mut self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.upload_board();

        // --- Get Surface Texture (early exit on error) ---
        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, recreating...");
                self.resize(self.size);
                return Err(wgpu::SurfaceError::Lost);
            }
            Err(e) => {
                log::error!("Failed to acquire next swap chain texture: {:?}", e);
                return Err(e);
            }
        };

        // --- Render Pass ---
        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut render_encoder = self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Board Encoder") });
        {
            let mut render_pass = render_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Board Pass"),
                color_attachments: &[
                    Some(wgpu::RenderPassColorAttachment {
                        view: &output_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })
                ],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_bind_group(0, &self.board_bind_group, &[]);

            render_pass.set_pipeline(&self.background_pipeline);
            render_pass.draw(0..3, 0..1); // Full-screen triangle

            if self.instance_count > 0 {
                render_pass.set_pipeline(&self.cell_pipeline);
                render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
                render_pass.draw(0..6, 0..self.instance_count); // One quad per alive cell
            }
        }
        self.queue.submit(Some(render_encoder.finish()));
        // output_frame.present(); // DON'T present here, egui will do it later

        Ok(output_frame)
    }
}
