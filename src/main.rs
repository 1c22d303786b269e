// Declare modules directly in the binary crate root
pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod input;
pub mod render;
pub mod rules;
pub mod state;
pub mod timer;
pub mod ui;

// Use types/functions from the declared modules
use crate::config::{LifeConfig, BOARD_HEIGHT, BOARD_WIDTH, COLS, CONTROLS_HEIGHT, ROWS};
use crate::controller::Controller;
use crate::error::AppError;
use crate::state::State;

use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};
use std::sync::Arc;
use std::time::Instant;

async fn run(event_loop: EventLoop<()>, window: Arc<Window>, controller: Controller) -> Result<(), AppError> {
    let mut state = State::new(window, controller).await?;

    event_loop.run(move |event, window_target| {
        match event {
            Event::WindowEvent { window_id, ref event }
                if window_id == state.window.id() =>
            {
                // Pass window-specific events to egui_winit FIRST
                let response = state.egui_winit_state.on_window_event(&state.window, event);

                if response.repaint {
                    state.window.request_redraw();
                }

                // Clicks on the controls panel must not reach the board.
                // Resize is handled regardless.
                let consumed_by_egui = response.consumed && !matches!(event, WindowEvent::Resized(_));

                if consumed_by_egui {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(*new_size);
                        state.window.request_redraw();
                    }
                    WindowEvent::MouseInput { state: element_state, button, .. } => {
                        input::handle_mouse_input(&mut state, *button, *element_state);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input::handle_cursor_move(&mut state, *position);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input::handle_cursor_left(&mut state);
                    }
                    WindowEvent::RedrawRequested => {
                        let game_render_result = state.render_board();

                        let output_frame = match game_render_result {
                            Ok(frame) => frame,
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("Out of GPU memory, exiting.");
                                window_target.exit();
                                return;
                            }
                            Err(wgpu::SurfaceError::Lost) => {
                                // resize() was called internally.
                                log::warn!("Skipping frame due to surface error.");
                                state.window.request_redraw();
                                return;
                            }
                            Err(err @ (wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Outdated)) => {
                                log::warn!("Skipping frame due to surface {:?}", err);
                                state.window.request_redraw();
                                return;
                            }
                        };

                        // --- Egui Frame and UI Definition ---
                        let output_view = output_frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

                        let raw_input = state.egui_winit_state.take_egui_input(&state.window);
                        state.egui_ctx.begin_frame(raw_input);

                        let board_changed = ui::controls(&state.egui_ctx, &mut state.controller);

                        let full_output = state.egui_ctx.end_frame();
                        let paint_jobs = state.egui_ctx.tessellate(full_output.shapes, state.window.scale_factor() as f32);
                        let screen_descriptor = egui_wgpu::ScreenDescriptor {
                            size_in_pixels: [state.config.width, state.config.height],
                            pixels_per_point: state.window.scale_factor() as f32,
                        };

                        // Upload egui data to GPU
                        let mut encoder = state.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui Encoder"),
                        });
                        for (id, image_delta) in &full_output.textures_delta.set {
                            state.egui_renderer.update_texture(&state.device, &state.queue, *id, image_delta);
                        }
                        let _tdelta = state.egui_renderer.update_buffers(
                            &state.device,
                            &state.queue,
                            &mut encoder,
                            &paint_jobs,
                            &screen_descriptor,
                        );
                        state.egui_winit_state.handle_platform_output(
                            &state.window,
                            full_output.platform_output,
                        );

                        // Render egui on top of the board
                        {
                            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui Render Pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &output_view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Load,
                                        store: wgpu::StoreOp::Store,
                                    },
                                })],
                                depth_stencil_attachment: None,
                                timestamp_writes: None,
                                occlusion_query_set: None,
                            });

                            state.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
                        }

                        for id in &full_output.textures_delta.free {
                            state.egui_renderer.free_texture(id);
                        }

                        state.queue.submit(Some(encoder.finish()));
                        output_frame.present();

                        // The board was drawn before the controls ran; show their edits next frame.
                        if board_changed {
                            state.window.request_redraw();
                        }
                    }
                    _ => (),
                }
            }
            Event::AboutToWait => {
                if state.controller.tick(Instant::now()) {
                    state.window.request_redraw();
                }
                // Sleep until the next generation is due, or until the next event when paused.
                match state.controller.next_deadline() {
                    Some(deadline) => window_target.set_control_flow(ControlFlow::WaitUntil(deadline)),
                    None => window_target.set_control_flow(ControlFlow::Wait),
                }
            }
            _ => ()
        }
    })?;

    Ok(())
}

fn main() -> Result<(), AppError> {
    env_logger::init();

    let config = LifeConfig::from_env()?;
    log::info!(
        "Board {}x{} cells, update interval {} ms",
        COLS,
        ROWS,
        config.update_interval
    );
    let controller = Controller::new(COLS, ROWS, &config)
        .map_err(|e| AppError::Config(format!("invalid update interval: {e}")))?;

    let event_loop = EventLoop::new()?;

    let initial_size = winit::dpi::LogicalSize::new(
        BOARD_WIDTH as f64,
        (BOARD_HEIGHT + CONTROLS_HEIGHT) as f64,
    );

    let window = Arc::new(winit::window::WindowBuilder::new()
        .with_title("Game of Life")
        .with_inner_size(initial_size)
        .with_resizable(false)
        .build(&event_loop)?);

    pollster::block_on(run(event_loop, window, controller))
}
