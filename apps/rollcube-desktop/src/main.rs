use anyhow::{Context as _, Result};
use clap::Parser;
use egui::Context as EguiContext;
use rollcube_common::Settings;
use rollcube_input::{InputEvent, InputTracker};
use rollcube_kernel::RollingCube;
use rollcube_render::FloorGrid;
use rollcube_render_wgpu::{FixedCamera, WgpuRenderer};
use rollcube_tools::CubeInspector;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

/// Longest frame fed to the engine; a stalled window resumes without a jump.
const MAX_FRAME_SECONDS: f32 = 0.1;

#[derive(Parser)]
#[command(name = "rollcube-desktop", about = "Roll a cube around a grid")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Settings file (YAML); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Host key name for the tracker, matching the names used in key bindings.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(s) => Some(s.to_string()),
        Key::Named(named) => Some(format!("{named:?}")),
        _ => None,
    }
}

/// Game state, independent of the GPU.
struct AppState {
    cube: RollingCube,
    input: InputTracker,
    camera: FixedCamera,
    floor: FloorGrid,
    show_hud: bool,
    last_frame: Instant,
}

impl AppState {
    fn new(settings: Settings) -> Self {
        Self {
            cube: RollingCube::new(settings.cube),
            input: InputTracker::new(settings.keys),
            camera: FixedCamera::default(),
            floor: FloorGrid::from_config(&settings.cube),
            show_hud: true,
            last_frame: Instant::now(),
        }
    }

    fn update(&mut self, dt: f32) {
        self.cube.update(dt, self.input.pending_direction());
        for event in self.cube.drain_events() {
            tracing::trace!(?event, "roll event");
        }
    }

    /// Returns `false` when the window should close.
    fn handle_key(&mut self, key: &Key, pressed: bool, repeat: bool) -> bool {
        if pressed && !repeat {
            match key {
                Key::Named(NamedKey::Escape) => return false,
                Key::Named(NamedKey::F1) => {
                    self.show_hud = !self.show_hud;
                    return true;
                }
                _ => {}
            }
        }
        if let Some(name) = key_name(key) {
            let event = if pressed {
                InputEvent::KeyDown(name)
            } else {
                InputEvent::KeyUp(name)
            };
            self.input.apply(&event);
        }
        true
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        let summary = CubeInspector::summary(&self.cube);

        egui::Window::new("Rolling Cube")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Frame: {}", summary.frame));
                ui.label(format!("Grid: {}", summary.grid));
                ui.label(format!("Rolling: {}", summary.direction));
                ui.label(format!("Angle: {:.1}", summary.angle));
                ui.label(format!("Turns: {}", summary.turns_completed));
                ui.label(format!(
                    "Position: ({:.1}, {:.1}, {:.1})",
                    summary.position[0], summary.position[1], summary.position[2]
                ));
                ui.separator();
                ui.label(format!("Queued: {}", self.input.pending_direction()));
                ui.small("W/S/A/D or arrows to roll, F1 hides this, Esc quits");
            });
    }
}

/// Everything tied to the window and GPU device.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext, floor: &FloorGrid) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Rolling Cube")
            .with_inner_size(LogicalSize::new(1080u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("rollcube_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or_default(),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, format, config.width, config.height, floor);
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            ?format,
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn draw(&mut self, state: &AppState, egui_ctx: &EguiContext) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            &state.camera,
            &state.cube.transform(),
        );

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| state.draw_ui(ctx));
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);
        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hud_encoder"),
            });
        self.egui_renderer
            .update_buffers(&self.device, &self.queue, &mut encoder, &paint_jobs, &screen);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("hud_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer.render(&mut pass, &paint_jobs, &screen);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

struct GameApp {
    state: AppState,
    egui_ctx: EguiContext,
    gpu: Option<Gpu>,
}

impl GameApp {
    fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
            egui_ctx: EguiContext::default(),
            gpu: None,
        }
    }
}

impl ApplicationHandler for GameApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx, &self.state.floor) {
            Ok(gpu) => {
                let size = gpu.window.inner_size();
                self.state.camera.set_viewport(size.width, size.height);
                self.state.last_frame = Instant::now();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        // Keys always reach the tracker so a release is never lost to the HUD.
        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
        if response.consumed && !matches!(event, WindowEvent::KeyboardInput { .. }) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                gpu.resize(size.width, size.height);
                self.state.camera.set_viewport(size.width, size.height);
            }
            WindowEvent::Focused(false) => {
                self.state.input.apply(&InputEvent::FocusLost);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;
                if !self.state.handle_key(&logical_key, pressed, repeat) {
                    tracing::info!("escape pressed, closing");
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame)
                    .as_secs_f32()
                    .min(MAX_FRAME_SECONDS);
                self.state.last_frame = now;
                self.state.update(dt);

                gpu.draw(&self.state, &self.egui_ctx);
                gpu.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let settings = Settings::load_or_default(cli.config.as_deref())?;
    tracing::info!(side = settings.cube.side, speed = settings.cube.speed, "rollcube-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GameApp::new(settings);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcube_common::{Direction, GridPos};
    use winit::keyboard::SmolStr;

    fn char_key(s: &str) -> Key {
        Key::Character(SmolStr::new(s))
    }

    #[test]
    fn named_keys_use_binding_names() {
        assert_eq!(
            key_name(&Key::Named(NamedKey::ArrowUp)).as_deref(),
            Some("ArrowUp")
        );
        assert_eq!(key_name(&char_key("W")).as_deref(), Some("W"));
    }

    #[test]
    fn held_key_rolls_cube() {
        let mut state = AppState::new(Settings::default());
        assert!(state.handle_key(&char_key("d"), true, false));
        for _ in 0..4 {
            state.update(0.0625);
        }
        assert!(state.handle_key(&char_key("d"), false, false));
        assert_eq!(state.cube.grid(), GridPos::new(1, 0));
        assert_eq!(state.input.pending_direction(), Direction::None);
    }

    #[test]
    fn escape_requests_close() {
        let mut state = AppState::new(Settings::default());
        assert!(!state.handle_key(&Key::Named(NamedKey::Escape), true, false));
    }

    #[test]
    fn f1_toggles_hud() {
        let mut state = AppState::new(Settings::default());
        assert!(state.show_hud);
        state.handle_key(&Key::Named(NamedKey::F1), true, false);
        assert!(!state.show_hud);
        state.handle_key(&Key::Named(NamedKey::F1), true, true);
        assert!(!state.show_hud);
    }
}
