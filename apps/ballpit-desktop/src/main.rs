use anyhow::{Context, Result};
use ballpit_kernel::{PhysicsWorld, WorldConfig};
use ballpit_render::Renderable;
use ballpit_tools::{FrameTimer, WorldInspector};
use clap::Parser;
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const PANEL_WIDTH: f32 = 280.0;
const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(24, 24, 28);

#[derive(Parser)]
#[command(name = "ballpit-desktop", about = "Ballpit desktop viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// RNG seed; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// YAML world config
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Simulation plus the bookkeeping the side panel shows.
struct AppState {
    world: PhysicsWorld,
    seed: Option<u64>,
    timer: FrameTimer,
    last_frame: Instant,
}

impl AppState {
    fn new(config: &WorldConfig) -> Result<Self> {
        Ok(Self {
            world: PhysicsWorld::from_config(config)?,
            seed: config.seed,
            timer: FrameTimer::new(120),
            last_frame: Instant::now(),
        })
    }

    /// One frame, one tick.
    fn advance(&mut self) {
        let now = Instant::now();
        self.timer.record(now - self.last_frame);
        self.last_frame = now;
        self.world.tick();
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        let summary = WorldInspector::summary(&self.world);

        egui::SidePanel::left("inspector")
            .exact_width(PANEL_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Ballpit");
                ui.separator();
                match self.seed {
                    Some(seed) => ui.label(format!("Tick: {}  Seed: {seed}", summary.tick)),
                    None => ui.label(format!("Tick: {}  Seed: entropy", summary.tick)),
                };
                ui.label(format!("Bodies: {}", summary.body_count));
                ui.label(format!("Kinetic energy: {:.2}", summary.kinetic_energy));
                ui.label(format!(
                    "Momentum: ({:.2}, {:.2})",
                    summary.momentum.x, summary.momentum.y
                ));
                ui.label(format!("Max speed: {:.2}", summary.max_speed));
                ui.label(format!(
                    "Last tick: {} contacts, {} wall bounces",
                    summary.last_tick.contacts, summary.last_tick.wall_bounces
                ));
                if summary.out_of_bounds > 0 {
                    ui.colored_label(
                        egui::Color32::RED,
                        format!("Out of bounds: {}", summary.out_of_bounds),
                    );
                }
                ui.label(format!(
                    "Frame: {:.1} fps ({:?} avg)",
                    self.timer.fps(),
                    self.timer.average()
                ));

                ui.separator();
                ui.heading("Bodies");
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for id in WorldInspector::list_bodies(&self.world) {
                        if let Some(info) = WorldInspector::inspect_body(&self.world, id) {
                            ui.small(info.to_string());
                        }
                    }
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(BACKGROUND))
            .show(ctx, |ui| {
                let boundary = self.world.boundary();
                let size = egui::vec2(boundary.width as f32, boundary.height as f32);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
                let origin = response.rect.min;
                painter.rect_filled(response.rect, 0.0, egui::Color32::from_gray(40));
                for body in self.world.bodies() {
                    paint_body(&painter, origin, body);
                }
            });
    }
}

fn paint_body(painter: &egui::Painter, origin: egui::Pos2, body: &impl Renderable) {
    let center = body.center();
    let color = body.color();
    painter.circle_filled(
        origin + egui::vec2(center.x as f32, center.y as f32),
        body.radius() as f32,
        egui::Color32::from_rgb(color.r, color.g, color.b),
    );
}

/// Surface, device and the egui pipeline bound to one window.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(window: Arc<Window>) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("creating surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("ballpit_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("creating device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    fn paint(&mut self, full_output: egui::FullOutput, ctx: &EguiContext) {
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

        let paint_jobs = ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

struct ViewerApp {
    state: AppState,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
}

impl ViewerApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            window: None,
            gpu: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let boundary = self.state.world.boundary();
        let attrs = Window::default_attributes()
            .with_title("Ballpit")
            .with_inner_size(PhysicalSize::new(
                (boundary.width + PANEL_WIDTH as f64 + 40.0) as u32,
                (boundary.height + 40.0) as u32,
            ));
        let window = Arc::new(event_loop.create_window(attrs).context("creating window")?);

        let gpu = Gpu::new(window.clone())?;
        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_winit = Some(egui_winit);
        Ok(())
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("failed to start viewer: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(window), Some(gpu), Some(egui_winit)) =
            (&self.window, &mut self.gpu, &mut self.egui_winit)
        else {
            return;
        };
        let _ = egui_winit.on_window_event(window, &event);

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!(tick = self.state.world.tick_count(), "viewer closing");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => gpu.resize(new_size),
            WindowEvent::RedrawRequested => {
                self.state.advance();

                let raw_input = egui_winit.take_egui_input(window);
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_ui(ctx);
                });
                egui_winit.handle_platform_output(window, full_output.platform_output.clone());
                gpu.paint(full_output, &self.egui_ctx);

                window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("ballpit-desktop starting");

    let mut config = match &cli.config {
        Some(path) => WorldConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WorldConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(AppState::new(&config)?);
    event_loop.run_app(&mut app)?;

    Ok(())
}
