//! Ripplefield - rain falling on a pond of finite-difference waves
//!
//! A height grid is stepped at a fixed rate, disturbed by random drops,
//! and re-meshed into a lit water surface every frame.

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use ripplefield::camera::CameraSystem;
use ripplefield::cli::Args;
use ripplefield::params::{LightParams, RenderConfig, UvScroll, WaterMaterial};
use ripplefield::rendering::{RenderSystem, Uniforms};
use ripplefield::waves::WaveSystem;

/// Magnitude of the drop placed by the splash key (meters)
const SPLASH_MAGNITUDE_M: f32 = 1.0;

/// Frame delta used by headless runs (seconds)
const HEADLESS_FRAME_DT_S: f32 = 1.0 / 60.0;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    water: WaveSystem,
    camera: CameraSystem,

    // Configuration
    render_config: RenderConfig,
    light: LightParams,
    material: WaterMaterial,
    scroll: UvScroll,

    // Time tracking
    start_time: Instant,
    last_frame: Instant,
}

impl App {
    fn new(water: WaveSystem, camera: CameraSystem) -> Self {
        let now = Instant::now();
        Self {
            window: None,
            render_system: None,
            water,
            camera,
            render_config: RenderConfig::default(),
            light: LightParams::default(),
            material: WaterMaterial::default(),
            scroll: UvScroll::default(),
            start_time: now,
            last_frame: now,
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Ripplefield")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.water.mesh,
            &self.render_config,
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        log::info!("Ripplefield is running: ESC quits, SPACE splashes, R toggles rain");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.last_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
                self.render_config.window_width = size.width.max(1);
                self.render_config.window_height = size.height.max(1);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::Space => {
                    if let Err(e) = self.water.splash_centre(SPLASH_MAGNITUDE_M) {
                        log::warn!("Splash rejected: {}", e);
                    }
                }
                KeyCode::KeyR => {
                    let enabled = !self.water.rain_enabled();
                    self.water.set_rain_enabled(enabled);
                }
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                if !self.render_frame() {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}

impl App {
    /// Render a single frame
    ///
    /// Returns `false` when rendering cannot continue.
    fn render_frame(&mut self) -> bool {
        let Some(render_system) = self.render_system.as_mut() else {
            return true;
        };

        let now = Instant::now();
        let frame_dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        let time_s = now.duration_since(self.start_time).as_secs_f32();

        // Step the water and publish this frame's snapshot
        self.water.update(frame_dt);
        render_system.update_vertices(&self.water.mesh.vertices);

        self.scroll.advance(&self.material, frame_dt);

        let (view_proj, eye) = self
            .camera
            .create_view_proj_matrix(time_s, &self.render_config);

        let uniforms = Uniforms::new(
            view_proj,
            eye,
            &self.light,
            &self.material,
            self.scroll,
            time_s,
        );
        render_system.update_uniforms(&uniforms);

        match render_system.render() {
            Ok(()) => true,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
                true
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                false
            }
            Err(e) => {
                log::warn!("Render error: {:?}", e);
                true
            }
        }
    }
}

/// Step the simulation without a window and log how the surface evolves
fn run_headless(mut water: WaveSystem, seconds: f32) {
    let frames = (seconds / HEADLESS_FRAME_DT_S).ceil() as usize;
    let frames_per_report = (1.0 / HEADLESS_FRAME_DT_S).round() as usize;
    let mut total_drops = 0;

    log::info!("Headless run: {} frames ({}s)", frames, seconds);

    for frame in 1..=frames {
        let stats = water.update(HEADLESS_FRAME_DT_S);
        total_drops += stats.drops.len();

        if frame % frames_per_report == 0 || frame == frames {
            log::info!(
                "t = {:6.2}s  ticks {:6}  drops {:4}  max |h| {:.4}  energy {:.5}",
                frame as f32 * HEADLESS_FRAME_DT_S,
                water.grid.tick_count(),
                total_drops,
                water.grid.max_abs_height(),
                water.grid.energy()
            );
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let water = match WaveSystem::new(&args.wave_params(), args.rain_params()) {
        Ok(water) => water,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Some(seconds) = args.headless {
        run_headless(water, seconds);
        return;
    }

    let camera = CameraSystem::new(args.parse_camera_preset());
    let mut app = App::new(water, camera);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
