//! Robo Jump - native entry point
//!
//! Owns the window and GPU state; everything else lives in `Session`.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

use robo_jump::consts::{MAX_SUBSTEPS, SCREEN_HEIGHT, SCREEN_WIDTH, SIM_DT};
use robo_jump::platform::{DataDir, key_name};
use robo_jump::renderer::{RenderState, scene};
use robo_jump::ui::Session;

struct App {
    session: Session,
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    accumulator: f32,
    last_frame: Instant,
    cursor: (f32, f32),
    // FPS tracking
    frame_count: u32,
    fps_window_start: Instant,
    fps: u32,
}

impl App {
    fn new(session: Session) -> Self {
        let now = Instant::now();
        Self {
            session,
            window: None,
            render_state: None,
            accumulator: 0.0,
            last_frame: now,
            cursor: (0.0, 0.0),
            frame_count: 0,
            fps_window_start: now,
            fps: 0,
        }
    }

    /// Run as many fixed ticks as the elapsed time calls for
    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.session.update();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        self.frame_count += 1;
        let elapsed = now.duration_since(self.fps_window_start).as_secs_f32();
        if elapsed >= 1.0 {
            self.fps = (self.frame_count as f32 / elapsed).round() as u32;
            self.frame_count = 0;
            self.fps_window_start = now;
        }
    }

    fn redraw(&mut self) {
        self.update();

        let Some(window) = self.window.as_ref() else {
            return;
        };
        let title = self.session.title();
        if window.title() != title {
            window.set_title(title);
        }

        let Some(render_state) = self.render_state.as_mut() else {
            return;
        };
        let mut vertices = scene::build(&self.session);
        if self.session.settings.show_fps {
            vertices.extend(scene::fps_counter(self.fps));
        }

        match render_state.render(&vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => log::warn!("Surface timeout"),
            Err(e) => log::error!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.session.title())
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64))
            .with_min_inner_size(LogicalSize::new(
                SCREEN_WIDTH as f64 / 2.0,
                SCREEN_HEIGHT as f64 / 2.0,
            ));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(RenderState::new(window.clone())) {
            Ok(render_state) => self.render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to initialize graphics: {}", e);
                event_loop.exit();
                return;
            }
        }

        self.last_frame = Instant::now();
        self.window = Some(window);
        log::info!("Robo Jump running!");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(render_state) = self.render_state.as_mut() {
                    render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;
                if pressed && event.repeat {
                    return;
                }
                // Names keep their case while typing
                let name = match (&event.logical_key, self.session.name_edit.is_some()) {
                    (Key::Character(text), true) => Some(text.to_string()),
                    (key, _) => key_name(key),
                };
                if let Some(name) = name {
                    self.session.handle_key(&name, pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let point = self
                    .render_state
                    .as_ref()
                    .and_then(|rs| rs.window_to_game(self.cursor.0, self.cursor.1));
                if let Some(point) = point {
                    self.session.handle_click(point.x, point.y);
                }
            }
            WindowEvent::Focused(false) => self.session.pause_if_playing(),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Robo Jump starting...");

    let data = DataDir::resolve();
    log::info!("Data directory: {}", data.root().display());
    let session = Session::new(data);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(session);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
