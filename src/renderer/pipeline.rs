//! wgpu render pipeline setup

use std::sync::Arc;

use glam::Vec2;
use thiserror::Error;
use wgpu::util::DeviceExt;
use winit::window::Window;

use super::vertex::{Vertex, colors};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoFormat,
}

/// Region of the window the game is drawn into
///
/// The game keeps its 480×640 aspect; the rest of the window is bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Window pixels per game pixel
    pub scale: f32,
}

impl Letterbox {
    pub fn fit(window_width: u32, window_height: u32) -> Self {
        let (ww, wh) = (window_width.max(1) as f32, window_height.max(1) as f32);
        let scale = (ww / SCREEN_WIDTH).min(wh / SCREEN_HEIGHT);
        let width = SCREEN_WIDTH * scale;
        let height = SCREEN_HEIGHT * scale;
        Self {
            x: (ww - width) / 2.0,
            y: (wh - height) / 2.0,
            width,
            height,
            scale,
        }
    }

    /// Map a window pixel to game space, `None` in the bars
    pub fn window_to_game(&self, px: f32, py: f32) -> Option<Vec2> {
        let x = (px - self.x) / self.scale;
        let y = (py - self.y) / self.scale;
        ((0.0..=SCREEN_WIDTH).contains(&x) && (0.0..=SCREEN_HEIGHT).contains(&y))
            .then(|| Vec2::new(x, y))
    }
}

/// Convert game coordinates (origin top-left, y down) to normalized
/// device coordinates of the letterboxed viewport
pub fn game_to_ndc(x: f32, y: f32) -> (f32, f32) {
    (x / SCREEN_WIDTH * 2.0 - 1.0, 1.0 - y / SCREEN_HEIGHT * 2.0)
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    /// Window size in pixels
    pub size: (u32, u32),
    pub letterbox: Letterbox,
}

impl RenderState {
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("robo-jump-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::NoFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Placeholder until the first frame is uploaded
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vertex_buffer"),
            contents: bytemuck::cast_slice(&[Vertex::new(0.0, 0.0, [1.0; 4])]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_count: 0,
            size: (width, height),
            letterbox: Letterbox::fit(width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
            self.letterbox = Letterbox::fit(new_width, new_height);
        }
    }

    /// Reconfigure the surface at its current size (after `SurfaceError::Lost`)
    pub fn reconfigure(&mut self) {
        let (w, h) = self.size;
        self.resize(w, h);
    }

    pub fn window_to_game(&self, px: f32, py: f32) -> Option<Vec2> {
        self.letterbox.window_to_game(px, py)
    }

    /// Upload vertices and render
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let ndc_vertices: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let (x, y) = game_to_ndc(v.position[0], v.position[1]);
                Vertex::new(x, y, v.color)
            })
            .collect();

        if !ndc_vertices.is_empty() {
            self.vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("vertex_buffer"),
                    contents: bytemuck::cast_slice(&ndc_vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
        }
        self.vertex_count = ndc_vertices.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        let [r, g, b, a] = colors::LETTERBOX;
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if self.vertex_count > 0 {
                let lb = self.letterbox;
                render_pass.set_viewport(lb.x, lb.y, lb.width, lb.height, 0.0, 1.0);
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..self.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit() {
        let lb = Letterbox::fit(480, 640);
        assert_eq!(lb.scale, 1.0);
        assert_eq!((lb.x, lb.y), (0.0, 0.0));
    }

    #[test]
    fn test_wide_window_gets_side_bars() {
        let lb = Letterbox::fit(1920, 1280);
        assert_eq!(lb.scale, 2.0);
        assert_eq!(lb.width, 960.0);
        assert_eq!(lb.x, 480.0);
        assert_eq!(lb.y, 0.0);
    }

    #[test]
    fn test_tall_window_gets_top_bars() {
        let lb = Letterbox::fit(480, 1000);
        assert_eq!(lb.scale, 1.0);
        assert_eq!(lb.y, 180.0);
    }

    #[test]
    fn test_window_to_game() {
        let lb = Letterbox::fit(1920, 1280);
        assert_eq!(lb.window_to_game(480.0, 0.0), Some(Vec2::ZERO));
        assert_eq!(lb.window_to_game(960.0, 640.0), Some(Vec2::new(240.0, 320.0)));
        assert_eq!(lb.window_to_game(100.0, 100.0), None);
        assert_eq!(lb.window_to_game(1500.0, 100.0), None);
    }

    #[test]
    fn test_game_to_ndc_corners() {
        assert_eq!(game_to_ndc(0.0, 0.0), (-1.0, 1.0));
        assert_eq!(game_to_ndc(SCREEN_WIDTH, SCREEN_HEIGHT), (1.0, -1.0));
        assert_eq!(game_to_ndc(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0), (0.0, 0.0));
    }

    #[test]
    fn test_zero_size_window() {
        let lb = Letterbox::fit(0, 0);
        assert!(lb.scale > 0.0);
    }
}
