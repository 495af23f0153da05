//! wgpu rendering module
//!
//! The scene is built as flat-colored triangles in game pixels and drawn
//! into a letterboxed viewport.

pub mod font;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{Letterbox, RenderError, RenderState};
pub use vertex::Vertex;
