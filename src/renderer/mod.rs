//! WebGPU rendering module
//!
//! Every entity is a filled circle; the scene is rebuilt as one triangle list
//! per frame and drawn with a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, pixel_to_ndc};
pub use scene::{Palette, scene_vertices};
pub use vertex::Vertex;
