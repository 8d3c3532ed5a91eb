//! WebGPU rendering module
//!
//! Scenes are built on the CPU as colored triangles in field coordinates and
//! drawn by a single pass-through pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{FrameRecovery, RenderState, field_to_ndc};
pub use scene::build_scene;
pub use vertex::{Vertex, colors};
