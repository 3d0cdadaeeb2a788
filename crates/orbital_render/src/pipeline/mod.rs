//! Rendering pipeline components
//!
//! Shapes are drawn into the canvas texture, which is then blitted to the
//! surface.

pub mod present_pipeline;
pub mod shape_pipeline;

pub use present_pipeline::PresentPipeline;
pub use shape_pipeline::{CanvasUniforms, ShapePipeline};
