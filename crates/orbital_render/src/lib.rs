//! 2D Rendering Library
//!
//! This crate turns a [`World`] into pixels on screen.
//!
//! ## Key Components
//!
//! - [`batch::ShapeBatch`] - Tessellates draw calls, implements [`Surface`]
//! - [`canvas::Canvas`] - Persistent canvas texture the batches are painted into
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::ShapePipeline`] - Alpha-blended triangle drawing
//! - [`pipeline::PresentPipeline`] - Blits the canvas to the surface

pub mod batch;
pub mod canvas;
pub mod context;
pub mod pipeline;

pub use batch::{ShapeBatch, ShapeVertex};
pub use canvas::{Canvas, CANVAS_FORMAT};
pub use context::{ContextError, RenderContext};
pub use pipeline::{PresentPipeline, ShapePipeline};

// Re-export core types for convenience
pub use orbital_core::{Surface, World};
pub use orbital_math::Color;
