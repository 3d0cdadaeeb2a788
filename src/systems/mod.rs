//! Application systems
//!
//! Window, simulation clock and presentation, kept out of main.rs so they can be tested.

mod render;
mod simulation;
mod window;

pub use render::{RenderError, RenderSystem};
pub use simulation::{FrameClock, FrameResult, SimulationSystem};
pub use window::{status_line, WindowError, WindowSystem};
