//! GPU presentation system
//!
//! Manages GPU presentation including:
//! - Render context and surface
//! - The persistent canvas texture the world paints onto
//! - Drawing the frame's batch and presenting the canvas

use std::sync::Arc;
use winit::window::Window;
use orbital_math::Color;
use orbital_render::{Canvas, ContextError, PresentPipeline, RenderContext, ShapeBatch};
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// The GPU could not be initialized
    Init(ContextError),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Init(e) => write!(f, "Renderer initialization failed: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Init(e)
    }
}

/// Owns the canvas and presents it to the window
pub struct RenderSystem {
    context: RenderContext,
    present_pipeline: PresentPipeline,
    canvas: Canvas,
}

impl RenderSystem {
    /// Create render system from window and config
    ///
    /// The canvas starts at the window size, painted with `background`.
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        vsync: bool,
        background: Color,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_settings(
            window,
            vsync,
            render_config.high_performance,
        ))?;

        let (width, height) = (context.size.width.max(1), context.size.height.max(1));
        let canvas = Canvas::new(&context.device, context.format(), width, height, background);
        let mut present_pipeline = PresentPipeline::new(&context.device, context.format());
        present_pipeline.set_source(&context.device, canvas.sample_view());

        log::info!("Canvas created at {}x{}", width, height);

        Ok(Self {
            context,
            present_pipeline,
            canvas,
        })
    }

    /// Handle window resize
    ///
    /// The surface is reconfigured now; the canvas follows when the world
    /// applies the matching resize command.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
    }

    /// The batch the world paints onto this frame
    pub fn batch_mut(&mut self) -> &mut ShapeBatch {
        self.canvas.batch_mut()
    }

    /// Draw the pending batch into the canvas and present it
    ///
    /// The canvas pass is submitted even when the surface is unavailable, so
    /// the trails stay consistent with the world.
    pub fn render_frame(&mut self) -> Result<(), RenderError> {
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        if self
            .canvas
            .flush(&self.context.device, &self.context.queue, &mut encoder)
        {
            self.present_pipeline
                .set_source(&self.context.device, self.canvas.sample_view());
        }

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(e) => {
                self.context.queue.submit(std::iter::once(encoder.finish()));
                return Err(match e {
                    wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
                    wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
                    e => RenderError::Other(format!("{:?}", e)),
                });
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.present_pipeline.render(&mut encoder, &view);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Reconfigure the surface after it was lost
    pub fn recover_surface(&self) {
        self.context.reconfigure();
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_context_error_converts() {
        let err: RenderError = ContextError::NoAdapter.into();
        assert_eq!(
            err.to_string(),
            "Renderer initialization failed: No compatible GPU adapter found"
        );
    }
}
