//! Persistent canvas texture
//!
//! The sketch never clears between frames, so shapes are painted into an
//! offscreen texture that keeps its contents. Each frame the pending
//! [`ShapeBatch`] is replayed on top with alpha blending and the result is
//! handed to the present pipeline.

use orbital_math::Color;

use crate::batch::ShapeBatch;
use crate::pipeline::{CanvasUniforms, ShapePipeline};

/// Storage format of the canvas texture
///
/// Linear so blending happens on the stored 8-bit values.
pub const CANVAS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// View format used when sampling the canvas for presentation
///
/// On sRGB surfaces the canvas is read through an sRGB view, so the stored
/// bytes reach the screen unchanged.
pub fn sample_format(surface_format: wgpu::TextureFormat) -> wgpu::TextureFormat {
    if surface_format.is_srgb() {
        CANVAS_FORMAT.add_srgb_suffix()
    } else {
        CANVAS_FORMAT
    }
}

/// Convert an 8-bit color to a wgpu clear color
pub fn clear_color(color: Color) -> wgpu::Color {
    let [r, g, b, a] = color.to_f32_array();
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

/// GPU canvas: offscreen texture plus the batch painted into it
pub struct Canvas {
    texture: wgpu::Texture,
    render_view: wgpu::TextureView,
    sample_view: wgpu::TextureView,
    sample_format: wgpu::TextureFormat,
    pipeline: ShapePipeline,
    batch: ShapeBatch,
}

impl Canvas {
    /// Create a canvas of the given size, initially `background`
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        background: Color,
    ) -> Self {
        let size = (width.max(1), height.max(1));
        let sample_format = sample_format(surface_format);
        let (texture, render_view, sample_view) = Self::create_texture(device, size, sample_format);

        let mut batch = ShapeBatch::new(size.0, size.1);
        batch.full_clear(background);

        Self {
            texture,
            render_view,
            sample_view,
            sample_format,
            pipeline: ShapePipeline::new(device, CANVAS_FORMAT),
            batch,
        }
    }

    fn create_texture(
        device: &wgpu::Device,
        (width, height): (u32, u32),
        sample_format: wgpu::TextureFormat,
    ) -> (wgpu::Texture, wgpu::TextureView, wgpu::TextureView) {
        let view_formats: &[wgpu::TextureFormat] = if sample_format == CANVAS_FORMAT {
            &[]
        } else {
            std::slice::from_ref(&sample_format)
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Canvas Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: CANVAS_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats,
        });

        let render_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sample_view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Canvas Sample View"),
            format: Some(sample_format),
            ..Default::default()
        });

        (texture, render_view, sample_view)
    }

    /// The batch the world paints into
    pub fn batch_mut(&mut self) -> &mut ShapeBatch {
        &mut self.batch
    }

    /// Current texture size
    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }

    /// View the present pipeline samples from
    pub fn sample_view(&self) -> &wgpu::TextureView {
        &self.sample_view
    }

    /// Paint the pending batch into the canvas texture
    ///
    /// Recreates the texture first when the batch was resized. Returns `true`
    /// in that case, so the caller can rebind [`Self::sample_view`].
    pub fn flush(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, encoder: &mut wgpu::CommandEncoder) -> bool {
        let wanted = (self.batch.width().max(1), self.batch.height().max(1));
        let recreated = wanted != self.size();
        if recreated {
            let (texture, render_view, sample_view) = Self::create_texture(device, wanted, self.sample_format);
            self.texture = texture;
            self.render_view = render_view;
            self.sample_view = sample_view;
            log::debug!("Canvas texture recreated at {}x{}", wanted.0, wanted.1);

            // A fresh texture has undefined contents until cleared
            if self.batch.pending_clear().is_none() {
                self.batch.full_clear(Color::BLACK);
            }
        }

        if self.batch.is_empty() {
            return recreated;
        }

        let (width, height) = self.size();
        self.pipeline.update_uniforms(queue, &CanvasUniforms::new(width, height));
        let count = self.pipeline.upload(device, queue, self.batch.vertices());
        let load = match self.batch.pending_clear() {
            Some(color) => wgpu::LoadOp::Clear(clear_color(color)),
            None => wgpu::LoadOp::Load,
        };
        self.pipeline.render(encoder, &self.render_view, load, count);
        self.batch.finish();

        recreated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_format_follows_surface() {
        assert_eq!(
            sample_format(wgpu::TextureFormat::Bgra8UnormSrgb),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
        assert_eq!(sample_format(wgpu::TextureFormat::Bgra8Unorm), CANVAS_FORMAT);
    }

    #[test]
    fn test_clear_color_scales_bytes() {
        let color = clear_color(Color::new(255, 0, 51, 255));
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 0.2).abs() < 1e-6);
        assert_eq!(color.a, 1.0);
    }
}
