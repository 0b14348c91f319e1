//! Per-window frame composition
//!
//! `WindowRenderer` owns the pipelines of one context and turns a scene
//! snapshot into a presented frame: clear, sprites, then text on top.

use multiwin_core::AssetError;
use multiwin_math::Vec2;

use crate::context::RenderContext;
use crate::pipeline::{GlyphInstance, SpriteInstance, SpritePipeline, TextPipeline};
use crate::texture::SpriteTexture;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
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
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// One line of text to draw this frame
#[derive(Clone, Copy, Debug)]
pub struct TextDraw<'a> {
    /// The text, drawn with its top-left at `position`
    pub text: &'a str,
    /// Top-left corner in pixels
    pub position: Vec2,
    /// RGBA text color
    pub color: [f32; 4],
}

/// Pipelines and scratch buffers for one window
pub struct WindowRenderer {
    sprite_pipeline: SpritePipeline,
    text_pipeline: Option<TextPipeline>,
    glyph_scratch: Vec<GlyphInstance>,
}

impl WindowRenderer {
    /// Create a renderer for one context, without text support
    pub fn new(ctx: &RenderContext) -> Self {
        Self {
            sprite_pipeline: SpritePipeline::new(&ctx.device, ctx.config.format),
            text_pipeline: None,
            glyph_scratch: Vec::new(),
        }
    }

    /// Enable text drawing by parsing a TTF/OTF font and baking its atlas
    ///
    /// Each context bakes its own atlas; the font bytes can be shared.
    pub fn enable_text(
        &mut self,
        ctx: &RenderContext,
        font_bytes: &[u8],
        px: f32,
    ) -> Result<(), AssetError> {
        let font = fontdue::Font::from_bytes(font_bytes, fontdue::FontSettings::default())
            .map_err(|e| AssetError::Decode(e.to_string()))?;
        self.text_pipeline = Some(TextPipeline::new(
            &ctx.device,
            &ctx.queue,
            ctx.config.format,
            &font,
            px,
        ));
        Ok(())
    }

    /// Whether text drawing is available
    pub fn has_text(&self) -> bool {
        self.text_pipeline.is_some()
    }

    /// Vertical distance between stacked text lines
    ///
    /// Returns 0.0 when text is disabled.
    pub fn line_height(&self) -> f32 {
        self.text_pipeline.as_ref().map_or(0.0, |t| t.line_height())
    }

    /// Upload pixels as a texture owned by this renderer's context
    pub fn create_texture(&self, ctx: &RenderContext, pixels: &multiwin_core::PixelData) -> SpriteTexture {
        SpriteTexture::upload(
            &ctx.device,
            &ctx.queue,
            pixels,
            self.sprite_pipeline.texture_layout(),
            self.sprite_pipeline.sampler(),
        )
    }

    /// Render and present a single frame
    ///
    /// Draw order: clear to `background`, all sprite `instances` with
    /// `texture`, then `texts` on top. Text draws are skipped when no
    /// font is enabled.
    pub fn render_frame(
        &mut self,
        ctx: &RenderContext,
        texture: &SpriteTexture,
        instances: &[SpriteInstance],
        texts: &[TextDraw<'_>],
        background: [f32; 4],
    ) -> Result<(), RenderError> {
        let bounds = ctx.bounds();

        self.sprite_pipeline.update_globals(&ctx.queue, bounds);
        self.sprite_pipeline
            .upload_instances(&ctx.device, &ctx.queue, instances);

        self.glyph_scratch.clear();
        if let Some(text_pipeline) = &mut self.text_pipeline {
            for draw in texts {
                text_pipeline.layout(draw.text, draw.position, draw.color, &mut self.glyph_scratch);
            }
            text_pipeline.update_globals(&ctx.queue, bounds);
            text_pipeline.upload_instances(&ctx.device, &ctx.queue, &self.glyph_scratch);
        }

        // Get surface texture
        let output = match ctx.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: background[0] as f64,
                            g: background[1] as f64,
                            b: background[2] as f64,
                            a: background[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sprite_pipeline
                .draw(&mut pass, texture.bind_group(), instances.len() as u32);

            if let Some(text_pipeline) = &self.text_pipeline {
                text_pipeline.draw(&mut pass, self.glyph_scratch.len() as u32);
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
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
}
