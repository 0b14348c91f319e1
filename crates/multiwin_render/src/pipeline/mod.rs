//! Drawing pipelines
//!
//! Two pipelines cover everything a window draws:
//!
//! - [`SpritePipeline`] - instanced textured quads (the sprites)
//! - [`TextPipeline`] - glyph-atlas quads (captions and the FPS overlay)

pub mod types;
mod sprite_pipeline;
mod text_pipeline;

pub use types::{GlyphInstance, Globals, SpriteInstance};
pub use sprite_pipeline::SpritePipeline;
pub use text_pipeline::TextPipeline;
