//! Window rendering for MultiWin
//!
//! This crate provides the wgpu-based drawing layer. Every window owns its
//! own [`context::RenderContext`] and the GPU resources created against it;
//! nothing here is shared across windows.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface for one window
//! - [`texture::SpriteTexture`] - Per-context GPU texture with its bind group
//! - [`pipeline::SpritePipeline`] - Instanced textured-quad pipeline
//! - [`pipeline::TextPipeline`] - Glyph-atlas text pipeline (fontdue)
//! - [`renderer::WindowRenderer`] - Per-window frame composition

pub mod context;
pub mod texture;
pub mod pipeline;
pub mod renderer;

pub use context::{ContextError, RenderContext};
pub use texture::SpriteTexture;
pub use renderer::{RenderError, TextDraw, WindowRenderer};

// Re-export core types for convenience
pub use multiwin_core::{PixelData, Scene, Sprite, Tint, Vec2};
