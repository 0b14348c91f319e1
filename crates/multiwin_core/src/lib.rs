//! Core types for the MultiWin engine
//!
//! This crate provides the window-independent building blocks:
//!
//! - [`Sprite`] - A textured quad with kinematic state and edge behavior
//! - [`Scene`] - Container for the sprites of one window
//! - [`SpriteKey`] - Generational key to a sprite in a scene
//! - [`PixelData`] - Decoded RGBA pixels ready for GPU upload
//! - [`FrameClock`] / [`FpsCounter`] - Per-window frame timing
//! - [`AssetError`] - Error type for pixel/font loading

mod sprite;
mod scene;
mod pixels;
mod timing;
mod error;

pub use sprite::{EdgeBehavior, Sprite, Tint};
pub use scene::{Scene, SpriteKey};
pub use pixels::PixelData;
pub use timing::{FpsCounter, FrameClock};
pub use error::AssetError;

// Re-export commonly used types from the math and motion crates for convenience
pub use multiwin_math::Vec2;
pub use multiwin_motion::{bounce_step, wrap_step, Body2D, BounceAxes};
