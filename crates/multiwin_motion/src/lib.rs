//! 2D kinematics for MultiWin
//!
//! This crate provides the motion model for sprites inside a window:
//! - [`Body2D`] - position/velocity pair with explicit Euler integration
//! - [`bounce_step`] - clamp-and-reflect against the framebuffer edges
//! - [`wrap_step`] - toroidal wrap-around as an alternative edge behavior

pub mod body;
pub mod bounce;

pub use body::Body2D;
pub use bounce::{bounce_step, wrap_step, BounceAxes};
