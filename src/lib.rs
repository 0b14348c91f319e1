//! MultiWin - Multi-Window Sprite Playground
//!
//! Library surface of the demo application: configuration loading and the
//! winit application driving one render context per window. The engine
//! pieces live in the `multiwin_*` crates.

pub mod app;
pub mod config;
