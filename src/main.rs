//! MultiWin - Multi-Window Sprite Playground
//!
//! Opens the configured set of windows, each with its own rendering
//! context and bouncing sprites, and runs until the last one closes.

use winit::event_loop::{ControlFlow, EventLoop};

use multiwin::app::App;
use multiwin::config::AppConfig;

fn main() {
    // Load configuration before logging so the log level can come from it
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.debug.log_level),
    )
    .init();

    log::info!("Starting MultiWin with {} window(s)", config.windows.len());

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
