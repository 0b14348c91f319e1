//! Multi-window application
//!
//! Owns one [`WindowEntry`] per open window. Every entry bundles a winit
//! window with its own render context, textures, scene, and clock, so
//! closing one window releases exactly its resources and never touches the
//! others. The application exits when the last window closes.

use std::collections::HashMap;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition},
    event::{ElementState, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use multiwin_core::{Body2D, FpsCounter, FrameClock, PixelData, Scene, Sprite, Vec2};
use multiwin_render::{
    context::{ContextError, RenderContext},
    pipeline::SpriteInstance,
    RenderError, SpriteTexture, TextDraw, WindowRenderer,
};

use crate::config::{AppConfig, TextConfig, WindowConfig};

/// Angle between successive sprite headings, in radians
///
/// The golden angle spreads any sprite count evenly around the circle
/// without needing a random source.
const GOLDEN_ANGLE: f32 = 2.399_963;

/// Where the caption is drawn inside a window, in pixels
const CAPTION_POS: Vec2 = Vec2::new(190.0, 200.0);

/// Where the FPS overlay is drawn, in pixels
const FPS_POS: Vec2 = Vec2::new(8.0, 4.0);

/// FPS overlay color (opaque green)
const FPS_COLOR: [f32; 4] = [0.0, 0.62, 0.18, 1.0];

/// System font locations probed when no font is configured
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Error type for opening one window
#[derive(Debug)]
pub enum WindowOpenError {
    /// The windowing system refused to create the window
    CreationFailed(String),
    /// GPU context setup failed
    Context(ContextError),
}

impl std::fmt::Display for WindowOpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowOpenError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
            WindowOpenError::Context(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for WindowOpenError {}

impl From<ContextError> for WindowOpenError {
    fn from(err: ContextError) -> Self {
        WindowOpenError::Context(err)
    }
}

/// Everything one open window owns
struct WindowEntry {
    window: Arc<Window>,
    ctx: RenderContext,
    renderer: WindowRenderer,
    texture: SpriteTexture,
    scene: Scene,
    clock: FrameClock,
    fps: FpsCounter,
    settings: WindowConfig,
}

impl WindowEntry {
    /// Release this window's GPU resources
    ///
    /// Textures are released before the renderer and context they were
    /// created against.
    fn teardown(self) {
        self.texture.unload();
        drop(self.renderer);
        drop(self.ctx);
    }
}

/// Main application state
pub struct App {
    config: AppConfig,
    /// Decoded sprite pixels, uploaded separately to every context
    pixels: PixelData,
    /// Raw font bytes shared by all windows, or None when text is disabled
    font_bytes: Option<Vec<u8>>,
    windows: HashMap<WindowId, WindowEntry>,
}

impl App {
    /// Build the application from its configuration
    pub fn new(config: AppConfig) -> Self {
        let pixels = load_sprite_pixels(&config);
        let font_bytes = load_font_bytes(&config.text);

        Self {
            config,
            pixels,
            font_bytes,
            windows: HashMap::new(),
        }
    }

    /// Create the window, its context, and its resources
    fn open_window(
        &self,
        event_loop: &ActiveEventLoop,
        cfg: &WindowConfig,
    ) -> Result<(WindowId, WindowEntry), WindowOpenError> {
        let mut attrs = Window::default_attributes()
            .with_title(&cfg.title)
            .with_inner_size(LogicalSize::new(cfg.width, cfg.height))
            .with_resizable(cfg.resizable);

        if let Some([x, y]) = cfg.position {
            attrs = attrs.with_position(PhysicalPosition::new(x, y));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowOpenError::CreationFailed(e.to_string()))?,
        );

        if let Ok(pos) = window.outer_position() {
            log::debug!("'{}' placed at ({}, {})", cfg.title, pos.x, pos.y);
        }

        // Each window gets its own context; nothing is shared between them
        let ctx = pollster::block_on(RenderContext::with_vsync(window.clone(), cfg.vsync))?;

        let mut renderer = WindowRenderer::new(&ctx);
        if let Some(bytes) = &self.font_bytes {
            if let Err(e) = renderer.enable_text(&ctx, bytes, self.config.text.size) {
                log::warn!("Text disabled for '{}': {}", cfg.title, e);
            }
        }

        // Same pixels, separate GPU texture per context
        let texture = renderer.create_texture(&ctx, &self.pixels);

        let scene = self.build_scene(cfg);

        log::info!(
            "Opened window '{}' ({}x{}, {} sprites)",
            cfg.title,
            cfg.width,
            cfg.height,
            scene.sprite_count()
        );

        window.request_redraw();
        let id = window.id();

        Ok((
            id,
            WindowEntry {
                window,
                ctx,
                renderer,
                texture,
                scene,
                clock: FrameClock::new(),
                fps: FpsCounter::new(),
                settings: cfg.clone(),
            },
        ))
    }

    /// Populate one window's scene with evenly spread sprites
    fn build_scene(&self, cfg: &WindowConfig) -> Scene {
        let sprite_size = self.pixels.size();
        let center = Vec2::new(cfg.width as f32, cfg.height as f32) * 0.5 - sprite_size * 0.5;
        let speed = self.config.sprite.speed;

        let mut scene = Scene::new();
        for i in 0..self.config.sprite.count {
            let angle = i as f32 * GOLDEN_ANGLE;
            let dir = Vec2::new(angle.cos(), angle.sin());
            let offset = dir * ((i % 7) as f32 * 20.0);
            scene.add_sprite(
                Sprite::new(Body2D::at(center + offset).with_velocity(dir * speed))
                    .with_edge(cfg.edge),
            );
        }
        scene
    }

    /// Remove a window, releasing its resources; exit when none remain
    fn close_window(&mut self, id: WindowId, event_loop: &ActiveEventLoop) {
        if let Some(entry) = self.windows.remove(&id) {
            log::info!("Window '{}' closed", entry.settings.title);
            entry.teardown();
        }
        if self.windows.is_empty() {
            event_loop.exit();
        }
    }

    /// Advance and draw one window's frame
    fn redraw(&mut self, id: WindowId, event_loop: &ActiveEventLoop) {
        let log_bounces = self.config.debug.log_bounces;
        let show_fps = self.config.text.show_fps;

        let Some(entry) = self.windows.get_mut(&id) else {
            return;
        };

        let dt = entry.clock.tick();
        entry.fps.sample(dt);

        let sprite_size = entry.texture.size();
        let bounds = entry.ctx.bounds();
        let reflections = entry.scene.update(dt, sprite_size, bounds);
        if log_bounces && reflections > 0 {
            log::debug!(
                "'{}': {} edge reflections this frame",
                entry.settings.title,
                reflections
            );
        }

        let instances: Vec<SpriteInstance> = entry
            .scene
            .iter()
            .map(|(_key, sprite)| SpriteInstance::from_sprite(sprite, sprite_size))
            .collect();

        let fps_text = format!("{:.0} FPS", entry.fps.fps());
        let mut texts = Vec::new();
        if !entry.settings.caption.is_empty() {
            texts.push(TextDraw {
                text: &entry.settings.caption,
                position: CAPTION_POS,
                color: entry.settings.caption_color,
            });
        }
        if show_fps {
            texts.push(TextDraw {
                text: &fps_text,
                position: FPS_POS,
                color: FPS_COLOR,
            });
        }

        match entry.renderer.render_frame(
            &entry.ctx,
            &entry.texture,
            &instances,
            &texts,
            entry.settings.background,
        ) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => {
                entry.ctx.resize(entry.ctx.size);
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory, shutting down");
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::warn!("Render error on '{}': {}", entry.settings.title, e);
            }
        }

        // Mirror state into the title; carries the caption too when the
        // text layer is unavailable
        if entry.fps.frame_count() % 30 == 0 {
            let title = if entry.renderer.has_text() || entry.settings.caption.is_empty() {
                format!("{} ({:.0} FPS)", entry.settings.title, entry.fps.fps())
            } else {
                format!(
                    "{} - {} ({:.0} FPS)",
                    entry.settings.title,
                    entry.settings.caption,
                    entry.fps.fps()
                )
            };
            entry.window.set_title(&title);
        }

        // Keep the loop running
        entry.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.windows.is_empty() {
            return;
        }

        let configs = self.config.windows.clone();
        for cfg in &configs {
            match self.open_window(event_loop, cfg) {
                Ok((id, entry)) => {
                    self.windows.insert(id, entry);
                }
                Err(e) => {
                    log::error!("Skipping window '{}': {}", cfg.title, e);
                }
            }
        }

        if self.windows.is_empty() {
            log::error!("No window could be created, exiting");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.close_window(id, event_loop);
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(entry) = self.windows.get_mut(&id) {
                    entry.ctx.resize(physical_size);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                // Escape closes the window that received the key
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    self.close_window(id, event_loop);
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw(id, event_loop);
            }

            _ => {}
        }
    }
}

/// Decode the configured sprite image, falling back to the built-in pattern
fn load_sprite_pixels(config: &AppConfig) -> PixelData {
    if let Some(path) = &config.sprite.path {
        match PixelData::load_png(path) {
            Ok(pixels) => return pixels,
            Err(e) => {
                log::warn!("Failed to load sprite '{}': {}. Using built-in sprite.", path, e);
            }
        }
    }
    let size = config.sprite.builtin_size.max(8);
    PixelData::checkerboard(
        size,
        size,
        size / 8,
        [178, 34, 34, 255],   // firebrick
        [245, 245, 245, 255], // near-white
    )
}

/// Read the configured font, probing system locations as a fallback
fn load_font_bytes(text: &TextConfig) -> Option<Vec<u8>> {
    if let Some(path) = &text.font_path {
        match std::fs::read(path) {
            Ok(bytes) => return Some(bytes),
            Err(e) => log::warn!("Failed to read font '{}': {}", path, e),
        }
    }
    for path in SYSTEM_FONTS {
        if let Ok(bytes) = std::fs::read(path) {
            log::info!("Using system font '{}'", path);
            return Some(bytes);
        }
    }
    log::warn!("No usable font found; captions move into the window titles");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sprite_when_path_missing() {
        let mut config = AppConfig::default();
        config.sprite.path = Some("does/not/exist.png".to_string());
        let pixels = load_sprite_pixels(&config);
        assert_eq!(pixels.width, config.sprite.builtin_size);
        assert_eq!(pixels.height, config.sprite.builtin_size);
    }

    #[test]
    fn test_builtin_sprite_size_floor() {
        let mut config = AppConfig::default();
        config.sprite.builtin_size = 1;
        let pixels = load_sprite_pixels(&config);
        assert_eq!(pixels.width, 8);
    }

    #[test]
    fn test_scene_spawn_count_and_speed() {
        let mut config = AppConfig::default();
        config.sprite.count = 5;
        config.sprite.speed = 50.0;
        let app = App::new(config);

        let scene = app.build_scene(&WindowConfig::default());
        assert_eq!(scene.sprite_count(), 5);
        for (_key, sprite) in scene.iter() {
            let speed = sprite.body.velocity.length();
            assert!((speed - 50.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_scene_spawn_headings_differ() {
        let mut config = AppConfig::default();
        config.sprite.count = 2;
        let app = App::new(config);

        let scene = app.build_scene(&WindowConfig::default());
        let velocities: Vec<Vec2> = scene.iter().map(|(_k, s)| s.body.velocity).collect();
        assert_ne!(velocities[0], velocities[1]);
    }

    #[test]
    fn test_window_open_error_display() {
        let err = WindowOpenError::CreationFailed("denied".to_string());
        assert!(format!("{}", err).contains("denied"));

        let err: WindowOpenError = ContextError::NoAdapter.into();
        assert!(format!("{}", err).contains("adapter"));
    }
}
