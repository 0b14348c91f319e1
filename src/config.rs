//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`MW_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use multiwin_core::EdgeBehavior;
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// One entry per window to open at startup
    #[serde(default = "default_windows")]
    pub windows: Vec<WindowConfig>,
    /// Sprite configuration shared by all windows
    #[serde(default)]
    pub sprite: SpriteConfig,
    /// Text/overlay configuration
    #[serde(default)]
    pub text: TextConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            windows: default_windows(),
            sprite: SpriteConfig::default(),
            text: TextConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`MW_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // MW_SPRITE__SPEED=200 -> sprite.speed = 200
        figment = figment.merge(Env::prefixed("MW_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// The two windows the stock configuration opens, side by side
fn default_windows() -> Vec<WindowConfig> {
    vec![
        WindowConfig {
            title: "multiwin - window 1".to_string(),
            caption: "I am the main window".to_string(),
            caption_color: [0.78, 0.78, 0.78, 1.0],
            background: [0.96, 0.96, 0.96, 1.0],
            position: Some([10, 40]),
            ..WindowConfig::default()
        },
        WindowConfig {
            title: "multiwin - window 2".to_string(),
            caption: "I am the other window".to_string(),
            caption_color: [0.96, 0.96, 0.96, 1.0],
            background: [0.0, 0.0, 0.0, 1.0],
            position: Some([820, 40]),
            ..WindowConfig::default()
        },
    ]
}

/// Per-window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Initial outer position, or None to let the compositor place it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[i32; 2]>,
    /// Background clear color [r, g, b, a]
    pub background: [f32; 4],
    /// Caption drawn inside the window
    pub caption: String,
    /// Caption color [r, g, b, a]
    pub caption_color: [f32; 4],
    /// Allow resizing
    pub resizable: bool,
    /// Enable VSync
    pub vsync: bool,
    /// Edge behavior of this window's sprites
    pub edge: EdgeBehavior,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "multiwin".to_string(),
            width: 800,
            height: 450,
            position: None,
            background: [0.96, 0.96, 0.96, 1.0],
            caption: String::new(),
            caption_color: [0.2, 0.2, 0.2, 1.0],
            resizable: true,
            vsync: true,
            edge: EdgeBehavior::Bounce,
        }
    }
}

/// Sprite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteConfig {
    /// PNG to load per window, or None for the built-in checkerboard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Sprites per window
    pub count: u32,
    /// Sprite speed in pixels per second
    pub speed: f32,
    /// Edge length of the built-in checkerboard sprite, in pixels
    pub builtin_size: u32,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            path: None,
            count: 1,
            speed: 120.0,
            builtin_size: 64,
        }
    }
}

/// Text and overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// TTF/OTF to load, or None to probe common system fonts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<String>,
    /// Rasterized glyph size in pixels
    pub size: f32,
    /// Draw the frames-per-second overlay
    pub show_fps: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            size: 20.0,
            show_fps: true,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log each edge reflection at debug level
    pub log_bounces: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_bounces: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
