//! Sprite and Tint types
//!
//! A Sprite is one moving textured quad inside a window's scene.

use multiwin_motion::Body2D;
use serde::{Serialize, Deserialize};

/// Multiplicative RGBA tint applied when a sprite is drawn
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Tint {
    /// RGBA components, each 0.0-1.0
    pub rgba: [f32; 4],
}

impl Default for Tint {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Tint {
    /// Create a new tint with the given RGBA components
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { rgba: [r, g, b, a] }
    }

    /// Create an opaque tint from RGB components
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// White (texture drawn unmodified)
    pub const WHITE: Self = Self { rgba: [1.0, 1.0, 1.0, 1.0] };

    /// Light gray
    pub const LIGHT_GRAY: Self = Self { rgba: [0.78, 0.78, 0.78, 1.0] };

    /// Red
    pub const RED: Self = Self { rgba: [1.0, 0.0, 0.0, 1.0] };

    /// Green
    pub const GREEN: Self = Self { rgba: [0.0, 1.0, 0.0, 1.0] };

    /// Blue
    pub const BLUE: Self = Self { rgba: [0.0, 0.0, 1.0, 1.0] };
}

/// What a sprite does when it reaches the framebuffer edge
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeBehavior {
    /// Clamp into the framebuffer and reflect velocity
    #[default]
    Bounce,
    /// Leave on one side, re-enter on the opposite side
    Wrap,
    /// Keep drifting; the window shows whatever remains visible
    Drift,
}

/// A textured quad moving inside one window
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Sprite {
    /// Kinematic state (top-left corner position, velocity)
    pub body: Body2D,
    /// Draw tint
    pub tint: Tint,
    /// Edge handling applied after integration
    pub edge: EdgeBehavior,
}

impl Sprite {
    /// Create a sprite from a kinematic body with default tint and edges
    pub fn new(body: Body2D) -> Self {
        Self {
            body,
            tint: Tint::WHITE,
            edge: EdgeBehavior::Bounce,
        }
    }

    /// Set the tint of this sprite
    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    /// Set the edge behavior of this sprite
    pub fn with_edge(mut self, edge: EdgeBehavior) -> Self {
        self.edge = edge;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiwin_math::Vec2;

    #[test]
    fn test_default_sprite() {
        let sprite = Sprite::new(Body2D::at(Vec2::new(300.0, 300.0)));
        assert_eq!(sprite.edge, EdgeBehavior::Bounce);
        assert_eq!(sprite.tint.rgba, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_builder_methods() {
        let sprite = Sprite::new(Body2D::default())
            .with_tint(Tint::from_rgb(0.2, 0.4, 0.6))
            .with_edge(EdgeBehavior::Wrap);
        assert_eq!(sprite.tint.rgba, [0.2, 0.4, 0.6, 1.0]);
        assert_eq!(sprite.edge, EdgeBehavior::Wrap);
    }

    #[test]
    fn test_edge_behavior_serde_names() {
        let toml = "edge = \"wrap\"";
        #[derive(serde::Deserialize)]
        struct Holder {
            edge: EdgeBehavior,
        }
        let holder: Holder = toml::from_str::<Holder>(toml).unwrap();
        assert_eq!(holder.edge, EdgeBehavior::Wrap);
    }
}
