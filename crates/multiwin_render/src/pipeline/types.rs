//! GPU-compatible data types for the sprite and text pipelines
//!
//! These types match the shader layouts exactly and derive Pod/Zeroable
//! for safe buffer uploads.

use bytemuck::{Pod, Zeroable};
use multiwin_core::Sprite;
use multiwin_math::Vec2;

/// Per-frame uniforms shared by both pipelines
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Globals {
    /// Framebuffer extent in pixels
    pub screen_size: [f32; 2],
    /// Padding to a 16-byte uniform stride
    pub _padding: [f32; 2],
}

impl Globals {
    /// Build globals for a framebuffer extent
    pub fn new(bounds: Vec2) -> Self {
        Self {
            screen_size: bounds.to_array(),
            _padding: [0.0; 2],
        }
    }
}

/// One sprite quad instance
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left corner in pixels
    pub position: [f32; 2],
    /// Extent in pixels
    pub size: [f32; 2],
    /// Multiplicative RGBA tint
    pub tint: [f32; 4],
}

impl SpriteInstance {
    /// Build an instance from a sprite and its drawn extent
    pub fn from_sprite(sprite: &Sprite, size: Vec2) -> Self {
        Self {
            position: sprite.body.position.to_array(),
            size: size.to_array(),
            tint: sprite.tint.rgba,
        }
    }
}

/// One glyph quad instance
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GlyphInstance {
    /// Top-left corner in pixels
    pub position: [f32; 2],
    /// Extent in pixels
    pub size: [f32; 2],
    /// Atlas UV rectangle, min corner
    pub uv_min: [f32; 2],
    /// Atlas UV rectangle, max corner
    pub uv_max: [f32; 2],
    /// Text color
    pub color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiwin_core::{Body2D, Tint};

    #[test]
    fn test_sprite_instance_from_sprite() {
        let sprite = Sprite::new(
            Body2D::at(Vec2::new(300.0, 200.0)).with_velocity(Vec2::new(1.0, 1.0)),
        )
        .with_tint(Tint::from_rgb(1.0, 0.5, 0.25));

        let instance = SpriteInstance::from_sprite(&sprite, Vec2::new(64.0, 32.0));
        assert_eq!(instance.position, [300.0, 200.0]);
        assert_eq!(instance.size, [64.0, 32.0]);
        assert_eq!(instance.tint, [1.0, 0.5, 0.25, 1.0]);
    }

    #[test]
    fn test_pod_layout_sizes() {
        // Shader-side struct strides depend on these layouts
        assert_eq!(std::mem::size_of::<Globals>(), 16);
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 32);
        assert_eq!(std::mem::size_of::<GlyphInstance>(), 48);
    }

    #[test]
    fn test_instances_cast_to_bytes() {
        let instances = [SpriteInstance {
            position: [0.0; 2],
            size: [1.0; 2],
            tint: [1.0; 4],
        }];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 32);
    }
}
