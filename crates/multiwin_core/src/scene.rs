//! Scene: the sprite population of one window
//!
//! Each window owns exactly one scene. Scenes know nothing about GPU
//! resources; they hold kinematic state and advance it once per frame.

use multiwin_math::Vec2;
use multiwin_motion::{bounce_step, wrap_step};
use slotmap::{new_key_type, SlotMap};

use crate::sprite::{EdgeBehavior, Sprite};

new_key_type! {
    /// Key to a sprite in a scene
    ///
    /// Uses generational indexing so a key held across a remove/insert
    /// cycle returns None instead of aliasing an unrelated sprite.
    pub struct SpriteKey;
}

/// Container for the sprites of one window
#[derive(Default)]
pub struct Scene {
    sprites: SlotMap<SpriteKey, Sprite>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            sprites: SlotMap::with_key(),
        }
    }

    /// Add a sprite and return its key
    pub fn add_sprite(&mut self, sprite: Sprite) -> SpriteKey {
        self.sprites.insert(sprite)
    }

    /// Remove a sprite and return it
    pub fn remove_sprite(&mut self, key: SpriteKey) -> Option<Sprite> {
        self.sprites.remove(key)
    }

    /// Get an immutable reference to a sprite by key
    pub fn get_sprite(&self, key: SpriteKey) -> Option<&Sprite> {
        self.sprites.get(key)
    }

    /// Get a mutable reference to a sprite by key
    pub fn get_sprite_mut(&mut self, key: SpriteKey) -> Option<&mut Sprite> {
        self.sprites.get_mut(key)
    }

    /// Number of sprites in the scene
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Iterate over all sprites
    pub fn iter(&self) -> impl Iterator<Item = (SpriteKey, &Sprite)> {
        self.sprites.iter()
    }

    /// Advance every sprite by `dt` seconds and apply its edge behavior
    ///
    /// `sprite_size` is the drawn extent of a sprite and `bounds` the
    /// framebuffer extent, both in pixels. Returns the number of
    /// axis-reflections that occurred across the whole scene.
    pub fn update(&mut self, dt: f32, sprite_size: Vec2, bounds: Vec2) -> u32 {
        let mut reflections = 0;
        for (_key, sprite) in &mut self.sprites {
            sprite.body.step(dt);
            match sprite.edge {
                EdgeBehavior::Bounce => {
                    let axes = bounce_step(&mut sprite.body, sprite_size, bounds);
                    reflections += axes.bits().count_ones();
                }
                EdgeBehavior::Wrap => wrap_step(&mut sprite.body, sprite_size, bounds),
                EdgeBehavior::Drift => {}
            }
        }
        reflections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiwin_motion::Body2D;

    const SIZE: Vec2 = Vec2::new(32.0, 32.0);
    const BOUNDS: Vec2 = Vec2::new(800.0, 450.0);

    #[test]
    fn test_add_remove_sprite() {
        let mut scene = Scene::new();
        let key = scene.add_sprite(Sprite::new(Body2D::at(Vec2::new(10.0, 10.0))));
        assert_eq!(scene.sprite_count(), 1);

        let removed = scene.remove_sprite(key).unwrap();
        assert_eq!(removed.body.position, Vec2::new(10.0, 10.0));
        assert_eq!(scene.sprite_count(), 0);

        // Stale key resolves to nothing
        assert!(scene.get_sprite(key).is_none());
    }

    #[test]
    fn test_update_moves_every_sprite() {
        let mut scene = Scene::new();
        let a = scene.add_sprite(Sprite::new(
            Body2D::at(Vec2::new(100.0, 100.0)).with_velocity(Vec2::new(60.0, 0.0)),
        ));
        let b = scene.add_sprite(Sprite::new(
            Body2D::at(Vec2::new(200.0, 200.0)).with_velocity(Vec2::new(0.0, 60.0)),
        ));

        scene.update(0.5, SIZE, BOUNDS);

        assert_eq!(scene.get_sprite(a).unwrap().body.position, Vec2::new(130.0, 100.0));
        assert_eq!(scene.get_sprite(b).unwrap().body.position, Vec2::new(200.0, 230.0));
    }

    #[test]
    fn test_update_keeps_keys_stable() {
        let mut scene = Scene::new();
        let key = scene.add_sprite(Sprite::new(Body2D::at(Vec2::new(1.0, 2.0))));
        for _ in 0..10 {
            scene.update(1.0 / 60.0, SIZE, BOUNDS);
        }
        assert!(scene.get_sprite(key).is_some());
    }

    #[test]
    fn test_update_counts_reflections() {
        let mut scene = Scene::new();
        // Heading out through the left edge
        scene.add_sprite(Sprite::new(
            Body2D::at(Vec2::new(1.0, 100.0)).with_velocity(Vec2::new(-600.0, 0.0)),
        ));
        let reflections = scene.update(0.1, SIZE, BOUNDS);
        assert_eq!(reflections, 1);
    }

    #[test]
    fn test_update_respects_edge_behavior() {
        let mut scene = Scene::new();
        let wrap = scene.add_sprite(
            Sprite::new(Body2D::at(Vec2::new(790.0, 100.0)).with_velocity(Vec2::new(600.0, 0.0)))
                .with_edge(EdgeBehavior::Wrap),
        );
        let drift = scene.add_sprite(
            Sprite::new(Body2D::at(Vec2::new(790.0, 100.0)).with_velocity(Vec2::new(600.0, 0.0)))
                .with_edge(EdgeBehavior::Drift),
        );

        let reflections = scene.update(0.1, SIZE, BOUNDS);
        assert_eq!(reflections, 0);

        // 790 + 60 = 850; wrap interval extends to bounds.x, then re-enters
        let wrapped = scene.get_sprite(wrap).unwrap().body.position.x;
        assert!(wrapped < 790.0);

        // Drift keeps going out of the framebuffer
        assert_eq!(scene.get_sprite(drift).unwrap().body.position.x, 850.0);
    }
}
