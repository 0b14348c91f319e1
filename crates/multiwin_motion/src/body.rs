//! Kinematic body type

use multiwin_math::Vec2;
use serde::{Serialize, Deserialize};

/// A 2D kinematic body with position and velocity
///
/// Positions are in framebuffer pixels (origin top-left), velocities in
/// pixels per second. Bodies have no mass or forces; motion is pure
/// velocity integration plus whatever edge handling the caller applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Body2D {
    /// Position of the top-left corner, in pixels
    pub position: Vec2,
    /// Velocity in pixels per second
    pub velocity: Vec2,
}

impl Body2D {
    /// Create a body at the given position with zero velocity
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Integrate velocity into position over `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Flip the sign of the velocity on the selected axes
    pub fn reflect(&mut self, x: bool, y: bool) {
        if x {
            self.velocity.x = -self.velocity.x;
        }
        if y {
            self.velocity.y = -self.velocity.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_has_zero_velocity() {
        let body = Body2D::at(Vec2::new(3.0, 4.0));
        assert_eq!(body.position, Vec2::new(3.0, 4.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_step_integrates_velocity() {
        let mut body = Body2D::at(Vec2::new(10.0, 20.0)).with_velocity(Vec2::new(100.0, -50.0));
        body.step(0.5);
        assert_eq!(body.position, Vec2::new(60.0, -5.0));
    }

    #[test]
    fn test_step_zero_dt_is_identity() {
        let mut body = Body2D::at(Vec2::new(1.0, 2.0)).with_velocity(Vec2::new(100.0, 100.0));
        body.step(0.0);
        assert_eq!(body.position, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_step_is_linear_in_dt() {
        let start = Body2D::at(Vec2::ZERO).with_velocity(Vec2::new(30.0, 40.0));

        let mut whole = start;
        whole.step(1.0);

        let mut halves = start;
        halves.step(0.5);
        halves.step(0.5);

        assert_eq!(whole.position, halves.position);
    }

    #[test]
    fn test_reflect() {
        let mut body = Body2D::at(Vec2::ZERO).with_velocity(Vec2::new(3.0, -4.0));
        body.reflect(true, false);
        assert_eq!(body.velocity, Vec2::new(-3.0, -4.0));
        body.reflect(false, true);
        assert_eq!(body.velocity, Vec2::new(-3.0, 4.0));
    }
}
