//! Edge handling: clamp-and-reflect and toroidal wrap
//!
//! A sprite of size `size` drawn at `position` (top-left corner) stays fully
//! visible while `position` lies in `[0, bounds - size]` per axis. The
//! functions here push a body back into that interval after integration.

use bitflags::bitflags;
use multiwin_math::Vec2;

use crate::body::Body2D;

bitflags! {
    /// Axes on which a bounce step reflected the velocity
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct BounceAxes: u8 {
        /// No axis contacted a boundary
        const NONE = 0;
        /// Left or right edge contact
        const X = 1 << 0;
        /// Top or bottom edge contact
        const Y = 1 << 1;
    }
}

/// Clamp `body` into the visible interval and reflect velocity on contact
///
/// `size` is the sprite extent in pixels, `bounds` the framebuffer extent.
/// The velocity flips only when it points out of the valid interval, so a
/// body resting exactly on an edge does not oscillate. If the sprite is
/// larger than the framebuffer on an axis, the position pins to 0 on that
/// axis and no reflection is reported.
///
/// Returns the set of axes that reflected.
pub fn bounce_step(body: &mut Body2D, size: Vec2, bounds: Vec2) -> BounceAxes {
    let mut axes = BounceAxes::NONE;

    let (px, vx, hit_x) = reflect_axis(body.position.x, body.velocity.x, bounds.x - size.x);
    let (py, vy, hit_y) = reflect_axis(body.position.y, body.velocity.y, bounds.y - size.y);

    if hit_x {
        axes |= BounceAxes::X;
    }
    if hit_y {
        axes |= BounceAxes::Y;
    }

    body.position = Vec2::new(px, py);
    body.velocity = Vec2::new(vx, vy);
    axes
}

/// Clamp one axis into `[0, max]`, flipping velocity if it escapes
///
/// Returns `(position, velocity, reflected)`.
fn reflect_axis(pos: f32, vel: f32, max: f32) -> (f32, f32, bool) {
    if max <= 0.0 {
        // Sprite larger than the framebuffer: pin, keep velocity untouched
        return (0.0, vel, false);
    }
    if pos < 0.0 && vel < 0.0 {
        (0.0, -vel, true)
    } else if pos > max && vel > 0.0 {
        (max, -vel, true)
    } else {
        (pos.clamp(0.0, max), vel, false)
    }
}

/// Wrap `body` around the framebuffer like a torus
///
/// The sprite leaves fully on one side before re-entering on the opposite
/// side, so the wrap interval is `[-size, bounds]` per axis.
pub fn wrap_step(body: &mut Body2D, size: Vec2, bounds: Vec2) {
    let extent = bounds + size;
    body.position = (body.position + size).rem_euclid_components(extent) - size;
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(32.0, 32.0);
    const BOUNDS: Vec2 = Vec2::new(800.0, 450.0);

    fn assert_in_bounds(body: &Body2D) {
        assert!(body.position.x >= 0.0 && body.position.x <= BOUNDS.x - SIZE.x);
        assert!(body.position.y >= 0.0 && body.position.y <= BOUNDS.y - SIZE.y);
    }

    #[test]
    fn test_no_contact_is_noop() {
        let mut body = Body2D::at(Vec2::new(100.0, 100.0)).with_velocity(Vec2::new(50.0, 50.0));
        let axes = bounce_step(&mut body, SIZE, BOUNDS);
        assert_eq!(axes, BounceAxes::NONE);
        assert_eq!(body.position, Vec2::new(100.0, 100.0));
        assert_eq!(body.velocity, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_left_edge_reflects() {
        let mut body = Body2D::at(Vec2::new(-5.0, 100.0)).with_velocity(Vec2::new(-50.0, 10.0));
        let axes = bounce_step(&mut body, SIZE, BOUNDS);
        assert_eq!(axes, BounceAxes::X);
        assert_eq!(body.position.x, 0.0);
        assert_eq!(body.velocity, Vec2::new(50.0, 10.0));
        assert_in_bounds(&body);
    }

    #[test]
    fn test_right_edge_reflects() {
        let mut body = Body2D::at(Vec2::new(790.0, 100.0)).with_velocity(Vec2::new(50.0, 0.0));
        let axes = bounce_step(&mut body, SIZE, BOUNDS);
        assert_eq!(axes, BounceAxes::X);
        assert_eq!(body.position.x, BOUNDS.x - SIZE.x);
        assert_eq!(body.velocity.x, -50.0);
        assert_in_bounds(&body);
    }

    #[test]
    fn test_bottom_edge_reflects() {
        let mut body = Body2D::at(Vec2::new(100.0, 500.0)).with_velocity(Vec2::new(0.0, 80.0));
        let axes = bounce_step(&mut body, SIZE, BOUNDS);
        assert_eq!(axes, BounceAxes::Y);
        assert_eq!(body.position.y, BOUNDS.y - SIZE.y);
        assert_eq!(body.velocity.y, -80.0);
        assert_in_bounds(&body);
    }

    #[test]
    fn test_corner_reflects_both_axes() {
        let mut body = Body2D::at(Vec2::new(-3.0, -7.0)).with_velocity(Vec2::new(-20.0, -30.0));
        let axes = bounce_step(&mut body, SIZE, BOUNDS);
        assert_eq!(axes, BounceAxes::X | BounceAxes::Y);
        assert_eq!(body.position, Vec2::ZERO);
        assert_eq!(body.velocity, Vec2::new(20.0, 30.0));
    }

    #[test]
    fn test_exact_touch_does_not_oscillate() {
        // Resting exactly on the edge with inward velocity: clamp, no flip
        let mut body = Body2D::at(Vec2::new(0.0, 100.0)).with_velocity(Vec2::new(50.0, 0.0));
        let axes = bounce_step(&mut body, SIZE, BOUNDS);
        assert_eq!(axes, BounceAxes::NONE);
        assert_eq!(body.velocity.x, 50.0);
    }

    #[test]
    fn test_overshoot_with_inward_velocity_clamps_without_flip() {
        // Already moving back inside (e.g. after an external reposition)
        let mut body = Body2D::at(Vec2::new(-10.0, 100.0)).with_velocity(Vec2::new(30.0, 0.0));
        let axes = bounce_step(&mut body, SIZE, BOUNDS);
        assert_eq!(axes, BounceAxes::NONE);
        assert_eq!(body.position.x, 0.0);
        assert_eq!(body.velocity.x, 30.0);
    }

    #[test]
    fn test_oversized_sprite_pins_to_origin() {
        let huge = Vec2::new(1000.0, 1000.0);
        let mut body = Body2D::at(Vec2::new(50.0, 50.0)).with_velocity(Vec2::new(10.0, 10.0));
        let axes = bounce_step(&mut body, huge, BOUNDS);
        assert_eq!(axes, BounceAxes::NONE);
        assert_eq!(body.position, Vec2::ZERO);
        // Velocity preserved so a later resize can resume motion
        assert_eq!(body.velocity, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_bounce_step_property_many_steps() {
        // Position stays in [0, bounds - size] under repeated integration
        let mut body = Body2D::at(Vec2::new(300.0, 300.0)).with_velocity(Vec2::new(173.0, -241.0));
        for _ in 0..1000 {
            body.step(1.0 / 60.0);
            bounce_step(&mut body, SIZE, BOUNDS);
            assert_in_bounds(&body);
        }
        // Speed is preserved by reflection
        assert_eq!(body.velocity.abs(), Vec2::new(173.0, 241.0));
    }

    #[test]
    fn test_wrap_step_modular() {
        let mut body = Body2D::at(Vec2::new(810.0, 100.0)).with_velocity(Vec2::new(50.0, 0.0));
        wrap_step(&mut body, SIZE, BOUNDS);
        // 810 + 32 = 842, extent 832 -> 10 - 32 = -22: re-entering from the left
        assert_eq!(body.position.x, -22.0);
        assert_eq!(body.velocity.x, 50.0);
    }

    #[test]
    fn test_wrap_step_in_range_is_noop() {
        let mut body = Body2D::at(Vec2::new(100.0, 200.0));
        wrap_step(&mut body, SIZE, BOUNDS);
        assert_eq!(body.position, Vec2::new(100.0, 200.0));
    }
}
