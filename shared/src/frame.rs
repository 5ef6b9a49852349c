//! Position plus orthonormal orientation basis for a world object.
//!
//! The seat's frame drives the commanded paddle velocity; the ground's frame
//! defines the kick plane and the reference up for gravity compensation.

use crate::vec3::{add, rotate_around_axis, scale, vec3, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub position: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub look: Vec3,
}

impl Frame {
    /// Axis-aligned frame at the origin.
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            right: vec3(1.0, 0.0, 0.0),
            up: vec3(0.0, 1.0, 0.0),
            look: vec3(0.0, 0.0, 1.0),
        }
    }

    /// Axis-aligned frame at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Tilt the basis around `axis` (unit vector) by `angle` radians.
    /// Position is unchanged.
    pub fn rotated_around(self, axis: Vec3, angle: f64) -> Self {
        Self {
            position: self.position,
            right: rotate_around_axis(self.right, axis, angle),
            up: rotate_around_axis(self.up, axis, angle),
            look: rotate_around_axis(self.look, axis, angle),
        }
    }

    /// Rotate a local vector into world space. No translation.
    pub fn rotate_to_world(&self, local: Vec3) -> Vec3 {
        add(
            add(scale(self.right, local.x), scale(self.up, local.y)),
            scale(self.look, local.z),
        )
    }

    /// Map a local point into world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        add(self.position, self.rotate_to_world(local))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::{cross, dot, length, normalize};
    use std::f64::consts::PI;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "Expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn identity_passes_vectors_through() {
        let frame = Frame::identity();
        let v = vec3(1.0, 2.0, 3.0);
        assert_eq!(frame.rotate_to_world(v), v);
        assert_eq!(frame.to_world(v), v);
    }

    #[test]
    fn to_world_adds_translation() {
        let frame = Frame::at(vec3(10.0, 0.0, -5.0));
        assert_eq!(frame.to_world(vec3(1.0, 0.0, 0.0)), vec3(11.0, 0.0, -5.0));
    }

    #[test]
    fn rotate_to_world_ignores_translation() {
        let frame = Frame::at(vec3(10.0, 0.0, -5.0));
        assert_eq!(frame.rotate_to_world(vec3(1.0, 0.0, 0.0)), vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn tilted_basis_stays_orthonormal() {
        let frame = Frame::identity().rotated_around(normalize(vec3(1.0, 2.0, 3.0)), 0.7);
        assert_close(length(frame.right), 1.0);
        assert_close(length(frame.up), 1.0);
        assert_close(length(frame.look), 1.0);
        assert_close(dot(frame.right, frame.up), 0.0);
        assert_close(dot(frame.right, frame.look), 0.0);
        assert_close(dot(frame.up, frame.look), 0.0);
    }

    #[test]
    fn quarter_turn_around_up_swaps_right_and_look() {
        let frame = Frame::identity().rotated_around(vec3(0.0, 1.0, 0.0), PI / 2.0);
        // right (1,0,0) rotated 90 degrees around y lands on (0,0,-1)
        assert_close(frame.right.z, -1.0);
        assert_close(frame.look.x, 1.0);
    }

    #[test]
    fn rotation_preserves_handedness() {
        let frame = Frame::identity().rotated_around(normalize(vec3(0.3, 1.0, -0.2)), 1.1);
        let up = cross(frame.look, frame.right);
        assert_close(dot(up, frame.up), 1.0);
    }
}
