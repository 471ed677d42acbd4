//! Look-at camera
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer, so the camera looks down its local -Z
//!
//! The view matrix is the inverse of the camera frame spanned by the eye
//! position, the look-at point, and the up vector.

use crate::math::{Mat4, Vec3};

/// Camera defined by a center of projection, a look-at point, and an up
/// vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eye: Vec3,
    look_at: Vec3,
    up: Vec3,
}

impl Default for Camera {
    /// Eye at (0, 0, 40) looking at the origin with +Y up.
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 40.0), Vec3::ZERO, Vec3::UP)
    }
}

impl Camera {
    pub fn new(eye: Vec3, look_at: Vec3, up: Vec3) -> Self {
        Self { eye, look_at, up }
    }

    // =========================================================================
    // Frame
    // =========================================================================

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn set_eye(&mut self, eye: Vec3) {
        self.eye = eye;
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn set_look_at(&mut self, look_at: Vec3) {
        self.look_at = look_at;
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
    }

    /// Unit vector from the eye toward the look-at point.
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.eye).normalize()
    }

    /// Unit vector pointing to the camera's right.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Moves eye and look-at point together along the viewing direction.
    pub fn move_forward(&mut self, distance: f32) {
        let delta = self.forward() * distance;
        self.eye = self.eye + delta;
        self.look_at = self.look_at + delta;
    }

    /// Moves eye and look-at point together to the right (strafe).
    pub fn move_right(&mut self, distance: f32) {
        let delta = self.right() * distance;
        self.eye = self.eye + delta;
        self.look_at = self.look_at + delta;
    }

    /// Swings the eye around the look-at point about the world Y axis.
    pub fn orbit_y(&mut self, angle: f32) {
        let offset = self.eye - self.look_at;
        self.eye = self.look_at + Mat4::rotation_y(angle) * offset;
    }

    // =========================================================================
    // Matrix Generation
    // =========================================================================

    /// World-to-eye matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.eye, self.look_at, self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_looks_down_negative_z() {
        let camera = Camera::default();
        assert_eq!(camera.eye(), Vec3::new(0.0, 0.0, 40.0));
        assert_relative_eq!(camera.forward().z, -1.0);
        let origin = camera.view_matrix() * Vec3::ZERO;
        assert_relative_eq!(origin.z, -40.0);
    }

    #[test]
    fn right_is_positive_x_by_default() {
        let right = Camera::default().right();
        assert_relative_eq!(right.x, 1.0);
    }

    #[test]
    fn moving_keeps_direction() {
        let mut camera = Camera::default();
        camera.move_forward(10.0);
        camera.move_right(2.0);
        assert_relative_eq!(camera.eye().z, 30.0);
        assert_relative_eq!(camera.eye().x, 2.0);
        assert_relative_eq!(camera.forward().z, -1.0);
    }

    #[test]
    fn orbit_keeps_distance_to_target() {
        let mut camera = Camera::default();
        camera.orbit_y(std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(camera.eye().x, 40.0, epsilon = 1e-4);
        assert_relative_eq!(camera.eye().z, 0.0, epsilon = 1e-4);
        let target = camera.view_matrix() * Vec3::ZERO;
        assert_relative_eq!(target.z, -40.0, epsilon = 1e-4);
    }
}
