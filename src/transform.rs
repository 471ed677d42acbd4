//! Value-type object transforms.
//!
//! A [`Transform`] is a plain `Copy` value: every modifier consumes it and
//! returns the changed copy, so composing a child with inherited parent state
//! can never alias or mutate the parent.

use crate::math::{Mat4, Vec3};

/// Translation, Euler rotation (radians), and scale.
///
/// ```ignore
/// let spin = Transform::new()
///     .with_position(Vec3::new(0.0, 0.0, -5.0))
///     .rotated_y(frame as f32 * 0.01)
///     .with_uniform_scale(2.0);
/// shape.set_transformation(spin.to_matrix());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// x = pitch, y = yaw, z = roll.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn translated(mut self, delta: Vec3) -> Self {
        self.position = self.position + delta;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn rotated_x(mut self, angle: f32) -> Self {
        self.rotation.x += angle;
        self
    }

    pub fn rotated_y(mut self, angle: f32) -> Self {
        self.rotation.y += angle;
        self
    }

    pub fn rotated_z(mut self, angle: f32) -> Self {
        self.rotation.z += angle;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(mut self, s: f32) -> Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    /// Object-to-parent matrix.
    ///
    /// Order: Translation * RotationY * RotationX * RotationZ * Scale, so yaw
    /// is applied last among the rotations.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_z(self.rotation.z)
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }

    /// `parent * self`, the matrix a child with this transform ends up with.
    pub fn composed_with(&self, parent: &Mat4) -> Mat4 {
        *parent * self.to_matrix()
    }
}

impl From<Transform> for Mat4 {
    fn from(transform: Transform) -> Self {
        transform.to_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn default_is_identity() {
        assert_eq!(Transform::default().to_matrix(), Mat4::identity());
    }

    #[test]
    fn modifiers_return_new_values() {
        let base = Transform::new();
        let moved = base.translated(Vec3::new(1.0, 0.0, 0.0)).rotated_y(0.5);
        assert_eq!(base, Transform::default());
        assert_eq!(moved.position, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved.rotation.y, 0.5);
    }

    #[test]
    fn scale_is_applied_before_translation() {
        let m = Transform::new()
            .with_position(Vec3::new(0.0, 0.0, -5.0))
            .with_uniform_scale(2.0)
            .to_matrix();
        let p = m * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.z, -5.0);
    }

    #[test]
    fn yaw_turns_x_toward_negative_z() {
        let m = Transform::new()
            .rotated_y(std::f32::consts::FRAC_PI_2)
            .to_matrix();
        let p = m * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn composition_leaves_parent_untouched() {
        let parent = Mat4::translation(0.0, 3.0, 0.0);
        let child = Transform::new().with_position(Vec3::new(1.0, 0.0, 0.0));
        let world = child.composed_with(&parent);
        assert_eq!(parent, Mat4::translation(0.0, 3.0, 0.0));
        assert_relative_eq!(world.translation_part().x, 1.0);
        assert_relative_eq!(world.translation_part().y, 3.0);
    }
}
