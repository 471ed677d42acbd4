//! Perspective viewing volume.
//!
//! The [`Frustum`] is the single source of truth for the projection
//! parameters. It generates the GL-style projection matrix (eye space looks
//! down -Z, clip W = eye distance) and the six eye-space planes used for
//! bounding-sphere culling.

use crate::math::{Mat4, Vec3, Vec4};

/// One of the six planes bounding the viewing volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrustumPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

impl FrustumPlane {
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Bottom,
        FrustumPlane::Top,
        FrustumPlane::Near,
        FrustumPlane::Far,
    ];

    /// Plane coefficients `(a, b, c, d)` extracted from a projection matrix.
    ///
    /// An eye-space point `p` is inside when `a*x + b*y + c*z + d >= 0`, which
    /// is the clip-space inequality (e.g. `x >= -w` for the left plane)
    /// pulled back through the projection.
    pub fn coefficients(self, projection: &Mat4) -> Vec4 {
        let w = projection.row(3);
        match self {
            FrustumPlane::Left => w + projection.row(0),
            FrustumPlane::Right => w - projection.row(0),
            FrustumPlane::Bottom => w + projection.row(1),
            FrustumPlane::Top => w - projection.row(1),
            FrustumPlane::Near => w + projection.row(2),
            FrustumPlane::Far => w - projection.row(2),
        }
    }
}

/// Near-plane window of an off-center frustum.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Window {
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
}

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    /// Near clipping plane distance.
    near: f32,
    /// Far clipping plane distance.
    far: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    /// Vertical field of view in degrees.
    fov_y_degrees: f32,
    /// Overrides the symmetric window when set.
    window: Option<Window>,
}

impl Default for Frustum {
    /// Near 1, far 100, aspect 1, vertical FOV 60 degrees.
    fn default() -> Self {
        Self::new(1.0, 100.0, 1.0, 60.0)
    }
}

impl Frustum {
    /// Creates a symmetric frustum.
    ///
    /// # Arguments
    /// * `near` - Near clipping plane distance (must be > 0)
    /// * `far` - Far clipping plane distance (must be > near)
    /// * `aspect_ratio` - Width divided by height
    /// * `fov_y_degrees` - Vertical field of view in degrees
    pub fn new(near: f32, far: f32, aspect_ratio: f32, fov_y_degrees: f32) -> Self {
        Self {
            near,
            far,
            aspect_ratio,
            fov_y_degrees,
            window: None,
        }
    }

    /// Creates an off-center frustum from its near-plane window.
    pub fn off_center(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let fov_y_degrees = 2.0 * (top.max(-bottom) / near).atan().to_degrees();
        Self {
            near,
            far,
            aspect_ratio: (right - left) / (top - bottom),
            fov_y_degrees,
            window: Some(Window {
                left,
                right,
                bottom,
                top,
            }),
        }
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    /// Updates the aspect ratio (typically called on window resize). An
    /// off-center window is widened or narrowed about its center.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if let Some(window) = &mut self.window {
            let center = (window.left + window.right) / 2.0;
            let half_width = (window.top - window.bottom) * aspect_ratio / 2.0;
            window.left = center - half_width;
            window.right = center + half_width;
        }
        self.aspect_ratio = aspect_ratio;
    }

    /// Eye-to-clip matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        match self.window {
            Some(w) => Mat4::frustum(w.left, w.right, w.bottom, w.top, self.near, self.far),
            None => Mat4::perspective(
                self.fov_y_degrees.to_radians(),
                self.aspect_ratio,
                self.near,
                self.far,
            ),
        }
    }

    /// The six eye-space planes, normalized so that evaluating one at a point
    /// gives a signed distance.
    pub fn planes(&self) -> [Vec4; 6] {
        let projection = self.projection_matrix();
        FrustumPlane::ALL.map(|plane| {
            let p = plane.coefficients(&projection);
            let length = p.xyz().magnitude();
            if length > 0.0 {
                p * (1.0 / length)
            } else {
                p
            }
        })
    }

    /// Whether a sphere given in eye space touches the viewing volume.
    ///
    /// Conservative: spheres near a corner may pass although they lie
    /// outside.
    pub fn contains_sphere(&self, center: Vec3, radius: f32) -> bool {
        let point = Vec4::from_vec3(center, 1.0);
        self.planes()
            .iter()
            .all(|plane| plane.dot(point) >= -radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_parameters() {
        let frustum = Frustum::default();
        assert_eq!(frustum.near(), 1.0);
        assert_eq!(frustum.far(), 100.0);
        assert_eq!(frustum.aspect_ratio(), 1.0);
        assert_eq!(frustum.fov_y_degrees(), 60.0);
    }

    #[test]
    fn clip_w_is_eye_distance() {
        let m = Frustum::default().projection_matrix();
        let clip = m * Vec4::new(0.0, 0.0, -7.0, 1.0);
        assert_relative_eq!(clip.w, 7.0);
    }

    #[test]
    fn near_and_far_map_to_unit_depth() {
        let m = Frustum::default().projection_matrix();
        let near = m * Vec4::new(0.0, 0.0, -1.0, 1.0);
        let far = m * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn symmetric_off_center_matches_perspective() {
        let half = (30.0f32).to_radians().tan();
        let off = Frustum::off_center(-half, half, -half, half, 1.0, 100.0);
        let sym = Frustum::default();
        let a = off.projection_matrix();
        let b = sym.projection_matrix();
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = 1e-5);
            }
        }
        assert_relative_eq!(off.fov_y_degrees(), 60.0, epsilon = 1e-3);
    }

    #[test]
    fn near_plane_distance_is_signed() {
        let planes = Frustum::default().planes();
        let near = planes[4];
        // Point 3 units beyond the near plane.
        assert_relative_eq!(near.dot(Vec4::new(0.0, 0.0, -4.0, 1.0)), 3.0, epsilon = 1e-4);
    }

    #[test]
    fn sphere_culling() {
        let frustum = Frustum::default();
        assert!(frustum.contains_sphere(Vec3::new(0.0, 0.0, -40.0), 1.0));
        // Behind the eye.
        assert!(!frustum.contains_sphere(Vec3::new(0.0, 0.0, 10.0), 1.0));
        // Beyond far, but the radius reaches back inside.
        assert!(!frustum.contains_sphere(Vec3::new(0.0, 0.0, -120.0), 5.0));
        assert!(frustum.contains_sphere(Vec3::new(0.0, 0.0, -102.0), 5.0));
        // Far off to the side.
        assert!(!frustum.contains_sphere(Vec3::new(100.0, 0.0, -10.0), 1.0));
    }
}
