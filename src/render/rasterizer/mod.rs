//! Triangle setup and per-pixel rasterization.
//!
//! A [`Triangle`] arrives here in homogeneous pixel space: each position has
//! already been multiplied by `Viewport * Projection * View * Model` but not
//! divided by W. The 2D homogeneous part `(x, y, w)` of the three vertices is
//! all the rasterizer needs; Z is carried along but never read.

mod edgefunction;
mod shader;

pub use edgefunction::{EdgeFunctionRasterizer, PixelBounds, ScanArea};
pub use shader::{
    perspective_interpolate, FlatShader, PixelShader, TextureShader, VertexColorShader,
};

use crate::math::{Mat3, Vec2, Vec3, Vec4};

/// Where a triangle lies relative to the eye plane `w = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// All three W are positive.
    InFront,
    /// All three W are negative.
    Behind,
    /// Mixed signs (or a vertex exactly on the eye plane).
    Straddling,
}

impl Visibility {
    pub fn classify(w: [f32; 3]) -> Self {
        if w.iter().all(|&w| w > 0.0) {
            Visibility::InFront
        } else if w.iter().all(|&w| w < 0.0) {
            Visibility::Behind
        } else {
            Visibility::Straddling
        }
    }
}

/// An assembled triangle ready for rasterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    /// Homogeneous pixel-space positions (before the W divide).
    pub positions: [Vec4; 3],
    /// Per-vertex RGB in [0, 1].
    pub colors: [Vec3; 3],
    /// Per-vertex texture coordinates.
    pub texcoords: [Vec2; 3],
}

impl Triangle {
    pub fn new(positions: [Vec4; 3], colors: [Vec3; 3], texcoords: [Vec2; 3]) -> Self {
        Self {
            positions,
            colors,
            texcoords,
        }
    }

    /// A triangle with only positions; colors and texcoords are zero.
    pub fn from_positions(positions: [Vec4; 3]) -> Self {
        Self::new(positions, [Vec3::ZERO; 3], [Vec2::ZERO; 3])
    }

    /// The 3x3 matrix whose rows are each vertex's `(x, y, w)`.
    pub fn edge_matrix(&self) -> Mat3 {
        let [p0, p1, p2] = self.positions;
        Mat3::from_rows(p0.xyw(), p1.xyw(), p2.xyw())
    }

    /// Determinant of [`Triangle::edge_matrix`]. Positive for front-facing
    /// triangles (clockwise on screen, since pixel Y grows downward), negative
    /// for back-facing ones, zero for degenerate ones.
    pub fn signed_area(&self) -> f32 {
        self.edge_matrix().determinant()
    }

    pub fn is_front_facing(&self) -> bool {
        self.signed_area() > 0.0
    }

    pub fn w(&self) -> [f32; 3] {
        self.positions.map(|p| p.w)
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::classify(self.w())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_tri(points: [(f32, f32, f32); 3]) -> Triangle {
        Triangle::from_positions(points.map(|(x, y, w)| Vec4::new(x * w, y * w, 0.0, w)))
    }

    #[test]
    fn classify_by_w_signs() {
        assert_eq!(Visibility::classify([1.0, 2.0, 0.5]), Visibility::InFront);
        assert_eq!(Visibility::classify([-1.0, -2.0, -0.5]), Visibility::Behind);
        assert_eq!(Visibility::classify([1.0, -2.0, 0.5]), Visibility::Straddling);
        assert_eq!(Visibility::classify([0.0, 1.0, 1.0]), Visibility::Straddling);
    }

    #[test]
    fn front_facing_is_clockwise_on_screen() {
        let front = screen_tri([(0.0, 0.0, 1.0), (3.0, 0.0, 1.0), (0.0, 3.0, 1.0)]);
        let back = screen_tri([(0.0, 0.0, 1.0), (0.0, 3.0, 1.0), (3.0, 0.0, 1.0)]);
        assert!(front.is_front_facing());
        assert!(!back.is_front_facing());
    }

    #[test]
    fn facing_is_independent_of_positive_w_scale() {
        let near = screen_tri([(0.0, 0.0, 1.0), (3.0, 0.0, 1.0), (0.0, 3.0, 1.0)]);
        let far = screen_tri([(0.0, 0.0, 4.0), (3.0, 0.0, 2.0), (0.0, 3.0, 8.0)]);
        assert!(near.is_front_facing());
        assert!(far.is_front_facing());
    }

    #[test]
    fn collinear_triangle_is_not_front_facing() {
        let tri = screen_tri([(0.0, 0.0, 1.0), (1.0, 1.0, 1.0), (2.0, 2.0, 1.0)]);
        assert_eq!(tri.signed_area(), 0.0);
        assert!(!tri.is_front_facing());
    }
}
