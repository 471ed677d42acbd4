//! Near-plane clipping for triangles that cross the eye plane.
//!
//! Positions are homogeneous pixel coordinates, so the only plane that
//! matters for correctness is `w = epsilon`: once every vertex is strictly in
//! front of the eye the bounded rasterization path applies. The viewport
//! transform leaves W untouched, so clipping here is equivalent to clipping in
//! clip space.
//!
//! Attributes are interpolated linearly in homogeneous space along each
//! clipped edge, which is what keeps them perspective-correct afterwards.

use super::rasterizer::Triangle;
use crate::math::{Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug)]
struct ClipVertex {
    position: Vec4,
    color: Vec3,
    texcoord: Vec2,
}

impl ClipVertex {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            color: self.color + (other.color - self.color) * t,
            texcoord: self.texcoord.lerp(other.texcoord, t),
        }
    }
}

/// Sutherland-Hodgman pass against `w >= epsilon`.
fn clip_polygon(vertices: &[ClipVertex], epsilon: f32) -> Vec<ClipVertex> {
    let mut output = Vec::with_capacity(vertices.len() + 1);

    for (i, current) in vertices.iter().enumerate() {
        let next = &vertices[(i + 1) % vertices.len()];
        let d1 = current.position.w - epsilon;
        let d2 = next.position.w - epsilon;

        if d1 >= 0.0 {
            output.push(*current);
            if d2 < 0.0 {
                output.push(current.lerp(next, d1 / (d1 - d2)));
            }
        } else if d2 >= 0.0 {
            output.push(current.lerp(next, d1 / (d1 - d2)));
        }
    }

    output
}

/// Clip a triangle to the half-space `w >= epsilon` and fan-triangulate the
/// result.
///
/// Returns zero, one, or two triangles with the input's winding. A triangle
/// already entirely in front comes back unchanged.
pub fn clip_near(triangle: &Triangle, epsilon: f32) -> Vec<Triangle> {
    if triangle.positions.iter().all(|p| p.w >= epsilon) {
        return vec![*triangle];
    }

    let vertices: Vec<ClipVertex> = (0..3)
        .map(|i| ClipVertex {
            position: triangle.positions[i],
            color: triangle.colors[i],
            texcoord: triangle.texcoords[i],
        })
        .collect();

    let polygon = clip_polygon(&vertices, epsilon);

    (1..polygon.len().saturating_sub(1))
        .map(|i| {
            let fan = [polygon[0], polygon[i], polygon[i + 1]];
            Triangle::new(
                fan.map(|v| v.position),
                fan.map(|v| v.color),
                fan.map(|v| v.texcoord),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f32 = 1e-3;

    fn tri(w: [f32; 3]) -> Triangle {
        Triangle::new(
            [
                Vec4::new(0.0, 0.0, 0.0, w[0]),
                Vec4::new(4.0, 0.0, 0.0, w[1]),
                Vec4::new(0.0, 4.0, 0.0, w[2]),
            ],
            [Vec3::ZERO, Vec3::ONE, Vec3::ZERO],
            [Vec2::ZERO, Vec2::ONE, Vec2::ZERO],
        )
    }

    #[test]
    fn triangle_in_front_is_unchanged() {
        let t = tri([1.0, 2.0, 3.0]);
        assert_eq!(clip_near(&t, EPS), vec![t]);
    }

    #[test]
    fn triangle_behind_is_removed() {
        assert!(clip_near(&tri([-1.0, -2.0, -3.0]), EPS).is_empty());
    }

    #[test]
    fn one_vertex_behind_gives_two_triangles() {
        let pieces = clip_near(&tri([1.0, 1.0, -1.0]), EPS);
        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert!(piece.positions.iter().all(|p| p.w >= EPS - 1e-6));
        }
    }

    #[test]
    fn two_vertices_behind_give_one_triangle() {
        let pieces = clip_near(&tri([1.0, -1.0, -1.0]), EPS);
        assert_eq!(pieces.len(), 1);
        let piece = pieces[0];
        // The new vertex on edge 0-1 sits where w crosses epsilon.
        assert_relative_eq!(piece.positions[1].w, EPS, epsilon = 1e-6);
        let t = (1.0 - EPS) / 2.0;
        assert_relative_eq!(piece.positions[1].x, 4.0 * t, epsilon = 1e-5);
        assert_relative_eq!(piece.colors[1].x, t, epsilon = 1e-5);
        assert_relative_eq!(piece.texcoords[1].y, t, epsilon = 1e-5);
    }

    #[test]
    fn clipping_preserves_winding() {
        let source = Triangle::from_positions([
            Vec4::new(2.0, 2.0, 0.0, 1.0),
            Vec4::new(12.0, 2.0, 0.0, 1.0),
            Vec4::new(7.0, 7.0, 0.0, -1.0),
        ]);
        assert!(source.is_front_facing());
        for piece in clip_near(&source, EPS) {
            assert!(piece.signed_area() >= 0.0);
        }
    }
}
