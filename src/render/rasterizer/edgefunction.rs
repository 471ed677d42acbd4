//! Homogeneous edge-function rasterization.
//!
//! # Algorithm Overview
//!
//! Stack the three vertices' homogeneous screen positions `(x, y, w)` as the
//! rows of a 3x3 matrix `E`. For a pixel `q = (x, y, 1)` the weights
//!
//! ```text
//! a = inverse(E)^T * q
//! ```
//!
//! satisfy `a_0 * row_0 + a_1 * row_1 + a_2 * row_2 = q`. Each `a_i` is an
//! edge function: it is zero on the edge opposite vertex `i` and positive on
//! the side of that vertex. A pixel is covered exactly when all three are
//! strictly positive, so pixels on an edge are never drawn.
//!
//! Because no division by W ever happens, the test stays correct for
//! triangles that cross the eye plane: only the part in front of the eye
//! produces all-positive weights. The sum `a_0 + a_1 + a_2` is the pixel's
//! reciprocal depth `1/w`, which feeds both the depth test and
//! perspective-correct attribute interpolation.
//!
//! Pixel centers sit at integer coordinates.
//!
//! # References
//!
//! - Marc Olano and Trey Greer, "Triangle Scan Conversion using 2D
//!   Homogeneous Coordinates" (1997)
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)

use super::shader::PixelShader;
use super::Triangle;
use crate::config::DepthTest;
use crate::math::{Mat3, Vec3};
use crate::render::framebuffer::FrameBuffer;

/// Which pixels are tested against the edge functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanArea {
    /// The triangle's projected bounding box, clamped to the buffer. Only
    /// valid when every vertex has `w > 0`.
    Bounded,
    /// Every pixel of the buffer.
    FullBuffer,
}

/// Inclusive pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

/// Triangle rasterizer using homogeneous edge functions.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    pub fn new() -> Self {
        EdgeFunctionRasterizer
    }

    /// `inverse(E)^T` for the triangle, or `None` when `E` is singular.
    pub fn barycentric_matrix(triangle: &Triangle) -> Option<Mat3> {
        triangle.edge_matrix().inverse().map(|inv| inv.transpose())
    }

    /// Projected bounding box of a triangle in front of the eye, clamped to
    /// `width x height`. `None` when the box misses the buffer entirely.
    pub fn bounding_box(triangle: &Triangle, width: u32, height: u32) -> Option<PixelBounds> {
        if width == 0 || height == 0 {
            return None;
        }
        let screen = triangle.positions.map(|p| (p.x / p.w, p.y / p.w));

        let min_x = screen.iter().map(|s| s.0).fold(f32::INFINITY, f32::min);
        let max_x = screen.iter().map(|s| s.0).fold(f32::NEG_INFINITY, f32::max);
        let min_y = screen.iter().map(|s| s.1).fold(f32::INFINITY, f32::min);
        let max_y = screen.iter().map(|s| s.1).fold(f32::NEG_INFINITY, f32::max);

        // `as` saturates, so huge coordinates near the eye plane stay in range.
        let bounds = PixelBounds {
            min_x: (min_x.floor() as i32).max(0),
            max_x: (max_x.ceil() as i32).min(width as i32 - 1),
            min_y: (min_y.floor() as i32).max(0),
            max_y: (max_y.ceil() as i32).min(height as i32 - 1),
        };

        if bounds.min_x > bounds.max_x || bounds.min_y > bounds.max_y {
            None
        } else {
            Some(bounds)
        }
    }

    /// Rasterize one triangle into `buffer`.
    ///
    /// Pixels are visited row by row from the top, left to right. For every
    /// covered pixel that passes `depth_test` the stored depth is replaced by
    /// `1/w` and the color by the shader's output. Returns the number of
    /// pixels written.
    ///
    /// A degenerate triangle (singular edge matrix) writes nothing.
    pub fn rasterize<S: PixelShader>(
        &self,
        triangle: &Triangle,
        area: ScanArea,
        buffer: &mut FrameBuffer,
        depth_test: DepthTest,
        shader: &S,
    ) -> usize {
        let Some(weights_matrix) = Self::barycentric_matrix(triangle) else {
            return 0;
        };

        let bounds = match area {
            ScanArea::Bounded => {
                match Self::bounding_box(triangle, buffer.width(), buffer.height()) {
                    Some(bounds) => bounds,
                    None => return 0,
                }
            }
            ScanArea::FullBuffer => {
                if buffer.is_empty() {
                    return 0;
                }
                PixelBounds {
                    min_x: 0,
                    max_x: buffer.width() as i32 - 1,
                    min_y: 0,
                    max_y: buffer.height() as i32 - 1,
                }
            }
        };

        let mut written = 0;
        for y in bounds.min_y..=bounds.max_y {
            for x in bounds.min_x..=bounds.max_x {
                let weights = weights_matrix * Vec3::new(x as f32, y as f32, 1.0);
                if !(weights.x > 0.0 && weights.y > 0.0 && weights.z > 0.0) {
                    continue;
                }

                let one_over_w = weights.x + weights.y + weights.z;
                if buffer.test_and_set_depth(x, y, one_over_w, depth_test) {
                    buffer.set_pixel(x, y, shader.shade(weights, one_over_w));
                    written += 1;
                }
            }
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::math::Vec4;
    use crate::render::rasterizer::FlatShader;

    fn screen_tri(points: [(f32, f32, f32); 3]) -> Triangle {
        Triangle::from_positions(points.map(|(x, y, w)| Vec4::new(x * w, y * w, 0.0, w)))
    }

    fn buffer(width: u32, height: u32) -> FrameBuffer {
        FrameBuffer::new(width, height, colors::BLACK, DepthTest::NearestWins.clear_value())
    }

    fn draw(tri: &Triangle, area: ScanArea, fb: &mut FrameBuffer) -> usize {
        EdgeFunctionRasterizer::new().rasterize(
            tri,
            area,
            fb,
            DepthTest::NearestWins,
            &FlatShader::new(colors::RED),
        )
    }

    fn red_pixels(fb: &FrameBuffer) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if fb.pixel(x, y) == Some(colors::RED) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn small_triangle_covers_only_strict_interior() {
        let mut fb = buffer(4, 4);
        let tri = screen_tri([(0.0, 0.0, 1.0), (3.0, 0.0, 1.0), (0.0, 3.0, 1.0)]);
        assert_eq!(draw(&tri, ScanArea::Bounded, &mut fb), 1);
        assert_eq!(red_pixels(&fb), vec![(1, 1)]);
        assert_eq!(fb.depth(1, 1), Some(1.0));
    }

    #[test]
    fn coverage_matches_half_plane_test() {
        let (w, h) = (24, 20);
        let pts = [(2.3, 1.7), (21.6, 6.2), (7.9, 18.4)];
        let mut fb = buffer(w, h);
        let tri = screen_tri(pts.map(|(x, y)| (x, y, 2.0)));
        draw(&tri, ScanArea::Bounded, &mut fb);

        let edge = |a: (f32, f32), b: (f32, f32), p: (f32, f32)| {
            (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
        };
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let p = (x as f32, y as f32);
                let inside = edge(pts[0], pts[1], p) > 0.0
                    && edge(pts[1], pts[2], p) > 0.0
                    && edge(pts[2], pts[0], p) > 0.0;
                assert_eq!(fb.pixel(x, y) == Some(colors::RED), inside, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn full_buffer_scan_matches_bounded_scan() {
        let tri = screen_tri([(1.5, 1.0, 3.0), (14.0, 4.0, 1.0), (4.0, 12.5, 0.5)]);
        let mut bounded = buffer(16, 16);
        let mut full = buffer(16, 16);
        let a = draw(&tri, ScanArea::Bounded, &mut bounded);
        let b = draw(&tri, ScanArea::FullBuffer, &mut full);
        assert!(a > 0);
        assert_eq!(a, b);
        assert_eq!(bounded.color_buffer(), full.color_buffer());
    }

    #[test]
    fn reciprocal_depth_is_interpolated_in_screen_space() {
        // Every vertex at w = 4 gives 1/w = 0.25 everywhere.
        let mut fb = buffer(8, 8);
        let tri = screen_tri([(0.0, 0.0, 4.0), (8.0, 0.0, 4.0), (0.0, 8.0, 4.0)]);
        draw(&tri, ScanArea::Bounded, &mut fb);
        assert!((fb.depth(2, 2).unwrap() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn triangle_behind_eye_covers_nothing() {
        let mut fb = buffer(8, 8);
        let tri = screen_tri([(0.0, 0.0, -1.0), (8.0, 0.0, -1.0), (0.0, 8.0, -1.0)]);
        assert_eq!(draw(&tri, ScanArea::FullBuffer, &mut fb), 0);
    }

    #[test]
    fn winding_does_not_change_coverage() {
        // Facing is decided before rasterization; the weights alone cover the
        // same pixels for either vertex order.
        let mut cw = buffer(8, 8);
        let mut ccw = buffer(8, 8);
        let a = draw(
            &screen_tri([(0.0, 0.0, 1.0), (7.0, 0.0, 1.0), (0.0, 7.0, 1.0)]),
            ScanArea::Bounded,
            &mut cw,
        );
        let b = draw(
            &screen_tri([(0.0, 0.0, 1.0), (0.0, 7.0, 1.0), (7.0, 0.0, 1.0)]),
            ScanArea::Bounded,
            &mut ccw,
        );
        assert!(a > 0);
        assert_eq!(a, b);
        assert_eq!(cw.color_buffer(), ccw.color_buffer());
    }

    #[test]
    fn straddling_triangle_draws_its_front_part() {
        // Vertex 2 is behind the eye; the visible part still covers pixels.
        let tri = Triangle::from_positions([
            Vec4::new(2.0, 2.0, 0.0, 1.0),
            Vec4::new(12.0, 2.0, 0.0, 1.0),
            Vec4::new(7.0, 7.0, 0.0, -1.0),
        ]);
        assert!(tri.is_front_facing());
        let mut fb = buffer(16, 16);
        assert!(draw(&tri, ScanArea::FullBuffer, &mut fb) > 0);
        // Nothing above the edge between the two front vertices.
        assert!(red_pixels(&fb).iter().all(|&(_, y)| y >= 2));
    }

    #[test]
    fn bounding_box_is_clamped_to_buffer() {
        let tri = screen_tri([(-5.0, -5.0, 1.0), (50.0, -5.0, 1.0), (-5.0, 50.0, 1.0)]);
        let bounds = EdgeFunctionRasterizer::bounding_box(&tri, 10, 6).unwrap();
        assert_eq!(
            bounds,
            PixelBounds {
                min_x: 0,
                max_x: 9,
                min_y: 0,
                max_y: 5
            }
        );

        let offscreen = screen_tri([(20.0, 0.0, 1.0), (30.0, 0.0, 1.0), (20.0, 5.0, 1.0)]);
        assert_eq!(EdgeFunctionRasterizer::bounding_box(&offscreen, 10, 6), None);
    }

    #[test]
    fn degenerate_triangle_writes_nothing() {
        let mut fb = buffer(8, 8);
        let tri = screen_tri([(0.0, 0.0, 1.0), (3.0, 3.0, 1.0), (6.0, 6.0, 1.0)]);
        assert_eq!(draw(&tri, ScanArea::FullBuffer, &mut fb), 0);
    }
}
