//! Procedural meshes.
//!
//! Every generator winds its triangles clockwise as seen from outside the
//! surface, which is the front-facing orientation once the viewport has
//! flipped Y. Texture coordinates put V = 0 at the top of the image.

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::colors;
use crate::math::{Vec2, Vec3};
use crate::vertex_data::{Semantic, VertexData};

/// Accumulates vertices and triangles for a generator.
#[derive(Default)]
struct MeshBuilder {
    positions: Vec<f32>,
    colors: Vec<f32>,
    normals: Vec<f32>,
    texcoords: Vec<f32>,
    indices: Vec<u32>,
}

impl MeshBuilder {
    fn vertex_count(&self) -> u32 {
        (self.positions.len() / 3) as u32
    }

    fn push_vertex(&mut self, position: Vec3, color: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.vertex_count();
        self.positions.extend([position.x, position.y, position.z]);
        self.colors.extend([color.x, color.y, color.z]);
        self.normals.extend([normal.x, normal.y, normal.z]);
        self.texcoords.extend([uv.x, uv.y]);
        index
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend([a, b, c]);
    }

    /// A flat quad given by its corners in clockwise order as seen from the
    /// front: top-left, top-right, bottom-right, bottom-left.
    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3, color: Vec3) {
        let uvs = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let [tl, tr, br, bl] = [0, 1, 2, 3].map(|i| self.push_vertex(corners[i], color, normal, uvs[i]));
        self.push_triangle(tl, tr, br);
        self.push_triangle(tl, br, bl);
    }

    /// A flat triangle with corners in clockwise order as seen from the front.
    fn push_flat_triangle(&mut self, corners: [Vec3; 3], normal: Vec3, color: Vec3) {
        let uvs = [Vec2::new(0.5, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)];
        let [a, b, c] = [0, 1, 2].map(|i| self.push_vertex(corners[i], color, normal, uvs[i]));
        self.push_triangle(a, b, c);
    }

    /// Axis-aligned box centered at the origin. `face_colors` follows the
    /// order front, left, back, right, top, bottom.
    fn push_box(&mut self, half: f32, face_colors: [Vec3; 6]) {
        // (outward normal, right, up) as seen from outside each face.
        let faces = [
            (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::UP),
            (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::UP),
            (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::UP),
            (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::UP),
            (Vec3::UP, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
            (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
        ];
        for ((normal, right, up), color) in faces.into_iter().zip(face_colors) {
            let center = normal * half;
            let (r, u) = (right * half, up * half);
            self.push_quad(
                [center - r + u, center + r + u, center + r - u, center - r - u],
                normal,
                color,
            );
        }
    }

    fn build(self) -> VertexData {
        let vertex_count = self.positions.len() / 3;
        VertexData::from_parts(
            vertex_count,
            vec![
                (Semantic::Position, self.positions),
                (Semantic::Color, self.colors),
                (Semantic::Normal, self.normals),
                (Semantic::Texcoord, self.texcoords),
            ],
            self.indices,
        )
    }
}

fn rgb(color: u32) -> Vec3 {
    let (r, g, b) = colors::unpack_color(color);
    Vec3::new(r, g, b)
}

/// Unit cube from -1 to 1 on every axis: 24 vertices (four per face) so
/// that every face has its own color, normal, and full 0..1 texture square.
///
/// Faces are red (front, back), green (left, right), and blue (top, bottom).
pub fn cube() -> VertexData {
    let (red, green, blue) = (rgb(colors::RED), rgb(colors::GREEN), rgb(colors::BLUE));
    let mut builder = MeshBuilder::default();
    builder.push_box(1.0, [red, green, red, green, blue, blue]);
    builder.build()
}

/// Cylinder around the Y axis, centered at the origin.
///
/// The side wraps the texture once horizontally; its seam column is
/// duplicated so U runs from 0 to 1 without folding back. Caps are mapped
/// planar. All vertices are white.
///
/// # Panics
/// Panics if `resolution < 3`.
pub fn cylinder(resolution: usize, height: f32, radius: f32) -> VertexData {
    assert!(resolution >= 3, "cylinder needs at least 3 segments");
    let white = Vec3::ONE;
    let half = height / 2.0;
    let mut builder = MeshBuilder::default();

    // Angle 0 faces +Z and grows toward +X.
    let ring = |k: usize| (TAU * k as f32 / resolution as f32).sin_cos();

    // Side: one top and one bottom vertex per column.
    let side_start = builder.vertex_count();
    for k in 0..=resolution {
        let (s, c) = ring(k);
        let normal = Vec3::new(s, 0.0, c);
        let u = k as f32 / resolution as f32;
        builder.push_vertex(Vec3::new(radius * s, half, radius * c), white, normal, Vec2::new(u, 0.0));
        builder.push_vertex(Vec3::new(radius * s, -half, radius * c), white, normal, Vec2::new(u, 1.0));
    }
    for k in 0..resolution as u32 {
        let top = side_start + 2 * k;
        let (bottom, next_top, next_bottom) = (top + 1, top + 2, top + 3);
        builder.push_triangle(top, next_top, next_bottom);
        builder.push_triangle(top, next_bottom, bottom);
    }

    // Caps: a center plus a ring each.
    for (y, normal) in [(half, Vec3::UP), (-half, Vec3::new(0.0, -1.0, 0.0))] {
        let top_cap = y > 0.0;
        let center = builder.vertex_count();
        builder.push_vertex(Vec3::new(0.0, y, 0.0), white, normal, Vec2::new(0.5, 0.5));
        for k in 0..resolution {
            let (s, c) = ring(k);
            // Seen from outside, screen-up is -Z on the top cap and +Z below.
            let v = if top_cap { 0.5 + 0.5 * c } else { 0.5 - 0.5 * c };
            builder.push_vertex(
                Vec3::new(radius * s, y, radius * c),
                white,
                normal,
                Vec2::new(0.5 + 0.5 * s, v),
            );
        }
        for k in 0..resolution as u32 {
            let current = center + 1 + k;
            let next = center + 1 + (k + 1) % resolution as u32;
            if top_cap {
                builder.push_triangle(center, next, current);
            } else {
                builder.push_triangle(center, current, next);
            }
        }
    }

    builder.build()
}

/// Ring colors cycled around a torus or a surface of revolution.
const RING_PALETTE: [u32; 6] = [0xE53935, 0xFDD835, 0x43A047, 0x1E88E5, 0x8E24AA, 0xFB8C00];

/// Torus around the Y axis.
///
/// `segments` rings go around the main circle of radius `major_radius`; each
/// ring has `sides` vertices on a tube of radius `minor_radius`. Every ring
/// gets one color from a fixed palette. Vertices are shared between
/// neighboring quads, so the mesh has exactly `segments * sides` vertices.
///
/// # Panics
/// Panics if `segments < 3` or `sides < 3`.
pub fn torus(segments: usize, sides: usize, major_radius: f32, minor_radius: f32) -> VertexData {
    assert!(segments >= 3 && sides >= 3, "torus needs at least 3 segments and 3 sides");
    let mut builder = MeshBuilder::default();

    for i in 0..segments {
        let (sin_major, cos_major) = (TAU * i as f32 / segments as f32).sin_cos();
        let color = rgb(RING_PALETTE[i % RING_PALETTE.len()]);
        for j in 0..sides {
            let (sin_minor, cos_minor) = (TAU * j as f32 / sides as f32).sin_cos();
            let normal = Vec3::new(cos_minor * sin_major, sin_minor, cos_minor * cos_major);
            let distance = major_radius + minor_radius * cos_minor;
            let position = Vec3::new(
                distance * sin_major,
                minor_radius * sin_minor,
                distance * cos_major,
            );
            let uv = Vec2::new(i as f32 / segments as f32, 1.0 - j as f32 / sides as f32);
            builder.push_vertex(position, color, normal, uv);
        }
    }

    let index = |i: usize, j: usize| ((i % segments) * sides + j % sides) as u32;
    for i in 0..segments {
        for j in 0..sides {
            let (tl, tr) = (index(i, j + 1), index(i + 1, j + 1));
            let (br, bl) = (index(i + 1, j), index(i, j));
            builder.push_triangle(tl, tr, br);
            builder.push_triangle(tl, br, bl);
        }
    }

    builder.build()
}

/// Noise scale applied at each finer subdivision level.
const LANDSCAPE_ROUGHNESS: f32 = 0.65;

/// Terrain bands by height relative to the highest point: (upper bound, color).
const LANDSCAPE_BANDS: [(f32, u32); 4] = [
    (0.65, 0xEDC9AF),
    (0.75, 0x1E932D),
    (0.9, 0x968D99),
    (f32::INFINITY, 0xFFFFFF),
];

/// Fills a `(2^n + 1)^2` height grid with the diamond-square algorithm.
///
/// Every new height is the mean of its existing neighbors plus uniform
/// noise in `[0, scale)`. The scale starts at `max_noise` and shrinks by
/// [`LANDSCAPE_ROUGHNESS`] per level.
fn diamond_square(size: usize, max_noise: f32, rng: &mut StdRng) -> Vec<f32> {
    let mut heights = vec![0.0; size * size];
    let at = |x: usize, z: usize| x * size + z;
    let noise = |rng: &mut StdRng, scale: f32| rng.gen::<f32>() * scale;

    let last = size - 1;
    for (x, z) in [(0, 0), (last, 0), (0, last), (last, last)] {
        heights[at(x, z)] = noise(rng, max_noise);
    }

    let mut step = last;
    let mut scale = max_noise;
    while step > 1 {
        let half = step / 2;

        // Square step: centers of every square.
        for x in (half..size).step_by(step) {
            for z in (half..size).step_by(step) {
                let mean = (heights[at(x - half, z - half)]
                    + heights[at(x + half, z - half)]
                    + heights[at(x - half, z + half)]
                    + heights[at(x + half, z + half)])
                    / 4.0;
                heights[at(x, z)] = mean + noise(rng, scale);
            }
        }

        // Diamond step: edge midpoints, averaging the neighbors that exist.
        for x in (0..size).step_by(half) {
            let z_start = if (x / half) % 2 == 0 { half } else { 0 };
            for z in (z_start..size).step_by(step) {
                let neighbors = [
                    x.checked_sub(half).map(|x| at(x, z)),
                    (x + half < size).then(|| at(x + half, z)),
                    z.checked_sub(half).map(|z| at(x, z)),
                    (z + half < size).then(|| at(x, z + half)),
                ];
                let (sum, count) = neighbors
                    .iter()
                    .flatten()
                    .fold((0.0_f32, 0.0_f32), |(sum, count), &i| {
                        (sum + heights[i], count + 1.0)
                    });
                heights[at(x, z)] = sum / count + noise(rng, scale);
            }
        }

        step = half;
        scale *= LANDSCAPE_ROUGHNESS;
    }

    heights
}

/// Fractal terrain on a `(2^n + 1) x (2^n + 1)` grid in the XZ plane,
/// centered at the origin with unit spacing. Heights grow along +Y.
///
/// Heights come from diamond-square subdivision seeded with `seed`, so the
/// same arguments always give the same mesh. Vertices are colored by height
/// relative to the highest point (sand, grass, rock, snow). The texture is
/// stretched once over the whole grid.
///
/// # Panics
/// Panics unless `1 <= n <= 12`.
pub fn fractal_landscape(n: u32, max_noise: f32, seed: u64) -> VertexData {
    assert!((1..=12).contains(&n), "landscape detail must be between 1 and 12");
    let size = (1usize << n) + 1;
    let mut rng = StdRng::seed_from_u64(seed);
    let heights = diamond_square(size, max_noise, &mut rng);
    let height = |x: usize, z: usize| heights[x * size + z];

    let max_height = heights.iter().copied().fold(0.1, f32::max);
    let offset = (size / 2) as f32;
    let last = (size - 1) as f32;
    let mut builder = MeshBuilder::default();

    for x in 0..size {
        for z in 0..size {
            let h = height(x, z);
            // Central differences, one-sided at the border.
            let (x0, x1) = (x.saturating_sub(1), (x + 1).min(size - 1));
            let (z0, z1) = (z.saturating_sub(1), (z + 1).min(size - 1));
            let slope_x = (height(x1, z) - height(x0, z)) / (x1 - x0) as f32;
            let slope_z = (height(x, z1) - height(x, z0)) / (z1 - z0) as f32;
            let normal = Vec3::new(-slope_x, 1.0, -slope_z).normalize();

            let relative = h / max_height;
            let color = LANDSCAPE_BANDS
                .iter()
                .find(|(bound, _)| relative < *bound)
                .map_or(Vec3::ONE, |&(_, color)| rgb(color));

            builder.push_vertex(
                Vec3::new(x as f32 - offset, h, z as f32 - offset),
                color,
                normal,
                Vec2::new(x as f32 / last, z as f32 / last),
            );
        }
    }

    // Seen from above, +X is right and -Z is up.
    let index = |x: usize, z: usize| (x * size + z) as u32;
    for x in 0..size - 1 {
        for z in 0..size - 1 {
            let (tl, tr) = (index(x, z), index(x + 1, z));
            let (br, bl) = (index(x + 1, z + 1), index(x, z + 1));
            builder.push_triangle(tl, tr, br);
            builder.push_triangle(tl, br, bl);
        }
    }

    builder.build()
}

/// Point and derivative of one cubic Bezier segment at `t`.
fn cubic_bezier(p: &[Vec2], t: f32) -> (Vec2, Vec2) {
    let s = 1.0 - t;
    let point = p[0] * (s * s * s)
        + p[1] * (3.0 * s * s * t)
        + p[2] * (3.0 * s * t * t)
        + p[3] * (t * t * t);
    let tangent = (p[1] - p[0]) * (3.0 * s * s)
        + (p[2] - p[1]) * (6.0 * s * t)
        + (p[3] - p[2]) * (3.0 * t * t);
    (point, tangent)
}

/// Surface of revolution around the Y axis.
///
/// `control_points` describe a piecewise cubic Bezier profile in the
/// (radius, height) plane: `3k + 1` points for `k` segments, consecutive
/// segments sharing an end point. The profile is sampled at
/// `curve_resolution` evenly spaced parameters and swept through
/// `rotation_resolution` steps; the seam column is duplicated so U runs from
/// 0 to 1. V follows the profile.
///
/// The outside of the surface lies to the left of the profile's direction of
/// travel, so a profile drawn from top to bottom at positive radius faces
/// away from the axis. Each rotation step gets one color from the ring
/// palette.
///
/// # Panics
/// Panics if the control point count is not `3k + 1` with `k >= 1`, if
/// `curve_resolution < 2`, or if `rotation_resolution < 3`.
pub fn rotational_surface(
    control_points: &[Vec2],
    curve_resolution: usize,
    rotation_resolution: usize,
) -> VertexData {
    assert!(
        control_points.len() >= 4 && (control_points.len() - 1) % 3 == 0,
        "profile needs 3k + 1 control points, got {}",
        control_points.len()
    );
    assert!(curve_resolution >= 2, "profile needs at least 2 samples");
    assert!(rotation_resolution >= 3, "rotation needs at least 3 steps");

    let segments = (control_points.len() - 1) / 3;
    let profile: Vec<(Vec2, Vec2)> = (0..curve_resolution)
        .map(|i| {
            let s = i as f32 / (curve_resolution - 1) as f32 * segments as f32;
            let segment = (s as usize).min(segments - 1);
            cubic_bezier(&control_points[3 * segment..3 * segment + 4], s - segment as f32)
        })
        .collect();

    let mut builder = MeshBuilder::default();
    // Same orientation as the cylinder: angle 0 faces +Z and grows toward +X.
    for k in 0..=rotation_resolution {
        let (sin, cos) = (TAU * k as f32 / rotation_resolution as f32).sin_cos();
        let color = rgb(RING_PALETTE[(k % rotation_resolution) % RING_PALETTE.len()]);
        let u = k as f32 / rotation_resolution as f32;
        for (i, &(point, tangent)) in profile.iter().enumerate() {
            // Left of travel in the (radius, height) plane.
            let (radial, up) = (-tangent.y, tangent.x);
            let normal = Vec3::new(radial * sin, up, radial * cos).normalize();
            let v = i as f32 / (curve_resolution - 1) as f32;
            builder.push_vertex(
                Vec3::new(point.x * sin, point.y, point.x * cos),
                color,
                normal,
                Vec2::new(u, v),
            );
        }
    }

    let index = |k: usize, i: usize| (k * curve_resolution + i) as u32;
    for k in 0..rotation_resolution {
        for i in 0..curve_resolution - 1 {
            let (top, next_top) = (index(k, i), index(k + 1, i));
            let (bottom, next_bottom) = (index(k, i + 1), index(k + 1, i + 1));
            builder.push_triangle(top, next_top, next_bottom);
            builder.push_triangle(top, next_bottom, bottom);
        }
    }

    builder.build()
}

/// A box-shaped house with a gabled roof standing on a ground square.
///
/// The walls span -4..4 on every axis, the roof ridge runs along Z at
/// height 8, and the ground is a 40 x 40 square at the foot of the walls.
pub fn house() -> VertexData {
    let (red, green, blue) = (rgb(colors::RED), rgb(colors::GREEN), rgb(colors::BLUE));
    let grass = Vec3::new(0.0, 0.5, 0.0);
    let slope = std::f32::consts::FRAC_1_SQRT_2;
    let mut builder = MeshBuilder::default();

    builder.push_box(4.0, [red, green, red, green, blue, blue]);

    builder.push_quad(
        [
            Vec3::new(-20.0, -4.0, -20.0),
            Vec3::new(20.0, -4.0, -20.0),
            Vec3::new(20.0, -4.0, 20.0),
            Vec3::new(-20.0, -4.0, 20.0),
        ],
        Vec3::UP,
        grass,
    );

    // Gables.
    builder.push_flat_triangle(
        [Vec3::new(0.0, 8.0, 4.0), Vec3::new(4.0, 4.0, 4.0), Vec3::new(-4.0, 4.0, 4.0)],
        Vec3::new(0.0, 0.0, 1.0),
        blue,
    );
    builder.push_flat_triangle(
        [Vec3::new(0.0, 8.0, -4.0), Vec3::new(-4.0, 4.0, -4.0), Vec3::new(4.0, 4.0, -4.0)],
        Vec3::new(0.0, 0.0, -1.0),
        blue,
    );

    // Roof slopes.
    builder.push_quad(
        [
            Vec3::new(0.0, 8.0, 4.0),
            Vec3::new(0.0, 8.0, -4.0),
            Vec3::new(4.0, 4.0, -4.0),
            Vec3::new(4.0, 4.0, 4.0),
        ],
        Vec3::new(slope, slope, 0.0),
        red,
    );
    builder.push_quad(
        [
            Vec3::new(0.0, 8.0, -4.0),
            Vec3::new(0.0, 8.0, 4.0),
            Vec3::new(-4.0, 4.0, 4.0),
            Vec3::new(-4.0, 4.0, -4.0),
        ],
        Vec3::new(-slope, slope, 0.0),
        green,
    );

    builder.build()
}
