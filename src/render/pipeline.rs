//! Per-item draw path: vertex assembly, visibility classification, and the
//! choice of scan strategy and pixel shader.

use super::clip::clip_near;
use super::framebuffer::FrameBuffer;
use super::rasterizer::{
    EdgeFunctionRasterizer, FlatShader, PixelShader, ScanArea, TextureShader, Triangle,
    VertexColorShader, Visibility,
};
use crate::colors;
use crate::config::{RasterConfig, StraddleMode};
use crate::material::Material;
use crate::math::{Mat4, Vec2, Vec3, Vec4};
use crate::vertex_data::{Semantic, VertexData};

/// Smallest W kept by near-plane clipping.
const NEAR_W_EPSILON: f32 = 1e-4;

/// Counters accumulated while drawing one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Render items drawn.
    pub items: usize,
    /// Triangles submitted.
    pub triangles: usize,
    /// Triangles skipped by the front-face test (including degenerate ones).
    pub backfacing: usize,
    /// Triangles discarded because every vertex is behind the eye.
    pub behind: usize,
    /// Triangles that crossed the eye plane.
    pub straddling: usize,
    /// Pixels that passed the depth test and were shaded.
    pub pixels_written: usize,
}

/// Draw every triangle of `vertex_data` into `buffer`.
///
/// `combined` maps object space straight to homogeneous pixel space.
/// Triangles are processed in index order.
///
/// # Panics
/// Panics if an index refers past the vertex count.
pub fn draw_mesh(
    buffer: &mut FrameBuffer,
    config: &RasterConfig,
    stats: &mut FrameStats,
    vertex_data: &VertexData,
    material: Option<&Material>,
    combined: &Mat4,
) {
    let Some(positions) = vertex_data.element(Semantic::Position) else {
        log::warn!("skipping mesh without POSITION element");
        return;
    };

    // Transform every vertex once; triangles share vertices through the index buffer.
    let projected: Vec<Vec4> = positions
        .chunks_exact(3)
        .map(|p| *combined * Vec4::from_vec3(Vec3::from_slice(p), 1.0))
        .collect();

    let texture = material.and_then(Material::texture);
    if texture.is_some() && !vertex_data.has(Semantic::Texcoord) {
        log::warn!("textured material on a mesh without TEXCOORD; sampling at (0, 0)");
    }
    let flat_color = material.and_then(|m| m.flat_color);

    let rasterizer = EdgeFunctionRasterizer::new();
    for indices in vertex_data.triangles() {
        stats.triangles += 1;
        let triangle = assemble(vertex_data, &projected, indices);

        if config.backface_culling && !triangle.is_front_facing() {
            stats.backfacing += 1;
            continue;
        }

        let written = match (texture, flat_color) {
            (Some(texture), _) => {
                let filter = config.texture_filter;
                draw_triangle(&rasterizer, &triangle, buffer, config, stats, |t| {
                    let [t0, t1, t2] = t.texcoords;
                    TextureShader::new(
                        texture,
                        Vec3::new(t0.x, t1.x, t2.x),
                        Vec3::new(t0.y, t1.y, t2.y),
                        filter,
                    )
                })
            }
            (None, Some(color)) => {
                draw_triangle(&rasterizer, &triangle, buffer, config, stats, |_| {
                    FlatShader::new(color)
                })
            }
            (None, None) => draw_triangle(&rasterizer, &triangle, buffer, config, stats, |t| {
                VertexColorShader::new(t.colors)
            }),
        };
        stats.pixels_written += written;
    }

    if config.show_vertices {
        for p in projected.iter().filter(|p| p.w > 0.0) {
            let (x, y) = ((p.x / p.w).round(), (p.y / p.w).round());
            buffer.set_pixel(x as i32, y as i32, colors::WHITE);
        }
    }
}

/// Gather the attributes of one triangle. Absent attributes read as zero.
fn assemble(vertex_data: &VertexData, projected: &[Vec4], indices: [u32; 3]) -> Triangle {
    let positions = indices.map(|i| {
        assert!(
            (i as usize) < projected.len(),
            "vertex index {i} out of range for {} vertices",
            projected.len()
        );
        projected[i as usize]
    });
    let colors = indices.map(|i| vertex_data.vec3(Semantic::Color, i).unwrap_or(Vec3::ZERO));
    let texcoords = indices.map(|i| vertex_data.texcoord(i).unwrap_or(Vec2::ZERO));
    Triangle::new(positions, colors, texcoords)
}

/// Classify by W and rasterize with the matching strategy.
///
/// `make_shader` is called once per rasterized triangle. Near-plane clipping
/// produces pieces with their own vertices, so each piece needs a shader
/// built from its own attributes.
fn draw_triangle<S, F>(
    rasterizer: &EdgeFunctionRasterizer,
    triangle: &Triangle,
    buffer: &mut FrameBuffer,
    config: &RasterConfig,
    stats: &mut FrameStats,
    make_shader: F,
) -> usize
where
    S: PixelShader,
    F: Fn(&Triangle) -> S,
{
    match triangle.visibility() {
        Visibility::InFront => rasterizer.rasterize(
            triangle,
            ScanArea::Bounded,
            buffer,
            config.depth_test,
            &make_shader(triangle),
        ),
        Visibility::Behind => {
            stats.behind += 1;
            0
        }
        Visibility::Straddling => {
            stats.straddling += 1;
            match config.straddle {
                StraddleMode::FullScan => rasterizer.rasterize(
                    triangle,
                    ScanArea::FullBuffer,
                    buffer,
                    config.depth_test,
                    &make_shader(triangle),
                ),
                StraddleMode::ClipNear => clip_near(triangle, NEAR_W_EPSILON)
                    .iter()
                    .map(|piece| {
                        rasterizer.rasterize(
                            piece,
                            ScanArea::Bounded,
                            buffer,
                            config.depth_test,
                            &make_shader(piece),
                        )
                    })
                    .sum(),
            }
        }
    }
}
