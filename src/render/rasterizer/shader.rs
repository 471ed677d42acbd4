//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer owns coverage and depth; a shader only turns the three
//! homogeneous edge weights of a covered pixel into a packed RGB color.
//!
//! # Perspective-correct interpolation
//!
//! The weights `a_i` handed to [`PixelShader::shade`] are not barycentric
//! coordinates: they sum to `1/w` at the pixel rather than to one. An
//! attribute with per-vertex values `f_i` is recovered as
//!
//! ```text
//! f = (f_0 * a_0 + f_1 * a_1 + f_2 * a_2) / (a_0 + a_1 + a_2)
//! ```
//!
//! which is exactly the perspective-correct value.

use crate::colors::pack_color;
use crate::config::TextureFilter;
use crate::math::Vec3;
use crate::texture::Texture;

/// Per-pixel shading computation.
pub trait PixelShader {
    /// Color for a covered pixel.
    ///
    /// `weights` are the three edge weights at the pixel center and
    /// `one_over_w` is their sum, always positive here.
    fn shade(&self, weights: Vec3, one_over_w: f32) -> u32;
}

/// Interpolate one scalar attribute given its value at each vertex.
#[inline]
pub fn perspective_interpolate(values: Vec3, weights: Vec3, one_over_w: f32) -> f32 {
    values.dot(weights) / one_over_w
}

/// Returns a constant color for all pixels.
#[derive(Debug, Clone, Copy)]
pub struct FlatShader {
    color: u32,
}

impl FlatShader {
    pub fn new(color: u32) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _weights: Vec3, _one_over_w: f32) -> u32 {
        self.color
    }
}

/// Interpolates per-vertex RGB colors.
#[derive(Debug, Clone, Copy)]
pub struct VertexColorShader {
    red: Vec3,
    green: Vec3,
    blue: Vec3,
}

impl VertexColorShader {
    /// `colors[i]` is the RGB of vertex `i`, each channel in [0, 1].
    pub fn new(colors: [Vec3; 3]) -> Self {
        let [c0, c1, c2] = colors;
        Self {
            red: Vec3::new(c0.x, c1.x, c2.x),
            green: Vec3::new(c0.y, c1.y, c2.y),
            blue: Vec3::new(c0.z, c1.z, c2.z),
        }
    }
}

impl PixelShader for VertexColorShader {
    #[inline]
    fn shade(&self, weights: Vec3, one_over_w: f32) -> u32 {
        pack_color(
            perspective_interpolate(self.red, weights, one_over_w),
            perspective_interpolate(self.green, weights, one_over_w),
            perspective_interpolate(self.blue, weights, one_over_w),
        )
    }
}

/// Samples a texture at the interpolated texture coordinate.
pub struct TextureShader<'a> {
    texture: &'a Texture,
    u: Vec3,
    v: Vec3,
    filter: TextureFilter,
}

impl<'a> TextureShader<'a> {
    /// `u` and `v` hold the per-vertex texture coordinates, one component
    /// per vertex.
    pub fn new(texture: &'a Texture, u: Vec3, v: Vec3, filter: TextureFilter) -> Self {
        Self {
            texture,
            u,
            v,
            filter,
        }
    }
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, weights: Vec3, one_over_w: f32) -> u32 {
        let u = perspective_interpolate(self.u, weights, one_over_w);
        let v = perspective_interpolate(self.v, weights, one_over_w);
        self.texture.sample(u, v, self.filter)
    }
}
