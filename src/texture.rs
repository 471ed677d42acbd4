use std::path::Path;

use crate::colors;
use crate::config::TextureFilter;
use crate::error::Error;

/// Represents a 2D texture for texture mapping.
///
/// Texels are packed 24-bit RGB, stored row by row from the top of the image.
/// Texel `(x, y)` sits at the integer texel coordinate `(x, y)`, so sampling
/// exactly at an integer coordinate returns that texel unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    data: Vec<u32>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let img = image::open(path.as_ref())?.to_rgb8();
        let (width, height) = img.dimensions();

        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0;
                colors::pack_rgb8(r, g, b)
            })
            .collect();

        log::debug!(
            "loaded texture {} ({width}x{height})",
            path.as_ref().display()
        );
        Self::from_pixels(width, height, data)
    }

    /// Build a texture from packed RGB texels in row-major order.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Result<Self, Error> {
        if width == 0 || height == 0 || data.len() != width as usize * height as usize {
            return Err(Error::TextureSize {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            data: data.into_iter().map(colors::to_rgb24).collect(),
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at `(x, y)`, clamped to the image bounds.
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> u32 {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.data[y * self.width as usize + x]
    }

    /// Sample at normalized coordinates: `u` in [0, 1] spans the width,
    /// `v` in [0, 1] spans the height from the top row down.
    #[inline]
    pub fn sample(&self, u: f32, v: f32, filter: TextureFilter) -> u32 {
        let tx = u * self.width as f32;
        let ty = v * self.height as f32;
        match filter {
            TextureFilter::Bilinear => self.sample_bilinear(tx, ty),
            TextureFilter::Nearest => self.sample_nearest(tx, ty),
        }
    }

    /// Nearest texel to a texel-space coordinate.
    #[inline]
    pub fn sample_nearest(&self, tx: f32, ty: f32) -> u32 {
        self.texel(tx.round() as i64, ty.round() as i64)
    }

    /// Bilinear blend of the four texels around a texel-space coordinate.
    ///
    /// A `+1` neighbor that falls past the last row or column is clamped to
    /// that last texel instead of reading out of bounds.
    pub fn sample_bilinear(&self, tx: f32, ty: f32) -> u32 {
        let (x0, fx) = Self::split(tx, self.width);
        let (y0, fy) = Self::split(ty, self.height);

        let c00 = colors::unpack_rgb8(self.texel(x0, y0));
        let c10 = colors::unpack_rgb8(self.texel(x0 + 1, y0));
        let c01 = colors::unpack_rgb8(self.texel(x0, y0 + 1));
        let c11 = colors::unpack_rgb8(self.texel(x0 + 1, y0 + 1));

        let mut out = [0u8; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            let top = c00[i] as f32 * (1.0 - fx) + c10[i] as f32 * fx;
            let bottom = c01[i] as f32 * (1.0 - fx) + c11[i] as f32 * fx;
            *channel = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
        }
        colors::pack_rgb8(out[0], out[1], out[2])
    }

    /// Integer texel and fractional weight along one axis.
    #[inline]
    fn split(t: f32, size: u32) -> (i64, f32) {
        if !(t > 0.0) {
            return (0, 0.0);
        }
        let last = size as f32 - 1.0;
        if t >= last {
            return (size as i64 - 1, 0.0);
        }
        let base = t.floor();
        (base as i64, t - base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Texture {
        // 2x2: red, green / blue, white
        Texture::from_pixels(2, 2, vec![0xC80000, 0x006400, 0x0000FF, 0xFFFFFF]).unwrap()
    }

    #[test]
    fn size_mismatch_is_rejected() {
        assert!(matches!(
            Texture::from_pixels(2, 2, vec![0; 3]),
            Err(Error::TextureSize { len: 3, .. })
        ));
    }

    #[test]
    fn bilinear_at_texel_center_is_exact() {
        let tex = checker();
        assert_eq!(tex.sample_bilinear(0.0, 0.0), 0xC80000);
        assert_eq!(tex.sample_bilinear(1.0, 0.0), 0x006400);
        assert_eq!(tex.sample_bilinear(0.0, 1.0), 0x0000FF);
    }

    #[test]
    fn bilinear_halfway_is_channel_mean() {
        let tex = checker();
        // red 200 / 0, green 0 / 100
        assert_eq!(tex.sample_bilinear(0.5, 0.0), 0x643200);
    }

    #[test]
    fn neighbor_past_edge_clamps_to_last_texel() {
        let tex = checker();
        assert_eq!(tex.sample_bilinear(1.5, 0.0), 0x006400);
        assert_eq!(tex.sample_bilinear(5.0, 5.0), 0xFFFFFF);
        assert_eq!(tex.sample_bilinear(-3.0, 0.0), 0xC80000);
    }

    #[test]
    fn nearest_rounds_to_closest_texel() {
        let tex = checker();
        assert_eq!(tex.sample_nearest(0.4, 0.0), 0xC80000);
        assert_eq!(tex.sample_nearest(0.6, 0.0), 0x006400);
    }

    #[test]
    fn normalized_sampling_scales_by_size() {
        let tex = checker();
        assert_eq!(tex.sample(0.5, 0.5, TextureFilter::Nearest), 0xFFFFFF);
        assert_eq!(tex.sample(0.0, 0.0, TextureFilter::Bilinear), 0xC80000);
    }

    #[test]
    fn alpha_is_stripped_from_input() {
        let tex = Texture::from_pixels(1, 1, vec![0xFF11_2233]).unwrap();
        assert_eq!(tex.texel(0, 0), 0x11_2233);
    }
}
