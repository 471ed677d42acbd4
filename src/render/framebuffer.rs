//! Frame state: the color buffer and its matching depth buffer.
//!
//! The depth buffer stores reciprocal depth (1/w) per pixel. Which direction
//! of comparison wins is decided by [`DepthTest`]; the buffer only stores
//! values and reports whether a test passed.

use std::path::Path;

use crate::colors;
use crate::config::DepthTest;
use crate::error::Error;

/// Owning color + depth buffers sized to the viewport.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, clear_color: u32, clear_depth: f32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![colors::to_rgb24(clear_color); size],
            depth_buffer: vec![clear_depth; size],
            width,
            height,
        }
    }

    /// Reallocate for a new viewport size. Contents are reset.
    pub fn resize(&mut self, width: u32, height: u32, clear_color: u32, clear_depth: f32) {
        *self = Self::new(width, height, clear_color, clear_depth);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.color_buffer.is_empty()
    }

    /// Reset both buffers.
    pub fn clear(&mut self, color: u32, depth: f32) {
        self.color_buffer.fill(colors::to_rgb24(color));
        self.depth_buffer.fill(depth);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Run the depth test at `(x, y)` and store `one_over_w` if it passes.
    ///
    /// Returns `false` for out-of-bounds coordinates.
    #[inline]
    pub fn test_and_set_depth(&mut self, x: i32, y: i32, one_over_w: f32, test: DepthTest) -> bool {
        match self.index(x, y) {
            Some(idx) if test.passes(one_over_w, self.depth_buffer[idx]) => {
                self.depth_buffer[idx] = one_over_w;
                true
            }
            _ => false,
        }
    }

    /// Write a color without depth testing. Silently ignores out-of-bounds
    /// coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = colors::to_rgb24(color);
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the stored 1/w at (x, y), or None if out of bounds.
    #[inline]
    pub fn depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    /// Packed RGB pixels, row by row from the top.
    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// Opaque ARGB8888 bytes in native byte order, ready for a streaming
    /// display texture.
    pub fn to_argb_bytes(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|&c| (0xFF00_0000 | c).to_ne_bytes())
            .collect()
    }

    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let c = self.color_buffer[y as usize * self.width as usize + x as usize];
            image::Rgb(colors::unpack_rgb8(c))
        })
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        self.to_rgb_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}
