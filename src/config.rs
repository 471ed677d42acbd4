//! Rasterizer configuration.
//!
//! [`RasterConfig`] gathers every switch the [`Engine`](crate::Engine)
//! consults while drawing. The defaults give frame-scoped buffers, nearest
//! surface wins, back-face culling, bilinear texturing, and the full-buffer
//! scan for triangles that straddle the eye plane.

use crate::colors;

/// How the depth buffer compares a new reciprocal depth (1/w) with the
/// stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthTest {
    /// Buffer clears to 0.0 (infinitely far) and a fragment replaces the
    /// stored value when its 1/w is larger, i.e. when it is nearer the eye.
    #[default]
    NearestWins,
    /// Buffer clears to 1.0 and a fragment replaces the stored value when the
    /// stored 1/w is greater than the new one, so the farther surface is kept.
    /// Fragments with 1/w >= 1.0 never pass.
    Source,
}

impl DepthTest {
    /// Value the depth buffer is filled with at the start of a frame.
    pub fn clear_value(self) -> f32 {
        match self {
            DepthTest::NearestWins => 0.0,
            DepthTest::Source => 1.0,
        }
    }

    /// Whether a fragment with reciprocal depth `new` replaces `stored`.
    #[inline]
    pub fn passes(self, new: f32, stored: f32) -> bool {
        match self {
            DepthTest::NearestWins => new > stored,
            DepthTest::Source => stored > new,
        }
    }
}

/// Strategy for triangles whose vertices have mixed-sign W.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StraddleMode {
    /// Scan every pixel of the buffer against the unbounded edge functions.
    #[default]
    FullScan,
    /// Clip the triangle against the plane `w = epsilon` and rasterize the
    /// pieces with the bounded path.
    ClipNear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    #[default]
    Bilinear,
    Nearest,
}

/// When the color and depth buffers are reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearMode {
    /// Once at the start of every frame; all render items share the buffers.
    #[default]
    PerFrame,
    /// Before every render item, so each item erases the previous ones.
    PerItem,
}

/// Settings for the rasterization pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterConfig {
    pub backface_culling: bool,
    pub depth_test: DepthTest,
    pub straddle: StraddleMode,
    pub texture_filter: TextureFilter,
    pub clear_mode: ClearMode,
    /// Packed RGB the color buffer is cleared to.
    pub clear_color: u32,
    /// Plot a white dot at every projected vertex in front of the eye.
    pub show_vertices: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            backface_culling: true,
            depth_test: DepthTest::default(),
            straddle: StraddleMode::default(),
            texture_filter: TextureFilter::default(),
            clear_mode: ClearMode::default(),
            clear_color: colors::BLACK,
            show_vertices: false,
        }
    }
}

impl RasterConfig {
    pub fn with_backface_culling(mut self, enabled: bool) -> Self {
        self.backface_culling = enabled;
        self
    }

    pub fn with_depth_test(mut self, depth_test: DepthTest) -> Self {
        self.depth_test = depth_test;
        self
    }

    pub fn with_straddle(mut self, straddle: StraddleMode) -> Self {
        self.straddle = straddle;
        self
    }

    pub fn with_texture_filter(mut self, filter: TextureFilter) -> Self {
        self.texture_filter = filter;
        self
    }

    pub fn with_clear_mode(mut self, clear_mode: ClearMode) -> Self {
        self.clear_mode = clear_mode;
        self
    }

    pub fn with_clear_color(mut self, color: u32) -> Self {
        self.clear_color = colors::to_rgb24(color);
        self
    }

    pub fn with_show_vertices(mut self, enabled: bool) -> Self {
        self.show_vertices = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_wins_prefers_larger_reciprocal_depth() {
        let test = DepthTest::NearestWins;
        assert!(test.passes(0.5, test.clear_value()));
        assert!(test.passes(0.5, 0.25));
        assert!(!test.passes(0.25, 0.5));
    }

    #[test]
    fn source_comparison_replaces_when_stored_is_greater() {
        let test = DepthTest::Source;
        assert!(test.passes(0.5, test.clear_value()));
        assert!(test.passes(0.25, 0.5));
        assert!(!test.passes(0.5, 0.25));
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = RasterConfig::default()
            .with_backface_culling(false)
            .with_straddle(StraddleMode::ClipNear)
            .with_clear_color(0xFF10_2030);
        assert!(!config.backface_culling);
        assert_eq!(config.straddle, StraddleMode::ClipNear);
        assert_eq!(config.clear_color, 0x10_2030);
        assert_eq!(config.depth_test, DepthTest::NearestWins);
    }
}
