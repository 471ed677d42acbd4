//! Frame lifecycle.
//!
//! The [`Engine`] owns the frame state and the rasterizer settings. A frame
//! is `begin_frame`, any number of `draw` calls in submission order, then
//! `end_frame`; [`Engine::display`] runs that sequence over a whole
//! [`SceneManager`].

use crate::config::{ClearMode, RasterConfig};
use crate::math::Mat4;
use crate::render::{draw_mesh, FrameBuffer, FrameStats, TransformChain};
use crate::scene::{RenderItem, SceneManager};

pub struct Engine {
    frame: FrameBuffer,
    config: RasterConfig,
    stats: FrameStats,
}

impl Engine {
    pub fn new(width: u32, height: u32, config: RasterConfig) -> Self {
        Self {
            frame: FrameBuffer::new(
                width,
                height,
                config.clear_color,
                config.depth_test.clear_value(),
            ),
            config,
            stats: FrameStats::default(),
        }
    }

    /// Reallocates the color and depth buffers. Independent of frame
    /// content; the next frame starts from cleared buffers either way.
    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("viewport set to {width}x{height}; nothing will be drawn");
        }
        self.frame.resize(
            width,
            height,
            self.config.clear_color,
            self.config.depth_test.clear_value(),
        );
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Settings take effect at the next `begin_frame` (clear color and depth
    /// direction) or the next `draw` (everything else).
    pub fn config_mut(&mut self) -> &mut RasterConfig {
        &mut self.config
    }

    /// Counters of the frame in progress, or of the last finished frame.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    // =========================================================================
    // Frame lifecycle
    // =========================================================================

    /// Resets the statistics and clears both buffers.
    pub fn begin_frame(&mut self) {
        self.stats = FrameStats::default();
        self.clear();
    }

    /// Draws one render item with the given camera and projection.
    ///
    /// # Panics
    /// Panics if the item's index buffer refers past its vertex count.
    pub fn draw(&mut self, item: &RenderItem<'_>, view: &Mat4, projection: &Mat4) {
        if self.config.clear_mode == ClearMode::PerItem {
            self.clear();
        }

        let chain = TransformChain::new(
            item.transformation,
            *view,
            *projection,
            Mat4::viewport(self.frame.width(), self.frame.height()),
        );
        let shape = item.shape;
        log::trace!(
            "drawing '{}' ({} triangles)",
            shape.name(),
            shape.vertex_data().triangle_count()
        );

        self.stats.items += 1;
        draw_mesh(
            &mut self.frame,
            &self.config,
            &mut self.stats,
            shape.vertex_data(),
            shape.material(),
            &chain.combined(),
        );
    }

    pub fn end_frame(&mut self) {
        let s = &self.stats;
        log::debug!(
            "frame: {} items, {} triangles ({} back-facing, {} behind, {} straddling), {} pixels",
            s.items,
            s.triangles,
            s.backfacing,
            s.behind,
            s.straddling,
            s.pixels_written
        );
    }

    /// Renders one full frame of `scene`.
    pub fn display(&mut self, scene: &dyn SceneManager) {
        let view = scene.camera().view_matrix();
        let projection = scene.frustum().projection_matrix();

        self.begin_frame();
        for item in scene.render_items() {
            self.draw(&item, &view, &projection);
        }
        self.end_frame();
    }

    fn clear(&mut self) {
        self.frame
            .clear(self.config.clear_color, self.config.depth_test.clear_value());
    }
}
