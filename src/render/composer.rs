//! Transform composer: object space to pixel space in one matrix.

use crate::math::Mat4;

/// The four matrices between an object's vertices and the pixel grid.
///
/// All fields are values; composing never touches the caller's matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformChain {
    /// Object to world (per render item).
    pub model: Mat4,
    /// World to eye (camera).
    pub view: Mat4,
    /// Eye to clip (frustum).
    pub projection: Mat4,
    /// Clip to pixel, including the Y flip.
    pub viewport: Mat4,
}

impl TransformChain {
    pub fn new(model: Mat4, view: Mat4, projection: Mat4, viewport: Mat4) -> Self {
        Self {
            model,
            view,
            projection,
            viewport,
        }
    }

    /// `Viewport * Projection * View * Model`.
    pub fn combined(&self) -> Mat4 {
        self.viewport * self.projection * self.view * self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec3, Vec4};
    use approx::assert_relative_eq;

    #[test]
    fn combined_maps_view_center_to_buffer_center() {
        let chain = TransformChain::new(
            Mat4::translation(0.0, 0.0, -5.0),
            Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP),
            Mat4::perspective(60f32.to_radians(), 1.0, 1.0, 100.0),
            Mat4::viewport(64, 32),
        );
        let p = chain.combined() * Vec4::point(0.0, 0.0, 0.0);
        assert_relative_eq!(p.w, 10.0, epsilon = 1e-4);
        assert_relative_eq!(p.x / p.w, 32.0, epsilon = 1e-4);
        assert_relative_eq!(p.y / p.w, 16.0, epsilon = 1e-4);
    }

    #[test]
    fn composing_leaves_inputs_untouched() {
        let model = Mat4::scaling(2.0, 2.0, 2.0);
        let chain = TransformChain::new(model, Mat4::identity(), Mat4::identity(), Mat4::identity());
        let _ = chain.combined();
        assert_eq!(chain.model, model);
    }
}
