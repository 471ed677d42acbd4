//! A CPU triangle rasterizer.
//!
//! Scene managers yield render items (a mesh plus its object-to-world
//! matrix); the [`Engine`] composes one object-to-pixel matrix per item,
//! classifies every triangle by the sign of its homogeneous W, and fills it
//! with the edge-function test, a 1/w depth buffer, and perspective-correct
//! vertex-color or texture shading. SDL2 is used only to show the result
//! (feature `window`).
//!
//! # Quick Start
//!
//! ```ignore
//! use softraster::prelude::*;
//! use std::rc::Rc;
//!
//! let mut scene = SimpleSceneManager::new();
//! scene.add_shape(Shape::new("cube", Rc::new(primitives::cube())));
//!
//! let mut engine = Engine::new(320, 240, RasterConfig::default());
//! engine.display(&scene);
//! engine.frame().save_png("cube.png")?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod frustum;
pub mod material;
pub mod math;
pub mod primitives;
pub mod render;
pub mod scene;
pub mod shape;
pub mod texture;
pub mod transform;
pub mod vertex_data;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use config::{ClearMode, DepthTest, RasterConfig, StraddleMode, TextureFilter};
pub use engine::Engine;
pub use error::{Error, VertexDataError};
pub use frustum::Frustum;
pub use material::Material;
pub use render::{FrameBuffer, FrameStats};
pub use scene::{GraphSceneManager, Node, RenderItem, SceneManager, SimpleSceneManager};
pub use shape::Shape;
pub use texture::Texture;
pub use transform::Transform;
pub use vertex_data::{Semantic, VertexData};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softraster::prelude::*;
/// ```
pub mod prelude {
    // Scene
    pub use crate::camera::Camera;
    pub use crate::frustum::Frustum;
    pub use crate::scene::{GraphSceneManager, Node, RenderItem, SceneManager, SimpleSceneManager};
    pub use crate::shape::Shape;
    pub use crate::transform::Transform;

    // Meshes and materials
    pub use crate::material::Material;
    pub use crate::primitives;
    pub use crate::texture::Texture;
    pub use crate::vertex_data::{Semantic, VertexData};

    // Engine
    pub use crate::config::{ClearMode, DepthTest, RasterConfig, StraddleMode, TextureFilter};
    pub use crate::engine::Engine;
    pub use crate::render::{FrameBuffer, FrameStats};

    // Math
    pub use crate::colors;
    pub use crate::math::{Mat3, Mat4, Vec2, Vec3, Vec4};
}
