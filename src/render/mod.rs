//! The rasterization pipeline.
//!
//! Stages, in the order a render item flows through them:
//! - [`TransformChain`]: one object-to-pixel matrix per item
//! - vertex assembly and [`Visibility`] classification per triangle
//! - [`EdgeFunctionRasterizer`]: inside and depth tests per candidate pixel
//! - [`PixelShader`]s: perspective-correct color or texture lookup
//! - [`FrameBuffer`]: color + 1/w depth storage

mod clip;
mod composer;
mod framebuffer;
mod pipeline;
mod rasterizer;

pub use clip::clip_near;
pub use composer::TransformChain;
pub use framebuffer::FrameBuffer;
pub use pipeline::{draw_mesh, FrameStats};
pub use rasterizer::{
    perspective_interpolate, EdgeFunctionRasterizer, FlatShader, PixelBounds, PixelShader,
    ScanArea, TextureShader, Triangle, VertexColorShader, Visibility,
};
