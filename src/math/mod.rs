//! Small linear algebra kit for the pipeline.
//!
//! All matrices follow the column-vector convention: `M * v`, and products
//! chain right-to-left (`A * B * v` applies `B` first).

pub mod mat3;
pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use mat3::Mat3;
pub use mat4::Mat4;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
