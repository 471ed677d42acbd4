//! Surface appearance attached to a [`Shape`](crate::Shape).

use std::rc::Rc;

use crate::texture::Texture;

/// How a shape's pixels are colored.
///
/// A texture takes precedence over a flat color; with neither, the mesh's
/// per-vertex colors are interpolated.
#[derive(Debug, Clone, Default)]
pub struct Material {
    pub texture: Option<Rc<Texture>>,
    pub flat_color: Option<u32>,
}

impl Material {
    pub fn textured(texture: Rc<Texture>) -> Self {
        Self {
            texture: Some(texture),
            flat_color: None,
        }
    }

    pub fn flat(color: u32) -> Self {
        Self {
            texture: None,
            flat_color: Some(crate::colors::to_rgb24(color)),
        }
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_deref()
    }
}
