//! Error types for fallible construction of meshes and textures.
//!
//! Drawing itself never returns an error: degenerate, back-facing and
//! behind-camera triangles are skipped, and texel lookups clamp.

use std::fmt;

use crate::vertex_data::Semantic;

/// Violations of the vertex store's shape invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VertexDataError {
    /// An element's data length does not equal `vertex_count * components`.
    ElementLength {
        semantic: Semantic,
        expected: usize,
        actual: usize,
    },
    /// The index buffer length is not a multiple of 3.
    IndexCount(usize),
    /// An index refers past the last vertex.
    IndexOutOfRange { index: u32, vertex_count: usize },
    /// No POSITION element was supplied.
    MissingPositions,
}

impl fmt::Display for VertexDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexDataError::ElementLength {
                semantic,
                expected,
                actual,
            } => write!(
                f,
                "{semantic:?} element has {actual} floats, expected {expected}"
            ),
            VertexDataError::IndexCount(len) => {
                write!(f, "index buffer length {len} is not a multiple of 3")
            }
            VertexDataError::IndexOutOfRange {
                index,
                vertex_count,
            } => write!(
                f,
                "index {index} out of range for {vertex_count} vertices"
            ),
            VertexDataError::MissingPositions => write!(f, "vertex data has no POSITION element"),
        }
    }
}

impl std::error::Error for VertexDataError {}

/// Crate-level error.
#[derive(Debug)]
pub enum Error {
    /// A texture image could not be opened or decoded.
    Image(image::ImageError),
    /// An OBJ file could not be parsed.
    Obj(tobj::LoadError),
    /// Vertex data failed validation.
    VertexData(VertexDataError),
    /// A texture was built from a pixel slice of the wrong size.
    TextureSize {
        width: u32,
        height: u32,
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Image(e) => write!(f, "failed to load texture: {e}"),
            Error::Obj(e) => write!(f, "failed to load OBJ: {e}"),
            Error::VertexData(e) => write!(f, "invalid vertex data: {e}"),
            Error::TextureSize { width, height, len } => write!(
                f,
                "texture of {width}x{height} needs {} texels, got {len}",
                *width as usize * *height as usize
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Image(e) => Some(e),
            Error::Obj(e) => Some(e),
            Error::VertexData(e) => Some(e),
            Error::TextureSize { .. } => None,
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e)
    }
}

impl From<tobj::LoadError> for Error {
    fn from(e: tobj::LoadError) -> Self {
        Error::Obj(e)
    }
}

impl From<VertexDataError> for Error {
    fn from(e: VertexDataError) -> Self {
        Error::VertexData(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
