//! Vertex attribute store.
//!
//! A [`VertexData`] holds one flat `f32` array per attribute [`Semantic`]
//! plus an index buffer in which every consecutive triple names one triangle.
//! All arrays share the same vertex count and indexing.

use std::path::Path;

use crate::error::{Error, VertexDataError};
use crate::math::{Vec2, Vec3};

/// The closed set of per-vertex attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semantic {
    Position,
    Color,
    Normal,
    Texcoord,
}

impl Semantic {
    /// Number of floats one vertex contributes to this attribute.
    pub const fn components(self) -> usize {
        match self {
            Semantic::Position | Semantic::Color | Semantic::Normal => 3,
            Semantic::Texcoord => 2,
        }
    }
}

/// One attribute array.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexElement {
    semantic: Semantic,
    data: Vec<f32>,
}

impl VertexElement {
    pub fn semantic(&self) -> Semantic {
        self.semantic
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

/// A triangle mesh: attribute arrays plus a triangle-list index buffer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexData {
    vertex_count: usize,
    elements: Vec<VertexElement>,
    indices: Vec<u32>,
}

impl VertexData {
    /// Create an empty store for `vertex_count` vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            elements: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Attach an attribute array, replacing any previous array with the
    /// same semantic.
    ///
    /// Fails if `data.len() != vertex_count * semantic.components()`.
    pub fn add_element(
        &mut self,
        semantic: Semantic,
        data: Vec<f32>,
    ) -> Result<&mut Self, VertexDataError> {
        let expected = self.vertex_count * semantic.components();
        if data.len() != expected {
            return Err(VertexDataError::ElementLength {
                semantic,
                expected,
                actual: data.len(),
            });
        }
        self.elements.retain(|e| e.semantic != semantic);
        self.elements.push(VertexElement { semantic, data });
        Ok(self)
    }

    /// Set the triangle-list index buffer.
    ///
    /// Only the length is checked here. Indices past the vertex count are a
    /// programmer error that [`VertexData::validate`] reports and that the
    /// rasterizer treats as fatal.
    pub fn add_indices(&mut self, indices: Vec<u32>) -> Result<&mut Self, VertexDataError> {
        if indices.len() % 3 != 0 {
            return Err(VertexDataError::IndexCount(indices.len()));
        }
        self.indices = indices;
        Ok(self)
    }

    /// Assemble a store from arrays whose lengths are already consistent,
    /// such as the output of a mesh generator.
    pub(crate) fn from_parts(
        vertex_count: usize,
        elements: Vec<(Semantic, Vec<f32>)>,
        indices: Vec<u32>,
    ) -> Self {
        debug_assert!(elements
            .iter()
            .all(|(semantic, data)| data.len() == vertex_count * semantic.components()));
        debug_assert!(indices.len() % 3 == 0);
        Self {
            vertex_count,
            elements: elements
                .into_iter()
                .map(|(semantic, data)| VertexElement { semantic, data })
                .collect(),
            indices,
        }
    }

    /// Check every invariant of the store, including index ranges.
    pub fn validate(&self) -> Result<(), VertexDataError> {
        if self.element(Semantic::Position).is_none() {
            return Err(VertexDataError::MissingPositions);
        }
        if self.indices.len() % 3 != 0 {
            return Err(VertexDataError::IndexCount(self.indices.len()));
        }
        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.vertex_count)
        {
            return Err(VertexDataError::IndexOutOfRange {
                index,
                vertex_count: self.vertex_count,
            });
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn elements(&self) -> &[VertexElement] {
        &self.elements
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate the index triples in submission order.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// The raw array for `semantic`, if present.
    pub fn element(&self, semantic: Semantic) -> Option<&[f32]> {
        self.elements
            .iter()
            .find(|e| e.semantic == semantic)
            .map(|e| e.data.as_slice())
    }

    pub fn has(&self, semantic: Semantic) -> bool {
        self.element(semantic).is_some()
    }

    /// Read a three-component attribute of vertex `index`.
    ///
    /// Returns `None` when the attribute is absent.
    ///
    /// # Panics
    /// Panics if `index` is not below the vertex count.
    pub fn vec3(&self, semantic: Semantic, index: u32) -> Option<Vec3> {
        self.check_index(index);
        let i = index as usize * 3;
        self.element(semantic).map(|d| Vec3::from_slice(&d[i..i + 3]))
    }

    /// Read a texture coordinate of vertex `index`.
    ///
    /// # Panics
    /// Panics if `index` is not below the vertex count.
    pub fn texcoord(&self, index: u32) -> Option<Vec2> {
        self.check_index(index);
        let i = index as usize * 2;
        self.element(Semantic::Texcoord)
            .map(|d| Vec2::new(d[i], d[i + 1]))
    }

    #[inline]
    fn check_index(&self, index: u32) {
        assert!(
            (index as usize) < self.vertex_count,
            "vertex index {index} out of range for {} vertices",
            self.vertex_count
        );
    }

    /// Load every mesh of an OBJ file.
    ///
    /// Each mesh gets POSITION, a white COLOR, and NORMAL / TEXCOORD when the
    /// file provides them. Texture V is flipped so that V grows downward like
    /// image rows, and every triangle is re-wound from the OBJ
    /// counter-clockwise convention to the clockwise front faces the
    /// rasterizer keeps.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Vec<VertexData>, Error> {
        let options = tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path.as_ref(), &options)?;

        models
            .into_iter()
            .map(|model| -> Result<VertexData, Error> {
                let mesh = model.mesh;
                let vertex_count = mesh.positions.len() / 3;
                let mut data = VertexData::new(vertex_count);
                data.add_element(Semantic::Position, mesh.positions)?;
                data.add_element(Semantic::Color, vec![1.0; vertex_count * 3])?;
                if !mesh.normals.is_empty() {
                    data.add_element(Semantic::Normal, mesh.normals)?;
                }
                if !mesh.texcoords.is_empty() {
                    let texcoords = mesh
                        .texcoords
                        .chunks_exact(2)
                        .flat_map(|uv| [uv[0], 1.0 - uv[1]])
                        .collect();
                    data.add_element(Semantic::Texcoord, texcoords)?;
                }
                let indices = mesh
                    .indices
                    .chunks_exact(3)
                    .flat_map(|tri| [tri[0], tri[2], tri[1]])
                    .collect();
                data.add_indices(indices)?;
                log::debug!(
                    "loaded OBJ mesh '{}': {} vertices, {} triangles",
                    model.name,
                    data.vertex_count(),
                    data.triangle_count()
                );
                Ok(data)
            })
            .collect()
    }
}
