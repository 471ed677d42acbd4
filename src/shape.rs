//! A drawable mesh with its material and object transform.

use std::rc::Rc;

use crate::material::Material;
use crate::math::{Mat4, Vec3};
use crate::vertex_data::{Semantic, VertexData};

/// A mesh placed in the world.
///
/// Vertex data is shared through `Rc`, so many shapes can instance the same
/// mesh with different transforms or materials.
#[derive(Debug, Clone)]
pub struct Shape {
    name: String,
    vertex_data: Rc<VertexData>,
    material: Option<Material>,
    transformation: Mat4,
    bounding_center: Vec3,
    bounding_radius: f32,
}

impl Shape {
    pub fn new(name: impl Into<String>, vertex_data: Rc<VertexData>) -> Self {
        let (bounding_center, bounding_radius) = bounding_sphere(&vertex_data);
        Self {
            name: name.into(),
            vertex_data,
            material: None,
            transformation: Mat4::identity(),
            bounding_center,
            bounding_radius,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_transformation(mut self, transformation: Mat4) -> Self {
        self.transformation = transformation;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_data(&self) -> &VertexData {
        &self.vertex_data
    }

    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    pub fn set_material(&mut self, material: Option<Material>) {
        self.material = material;
    }

    /// Object-to-world (or object-to-parent inside a scene graph) matrix.
    pub fn transformation(&self) -> Mat4 {
        self.transformation
    }

    pub fn set_transformation(&mut self, transformation: Mat4) {
        self.transformation = transformation;
    }

    /// Object-space bounding sphere as `(center, radius)`.
    pub fn bounding_sphere(&self) -> (Vec3, f32) {
        (self.bounding_center, self.bounding_radius)
    }

    /// Bounding sphere carried through `to_world`. The radius is scaled by
    /// the largest axis stretch, so the result always encloses the mesh.
    pub fn world_bounding_sphere(&self, to_world: &Mat4) -> (Vec3, f32) {
        (
            *to_world * self.bounding_center,
            self.bounding_radius * to_world.max_axis_scale(),
        )
    }
}

/// Vertex centroid and the largest distance from it.
fn bounding_sphere(vertex_data: &VertexData) -> (Vec3, f32) {
    let Some(positions) = vertex_data.element(Semantic::Position) else {
        return (Vec3::ZERO, 0.0);
    };
    let count = positions.len() / 3;
    if count == 0 {
        return (Vec3::ZERO, 0.0);
    }

    let sum = positions
        .chunks_exact(3)
        .fold(Vec3::ZERO, |acc, p| acc + Vec3::from_slice(p));
    let center = sum / count as f32;
    let radius = positions
        .chunks_exact(3)
        .map(|p| (Vec3::from_slice(p) - center).magnitude())
        .fold(0.0, f32::max);
    (center, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn segment() -> Rc<VertexData> {
        let mut data = VertexData::new(2);
        data.add_element(Semantic::Position, vec![-1.0, 2.0, 0.0, 3.0, 2.0, 0.0])
            .unwrap();
        Rc::new(data)
    }

    #[test]
    fn bounding_sphere_uses_centroid() {
        let shape = Shape::new("segment", segment());
        let (center, radius) = shape.bounding_sphere();
        assert_eq!(center, Vec3::new(1.0, 2.0, 0.0));
        assert_relative_eq!(radius, 2.0);
    }

    #[test]
    fn world_sphere_follows_transform() {
        let shape = Shape::new("segment", segment());
        let to_world = Mat4::translation(0.0, 0.0, -10.0) * Mat4::scaling(1.0, 3.0, 1.0);
        let (center, radius) = shape.world_bounding_sphere(&to_world);
        assert_relative_eq!(center.y, 6.0);
        assert_relative_eq!(center.z, -10.0);
        assert_relative_eq!(radius, 6.0);
    }

    #[test]
    fn instances_share_vertex_data() {
        let data = segment();
        let a = Shape::new("a", Rc::clone(&data));
        let b = Shape::new("b", Rc::clone(&data)).with_transformation(Mat4::translation(1.0, 0.0, 0.0));
        assert_eq!(Rc::strong_count(&data), 3);
        assert_eq!(a.vertex_data(), b.vertex_data());
    }
}
