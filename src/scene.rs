//! Scene managers: where render items come from.
//!
//! The engine never discovers or orders objects itself. A [`SceneManager`]
//! owns the camera and frustum and yields [`RenderItem`]s one at a time, in
//! the order they should be drawn.

use crate::camera::Camera;
use crate::frustum::Frustum;
use crate::math::Mat4;
use crate::shape::Shape;

/// One shape plus the object-to-world matrix it is drawn with.
#[derive(Debug, Clone, Copy)]
pub struct RenderItem<'a> {
    pub shape: &'a Shape,
    pub transformation: Mat4,
}

/// Source of the camera, the frustum, and the ordered render-item stream.
pub trait SceneManager {
    fn camera(&self) -> &Camera;

    fn frustum(&self) -> &Frustum;

    fn render_items(&self) -> Box<dyn Iterator<Item = RenderItem<'_>> + '_>;
}

// =============================================================================
// Flat list
// =============================================================================

/// Yields one item per shape, in insertion order, using each shape's own
/// transformation.
#[derive(Debug, Clone, Default)]
pub struct SimpleSceneManager {
    camera: Camera,
    frustum: Frustum,
    shapes: Vec<Shape>,
}

impl SimpleSceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn frustum_mut(&mut self) -> &mut Frustum {
        &mut self.frustum
    }
}

impl SceneManager for SimpleSceneManager {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    fn render_items(&self) -> Box<dyn Iterator<Item = RenderItem<'_>> + '_> {
        Box::new(self.shapes.iter().map(|shape| RenderItem {
            shape,
            transformation: shape.transformation(),
        }))
    }
}

// =============================================================================
// Scene graph
// =============================================================================

/// A scene-graph node.
#[derive(Debug, Clone)]
pub enum Node {
    /// Inner node whose transformation applies to all children.
    Group {
        transformation: Mat4,
        children: Vec<Node>,
    },
    /// Leaf drawing one shape; the shape's own transformation is applied
    /// below the inherited one.
    Shape(Shape),
}

impl Node {
    pub fn group(transformation: Mat4, children: Vec<Node>) -> Self {
        Node::Group {
            transformation,
            children,
        }
    }

    pub fn shape(shape: Shape) -> Self {
        Node::Shape(shape)
    }

    pub fn transformation(&self) -> Mat4 {
        match self {
            Node::Group { transformation, .. } => *transformation,
            Node::Shape(shape) => shape.transformation(),
        }
    }

    pub fn set_transformation(&mut self, matrix: Mat4) {
        match self {
            Node::Group { transformation, .. } => *transformation = matrix,
            Node::Shape(shape) => shape.set_transformation(matrix),
        }
    }

    /// Children of a group; empty for a shape.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Group { children, .. } => children,
            Node::Shape(_) => &[],
        }
    }

    /// Mutable children of a group, `None` for a shape.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Group { children, .. } => Some(children),
            Node::Shape(_) => None,
        }
    }
}

/// Walks a tree of [`Node`]s depth-first, composing `parent * child`
/// transformations on the way down.
#[derive(Debug, Clone)]
pub struct GraphSceneManager {
    camera: Camera,
    frustum: Frustum,
    root: Option<Node>,
    culling: bool,
}

impl Default for GraphSceneManager {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            frustum: Frustum::default(),
            root: None,
            culling: false,
        }
    }
}

impl GraphSceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_root(&mut self, root: Node) {
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut Node> {
        self.root.as_mut()
    }

    /// Skip shapes whose bounding sphere lies outside the frustum.
    pub fn set_culling(&mut self, enabled: bool) {
        self.culling = enabled;
    }

    pub fn culling(&self) -> bool {
        self.culling
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn frustum_mut(&mut self) -> &mut Frustum {
        &mut self.frustum
    }
}

impl SceneManager for GraphSceneManager {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    fn render_items(&self) -> Box<dyn Iterator<Item = RenderItem<'_>> + '_> {
        let stack = match &self.root {
            Some(root) => vec![(root, root.transformation())],
            None => Vec::new(),
        };
        Box::new(GraphItems {
            stack,
            cull: self
                .culling
                .then(|| (self.camera.view_matrix(), &self.frustum)),
        })
    }
}

/// Depth-first iterator over the shape leaves of a graph.
struct GraphItems<'a> {
    /// Pending nodes with their accumulated object-to-world matrices.
    stack: Vec<(&'a Node, Mat4)>,
    /// View matrix and frustum when culling is on.
    cull: Option<(Mat4, &'a Frustum)>,
}

impl<'a> Iterator for GraphItems<'a> {
    type Item = RenderItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, to_world)) = self.stack.pop() {
            match node {
                Node::Group { children, .. } => {
                    // Reversed so that children pop in insertion order.
                    for child in children.iter().rev() {
                        self.stack.push((child, to_world * child.transformation()));
                    }
                }
                Node::Shape(shape) => {
                    if let Some((view, frustum)) = &self.cull {
                        let (center, radius) = shape.world_bounding_sphere(&(*view * to_world));
                        if !frustum.contains_sphere(center, radius) {
                            log::trace!("culled shape '{}'", shape.name());
                            continue;
                        }
                    }
                    return Some(RenderItem {
                        shape,
                        transformation: to_world,
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::vertex_data::{Semantic, VertexData};
    use approx::assert_relative_eq;
    use std::rc::Rc;

    fn point_shape(name: &str) -> Shape {
        let mut data = VertexData::new(2);
        data.add_element(Semantic::Position, vec![-1.0, 0.0, 0.0, 1.0, 0.0, 0.0])
            .unwrap();
        Shape::new(name, Rc::new(data))
    }

    fn names(scene: &dyn SceneManager) -> Vec<String> {
        scene
            .render_items()
            .map(|item| item.shape.name().to_string())
            .collect()
    }

    #[test]
    fn simple_manager_keeps_insertion_order() {
        let mut scene = SimpleSceneManager::new();
        scene.add_shape(point_shape("a"));
        scene.add_shape(
            point_shape("b").with_transformation(Mat4::translation(2.0, 0.0, 0.0)),
        );
        assert_eq!(names(&scene), vec!["a", "b"]);
        let last = scene.render_items().last().unwrap();
        assert_relative_eq!(last.transformation.translation_part().x, 2.0);
    }

    #[test]
    fn graph_composes_parent_then_child() {
        let arm = point_shape("hand").with_transformation(Mat4::translation(0.0, 1.0, 0.0));
        let root = Node::group(
            Mat4::translation(5.0, 0.0, 0.0),
            vec![Node::group(Mat4::scaling(2.0, 2.0, 2.0), vec![Node::shape(arm)])],
        );
        let mut scene = GraphSceneManager::new();
        scene.set_root(root);

        let items: Vec<_> = scene.render_items().collect();
        assert_eq!(items.len(), 1);
        let origin = items[0].transformation * Vec3::ZERO;
        assert_relative_eq!(origin.x, 5.0);
        assert_relative_eq!(origin.y, 2.0);
    }

    #[test]
    fn graph_visits_depth_first_in_child_order() {
        let root = Node::group(
            Mat4::identity(),
            vec![
                Node::group(
                    Mat4::identity(),
                    vec![Node::shape(point_shape("a")), Node::shape(point_shape("b"))],
                ),
                Node::shape(point_shape("c")),
            ],
        );
        let mut scene = GraphSceneManager::new();
        scene.set_root(root);
        assert_eq!(names(&scene), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_graph_yields_nothing() {
        assert_eq!(GraphSceneManager::new().render_items().count(), 0);
    }

    #[test]
    fn culling_skips_shapes_outside_the_frustum() {
        let visible = point_shape("visible");
        let behind = point_shape("behind").with_transformation(Mat4::translation(0.0, 0.0, 80.0));
        let mut scene = GraphSceneManager::new();
        scene.set_root(Node::group(
            Mat4::identity(),
            vec![Node::shape(visible), Node::shape(behind)],
        ));

        assert_eq!(scene.render_items().count(), 2);
        scene.set_culling(true);
        assert_eq!(names(&scene), vec!["visible"]);
    }

    #[test]
    fn children_can_be_animated_in_place() {
        let mut scene = GraphSceneManager::new();
        scene.set_root(Node::group(Mat4::identity(), vec![Node::shape(point_shape("a"))]));
        if let Some(children) = scene.root_mut().and_then(Node::children_mut) {
            children[0].set_transformation(Mat4::translation(0.0, 0.0, -3.0));
        }
        let item = scene.render_items().next().unwrap();
        assert_relative_eq!(item.transformation.translation_part().z, -3.0);
    }
}
