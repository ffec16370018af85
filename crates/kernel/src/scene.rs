use glam::Vec3;
use gridwalk_common::{Color, Transform};
use serde::{Deserialize, Serialize};

/// Handle to a node in a [`Scene`]. Only valid for the scene that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Axis-aligned box centred on its node's origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxGeometry {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn unit() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }
}

/// Surface appearance of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Material {
    /// Unlit, flat colour.
    Basic { color: Color },
    /// Diffuse plus specular highlight from the scene's lights.
    Phong {
        color: Color,
        flat_shading: bool,
        shininess: f32,
    },
}

impl Material {
    pub fn basic(color: Color) -> Self {
        Self::Basic { color }
    }

    /// Flat-shaded Phong with the conventional shininess of 30.
    pub fn flat_phong(color: Color) -> Self {
        Self::Phong {
            color,
            flat_shading: true,
            shininess: 30.0,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Basic { color } | Self::Phong { color, .. } => *color,
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, Self::Phong { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub geometry: BoxGeometry,
    pub material: Material,
}

/// Square line grid on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridHelper {
    /// Full edge length of the grid.
    pub size: f32,
    pub divisions: u32,
    /// Colour of the two lines through the origin.
    pub center_color: Color,
    pub line_color: Color,
}

impl GridHelper {
    pub fn new(size: f32, divisions: u32) -> Self {
        Self {
            size,
            divisions,
            center_color: Color::from_hex(0x444444),
            line_color: Color::from_hex(0x888888),
        }
    }

    pub fn spacing(&self) -> f32 {
        self.size / self.divisions.max(1) as f32
    }
}

/// Light shining from its node's position towards the world origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Unit vector pointing from the surface towards the light.
    pub fn to_light(position: Vec3) -> Vec3 {
        position.try_normalize().unwrap_or(Vec3::Y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Grid(GridHelper),
    Mesh(Mesh),
    DirectionalLight(DirectionalLight),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
}

/// Errors from scene graph operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),
}

/// Flat scene graph. Nodes are kept in insertion order and never removed,
/// so a [`NodeId`] stays valid for the scene's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    nodes: Vec<Node>,
    clear_color: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl Scene {
    pub fn new(clear_color: Color) -> Self {
        Self {
            nodes: Vec::new(),
            clear_color,
        }
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Add a node and return its handle.
    pub fn add(&mut self, name: impl Into<String>, kind: NodeKind, transform: Transform) -> NodeId {
        let id = NodeId(self.nodes.len());
        let name = name.into();
        tracing::debug!(?id, %name, "scene node added");
        self.nodes.push(Node {
            name,
            kind,
            transform,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.get(id).map(|node| &node.transform)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(id.0).map(|node| &mut node.transform)
    }

    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> Result<(), SceneError> {
        let slot = self
            .transform_mut(id)
            .ok_or(SceneError::NodeNotFound(id))?;
        *slot = transform;
        Ok(())
    }

    /// All nodes with their handles, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn meshes(&self) -> impl Iterator<Item = (&Transform, &Mesh)> {
        self.nodes.iter().filter_map(|n| match &n.kind {
            NodeKind::Mesh(mesh) => Some((&n.transform, mesh)),
            _ => None,
        })
    }

    pub fn grids(&self) -> impl Iterator<Item = (&Transform, &GridHelper)> {
        self.nodes.iter().filter_map(|n| match &n.kind {
            NodeKind::Grid(grid) => Some((&n.transform, grid)),
            _ => None,
        })
    }

    pub fn lights(&self) -> impl Iterator<Item = (&Transform, &DirectionalLight)> {
        self.nodes.iter().filter_map(|n| match &n.kind {
            NodeKind::DirectionalLight(light) => Some((&n.transform, light)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> NodeKind {
        NodeKind::Mesh(Mesh {
            geometry: BoxGeometry::unit(),
            material: Material::basic(Color::WHITE),
        })
    }

    #[test]
    fn scene_starts_empty() {
        let scene = Scene::default();
        assert!(scene.is_empty());
        assert_eq!(scene.clear_color(), Color::BLACK);
    }

    #[test]
    fn handles_follow_insertion_order() {
        let mut scene = Scene::default();
        let a = scene.add("a", cube(), Transform::default());
        let b = scene.add("b", NodeKind::Grid(GridHelper::new(10.0, 10)), Transform::default());
        assert_eq!(a, NodeId(0));
        assert_eq!(b, NodeId(1));
        assert_eq!(scene.get(b).map(|n| n.name.as_str()), Some("b"));
        let ids: Vec<NodeId> = scene.nodes().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn set_transform_updates_node() {
        let mut scene = Scene::default();
        let id = scene.add("cube", cube(), Transform::default());
        let moved = Transform::from_position(Vec3::new(1.0, 0.0, -1.0));
        scene.set_transform(id, moved).unwrap();
        assert_eq!(scene.transform(id), Some(&moved));
    }

    #[test]
    fn set_transform_unknown_node_fails() {
        let mut scene = Scene::default();
        let err = scene
            .set_transform(NodeId(3), Transform::default())
            .unwrap_err();
        assert!(matches!(err, SceneError::NodeNotFound(NodeId(3))));
    }

    #[test]
    fn kind_filters() {
        let mut scene = Scene::default();
        scene.add("grid", NodeKind::Grid(GridHelper::new(10.0, 10)), Transform::default());
        scene.add("cube", cube(), Transform::default());
        scene.add(
            "sun",
            NodeKind::DirectionalLight(DirectionalLight {
                color: Color::WHITE,
                intensity: 1.0,
            }),
            Transform::from_position(Vec3::new(4.0, 4.0, 4.0)),
        );
        assert_eq!(scene.meshes().count(), 1);
        assert_eq!(scene.grids().count(), 1);
        assert_eq!(scene.lights().count(), 1);
    }

    #[test]
    fn material_accessors() {
        let phong = Material::flat_phong(Color::from_hex(0x888888));
        assert!(phong.is_lit());
        assert_eq!(phong.color(), Color(0x888888));
        assert!(!Material::basic(Color::WHITE).is_lit());
    }

    #[test]
    fn grid_spacing() {
        assert_eq!(GridHelper::new(10.0, 10).spacing(), 1.0);
        assert_eq!(GridHelper::new(10.0, 0).spacing(), 10.0);
    }

    #[test]
    fn light_direction_points_at_light() {
        let dir = DirectionalLight::to_light(Vec3::new(4.0, 4.0, 4.0));
        assert!((dir - Vec3::ONE.normalize()).length() < 1e-6);
        assert_eq!(DirectionalLight::to_light(Vec3::ZERO), Vec3::Y);
    }
}
