use glam::{Mat4, Vec3, Vec4};
use slotmap::{SecondaryMap, SlotMap};

use crate::animation::AnimationSequence;
use crate::errors::{Result, StageError};
use crate::physics::PhysicsConfig;
use crate::render::Renderer;
use crate::scene::node::TransformNode;
use crate::scene::transform_system;
use crate::scene::{NodeHandle, PartKey, SequenceKey};

/// Scene graph container
///
/// Owns every node in an arena. Roots are listed in insertion order; every
/// other node is owned by exactly one parent through that parent's ordered
/// child list. Nodes are destroyed together with the scene; there is no
/// removal or reordering, so child indices stay valid once construction is
/// done.
///
/// The scene also stores the animation sequences that drive its nodes and the
/// physics configuration used by [`PhysicsSystem`](crate::physics::PhysicsSystem).
#[derive(Debug, Default)]
pub struct Scene {
    pub(crate) nodes: SlotMap<NodeHandle, TransformNode>,
    pub(crate) root_nodes: Vec<NodeHandle>,

    pub(crate) sequences: SlotMap<SequenceKey, AnimationSequence>,

    physics: PhysicsConfig,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_physics(physics: PhysicsConfig) -> Self {
        Self {
            physics,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn physics_config(&self) -> &PhysicsConfig {
        &self.physics
    }

    pub fn set_physics_config(&mut self, physics: PhysicsConfig) {
        self.physics = physics;
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Starts building a node.
    pub fn build_node(&'_ mut self, name: &str) -> NodeBuilder<'_> {
        NodeBuilder::new(self, name)
    }

    /// Adds a node as a new root.
    ///
    /// The node enters the arena without children; child handles carried by a
    /// cloned node belong to the original's subtree and are dropped.
    pub fn add_node(&mut self, node: TransformNode) -> NodeHandle {
        let handle = self.insert_detached(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Moves `node` into the arena as the last child of `parent`.
    ///
    /// Like [`Scene::add_node`], the inserted node starts without children.
    pub fn add_child(&mut self, parent: NodeHandle, node: TransformNode) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(StageError::NodeNotFound);
        }
        let handle = self.insert_detached(node);
        self.nodes[parent].children.push(handle);
        Ok(handle)
    }

    fn insert_detached(&mut self, mut node: TransformNode) -> NodeHandle {
        if !node.children.is_empty() {
            log::warn!(
                "Node '{}' inserted with {} foreign child handle(s), dropping them",
                node.name,
                node.children.len()
            );
            node.children.clear();
        }
        self.nodes.insert(node)
    }

    /// Transfers ownership of the root `child` (with its subtree) to `parent`.
    ///
    /// The child is appended after the existing children. It must currently be
    /// a root; nodes cannot change owner once attached.
    pub fn attach(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<()> {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return Err(StageError::NodeNotFound);
        }
        let Some(root_pos) = self.root_nodes.iter().position(|&h| h == child) else {
            return Err(StageError::AlreadyAttached);
        };
        if transform_system::is_in_subtree(&self.nodes, child, parent) {
            return Err(StageError::CyclicAttachment);
        }

        self.root_nodes.remove(root_pos);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&TransformNode> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut TransformNode> {
        self.nodes.get_mut(handle)
    }

    pub fn node(&self, handle: NodeHandle) -> Result<&TransformNode> {
        self.nodes.get(handle).ok_or(StageError::NodeNotFound)
    }

    pub fn node_mut(&mut self, handle: NodeHandle) -> Result<&mut TransformNode> {
        self.nodes.get_mut(handle).ok_or(StageError::NodeNotFound)
    }

    /// Handle of the `index`-th child of `parent`.
    pub fn child(&self, parent: NodeHandle, index: usize) -> Result<NodeHandle> {
        self.node(parent)?.child(index)
    }

    pub fn child_count(&self, parent: NodeHandle) -> Result<usize> {
        Ok(self.node(parent)?.child_count())
    }

    /// Follows a chain of child indices starting at `start`.
    ///
    /// `child_path(slots, &[0, 0, 1, 0])` is the first child of the second
    /// child of the first child of the first child of `slots`.
    pub fn child_path(&self, start: NodeHandle, indices: &[usize]) -> Result<NodeHandle> {
        indices
            .iter()
            .try_fold(start, |current, &index| self.child(current, index))
    }

    #[inline]
    #[must_use]
    pub fn root_nodes(&self) -> &[NodeHandle] {
        &self.root_nodes
    }

    /// Root at `index` in insertion order.
    pub fn root(&self, index: usize) -> Result<NodeHandle> {
        self.root_nodes
            .get(index)
            .copied()
            .ok_or(StageError::ChildIndexOutOfRange {
                index,
                count: self.root_nodes.len(),
            })
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeHandle, &TransformNode)> {
        self.nodes.iter()
    }

    pub fn iter_nodes_mut(&mut self) -> impl Iterator<Item = (NodeHandle, &mut TransformNode)> {
        self.nodes.iter_mut()
    }

    /// First node (in arena order) with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .find_map(|(handle, node)| (node.name == name).then_some(handle))
    }

    // ========================================================================
    // World transforms
    // ========================================================================

    /// Composed world matrix of one node, or `None` for an unknown handle.
    #[must_use]
    pub fn world_matrix(&self, handle: NodeHandle) -> Option<Mat4> {
        transform_system::find_world_matrix(&self.nodes, &self.root_nodes, handle)
    }

    /// Snapshot of every node's world matrix.
    #[must_use]
    pub fn world_matrices(&self) -> SecondaryMap<NodeHandle, Mat4> {
        transform_system::collect_world_matrices(&self.nodes, &self.root_nodes)
    }

    /// Writes the current world matrix into every node.
    pub fn update_world_matrices(&mut self) {
        transform_system::update_hierarchy(&mut self.nodes, &self.root_nodes);
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Renders every root with an identity parent matrix.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for &root in &self.root_nodes {
            if let Err(err) = self.render_recursive(root, renderer, &Mat4::IDENTITY) {
                log::warn!("Skipping root {root:?}: {err}");
            }
        }
    }

    /// Draws `handle` and its subtree under `parent_world`.
    ///
    /// The node's world matrix is `parent_world × local`; each part is drawn
    /// with it, then each child is visited with it as its parent matrix.
    pub fn render_recursive(
        &self,
        handle: NodeHandle,
        renderer: &mut dyn Renderer,
        parent_world: &Mat4,
    ) -> Result<()> {
        let node = self.node(handle)?;
        let world = node.transform.world_matrix(parent_world);

        for &part in &node.parts {
            renderer.draw(part, &world, node.material);
        }
        for &child in &node.children {
            self.render_recursive(child, renderer, &world)?;
        }
        Ok(())
    }

    // ========================================================================
    // Animation sequences
    // ========================================================================

    pub fn add_sequence(&mut self, sequence: AnimationSequence) -> SequenceKey {
        self.sequences.insert(sequence)
    }

    #[must_use]
    pub fn sequence(&self, key: SequenceKey) -> Option<&AnimationSequence> {
        self.sequences.get(key)
    }

    pub fn sequence_mut(&mut self, key: SequenceKey) -> Option<&mut AnimationSequence> {
        self.sequences.get_mut(key)
    }

    /// Starts every stored sequence that has not been started yet.
    pub fn start_sequences(&mut self) {
        for (_, sequence) in &mut self.sequences {
            if !sequence.is_started() {
                sequence.start();
            }
        }
    }

    /// `true` when every stored sequence has run to completion.
    #[must_use]
    pub fn sequences_finished(&self) -> bool {
        self.sequences.values().all(AnimationSequence::is_finished)
    }
}

/// Fluent node construction.
///
/// ```rust,ignore
/// let die = scene
///     .build_node("die")
///     .with_parts(vec![die_mesh])
///     .with_position(Vec3::new(0.0, 2.0, 0.0))
///     .with_dynamics(Vec3::new(-0.5, 0.5, 0.0), Vec3::new(8.0, 5.0, 2.0), 0.5)
///     .build()?;
/// ```
pub struct NodeBuilder<'a> {
    scene: &'a mut Scene,
    name: String,
    parts: Vec<PartKey>,
    base: Mat4,
    group: bool,
    parent: Option<NodeHandle>,
    position: Vec3,
    orientation: Vec3,
    scale: Vec3,
    center: Vec3,
    material: Vec4,
    acceleration: Vec3,
    velocity: Vec3,
    angular_velocity: Vec3,
    bounce_coeff: f32,
    dynamic: bool,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(scene: &'a mut Scene, name: &str) -> Self {
        Self {
            scene,
            name: name.to_owned(),
            parts: Vec::new(),
            base: Mat4::IDENTITY,
            group: false,
            parent: None,
            position: Vec3::ZERO,
            orientation: Vec3::ZERO,
            scale: Vec3::ONE,
            center: Vec3::ZERO,
            material: Vec4::ONE,
            acceleration: Vec3::ZERO,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            bounce_coeff: 0.0,
            dynamic: false,
        }
    }

    // === Chained configuration ===

    #[must_use]
    pub fn with_parts(mut self, parts: Vec<PartKey>) -> Self {
        self.parts = parts;
        self
    }

    /// Marks the node as a part-less group.
    #[must_use]
    pub fn as_group(mut self) -> Self {
        self.group = true;
        self
    }

    #[must_use]
    pub fn with_base_transform(mut self, base: Mat4) -> Self {
        self.base = base;
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: NodeHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Vec3) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: Vec4) -> Self {
        self.material = material;
        self
    }

    #[must_use]
    pub fn with_acceleration(mut self, acceleration: Vec3) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Makes the node dynamic with the given initial motion.
    #[must_use]
    pub fn with_dynamics(mut self, velocity: Vec3, angular_velocity: Vec3, bounce_coeff: f32) -> Self {
        self.velocity = velocity;
        self.angular_velocity = angular_velocity;
        self.bounce_coeff = bounce_coeff;
        self.dynamic = true;
        self
    }

    // === Terminal ===

    /// Inserts the node (as a root, or under the configured parent).
    pub fn build(self) -> Result<NodeHandle> {
        let mut node = if self.group {
            let mut group = TransformNode::group(self.base);
            group.parts = self.parts;
            group
        } else {
            TransformNode::with_base_transform(self.parts, self.base).map_err(|_| {
                StageError::MissingParts {
                    name: self.name.clone(),
                }
            })?
        };

        node.name = self.name;
        node.material = self.material;
        node.transform.position = self.position;
        node.transform.orientation = self.orientation;
        node.transform.scale = self.scale;
        node.transform.center = self.center;
        node.dynamics.acceleration = self.acceleration;
        node.dynamics.velocity = self.velocity;
        node.dynamics.angular_velocity = self.angular_velocity;
        node.dynamics.bounce_coeff = self.bounce_coeff;
        node.dynamics.dynamic = self.dynamic;

        match self.parent {
            Some(parent) => self.scene.add_child(parent, node),
            None => Ok(self.scene.add_node(node)),
        }
    }
}
