use glam::{Mat4, Vec3, Vec4};

use crate::errors::{Result, StageError};
use crate::physics::config::PhysicsConfig;
use crate::physics::dynamics::{self, Dynamics, StepOutcome};
use crate::scene::transform::Transform;
use crate::scene::{NodeHandle, PartKey};

/// A positionable entity of the scene graph.
///
/// # Ownership
///
/// A node owns its drawable parts (keys into the rendering collaborator's
/// storage) and its children. Children are stored as an ordered list of
/// arena handles; their order is the order of attachment and never changes,
/// so scene-construction code can address sub-parts by index
/// ("second child of the first child"). There is no parent back-reference.
///
/// # Transform
///
/// The [`Transform`] carries the local TRS state. The world matrix is the
/// parent's world matrix composed with the local matrix; it is computed during
/// render traversal and cached by [`Scene::update_world_matrices`].
///
/// [`Scene::update_world_matrices`]: crate::scene::Scene::update_world_matrices
#[derive(Debug, Clone)]
pub struct TransformNode {
    // === Identity ===
    pub name: String,
    pub material: Vec4,

    // === Hierarchy ===
    pub(crate) parts: Vec<PartKey>,
    pub(crate) children: Vec<NodeHandle>,

    // === Spatial ===
    pub transform: Transform,
    pub(crate) world_matrix: Mat4,

    // === Physics ===
    pub dynamics: Dynamics,
}

impl TransformNode {
    /// Creates a node rendering the given parts.
    ///
    /// Fails with [`StageError::MissingParts`] when `parts` is empty; use
    /// [`TransformNode::group`] for nodes that only hold children.
    pub fn new(parts: Vec<PartKey>) -> Result<Self> {
        Self::with_base_transform(parts, Mat4::IDENTITY)
    }

    /// Creates a node whose local matrix is pre-multiplied by `base`.
    pub fn with_base_transform(parts: Vec<PartKey>, base: Mat4) -> Result<Self> {
        if parts.is_empty() {
            return Err(StageError::MissingParts {
                name: "<unnamed>".to_owned(),
            });
        }
        Ok(Self::from_parts(parts, base))
    }

    /// Creates a part-less grouping node.
    #[must_use]
    pub fn group(base: Mat4) -> Self {
        Self::from_parts(Vec::new(), base)
    }

    fn from_parts(parts: Vec<PartKey>, base: Mat4) -> Self {
        Self {
            name: String::new(),
            material: Vec4::ONE,
            parts,
            children: Vec::new(),
            transform: Transform::with_base(base),
            world_matrix: Mat4::IDENTITY,
            dynamics: Dynamics::default(),
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    #[inline]
    #[must_use]
    pub fn orientation(&self) -> Vec3 {
        self.transform.orientation
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.transform.center
    }

    #[inline]
    #[must_use]
    pub fn parts(&self) -> &[PartKey] {
        &self.parts
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Handle of the child at `index` (insertion order).
    pub fn child(&self, index: usize) -> Result<NodeHandle> {
        self.children
            .get(index)
            .copied()
            .ok_or(StageError::ChildIndexOutOfRange {
                index,
                count: self.children.len(),
            })
    }

    /// World matrix written by the last [`Scene::update_world_matrices`] pass.
    ///
    /// [`Scene::update_world_matrices`]: crate::scene::Scene::update_world_matrices
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        self.transform.local_matrix()
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.dynamics.velocity
    }

    #[inline]
    #[must_use]
    pub fn angular_velocity(&self) -> Vec3 {
        self.dynamics.angular_velocity
    }

    #[inline]
    #[must_use]
    pub fn bounce_coeff(&self) -> f32 {
        self.dynamics.bounce_coeff
    }

    #[inline]
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.dynamics.dynamic
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.transform.orientation = orientation;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.transform.center = center;
    }

    pub fn move_by(&mut self, offset: Vec3) {
        self.transform.move_by(offset);
    }

    pub fn rotate(&mut self, rotation: Vec3) {
        self.transform.rotate(rotation);
    }

    pub fn grow(&mut self, growth: Vec3) {
        self.transform.grow(growth);
    }

    pub fn set_acceleration(&mut self, acceleration: Vec3) {
        self.dynamics.acceleration = acceleration;
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.dynamics.velocity = velocity;
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        self.dynamics.angular_velocity = angular_velocity;
    }

    pub fn set_bounce_coeff(&mut self, bounce_coeff: f32) {
        self.dynamics.bounce_coeff = bounce_coeff;
    }

    pub fn set_dynamic(&mut self, dynamic: bool) {
        self.dynamics.dynamic = dynamic;
    }

    // ========================================================================
    // Physics
    // ========================================================================

    /// Integrates this node only; children are not ticked.
    pub fn tick(&mut self, dt: f32, config: &PhysicsConfig) -> StepOutcome {
        dynamics::step(&mut self.transform, &mut self.dynamics, dt, config)
    }
}
