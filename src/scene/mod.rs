//! Scene graph module
//!
//! Manages the entity hierarchy:
//! - TransformNode: positionable entity with drawable parts, ordered children and rigid-body state
//! - Transform: local spatial state (position, Euler orientation, scale, pivot, base matrix)
//! - Scene: node arena, root list, stored animation sequences
//! - transform_system: world-matrix propagation without parent back-references

pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use node::TransformNode;
pub use scene::{NodeBuilder, Scene};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    /// Handle of a node in the scene arena.
    pub struct NodeHandle;
    /// Key of a drawable part owned by the rendering collaborator.
    pub struct PartKey;
    /// Handle of an animation sequence stored in a scene.
    pub struct SequenceKey;
}
