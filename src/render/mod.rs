//! Rendering collaborator interface
//!
//! The scene graph never talks to a GPU. During traversal it hands every
//! drawable part of every node, together with the node's freshly composed
//! world matrix, to a [`Renderer`]. Shader programs, uniform names and buffer
//! management are the implementor's business.
//!
//! [`DrawList`] is a recording implementation used by the headless demo and
//! the tests.

use glam::{Mat4, Vec4};

use crate::scene::PartKey;

/// Receives one call per drawable part during [`Scene::render`].
///
/// [`Scene::render`]: crate::scene::Scene::render
pub trait Renderer {
    fn draw(&mut self, part: PartKey, world: &Mat4, material: Vec4);
}

/// A single recorded draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub part: PartKey,
    pub world: Mat4,
    pub material: Vec4,
}

/// Renderer that records draw calls in traversal order.
#[derive(Debug, Default)]
pub struct DrawList {
    pub calls: Vec<DrawCall>,
}

impl DrawList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the calls of the previous frame, keeping the allocation.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Every recorded call for `part`, in traversal order.
    pub fn calls_for(&self, part: PartKey) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(move |call| call.part == part)
    }
}

impl Renderer for DrawList {
    fn draw(&mut self, part: PartKey, world: &Mat4, material: Vec4) {
        self.calls.push(DrawCall {
            part,
            world: *world,
            material,
        });
    }
}
