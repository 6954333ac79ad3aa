//! Transform system
//!
//! World-matrix propagation over the node arena, decoupled from [`Scene`] so
//! that it only borrows the node map and the root list.
//!
//! Nodes keep no parent handle, so every pass walks downwards from the roots
//! with an explicit stack carrying the parent's world matrix. Deep hierarchies
//! therefore cannot overflow the call stack.
//!
//! [`Scene`]: crate::scene::Scene

use glam::Mat4;
use slotmap::{SecondaryMap, SlotMap};

use crate::scene::NodeHandle;
use crate::scene::node::TransformNode;

/// Recomputes and stores the world matrix of every node reachable from `roots`.
pub fn update_hierarchy(nodes: &mut SlotMap<NodeHandle, TransformNode>, roots: &[NodeHandle]) {
    // Work stack: (node, parent world matrix)
    let mut stack: Vec<(NodeHandle, Mat4)> = Vec::with_capacity(64);

    for &root in roots.iter().rev() {
        stack.push((root, Mat4::IDENTITY));
    }

    while let Some((handle, parent_world)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        let world = node.transform.world_matrix(&parent_world);
        node.world_matrix = world;

        // Reverse push keeps children in insertion order
        for &child in node.children.iter().rev() {
            stack.push((child, world));
        }
    }
}

/// Computes world matrices without touching the nodes.
#[must_use]
pub fn collect_world_matrices(
    nodes: &SlotMap<NodeHandle, TransformNode>,
    roots: &[NodeHandle],
) -> SecondaryMap<NodeHandle, Mat4> {
    let mut out = SecondaryMap::with_capacity(nodes.len());
    let mut stack: Vec<(NodeHandle, Mat4)> = roots.iter().rev().map(|&r| (r, Mat4::IDENTITY)).collect();

    while let Some((handle, parent_world)) = stack.pop() {
        let Some(node) = nodes.get(handle) else {
            continue;
        };

        let world = node.transform.world_matrix(&parent_world);
        out.insert(handle, world);

        for &child in node.children.iter().rev() {
            stack.push((child, world));
        }
    }

    out
}

/// World matrix of a single node, found by searching downwards from `roots`.
///
/// Only the chain of ancestors is composed; unrelated subtrees are skipped as
/// soon as they are known not to contain `target`.
#[must_use]
pub fn find_world_matrix(
    nodes: &SlotMap<NodeHandle, TransformNode>,
    roots: &[NodeHandle],
    target: NodeHandle,
) -> Option<Mat4> {
    let path = find_path(nodes, roots, target)?;
    let mut world = Mat4::IDENTITY;
    for handle in path {
        world = nodes.get(handle)?.transform.world_matrix(&world);
    }
    Some(world)
}

/// Chain of handles from a root down to `target` (both inclusive).
#[must_use]
pub fn find_path(
    nodes: &SlotMap<NodeHandle, TransformNode>,
    roots: &[NodeHandle],
    target: NodeHandle,
) -> Option<Vec<NodeHandle>> {
    roots.iter().find_map(|&root| {
        let mut path = Vec::new();
        path_from(nodes, root, target, &mut path).then_some(path)
    })
}

/// Returns `true` if `candidate` is `ancestor` or lies in its subtree.
#[must_use]
pub fn is_in_subtree(
    nodes: &SlotMap<NodeHandle, TransformNode>,
    ancestor: NodeHandle,
    candidate: NodeHandle,
) -> bool {
    let mut stack = vec![ancestor];
    while let Some(handle) = stack.pop() {
        if handle == candidate {
            return true;
        }
        if let Some(node) = nodes.get(handle) {
            stack.extend_from_slice(&node.children);
        }
    }
    false
}

fn path_from(
    nodes: &SlotMap<NodeHandle, TransformNode>,
    current: NodeHandle,
    target: NodeHandle,
    path: &mut Vec<NodeHandle>,
) -> bool {
    let Some(node) = nodes.get(current) else {
        return false;
    };
    path.push(current);
    if current == target {
        return true;
    }
    for &child in &node.children {
        if path_from(nodes, child, target, path) {
            return true;
        }
    }
    path.pop();
    false
}
