//! Error Types
//!
//! This module defines the error types used throughout the runtime.
//!
//! # Overview
//!
//! The main error type [`StageError`] covers every failure mode of the core:
//! - Construction errors (nodes without parts, clips with non-positive duration)
//! - Hierarchy lookups with an out-of-range child index
//! - Arena misuse (stale handles, double attachment, cycles)
//! - Configuration loading
//!
//! Degenerate numeric states (tiny velocities, zero-length ticks) are not errors;
//! they are absorbed by the thresholds in [`PhysicsConfig`](crate::physics::PhysicsConfig).
//!
//! # Usage
//!
//! Fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, StageError>`.
//!
//! ```rust,ignore
//! use stagecraft::errors::{StageError, Result};
//!
//! fn build() -> Result<()> {
//!     let clip = AnimationClip::pause(target, 1.5)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the scene runtime.
#[derive(Error, Debug)]
pub enum StageError {
    // ========================================================================
    // Construction Errors
    // ========================================================================
    /// A node was constructed without any drawable part.
    #[error("Node '{name}' needs at least one drawable part (use TransformNode::group for part-less nodes)")]
    MissingParts {
        /// Display name of the rejected node
        name: String,
    },

    /// A numeric parameter is outside its legal range.
    #[error("Invalid parameter `{name}`: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    // ========================================================================
    // Hierarchy Errors
    // ========================================================================
    /// Child lookup with an index past the end of the child list.
    #[error("Child index out of range: {index} (node has {count} children)")]
    ChildIndexOutOfRange {
        /// The invalid index
        index: usize,
        /// Number of children the node actually has
        count: usize,
    },

    /// The handle does not refer to a live node of this scene.
    #[error("Node not found")]
    NodeNotFound,

    /// The node is already owned by another parent.
    #[error("Node is already attached to a parent")]
    AlreadyAttached,

    /// Attaching would make a node its own ancestor.
    #[error("Cannot attach a node beneath itself or one of its descendants")]
    CyclicAttachment,

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, StageError>`.
pub type Result<T> = std::result::Result<T, StageError>;
