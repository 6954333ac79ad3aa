//! Procedural animation
//!
//! - [`AnimationClip`]: one bounded action on one node (pause, translation,
//!   rotation, Bezier path)
//! - [`AnimationSequence`]: clips played back-to-back with time carry-over
//! - [`AnimationSystem`]: ticks every sequence stored in a [`Scene`](crate::scene::Scene)

pub mod bezier;
pub mod clip;
pub mod sequence;
pub mod system;

pub use bezier::CubicBezier;
pub use clip::{AnimationClip, ClipKind, ClipState};
pub use sequence::AnimationSequence;
pub use system::AnimationSystem;
