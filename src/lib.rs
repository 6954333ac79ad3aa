#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod engine;
pub mod errors;
pub mod physics;
pub mod render;
pub mod scene;

pub use animation::{AnimationClip, AnimationSequence, AnimationSystem, ClipKind, ClipState, CubicBezier};
pub use engine::{Engine, EngineSettings, FrameReport};
pub use errors::{Result, StageError};
pub use physics::{ContactEvent, Dynamics, PhysicsConfig, PhysicsSystem, StepOutcome};
pub use render::{DrawCall, DrawList, Renderer};
pub use scene::{NodeBuilder, NodeHandle, PartKey, Scene, SequenceKey, Transform, TransformNode};
