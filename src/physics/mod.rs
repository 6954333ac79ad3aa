//! Rigid-body motion
//!
//! A deliberately small model: explicit Euler integration, one horizontal
//! contact plane, damping on contact and a one-way settle into a resting,
//! right-angle orientation. Nodes go falling → bouncing → settled and do not
//! fall again until outside code flags them dynamic.

pub mod config;
pub mod dynamics;
pub mod system;

pub use config::PhysicsConfig;
pub use dynamics::{Dynamics, StepOutcome, snap_to_right_angles};
pub use system::{ContactEvent, PhysicsSystem};
