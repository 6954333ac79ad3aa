use glam::Vec3;

use crate::animation::bezier::CubicBezier;
use crate::errors::{Result, StageError};
use crate::scene::{NodeHandle, Scene};

/// What a clip does to its target while it runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipKind {
    /// Consumes time only; used to stagger sibling sequences.
    Pause,
    /// Constant linear velocity added to the target's position.
    Translation { per_second: Vec3 },
    /// Constant angular velocity added to the target's (unnormalized) orientation.
    Rotation { per_second: Vec3 },
    /// Absolute position overwrite from a curve sampled at `elapsed / duration`.
    Bezier(CubicBezier),
}

/// Lifecycle of a clip. Transitions are one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipState {
    Idle,
    Active,
    Finished,
}

/// A one-shot, bounded-duration mutation of one node's transform.
///
/// The clip refers to its target by handle and never owns it. Elapsed time is
/// monotonic and clamped to `[0, duration]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    target: NodeHandle,
    duration: f32,
    elapsed: f32,
    kind: ClipKind,
}

impl AnimationClip {
    pub fn new(target: NodeHandle, duration: f32, kind: ClipKind) -> Result<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(StageError::InvalidParameter {
                name: "duration",
                value: duration,
            });
        }
        Ok(Self {
            target,
            duration,
            elapsed: 0.0,
            kind,
        })
    }

    pub fn pause(target: NodeHandle, duration: f32) -> Result<Self> {
        Self::new(target, duration, ClipKind::Pause)
    }

    /// Moves the target by `displacement` in total over `duration` seconds.
    pub fn translation(target: NodeHandle, duration: f32, displacement: Vec3) -> Result<Self> {
        Self::new(
            target,
            duration,
            ClipKind::Translation {
                per_second: displacement / duration,
            },
        )
    }

    /// Rotates the target by `rotation` radians in total over `duration` seconds.
    pub fn rotation(target: NodeHandle, duration: f32, rotation: Vec3) -> Result<Self> {
        Self::new(
            target,
            duration,
            ClipKind::Rotation {
                per_second: rotation / duration,
            },
        )
    }

    pub fn bezier(target: NodeHandle, duration: f32, curve: CubicBezier) -> Result<Self> {
        Self::new(target, duration, ClipKind::Bezier(curve))
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> NodeHandle {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.duration - self.elapsed
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> &ClipKind {
        &self.kind
    }

    #[must_use]
    pub fn state(&self) -> ClipState {
        if self.elapsed >= self.duration {
            ClipState::Finished
        } else if self.elapsed > 0.0 {
            ClipState::Active
        } else {
            ClipState::Idle
        }
    }

    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state() == ClipState::Finished
    }

    /// Feeds up to `dt` seconds into the clip and applies the matching mutation.
    ///
    /// Returns the part of `dt` the clip could not absorb because it finished.
    /// A finished clip absorbs nothing and leaves the scene untouched.
    pub fn advance(&mut self, dt: f32, scene: &mut Scene) -> f32 {
        if self.is_finished() || !dt.is_finite() || dt <= 0.0 {
            return dt.max(0.0);
        }

        let remaining = self.remaining();
        let consumed = if dt >= remaining {
            // Land exactly on the end so that t reaches 1.0
            self.elapsed = self.duration;
            remaining
        } else {
            self.elapsed = (self.elapsed + dt).min(self.duration);
            dt
        };

        self.apply(consumed, scene);
        dt - consumed
    }

    fn apply(&self, dt: f32, scene: &mut Scene) {
        if matches!(self.kind, ClipKind::Pause) {
            return;
        }

        let Some(node) = scene.get_node_mut(self.target) else {
            log::warn!("Animation target {:?} is not in the scene, skipping", self.target);
            return;
        };

        match self.kind {
            ClipKind::Pause => {}
            ClipKind::Translation { per_second } => node.transform.position += per_second * dt,
            ClipKind::Rotation { per_second } => node.transform.orientation += per_second * dt,
            ClipKind::Bezier(curve) => {
                node.transform.position = curve.evaluate(self.elapsed / self.duration);
            }
        }
    }
}
