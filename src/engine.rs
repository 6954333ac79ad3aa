//! Engine Core Module
//!
//! This module contains [`Engine`], the frame driver of the runtime. It owns a
//! [`Scene`] and runs one frame per call with a fixed order:
//!
//! 1. physics for every dynamic node,
//! 2. every animation sequence,
//! 3. the render traversal.
//!
//! Rendering therefore always observes a fully updated frame. The engine has
//! no window or clock of its own; the frontend supplies `dt`.
//!
//! # Example
//!
//! ```rust,ignore
//! use stagecraft::{Engine, EngineSettings, Scene};
//!
//! let mut engine = Engine::new(scene, EngineSettings::default())?;
//! engine.scene.start_sequences();
//!
//! loop {
//!     let report = engine.frame(dt, &mut renderer);
//!     for contact in &report.contacts {
//!         // ... play a sound ...
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::animation::AnimationSystem;
use crate::errors::Result;
use crate::physics::{ContactEvent, PhysicsConfig, PhysicsSystem};
use crate::render::Renderer;
use crate::scene::Scene;

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub physics: PhysicsConfig,
    /// Step dynamic nodes each frame.
    pub physics_enabled: bool,
    /// Tick animation sequences each frame.
    pub animation_enabled: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            physics_enabled: true,
            animation_enabled: true,
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.physics.validate()?;
        Ok(settings)
    }
}

/// What happened during one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub frame: u64,
    pub dt: f32,
    pub contacts: Vec<ContactEvent>,
    /// Sequences still playing after this frame.
    pub running_sequences: usize,
}

impl FrameReport {
    /// Number of nodes that came to rest this frame.
    #[must_use]
    pub fn settled_count(&self) -> usize {
        self.contacts.iter().filter(|c| c.settled).count()
    }
}

/// Single-threaded, frame-stepped driver over one scene.
pub struct Engine {
    pub scene: Scene,

    physics_enabled: bool,
    animation_enabled: bool,

    time: f32,
    animation_time: f32,
    frame_count: u64,
}

impl Engine {
    /// Takes ownership of `scene` and applies the physics configuration to it.
    pub fn new(mut scene: Scene, settings: EngineSettings) -> Result<Self> {
        settings.physics.validate()?;
        scene.set_physics_config(settings.physics);

        Ok(Self {
            scene,
            physics_enabled: settings.physics_enabled,
            animation_enabled: settings.animation_enabled,
            time: 0.0,
            animation_time: 0.0,
            frame_count: 0,
        })
    }

    /// Returns the total time in seconds fed to the engine.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Returns the time in seconds fed to the animation sequences.
    #[inline]
    #[must_use]
    pub fn animation_time(&self) -> f32 {
        self.animation_time
    }

    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    #[must_use]
    pub fn physics_enabled(&self) -> bool {
        self.physics_enabled
    }

    pub fn set_physics_enabled(&mut self, enabled: bool) {
        self.physics_enabled = enabled;
    }

    #[inline]
    #[must_use]
    pub fn animation_enabled(&self) -> bool {
        self.animation_enabled
    }

    pub fn set_animation_enabled(&mut self, enabled: bool) {
        self.animation_enabled = enabled;
    }

    /// Runs the simulation half of a frame: physics, then animation.
    ///
    /// Disabled subsystems consume no time. A `dt` that is not a positive
    /// number still counts as a frame but advances nothing.
    pub fn update(&mut self, dt: f32) -> FrameReport {
        self.frame_count += 1;
        let advances = dt.is_finite() && dt > 0.0;
        if advances {
            self.time += dt;
        } else {
            log::warn!("Frame {} ignored dt = {dt}", self.frame_count);
        }

        let contacts = if self.physics_enabled && advances {
            PhysicsSystem::update(&mut self.scene, dt)
        } else {
            Vec::new()
        };

        let running_sequences = if self.animation_enabled && advances {
            self.animation_time += dt;
            AnimationSystem::update(&mut self.scene, dt)
        } else {
            AnimationSystem::running_count(&self.scene)
        };

        FrameReport {
            frame: self.frame_count,
            dt,
            contacts,
            running_sequences,
        }
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        self.scene.render(renderer);
    }

    /// `update` followed by `render`.
    pub fn frame(&mut self, dt: f32, renderer: &mut dyn Renderer) -> FrameReport {
        let report = self.update(dt);
        self.render(renderer);
        report
    }
}
