//! Physics configuration
//!
//! The ground plane and the damping constants are configuration values with
//! the tuned defaults below. They are loaded from JSON when the application
//! wants to override them; missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, StageError};

/// Ground contact and settling parameters (flat, no nesting).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical coordinate of the contact plane, default 0.55
    pub contact_height: f32,
    /// Horizontal velocity factor applied on every contact, default 0.7
    pub horizontal_damping: f32,
    /// Angular velocity factor applied on every contact, default 0.9
    pub angular_damping: f32,
    /// Speed under which linear and angular motion count as stopped, default 0.1
    pub rest_threshold: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            contact_height: 0.55,
            horizontal_damping: 0.7,
            angular_damping: 0.9,
            rest_threshold: 0.1,
        }
    }
}

impl PhysicsConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::debug!("Loaded physics config from {}: {config:?}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.contact_height.is_finite() {
            return Err(StageError::InvalidParameter {
                name: "contact_height",
                value: self.contact_height,
            });
        }
        for (name, value) in [
            ("horizontal_damping", self.horizontal_damping),
            ("angular_damping", self.angular_damping),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(StageError::InvalidParameter { name, value });
            }
        }
        if !self.rest_threshold.is_finite() || self.rest_threshold < 0.0 {
            return Err(StageError::InvalidParameter {
                name: "rest_threshold",
                value: self.rest_threshold,
            });
        }
        Ok(())
    }
}
