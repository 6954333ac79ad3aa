use glam::Vec3;

use crate::physics::config::PhysicsConfig;
use crate::scene::transform::Transform;

/// Rigid-body state of a node.
///
/// Only nodes with `dynamic == true` are integrated. Settling clears the flag;
/// the node then stays put until outside code moves it and sets the flag again.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dynamics {
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub acceleration: Vec3,
    pub bounce_coeff: f32,
    pub dynamic: bool,
}

/// What a single physics step did to a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The node is not dynamic (or `dt` was not a positive number).
    Inactive,
    /// Integrated, no ground contact.
    Airborne,
    /// Hit the contact plane and bounced.
    Contact { impact_speed: f32 },
    /// Hit the contact plane and came to rest; the node is no longer dynamic.
    Settled { impact_speed: f32 },
}

/// Advances one node by `dt` seconds.
///
/// 1. Explicit Euler: `v += a·dt`, `p += v·dt`, `θ += ω·dt`.
/// 2. At or below the contact height: clamp, `v.y *= -bounce`, damp `v.x`/`v.z` and `ω`.
/// 3. Once `|v|` and `|ω|` are both under the rest threshold: zero the motion,
///    snap orientation to right angles and clear the dynamic flag.
pub fn step(
    transform: &mut Transform,
    dynamics: &mut Dynamics,
    dt: f32,
    config: &PhysicsConfig,
) -> StepOutcome {
    if !dynamics.dynamic || !dt.is_finite() || dt <= 0.0 {
        return StepOutcome::Inactive;
    }

    dynamics.velocity += dynamics.acceleration * dt;
    transform.position += dynamics.velocity * dt;
    transform.orientation += dynamics.angular_velocity * dt;

    if transform.position.y > config.contact_height {
        return StepOutcome::Airborne;
    }

    let impact_speed = dynamics.velocity.y.abs();
    transform.position.y = config.contact_height;
    dynamics.velocity.y *= -dynamics.bounce_coeff;
    dynamics.velocity.x *= config.horizontal_damping;
    dynamics.velocity.z *= config.horizontal_damping;
    dynamics.angular_velocity *= config.angular_damping;

    if dynamics.velocity.length() < config.rest_threshold {
        dynamics.velocity = Vec3::ZERO;

        let spin = dynamics.angular_velocity;
        dynamics.angular_velocity *= config.angular_damping;

        if spin.length() < config.rest_threshold {
            dynamics.angular_velocity = Vec3::ZERO;
            transform.orientation = snap_to_right_angles(transform.orientation);
            dynamics.dynamic = false;
            return StepOutcome::Settled { impact_speed };
        }
    }

    StepOutcome::Contact { impact_speed }
}

/// Rounds each Euler component (radians) to the nearest multiple of 90°.
#[must_use]
pub fn snap_to_right_angles(orientation: Vec3) -> Vec3 {
    let snap = |radians: f32| ((radians.to_degrees() / 90.0).round() * 90.0).to_radians();
    Vec3::new(snap(orientation.x), snap(orientation.y), snap(orientation.z))
}
