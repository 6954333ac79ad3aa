use crate::physics::dynamics::StepOutcome;
use crate::scene::{NodeHandle, Scene};

/// A node touched the contact plane during a physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub node: NodeHandle,
    /// Vertical speed at the moment of contact, before the bounce.
    pub impact_speed: f32,
    /// The contact brought the node to rest; it is no longer dynamic.
    pub settled: bool,
}

/// Physics system.
///
/// Steps every dynamic node of the scene once. Each node is integrated on
/// its own: a dynamic parent does not drag its children through physics, and
/// dynamic children are stepped independently of their parent.
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Advances all dynamic nodes by `dt` seconds and reports contacts.
    pub fn update(scene: &mut Scene, dt: f32) -> Vec<ContactEvent> {
        let config = *scene.physics_config();
        let mut events = Vec::new();

        for (handle, node) in scene.iter_nodes_mut() {
            match node.tick(dt, &config) {
                StepOutcome::Inactive | StepOutcome::Airborne => {}
                StepOutcome::Contact { impact_speed } => {
                    log::trace!("'{}' contact at {impact_speed:.3} m/s", node.name);
                    events.push(ContactEvent {
                        node: handle,
                        impact_speed,
                        settled: false,
                    });
                }
                StepOutcome::Settled { impact_speed } => {
                    log::debug!(
                        "'{}' settled at {:?} with orientation {:?}",
                        node.name,
                        node.transform.position,
                        node.transform.orientation
                    );
                    events.push(ContactEvent {
                        node: handle,
                        impact_speed,
                        settled: true,
                    });
                }
            }
        }

        events
    }

    /// Number of nodes still driven by physics.
    #[must_use]
    pub fn dynamic_count(scene: &Scene) -> usize {
        scene.iter_nodes().filter(|(_, node)| node.is_dynamic()).count()
    }
}
