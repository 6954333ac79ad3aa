use crate::animation::AnimationSequence;
use crate::scene::Scene;

/// Ticks every [`AnimationSequence`] stored in a scene.
///
/// Sequences live inside the scene they mutate, so the store is moved out for
/// the duration of the pass and put back afterwards.
pub struct AnimationSystem;

impl AnimationSystem {
    /// Advances the running sequences by `dt` seconds.
    ///
    /// Unstarted and finished sequences are skipped. Returns how many
    /// sequences are still running after the tick.
    pub fn update(scene: &mut Scene, dt: f32) -> usize {
        let mut sequences = std::mem::take(&mut scene.sequences);

        let mut running = 0;
        for sequence in sequences.values_mut().filter(|s| Self::is_running(s)) {
            sequence.tick(dt, scene);
            if !sequence.is_finished() {
                running += 1;
            }
        }

        scene.sequences = sequences;
        running
    }

    /// Number of stored sequences that are started and not yet finished.
    #[must_use]
    pub fn running_count(scene: &Scene) -> usize {
        scene.sequences.values().filter(|s| Self::is_running(s)).count()
    }

    fn is_running(sequence: &AnimationSequence) -> bool {
        sequence.is_started() && !sequence.is_finished()
    }
}
