use crate::animation::clip::AnimationClip;
use crate::scene::Scene;

/// Ordered clips played back-to-back, one at a time.
///
/// `tick` hands leftover time from a finishing clip to the next one within the
/// same call, so one large step produces the same state as many small steps
/// that add up to it.
#[derive(Debug, Clone, Default)]
pub struct AnimationSequence {
    clips: Vec<AnimationClip>,
    current: usize,
    started: bool,
}

impl AnimationSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a clip. Call before `start` or between ticks.
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.clips.push(clip);
    }

    #[must_use]
    pub fn with_animation(mut self, clip: AnimationClip) -> Self {
        self.add_animation(clip);
        self
    }

    /// Arms the first clip. Ticks before `start` are ignored.
    pub fn start(&mut self) {
        if self.started {
            log::warn!("AnimationSequence::start called twice, ignoring");
            return;
        }
        self.started = true;
        self.current = 0;
        log::debug!("Sequence started with {} clip(s)", self.clips.len());
    }

    pub fn tick(&mut self, dt: f32, scene: &mut Scene) {
        if !self.started || !dt.is_finite() {
            return;
        }

        let mut dt = dt;
        while dt > 0.0 {
            let Some(clip) = self.clips.get_mut(self.current) else {
                break;
            };
            dt = clip.advance(dt, scene);

            if clip.is_finished() {
                self.current += 1;
                if self.current < self.clips.len() {
                    log::debug!("Sequence advanced to clip {}", self.current);
                } else {
                    log::debug!("Sequence finished");
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// `true` once started and every clip has run to completion.
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.started && self.current >= self.clips.len()
    }

    /// Index of the clip the next tick will feed.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        (self.started && self.current < self.clips.len()).then_some(self.current)
    }

    #[must_use]
    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.current_index().map(|i| &self.clips[i])
    }

    #[inline]
    #[must_use]
    pub fn clips(&self) -> &[AnimationClip] {
        &self.clips
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Total playback length in seconds.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.clips.iter().map(AnimationClip::duration).sum()
    }
}
