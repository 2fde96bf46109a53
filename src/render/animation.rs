use std::{collections::HashMap, time::Duration};

use instant::Instant;

use crate::{
    scaler::{ScaleChange, Transition},
    scene::ElementId,
};

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    transition: Transition,
}

impl Tween {
    fn progress(&self, now: Instant) -> f32 {
        if self.transition.duration.is_zero() {
            return 1.;
        }
        let elapsed = if now <= self.start {
            Duration::ZERO
        } else {
            now - self.start
        };
        (elapsed.as_secs_f32() / self.transition.duration.as_secs_f32()).min(1.)
    }

    fn value(&self, now: Instant) -> f32 {
        let t = self.progress(now);
        if t >= 1. {
            return self.to;
        }
        let eased = self.transition.easing.apply(t);
        self.from + (self.to - self.from) * eased
    }
}

/// Eases element scales towards the targets of incoming [`ScaleChange`]s.
///
/// A change arriving mid-transition starts from the currently displayed value.
#[derive(Debug, Clone, Default)]
pub struct ScaleAnimations {
    tweens: HashMap<ElementId, Tween>,
}

impl ScaleAnimations {
    pub fn apply(&mut self, changes: &[ScaleChange], now: Instant) {
        for change in changes {
            let from = self.scale(change.id, now);
            self.tweens.insert(
                change.id,
                Tween {
                    from,
                    to: change.scale,
                    start: now,
                    transition: change.transition,
                },
            );
        }
    }

    /// Displayed scale of an element, 1 for elements never scaled.
    pub fn scale(&self, id: ElementId, now: Instant) -> f32 {
        self.tweens.get(&id).map_or(1., |tween| tween.value(now))
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.tweens.values().any(|t| t.progress(now) < 1.)
    }

    /// Drops finished transitions back to identity.
    pub fn prune(&mut self, now: Instant) {
        self.tweens
            .retain(|_, t| t.progress(now) < 1. || t.to != 1.);
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
