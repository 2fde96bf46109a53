use std::time::Duration;

use egui::Pos2;
use instant::Instant;
use serde::{Deserialize, Serialize};

/// Last known pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerState {
    /// Viewport coordinates of the pointer
    pub pos: Pos2,

    /// Set by the first pointer event, cleared only on teardown
    pub visible: bool,
}

/// How the device delivers pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputClass {
    /// Mouse, trackpad or pen with hover.
    #[default]
    Pointer,
    /// Touch screen; no hover, pointer moves are not tracked.
    Touch,
}

/// What the host knows about touch support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceCapabilities {
    /// The platform exposes a touch-start event type
    pub touch_start_event: bool,

    /// Maximum simultaneous touch points reported by the platform
    pub max_touch_points: u32,
}

impl DeviceCapabilities {
    pub fn touch() -> Self {
        Self {
            touch_start_event: true,
            max_touch_points: 1,
        }
    }

    pub fn classify(self) -> InputClass {
        if self.touch_start_event || self.max_touch_points > 0 {
            InputClass::Touch
        } else {
            InputClass::Pointer
        }
    }
}

/// Records pointer coordinates and the transient touch window.
///
/// The input class is fixed at construction; events of the other class are ignored.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    class: InputClass,
    state: PointerState,
    touched_at: Option<Instant>,
    fade: Duration,
}

impl PointerTracker {
    pub fn new(class: InputClass, fade: Duration) -> Self {
        Self {
            class,
            state: PointerState::default(),
            touched_at: None,
            fade,
        }
    }

    pub fn class(&self) -> InputClass {
        self.class
    }

    pub fn is_touch(&self) -> bool {
        self.class == InputClass::Touch
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Records a pointer move. Returns false on touch devices, where moves aren't tracked.
    pub fn pointer_move(&mut self, pos: Pos2) -> bool {
        if self.is_touch() {
            return false;
        }

        self.state.pos = pos;
        self.state.visible = true;
        true
    }

    /// Records the first touch point and opens the fade window.
    ///
    /// Returns false on devices classified as pointer devices.
    pub fn touch_start(&mut self, pos: Pos2, now: Instant) -> bool {
        if !self.is_touch() {
            return false;
        }

        self.state.pos = pos;
        self.state.visible = true;
        self.touched_at = Some(now);
        true
    }

    /// Whether the last touch is still inside the fade window.
    pub fn just_touched(&self, now: Instant) -> bool {
        self.touched_at
            .is_some_and(|at| elapsed_between(at, now) < self.fade)
    }

    /// Spotlight opacity for touch devices: 1 at the touch, falling linearly to 0 when the
    /// fade window closes.
    pub fn touch_fade(&self, now: Instant) -> f32 {
        let Some(at) = self.touched_at else {
            return 0.;
        };

        let elapsed = elapsed_between(at, now);
        if elapsed >= self.fade {
            return 0.;
        }

        1. - elapsed.as_secs_f32() / self.fade.as_secs_f32()
    }

    /// Closes the fade window once it has elapsed. Returns true if it was closed by this call.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.touched_at.is_some() && !self.just_touched(now) {
            self.touched_at = None;
            return true;
        }
        false
    }

    /// Hides the pointer and cancels any pending fade.
    pub fn reset(&mut self) {
        self.state.visible = false;
        self.touched_at = None;
    }
}

fn elapsed_between(earlier: Instant, later: Instant) -> Duration {
    if later <= earlier {
        Duration::ZERO
    } else {
        later - earlier
    }
}
