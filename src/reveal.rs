use std::{collections::HashMap, time::Duration};

use egui::{Rect, Vec2};
use instant::Instant;
use serde::{Deserialize, Serialize};

use crate::{easing::CubicBezier, scene::ElementId};

const VIEWPORT_MARGIN: f32 = 100.;
const TRAVEL: f32 = 40.;
const DURATION: Duration = Duration::from_millis(700);

/// Direction a block travels while revealing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealDirection {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl RevealDirection {
    /// Offset from the resting position the block starts at.
    pub fn offset(self, travel: f32) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0., travel),
            Self::Down => Vec2::new(0., -travel),
            Self::Left => Vec2::new(travel, 0.),
            Self::Right => Vec2::new(-travel, 0.),
        }
    }
}

/// How a block should be drawn at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFrame {
    pub opacity: f32,
    pub offset: Vec2,
}

impl RevealFrame {
    pub const SETTLED: Self = Self {
        opacity: 1.,
        offset: Vec2::ZERO,
    };

    pub fn is_settled(&self) -> bool {
        *self == Self::SETTLED
    }
}

#[derive(Debug, Clone)]
struct Block {
    direction: RevealDirection,
    delay: Duration,
    seen_at: Option<Instant>,
}

/// Fades and slides content blocks in the first time they scroll into view.
///
/// A block is in view once it intersects the viewport shrunk by a fixed margin. Reveals are
/// one-shot: scrolling the block out again does not hide it.
#[derive(Debug, Clone)]
pub struct ScrollReveal {
    margin: f32,
    travel: f32,
    duration: Duration,
    easing: CubicBezier,
    blocks: HashMap<ElementId, Block>,
}

impl Default for ScrollReveal {
    fn default() -> Self {
        Self {
            margin: VIEWPORT_MARGIN,
            travel: TRAVEL,
            duration: DURATION,
            easing: CubicBezier::REVEAL,
            blocks: HashMap::new(),
        }
    }
}

impl ScrollReveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a block. Registering again keeps an already started reveal.
    pub fn register(&mut self, id: ElementId, direction: RevealDirection, delay: Duration) {
        self.blocks
            .entry(id)
            .and_modify(|block| {
                block.direction = direction;
                block.delay = delay;
            })
            .or_insert(Block {
                direction,
                delay,
                seen_at: None,
            });
    }

    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.blocks.get(&id).is_some_and(|b| b.seen_at.is_some())
    }

    /// Checks a block against the viewport. Returns true when this call started its reveal.
    pub fn observe(&mut self, id: ElementId, rect: Rect, viewport: Rect, now: Instant) -> bool {
        let Some(block) = self.blocks.get_mut(&id) else {
            return false;
        };
        if block.seen_at.is_some() {
            return false;
        }

        let area = viewport.shrink(self.margin);
        if !area.is_positive() || !area.intersects(rect) {
            return false;
        }

        block.seen_at = Some(now);
        log::trace!("reveal {id:?}");
        true
    }

    /// Opacity and offset for a block. Unknown blocks are drawn settled.
    pub fn frame(&self, id: ElementId, now: Instant) -> RevealFrame {
        let Some(block) = self.blocks.get(&id) else {
            return RevealFrame::SETTLED;
        };

        let start = block.direction.offset(self.travel);
        let Some(seen_at) = block.seen_at else {
            return RevealFrame {
                opacity: 0.,
                offset: start,
            };
        };

        let begin = seen_at + block.delay;
        if now <= begin {
            return RevealFrame {
                opacity: 0.,
                offset: start,
            };
        }

        let t = ((now - begin).as_secs_f32() / self.duration.as_secs_f32()).min(1.);
        if t >= 1. {
            return RevealFrame::SETTLED;
        }

        let eased = self.easing.apply(t);
        RevealFrame {
            opacity: eased,
            offset: start * (1. - eased),
        }
    }

    /// True while any revealed block is still moving.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.blocks
            .iter()
            .any(|(id, b)| b.seen_at.is_some() && !self.frame(*id, now).is_settled())
    }
}
