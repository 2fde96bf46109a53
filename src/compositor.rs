use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::{
    pointer::{InputClass, PointerState},
    section::SectionId,
    settings::SettingsCursor,
    theme::Theme,
};

/// Look of a spotlight layer and the theme that turns it on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotlightStyle {
    /// Theme in which this layer is shown
    pub trigger: Theme,

    /// Radius of the gradient circle
    pub radius: f32,

    /// Unmultiplied rgba color at the center
    pub color: [u8; 4],

    /// Fraction of the radius at which the gradient reaches full transparency
    pub fade_stop: f32,
}

impl SpotlightStyle {
    /// Faint white glow on dark pages.
    pub fn dark() -> Self {
        Self {
            trigger: Theme::Dark,
            radius: 600.,
            color: [255, 255, 255, 20],
            fade_stop: 0.8,
        }
    }

    /// Tight grey shade on light pages.
    pub fn light() -> Self {
        Self {
            trigger: Theme::Light,
            radius: 480.,
            color: [141, 141, 141, 43],
            fade_stop: 0.2,
        }
    }
}

/// Everything the compositor derives its output from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositorInputs {
    pub theme: Theme,
    pub section: SectionId,
    pub pointer: PointerState,
    pub class: InputClass,
    /// A touch happened within the fade window
    pub just_touched: bool,
    /// Spotlight opacity from the touch fade, ignored on pointer devices
    pub touch_fade: f32,
}

impl CompositorInputs {
    pub fn is_touch(&self) -> bool {
        self.class == InputClass::Touch
    }
}

/// A spotlight to draw: radial gradient centered on the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotlightVisual {
    pub trigger: Theme,
    pub center: Pos2,
    pub radius: f32,
    pub color: [u8; 4],
    pub fade_stop: f32,
    /// Overall layer opacity in `0..=1`
    pub opacity: f32,
}

/// The custom cursor marker to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorVisual {
    /// Pointer position, the geometric center of the marker
    pub center: Pos2,
    /// Marker box, offset by half its size from the pointer
    pub rect: Rect,
    pub ring_width: f32,
    pub color: [u8; 4],
}

/// Declarative description of the overlay for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    /// Visible spotlight layers; never more than one
    pub spotlights: Vec<SpotlightVisual>,
    pub cursor: Option<CursorVisual>,
    /// The native pointer must be hidden
    pub suppress_native_cursor: bool,
}

/// Spotlight layer parameterized by its trigger theme.
///
/// Layers with different triggers are mutually exclusive: the page has exactly one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectCompositor {
    style: SpotlightStyle,
}

impl EffectCompositor {
    pub fn new(style: SpotlightStyle) -> Self {
        Self { style }
    }

    pub fn trigger(&self) -> Theme {
        self.style.trigger
    }

    pub fn style(&self) -> &SpotlightStyle {
        &self.style
    }

    /// Theme matches the trigger and the home section is active. Also gates proximity scaling.
    pub fn is_active(&self, inputs: &CompositorInputs) -> bool {
        inputs.theme == self.style.trigger && inputs.section == SectionId::Home
    }

    pub fn spotlight(&self, inputs: &CompositorInputs) -> Option<SpotlightVisual> {
        if !self.is_active(inputs) {
            return None;
        }
        if inputs.is_touch() && !inputs.just_touched {
            return None;
        }

        let opacity = if inputs.is_touch() {
            inputs.touch_fade.clamp(0., 1.)
        } else {
            1.
        };

        Some(SpotlightVisual {
            trigger: self.style.trigger,
            center: inputs.pointer.pos,
            radius: self.style.radius,
            color: self.style.color,
            fade_stop: self.style.fade_stop,
            opacity,
        })
    }
}

/// Cursor marker for pointer devices once the pointer has been seen.
pub fn cursor(inputs: &CompositorInputs, settings: &SettingsCursor) -> Option<CursorVisual> {
    if !inputs.pointer.visible || inputs.is_touch() {
        return None;
    }

    let center = inputs.pointer.pos;
    let half = Vec2::splat(settings.size / 2.);

    Some(CursorVisual {
        center,
        rect: Rect::from_min_max(center - half, center + half),
        ring_width: settings.ring_width,
        color: settings.color(inputs.theme),
    })
}
