use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{scene::Scene, settings::SettingsSection};

/// Named page regions, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    #[default]
    Home,
    Experience,
    Skills,
    Portfolio,
    Contact,
}

impl SectionId {
    /// Detection order used when several sections straddle the detection line.
    pub const ALL: [SectionId; 5] = [
        SectionId::Home,
        SectionId::Experience,
        SectionId::Skills,
        SectionId::Portfolio,
        SectionId::Contact,
    ];

    /// Anchor name of the section, as used in navigation links.
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::Experience => "experience",
            SectionId::Skills => "skills",
            SectionId::Portfolio => "portfolio",
            SectionId::Contact => "contact",
        }
    }

    /// Human readable title for navigation.
    pub fn title(self) -> &'static str {
        match self {
            SectionId::Home => "Home",
            SectionId::Experience => "Experience",
            SectionId::Skills => "Skills",
            SectionId::Portfolio => "Portfolio",
            SectionId::Contact => "Contact",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

/// Tracks which section straddles a horizontal detection line near the top of the viewport.
#[derive(Debug, Clone)]
pub struct SectionObserver {
    active: SectionId,
    order: Vec<SectionId>,
    detection_line: f32,
}

impl Default for SectionObserver {
    fn default() -> Self {
        Self::new(&SettingsSection::default())
    }
}

impl SectionObserver {
    pub fn new(settings: &SettingsSection) -> Self {
        Self {
            active: SectionId::default(),
            order: settings.order.clone(),
            detection_line: settings.detection_line,
        }
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    /// Re-evaluates the active section against current section geometry.
    ///
    /// The first section in detection order whose top is at or above the detection line and
    /// whose bottom is at or below it wins. Sections the scene doesn't know are skipped. When
    /// nothing matches the previous section stays active.
    pub fn observe(&mut self, scene: &(impl Scene + ?Sized)) -> SectionId {
        let line = self.detection_line;
        let found = self.order.iter().copied().find(|section| {
            scene
                .section_rect(*section)
                .is_some_and(|rect| rect.top() <= line && rect.bottom() >= line)
        });

        if let Some(section) = found {
            self.active = section;
        }

        self.active
    }
}

/// Scroll progress through the page in percent, clamped to `0..=100`.
///
/// Pages that fit in the viewport report zero.
pub fn scroll_progress(scroll_y: f32, content_height: f32, viewport_height: f32) -> f32 {
    let scrollable = content_height - viewport_height;
    if scrollable <= 0. {
        return 0.;
    }

    (scroll_y / scrollable * 100.).clamp(0., 100.)
}
