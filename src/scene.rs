use std::collections::HashMap;

use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::section::SectionId;

/// Identifier of a rendered element, stable across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl From<egui::Id> for ElementId {
    fn from(id: egui::Id) -> Self {
        Self(id.value())
    }
}

/// What kind of content an element renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Heading of level 1..=6.
    Heading(u8),
    Paragraph,
    /// Inline text run.
    Span,
    Image,
    Other,
}

impl ElementKind {
    fn is_text(self) -> bool {
        matches!(
            self,
            ElementKind::Heading(_) | ElementKind::Paragraph | ElementKind::Span
        )
    }
}

/// Link hosts whose descendants never take part in proximity scaling.
const EXCLUDED_LINK_HOSTS: [&str; 2] = ["github", "linkedin"];

/// Geometry and ancestry of a single element inside the hero region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Bounding box in viewport coordinates.
    pub rect: Rect,
    /// Element has no text content.
    pub empty: bool,
    /// Element sits inside an interactive control.
    pub inside_button: bool,
    /// Target of the closest enclosing link, if any.
    pub link: Option<String>,
}

impl SceneElement {
    pub fn new(id: ElementId, kind: ElementKind, rect: Rect) -> Self {
        Self {
            id,
            kind,
            rect,
            empty: false,
            inside_button: false,
            link: None,
        }
    }

    pub fn empty(mut self) -> Self {
        self.empty = true;
        self
    }

    pub fn inside_button(mut self) -> Self {
        self.inside_button = true;
        self
    }

    pub fn with_link(mut self, href: impl Into<String>) -> Self {
        self.link = Some(href.into());
        self
    }

    /// Text-bearing elements: headings, paragraphs and spans. Used by resets.
    pub fn is_text(&self) -> bool {
        self.kind.is_text()
    }

    /// Whether the element may be magnified by proximity to the pointer.
    ///
    /// Empty spans, images, anything inside a button and anything inside a link to a
    /// code-hosting or professional-network profile are skipped.
    pub fn is_scale_candidate(&self) -> bool {
        if !self.kind.is_text() || self.inside_button {
            return false;
        }
        if self.kind == ElementKind::Span && self.empty {
            return false;
        }
        match &self.link {
            Some(href) => !EXCLUDED_LINK_HOSTS.iter().any(|host| href.contains(host)),
            None => true,
        }
    }
}

/// Read access to the host page geometry.
///
/// Every lookup is optional: the engine silently skips anything the scene can't answer.
pub trait Scene {
    /// Bounding box of a section in viewport coordinates.
    fn section_rect(&self, section: SectionId) -> Option<Rect>;

    /// Topmost element under the given viewport position.
    fn element_at(&self, pos: Pos2) -> Option<ElementId>;

    /// Whether `element` is the hero region or one of its descendants.
    fn in_hero(&self, element: ElementId) -> bool;

    /// Elements inside the hero region, or `None` when the page has no hero.
    fn hero_elements(&self) -> Option<&[SceneElement]>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HeroRegion {
    id: Option<ElementId>,
    rect: Option<Rect>,
    elements: Vec<SceneElement>,
}

/// In-memory [`Scene`] filled by the host every frame.
#[derive(Debug, Clone, Default)]
pub struct StaticScene {
    sections: HashMap<SectionId, Rect>,
    hero: Option<HeroRegion>,
    others: Vec<(ElementId, Rect)>,
}

impl StaticScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything registered so far.
    pub fn clear(&mut self) {
        self.sections.clear();
        self.hero = None;
        self.others.clear();
    }

    pub fn set_section(&mut self, section: SectionId, rect: Rect) {
        self.sections.insert(section, rect);
    }

    pub fn with_section(mut self, section: SectionId, rect: Rect) -> Self {
        self.set_section(section, rect);
        self
    }

    /// Registers the hero container.
    pub fn set_hero(&mut self, id: ElementId, rect: Rect) {
        let hero = self.hero.get_or_insert_with(HeroRegion::default);
        hero.id = Some(id);
        hero.rect = Some(rect);
    }

    pub fn with_hero(mut self, id: ElementId, rect: Rect) -> Self {
        self.set_hero(id, rect);
        self
    }

    /// Registers an element inside the hero region. Later elements are on top.
    pub fn push_hero_element(&mut self, element: SceneElement) {
        self.hero
            .get_or_insert_with(HeroRegion::default)
            .elements
            .push(element);
    }

    pub fn with_hero_element(mut self, element: SceneElement) -> Self {
        self.push_hero_element(element);
        self
    }

    /// Registers an element outside the hero region.
    pub fn push_element(&mut self, id: ElementId, rect: Rect) {
        self.others.push((id, rect));
    }

    pub fn with_element(mut self, id: ElementId, rect: Rect) -> Self {
        self.push_element(id, rect);
        self
    }
}

impl Scene for StaticScene {
    fn section_rect(&self, section: SectionId) -> Option<Rect> {
        self.sections.get(&section).copied()
    }

    fn element_at(&self, pos: Pos2) -> Option<ElementId> {
        if let Some(hero) = &self.hero {
            if let Some(el) = hero.elements.iter().rev().find(|el| el.rect.contains(pos)) {
                return Some(el.id);
            }
            if let (Some(id), Some(rect)) = (hero.id, hero.rect) {
                if rect.contains(pos) {
                    return Some(id);
                }
            }
        }

        self.others
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(id, _)| *id)
    }

    fn in_hero(&self, element: ElementId) -> bool {
        let Some(hero) = &self.hero else {
            return false;
        };

        hero.id == Some(element) || hero.elements.iter().any(|el| el.id == element)
    }

    fn hero_elements(&self) -> Option<&[SceneElement]> {
        self.hero.as_ref().map(|hero| hero.elements.as_slice())
    }
}
