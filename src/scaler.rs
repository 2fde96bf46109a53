use std::{collections::BTreeMap, time::Duration};

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::{
    easing::CubicBezier,
    geometry::{distance_to_rect, proximity_scale},
    scene::{ElementId, Scene},
    settings::SettingsProximity,
};

/// How a new scale value should be approached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub duration: Duration,
    pub easing: CubicBezier,
}

impl Transition {
    pub fn ease_out(duration: Duration) -> Self {
        Self {
            duration,
            easing: CubicBezier::EASE_OUT,
        }
    }
}

/// Desired scale for one element, to be applied by the rendering adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleChange {
    pub id: ElementId,
    pub scale: f32,
    pub transition: Transition,
}

impl ScaleChange {
    pub fn is_reset(&self) -> bool {
        self.scale == 1.
    }
}

/// Magnifies hero text elements close to the pointer.
///
/// Keeps a scaled marker per element so that elements are reset exactly once after the
/// pointer moves away.
#[derive(Debug, Clone)]
pub struct ProximityScaler {
    radius: f32,
    boost: f32,
    transition: Transition,
    scaled: BTreeMap<ElementId, f32>,
}

impl Default for ProximityScaler {
    fn default() -> Self {
        Self::new(&SettingsProximity::default())
    }
}

impl ProximityScaler {
    pub fn new(settings: &SettingsProximity) -> Self {
        Self {
            radius: settings.radius,
            boost: settings.max_boost,
            transition: Transition::ease_out(settings.transition()),
            scaled: BTreeMap::new(),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Current scale of an element, 1 when it isn't marked scaled.
    pub fn scale_of(&self, id: ElementId) -> f32 {
        self.scaled.get(&id).copied().unwrap_or(1.)
    }

    pub fn is_scaled(&self, id: ElementId) -> bool {
        self.scaled.contains_key(&id)
    }

    pub fn scaled_count(&self) -> usize {
        self.scaled.len()
    }

    /// Runs one scaling pass for a pointer at `pos`.
    ///
    /// Outside the hero region every scaled element is reset. Inside it, each candidate is
    /// scaled by its distance to the pointer, and previously scaled candidates that fell out
    /// of the radius are reset. Pages without a hero are skipped.
    pub fn on_pointer_move(
        &mut self,
        pos: Pos2,
        scene: &(impl Scene + ?Sized),
    ) -> Vec<ScaleChange> {
        let Some(elements) = scene.hero_elements() else {
            return Vec::new();
        };

        let in_hero = scene
            .element_at(pos)
            .is_some_and(|element| scene.in_hero(element));
        if !in_hero {
            return self.reset_all();
        }

        let mut changes = Vec::new();
        for el in elements.iter().filter(|el| el.is_scale_candidate()) {
            let distance = distance_to_rect(pos, el.rect);
            match proximity_scale(distance, self.radius, self.boost) {
                Some(scale) => {
                    self.scaled.insert(el.id, scale);
                    changes.push(self.change(el.id, scale));
                    log::trace!("scale {:?} to {scale:.3} at distance {distance:.1}", el.id);
                }
                None => {
                    if self.scaled.remove(&el.id).is_some() {
                        changes.push(self.change(el.id, 1.));
                        log::trace!("reset {:?} at distance {distance:.1}", el.id);
                    }
                }
            }
        }

        changes
    }

    /// Resets every element currently marked scaled.
    pub fn reset_all(&mut self) -> Vec<ScaleChange> {
        let scaled = std::mem::take(&mut self.scaled);
        scaled.into_keys().map(|id| self.change(id, 1.)).collect()
    }

    /// Resets every text element of the hero region regardless of its marker, plus anything
    /// still marked that has left the scene.
    pub fn force_reset(&mut self, scene: &(impl Scene + ?Sized)) -> Vec<ScaleChange> {
        let mut changes: Vec<ScaleChange> = scene
            .hero_elements()
            .unwrap_or_default()
            .iter()
            .filter(|el| el.is_text())
            .map(|el| {
                self.scaled.remove(&el.id);
                self.change(el.id, 1.)
            })
            .collect();

        changes.extend(self.reset_all());
        changes
    }

    fn change(&self, id: ElementId, scale: f32) -> ScaleChange {
        ScaleChange {
            id,
            scale,
            transition: self.transition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ElementKind, SceneElement, StaticScene};
    use egui::{vec2, Rect};

    const HERO: ElementId = ElementId(1);
    const HEADING: ElementId = ElementId(2);
    const BIO: ElementId = ElementId(3);
    const GITHUB: ElementId = ElementId(4);
    const OUTSIDE: ElementId = ElementId(9);

    fn scene() -> StaticScene {
        StaticScene::new()
            .with_hero(HERO, Rect::from_min_size(Pos2::ZERO, vec2(1000., 600.)))
            .with_hero_element(SceneElement::new(
                HEADING,
                ElementKind::Heading(1),
                Rect::from_min_size(Pos2::new(100., 100.), vec2(300., 60.)),
            ))
            .with_hero_element(SceneElement::new(
                BIO,
                ElementKind::Paragraph,
                Rect::from_min_size(Pos2::new(100., 400.), vec2(600., 100.)),
            ))
            .with_hero_element(
                SceneElement::new(
                    GITHUB,
                    ElementKind::Span,
                    Rect::from_min_size(Pos2::new(100., 170.), vec2(80., 20.)),
                )
                .with_link("https://github.com/someone"),
            )
            .with_element(
                OUTSIDE,
                Rect::from_min_size(Pos2::new(0., 600.), vec2(1000., 600.)),
            )
    }

    #[test]
    fn test_scales_near_elements_only() {
        let mut scaler = ProximityScaler::default();
        let scene = scene();

        // 10 units below the heading
        let changes = scaler.on_pointer_move(Pos2::new(200., 170.), &scene);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].id, HEADING);
        assert!((changes[0].scale - (1. + 0.1 * 66. / 76.)).abs() < 1e-5);
        assert_eq!(changes[0].transition.duration, Duration::from_millis(750));
        assert!(scaler.is_scaled(HEADING));
        assert!(!scaler.is_scaled(BIO));
        // links to code hosting never scale
        assert!(!scaler.is_scaled(GITHUB));
    }

    #[test]
    fn test_pointer_inside_element_gets_max_scale() {
        let mut scaler = ProximityScaler::default();
        scaler.on_pointer_move(Pos2::new(200., 120.), &scene());
        assert_eq!(scaler.scale_of(HEADING), 1.1);
    }

    #[test]
    fn test_resets_once_when_out_of_radius() {
        let mut scaler = ProximityScaler::default();
        let scene = scene();
        scaler.on_pointer_move(Pos2::new(200., 170.), &scene);

        let changes = scaler.on_pointer_move(Pos2::new(800., 300.), &scene);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].id, HEADING);
        assert!(changes[0].is_reset());
        assert!(!scaler.is_scaled(HEADING));

        let changes = scaler.on_pointer_move(Pos2::new(800., 300.), &scene);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_scale_rounding_to_one_is_not_marked() {
        let mut scaler = ProximityScaler::default();
        let scene = scene();
        let edge = Pos2::new(100. - 75.99999, 130.);

        assert!(scaler.on_pointer_move(edge, &scene).is_empty());
        assert!(!scaler.is_scaled(HEADING));

        // a marked heading is reset and unmarked at the same spot
        scaler.on_pointer_move(Pos2::new(200., 170.), &scene);
        let changes = scaler.on_pointer_move(edge, &scene);
        assert_eq!(changes.len(), 1);
        assert!(changes[0].is_reset());
        assert!(!scaler.is_scaled(HEADING));
    }

    #[test]
    fn test_leaving_hero_resets_marked() {
        let mut scaler = ProximityScaler::default();
        let scene = scene();
        scaler.on_pointer_move(Pos2::new(200., 170.), &scene);
        scaler.on_pointer_move(Pos2::new(300., 390.), &scene);
        assert_eq!(scaler.scaled_count(), 1);

        let changes = scaler.on_pointer_move(Pos2::new(200., 700.), &scene);
        assert_eq!(changes.len(), 1);
        assert!(changes.iter().all(ScaleChange::is_reset));
        assert_eq!(scaler.scaled_count(), 0);
        assert_eq!(scaler.scale_of(BIO), 1.);
    }

    #[test]
    fn test_no_hero_skips_pass() {
        let mut scaler = ProximityScaler::default();
        let scene = StaticScene::new().with_element(
            OUTSIDE,
            Rect::from_min_size(Pos2::ZERO, vec2(100., 100.)),
        );
        assert!(scaler.on_pointer_move(Pos2::new(10., 10.), &scene).is_empty());
    }

    #[test]
    fn test_force_reset_touches_every_text_element() {
        let mut scaler = ProximityScaler::default();
        let scene = scene();
        scaler.on_pointer_move(Pos2::new(200., 170.), &scene);

        let changes = scaler.force_reset(&scene);
        let ids: Vec<_> = changes.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![HEADING, BIO, GITHUB]);
        assert!(changes.iter().all(ScaleChange::is_reset));
        assert_eq!(scaler.scaled_count(), 0);
    }

    #[test]
    fn test_force_reset_includes_departed_elements() {
        let mut scaler = ProximityScaler::default();
        scaler.on_pointer_move(Pos2::new(200., 170.), &scene());

        let changes = scaler.force_reset(&StaticScene::new());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].id, HEADING);
    }
}
