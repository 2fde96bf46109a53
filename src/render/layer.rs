use std::collections::BTreeSet;

use egui::{CursorIcon, Id, LayerId, Order, TouchPhase};
use instant::Instant;

use crate::{
    engine::{EffectsEngine, EffectsEngineBuilder, Teardown},
    pointer::DeviceCapabilities,
    scaler::ScaleChange,
    scene::{ElementId, Scene},
    section::SectionId,
    settings::SettingsEffects,
    theme::{SharedTheme, Theme, ThemeSource},
};

use super::{animation::ScaleAnimations, paint::Layers};

const LAYER_ID: &str = "egui_spotlight_overlay";

/// Runs an [`EffectsEngine`] inside an egui app.
///
/// Call [`EffectsLayer::update`] once per frame after the page has been laid out and the
/// scene describes this frame's geometry. The layer feeds egui input into the engine, follows
/// `Visuals::dark_mode` as the theme flag, and paints the overlay above all panels.
pub struct EffectsLayer {
    engine: EffectsEngine,
    theme: SharedTheme,
    generation: u64,
    animations: ScaleAnimations,
    touches: BTreeSet<u64>,
    now: Instant,
}

impl EffectsLayer {
    pub fn mount(
        ctx: &egui::Context,
        settings: SettingsEffects,
        capabilities: DeviceCapabilities,
        scene: &(impl Scene + ?Sized),
    ) -> Self {
        Self::mount_with(
            ctx,
            EffectsEngine::builder()
                .settings(settings)
                .capabilities(capabilities),
            scene,
        )
    }

    /// Mounts with a preconfigured builder, e.g. one carrying an event sink.
    pub fn mount_with(
        ctx: &egui::Context,
        builder: EffectsEngineBuilder,
        scene: &(impl Scene + ?Sized),
    ) -> Self {
        let theme = SharedTheme::new(Theme::from_dark(ctx.style().visuals.dark_mode));
        let generation = theme.generation();
        let engine = builder.mount(Box::new(theme.clone()), scene);

        Self {
            engine,
            theme,
            generation,
            animations: ScaleAnimations::default(),
            touches: BTreeSet::new(),
            now: Instant::now(),
        }
    }

    pub fn engine(&self) -> &EffectsEngine {
        &self.engine
    }

    pub fn active_section(&self) -> SectionId {
        self.engine.active_section()
    }

    /// Scale at which an element should be drawn this frame.
    pub fn scale(&self, id: impl Into<ElementId>) -> f32 {
        self.animations.scale(id.into(), self.now)
    }

    /// Processes this frame's input and paints the overlay.
    pub fn update(&mut self, ctx: &egui::Context, scene: &(impl Scene + ?Sized)) {
        self.now = Instant::now();
        let now = self.now;

        let mut changes = self.sync_theme(ctx);
        changes.extend(self.engine.on_scroll(scene));

        let events = ctx.input(|i| i.events.clone());
        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    changes.extend(self.engine.on_pointer_move(pos, scene));
                }
                egui::Event::Touch { id, phase, pos, .. } => match phase {
                    // only the first finger down records a touch point
                    TouchPhase::Start => {
                        if self.touches.is_empty() {
                            self.engine.on_touch_start(pos, now);
                        }
                        self.touches.insert(id.0);
                    }
                    TouchPhase::End | TouchPhase::Cancel => {
                        self.touches.remove(&id.0);
                    }
                    TouchPhase::Move => {}
                },
                egui::Event::PointerGone => {
                    changes.extend(self.engine.on_pointer_leave(scene));
                }
                _ => {}
            }
        }

        self.engine.tick(now);
        self.apply(&changes);
        self.paint(ctx);

        if self.animations.is_animating(now) || self.engine.is_touch_fading(now) {
            ctx.request_repaint();
        }
    }

    /// Unmounts the engine. Returned resets are also applied to the displayed scales.
    pub fn unmount(mut self, scene: &(impl Scene + ?Sized)) -> Teardown {
        let teardown = self.engine.unmount(scene);
        self.animations.apply(&teardown.reset, Instant::now());
        teardown
    }

    // the theme flag follows the egui visuals; the engine only sees the change on notify
    fn sync_theme(&mut self, ctx: &egui::Context) -> Vec<ScaleChange> {
        let theme = Theme::from_dark(ctx.style().visuals.dark_mode);
        if theme != self.theme.theme() {
            self.theme.set(theme);
        }

        let generation = self.theme.generation();
        if generation == self.generation {
            return Vec::new();
        }
        self.generation = generation;
        self.engine.on_theme_mutation()
    }

    fn apply(&mut self, changes: &[ScaleChange]) {
        if changes.is_empty() {
            return;
        }
        self.animations.apply(changes, self.now);
        self.animations.prune(self.now);
    }

    fn paint(&self, ctx: &egui::Context) {
        let state = self.engine.visual_state(self.now);
        if state.suppress_native_cursor && self.engine.pointer().visible {
            ctx.set_cursor_icon(CursorIcon::None);
        }

        let layers = Layers::from_visual_state(&state);
        if layers.is_empty() {
            return;
        }
        layers.draw(&ctx.layer_painter(LayerId::new(Order::Foreground, Id::new(LAYER_ID))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ElementKind, SceneElement, StaticScene};
    use egui::{pos2, vec2, Pos2, RawInput, Rect};

    const HEADING: ElementId = ElementId(2);

    fn scene() -> StaticScene {
        StaticScene::new()
            .with_section(
                SectionId::Home,
                Rect::from_min_size(Pos2::ZERO, vec2(1000., 800.)),
            )
            .with_hero(
                ElementId(1),
                Rect::from_min_size(Pos2::ZERO, vec2(1000., 600.)),
            )
            .with_hero_element(SceneElement::new(
                HEADING,
                ElementKind::Heading(1),
                Rect::from_min_size(pos2(100., 100.), vec2(300., 60.)),
            ))
    }

    fn frame(ctx: &egui::Context, layer: &mut EffectsLayer, events: Vec<egui::Event>) {
        let input = RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| layer.update(ctx, &scene()));
    }

    fn mount(ctx: &egui::Context) -> EffectsLayer {
        EffectsLayer::mount(
            ctx,
            SettingsEffects::default(),
            DeviceCapabilities::default(),
            &scene(),
        )
    }

    #[test]
    fn test_pointer_move_scales_heading() {
        let ctx = egui::Context::default();
        ctx.set_visuals(egui::Visuals::dark());
        let mut layer = mount(&ctx);
        assert_eq!(layer.engine().theme(), Theme::Dark);

        let moved = vec![egui::Event::PointerMoved(pos2(200., 170.))];
        frame(&ctx, &mut layer, moved);
        assert!(layer.engine().scaler().is_scaled(HEADING));
        assert!(layer.engine().pointer().visible);
    }

    #[test]
    fn test_visuals_drive_theme() {
        let ctx = egui::Context::default();
        ctx.set_visuals(egui::Visuals::light());
        let mut layer = mount(&ctx);
        assert_eq!(layer.engine().theme(), Theme::Light);

        ctx.set_visuals(egui::Visuals::dark());
        frame(&ctx, &mut layer, Vec::new());
        assert_eq!(layer.engine().theme(), Theme::Dark);
    }

    #[test]
    fn test_pointer_gone_resets() {
        let ctx = egui::Context::default();
        ctx.set_visuals(egui::Visuals::dark());
        let mut layer = mount(&ctx);

        let moved = vec![egui::Event::PointerMoved(pos2(200., 170.))];
        frame(&ctx, &mut layer, moved);
        frame(&ctx, &mut layer, vec![egui::Event::PointerGone]);
        assert_eq!(layer.engine().scaler().scaled_count(), 0);

        let teardown = layer.unmount(&scene());
        assert!(teardown.cursor_rule);
    }

    fn touch(id: u64, phase: TouchPhase, pos: Pos2) -> egui::Event {
        egui::Event::Touch {
            device_id: egui::TouchDeviceId(0),
            id: egui::TouchId(id),
            phase,
            pos,
            force: None,
        }
    }

    #[test]
    fn test_first_finger_wins() {
        let ctx = egui::Context::default();
        ctx.set_visuals(egui::Visuals::dark());
        let mut layer = EffectsLayer::mount(
            &ctx,
            SettingsEffects::default(),
            DeviceCapabilities::touch(),
            &scene(),
        );

        let both = vec![
            touch(0, TouchPhase::Start, pos2(100., 200.)),
            touch(1, TouchPhase::Start, pos2(600., 50.)),
        ];
        frame(&ctx, &mut layer, both);
        assert_eq!(layer.engine().pointer().pos, pos2(100., 200.));

        // a new touch counts again once every finger has lifted
        let lifted = vec![
            touch(0, TouchPhase::End, pos2(100., 200.)),
            touch(1, TouchPhase::Cancel, pos2(600., 50.)),
        ];
        frame(&ctx, &mut layer, lifted);
        frame(
            &ctx,
            &mut layer,
            vec![touch(2, TouchPhase::Start, pos2(300., 300.))],
        );
        assert_eq!(layer.engine().pointer().pos, pos2(300., 300.));
    }
}
