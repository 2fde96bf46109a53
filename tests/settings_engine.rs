use egui::{pos2, vec2, Rect};
use egui_spotlight::{
    DeviceCapabilities, EffectsEngine, ElementId, ElementKind, SceneElement, SectionId,
    SettingsEffects, SharedTheme, StaticScene, Theme,
};
use instant::Instant;

fn page() -> StaticScene {
    StaticScene::new()
        .with_section(
            SectionId::Home,
            Rect::from_min_size(pos2(0., 0.), vec2(1000., 900.)),
        )
        .with_hero(
            ElementId(1),
            Rect::from_min_size(pos2(0., 0.), vec2(1000., 700.)),
        )
        .with_hero_element(SceneElement::new(
            ElementId(2),
            ElementKind::Heading(1),
            Rect::from_min_size(pos2(100., 100.), vec2(300., 60.)),
        ))
}

fn mount(json: &str, theme: Theme) -> EffectsEngine {
    let settings = SettingsEffects::from_json(json).unwrap();
    EffectsEngine::mount(
        settings,
        DeviceCapabilities::default(),
        Box::new(SharedTheme::new(theme)),
        &page(),
    )
}

#[test]
fn radius_from_json_limits_scaling() {
    let mut engine = mount(r#"{"proximity":{"radius":20.0,"max_boost":0.2}}"#, Theme::Dark);

    // 30 units away, outside the configured radius
    assert!(engine.on_pointer_move(pos2(200., 190.), &page()).is_empty());

    let changes = engine.on_pointer_move(pos2(200., 130.), &page());
    assert_eq!(changes.len(), 1);
    assert!((changes[0].scale - 1.2).abs() < 1e-6);
}

#[test]
fn single_spotlight_variant() {
    let json = r#"{"spotlights":[{"trigger":"dark","radius":600.0,"color":[255,255,255,20],"fade_stop":0.8}]}"#;

    let mut light = mount(json, Theme::Light);
    assert!(light.on_pointer_move(pos2(200., 130.), &page()).is_empty());
    assert!(light.visual_state(Instant::now()).spotlights.is_empty());

    let mut dark = mount(json, Theme::Dark);
    assert_eq!(dark.on_pointer_move(pos2(200., 130.), &page()).len(), 1);
    assert_eq!(dark.visual_state(Instant::now()).spotlights.len(), 1);
}

#[test]
fn cursor_follows_theme_colors() {
    let json = r#"{"cursor":{"size":10.0,"color_dark":[1,2,3,4],"color_light":[5,6,7,8]}}"#;

    let mut engine = mount(json, Theme::Light);
    engine.on_pointer_move(pos2(500., 500.), &page());
    let cursor = engine.visual_state(Instant::now()).cursor.unwrap();
    assert_eq!(cursor.color, [5, 6, 7, 8]);
    assert_eq!(cursor.rect.width(), 10.);
    assert_eq!(cursor.rect.center(), pos2(500., 500.));
}

#[test]
fn invalid_settings_are_rejected() {
    assert!(SettingsEffects::from_json(r#"{"touch":{"fade_millis":0}}"#).is_err());
    assert!(SettingsEffects::from_json(r#"{"section":{"order":[]}}"#).is_err());
}
