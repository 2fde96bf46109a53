mod compositor;
mod easing;
mod engine;
mod geometry;
mod pointer;
mod reveal;
mod scaler;
mod scene;
mod section;
mod settings;
mod theme;

pub mod render;

pub use self::compositor::{
    cursor, CompositorInputs, CursorVisual, EffectCompositor, SpotlightStyle, SpotlightVisual,
    VisualState,
};
pub use self::easing::CubicBezier;
pub use self::engine::{EffectsEngine, EffectsEngineBuilder, Listener, Teardown};
pub use self::geometry::{distance_to_rect, proximity_scale};
pub use self::pointer::{DeviceCapabilities, InputClass, PointerState, PointerTracker};
pub use self::reveal::{RevealDirection, RevealFrame, ScrollReveal};
pub use self::scaler::{ProximityScaler, ScaleChange, Transition};
pub use self::scene::{ElementId, ElementKind, Scene, SceneElement, StaticScene};
pub use self::section::{scroll_progress, SectionId, SectionObserver};
pub use self::settings::{
    ConfigError, SettingsCursor, SettingsEffects, SettingsProximity, SettingsSection,
    SettingsTouch,
};
pub use self::theme::{
    MemoryThemeStore, SharedTheme, Theme, ThemeSource, ThemeStore, ThemeToggle, ThemeWatcher,
    THEME_KEY,
};

#[cfg(feature = "events")]
pub mod events;
