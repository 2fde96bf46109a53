use egui::Pos2;
use instant::Instant;

use crate::{
    compositor::{self, CompositorInputs, EffectCompositor, VisualState},
    pointer::{DeviceCapabilities, InputClass, PointerState, PointerTracker},
    scaler::{ProximityScaler, ScaleChange},
    scene::Scene,
    section::{SectionId, SectionObserver},
    settings::SettingsEffects,
    theme::{Theme, ThemeSource, ThemeWatcher},
};

#[cfg(feature = "events")]
use crate::events::{
    Event, EventSink, PayloadElementReset, PayloadElementScaled, PayloadMounted,
    PayloadSectionChanged, PayloadThemeChanged, PayloadTouch, PayloadUnmounted,
};

/// Host events the engine subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    Scroll,
    PointerMove,
    TouchStart,
    PointerLeave,
    ThemeMutation,
}

/// What the host has to undo after [`EffectsEngine::unmount`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Teardown {
    /// Neutral transforms for every element the engine may have scaled
    pub reset: Vec<ScaleChange>,
    /// Listeners that were registered at mount
    pub listeners: Vec<Listener>,
    /// The cursor suppression rule was injected and must be removed
    pub cursor_rule: bool,
}

/// Configures and mounts an [`EffectsEngine`].
#[derive(Default)]
pub struct EffectsEngineBuilder {
    settings: SettingsEffects,
    capabilities: DeviceCapabilities,

    #[cfg(feature = "events")]
    sink: Option<Box<dyn EventSink>>,
}

impl EffectsEngineBuilder {
    pub fn settings(mut self, settings: SettingsEffects) -> Self {
        self.settings = settings;
        self
    }

    pub fn capabilities(mut self, capabilities: DeviceCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[cfg(feature = "events")]
    /// Supply a sink that will receive effect events.
    pub fn event_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Registers listeners, reads the theme and runs the first section observation.
    pub fn mount(self, theme: Box<dyn ThemeSource>, scene: &(impl Scene + ?Sized)) -> EffectsEngine {
        let settings = self.settings;
        let class = self.capabilities.classify();

        let mut listeners = vec![
            Listener::ThemeMutation,
            Listener::Scroll,
            Listener::PointerLeave,
        ];
        match class {
            InputClass::Pointer => listeners.push(Listener::PointerMove),
            InputClass::Touch => listeners.push(Listener::TouchStart),
        }

        let layers = settings
            .spotlights
            .iter()
            .cloned()
            .map(EffectCompositor::new)
            .collect();

        let mut engine = EffectsEngine {
            sections: SectionObserver::new(&settings.section),
            pointer: PointerTracker::new(class, settings.touch.fade()),
            theme: ThemeWatcher::new(theme),
            scaler: ProximityScaler::new(&settings.proximity),
            layers,
            listeners,
            cursor_rule: class == InputClass::Pointer,
            settings,

            #[cfg(feature = "events")]
            sink: self.sink,
        };
        engine.sections.observe(scene);

        log::debug!(
            "effects mounted: input {:?}, theme {}, section {}",
            class,
            engine.theme.theme(),
            engine.sections.active()
        );

        #[cfg(feature = "events")]
        engine.emit(Event::Mounted(PayloadMounted {
            class,
            theme: engine.theme.theme(),
            section: engine.sections.active(),
        }));

        engine
    }
}

/// Scroll and pointer driven visual effects: active section, custom cursor, theme triggered
/// spotlights and proximity magnification of hero text.
///
/// The engine never touches the page. Handlers return [`ScaleChange`]s and
/// [`EffectsEngine::visual_state`] describes the overlay; a rendering adapter applies both.
/// Mounting registers listeners and the cursor suppression rule, [`EffectsEngine::unmount`]
/// consumes the engine and hands back everything the host must undo.
pub struct EffectsEngine {
    settings: SettingsEffects,
    sections: SectionObserver,
    pointer: PointerTracker,
    theme: ThemeWatcher,
    scaler: ProximityScaler,
    layers: Vec<EffectCompositor>,
    listeners: Vec<Listener>,
    cursor_rule: bool,

    #[cfg(feature = "events")]
    sink: Option<Box<dyn EventSink>>,
}

impl std::fmt::Debug for EffectsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectsEngine")
            .field("section", &self.sections.active())
            .field("theme", &self.theme.theme())
            .field("pointer", &self.pointer.state())
            .field("class", &self.pointer.class())
            .field("listeners", &self.listeners)
            .field("scaled", &self.scaler.scaled_count())
            .finish_non_exhaustive()
    }
}

impl EffectsEngine {
    pub fn builder() -> EffectsEngineBuilder {
        EffectsEngineBuilder::default()
    }

    /// Mounts an engine without an event sink.
    pub fn mount(
        settings: SettingsEffects,
        capabilities: DeviceCapabilities,
        theme: Box<dyn ThemeSource>,
        scene: &(impl Scene + ?Sized),
    ) -> Self {
        Self::builder()
            .settings(settings)
            .capabilities(capabilities)
            .mount(theme, scene)
    }

    pub fn settings(&self) -> &SettingsEffects {
        &self.settings
    }

    pub fn active_section(&self) -> SectionId {
        self.sections.active()
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer.state()
    }

    pub fn input_class(&self) -> InputClass {
        self.pointer.class()
    }

    pub fn scaler(&self) -> &ProximityScaler {
        &self.scaler
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    pub fn listens_to(&self, listener: Listener) -> bool {
        self.listeners.contains(&listener)
    }

    /// The native pointer indicator is hidden while the engine is mounted on a pointer device.
    pub fn suppresses_native_cursor(&self) -> bool {
        self.cursor_rule
    }

    /// Theme matches a spotlight trigger and the home section is active.
    pub fn scaling_active(&self) -> bool {
        self.sections.active() == SectionId::Home
            && self
                .layers
                .iter()
                .any(|layer| layer.trigger() == self.theme.theme())
    }

    pub fn on_scroll(&mut self, scene: &(impl Scene + ?Sized)) -> Vec<ScaleChange> {
        if !self.listens_to(Listener::Scroll) {
            return Vec::new();
        }

        let from = self.sections.active();
        let to = self.sections.observe(scene);
        if from == to {
            return Vec::new();
        }

        log::debug!("active section {from} -> {to}");

        #[cfg(feature = "events")]
        self.emit(Event::SectionChanged(PayloadSectionChanged { from, to }));

        self.reset_if_inactive()
    }

    pub fn on_pointer_move(
        &mut self,
        pos: Pos2,
        scene: &(impl Scene + ?Sized),
    ) -> Vec<ScaleChange> {
        if !self.listens_to(Listener::PointerMove) || !self.pointer.pointer_move(pos) {
            return Vec::new();
        }

        let changes = if self.scaling_active() {
            self.scaler.on_pointer_move(pos, scene)
        } else {
            self.scaler.reset_all()
        };

        #[cfg(feature = "events")]
        self.report(&changes);

        changes
    }

    /// Records a touch and opens the spotlight fade window. Returns false when not listening.
    pub fn on_touch_start(&mut self, pos: Pos2, now: Instant) -> bool {
        if !self.listens_to(Listener::TouchStart) || !self.pointer.touch_start(pos, now) {
            return false;
        }

        #[cfg(feature = "events")]
        self.emit(Event::TouchFadeStarted(PayloadTouch {
            pos: [pos.x, pos.y],
        }));

        true
    }

    /// Pointer left the document: resets every hero element. The cursor stays visible.
    pub fn on_pointer_leave(&mut self, scene: &(impl Scene + ?Sized)) -> Vec<ScaleChange> {
        if !self.listens_to(Listener::PointerLeave) {
            return Vec::new();
        }

        let changes = self.scaler.force_reset(scene);

        #[cfg(feature = "events")]
        self.report(&changes);

        changes
    }

    /// Re-reads the theme after a mutation of the theme flag.
    pub fn on_theme_mutation(&mut self) -> Vec<ScaleChange> {
        if !self.listens_to(Listener::ThemeMutation) || !self.theme.on_mutation() {
            return Vec::new();
        }

        let theme = self.theme.theme();
        log::debug!("theme changed to {theme}");

        #[cfg(feature = "events")]
        self.emit(Event::ThemeChanged(PayloadThemeChanged { theme }));

        self.reset_if_inactive()
    }

    /// Whether a touch spotlight is still fading out. Hosts keep repainting while it is.
    pub fn is_touch_fading(&self, now: Instant) -> bool {
        self.pointer.just_touched(now)
    }

    /// Closes the touch fade window once it elapsed. Returns true if it closed on this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self.pointer.expire(now);

        #[cfg(feature = "events")]
        if expired {
            self.emit(Event::TouchFadeEnded);
        }

        expired
    }

    /// Derives the overlay from the current state.
    pub fn visual_state(&self, now: Instant) -> VisualState {
        let inputs = self.inputs(now);
        let spotlights: Vec<_> = self
            .layers
            .iter()
            .filter_map(|layer| layer.spotlight(&inputs))
            .collect();
        debug_assert!(spotlights.len() <= 1, "spotlight layers overlap");

        VisualState {
            spotlights,
            cursor: compositor::cursor(&inputs, &self.settings.cursor),
            suppress_native_cursor: self.cursor_rule,
        }
    }

    /// Unregisters everything and resets all hero elements.
    pub fn unmount(mut self, scene: &(impl Scene + ?Sized)) -> Teardown {
        let reset = self.scaler.force_reset(scene);
        self.pointer.reset();

        let teardown = Teardown {
            reset,
            listeners: std::mem::take(&mut self.listeners),
            cursor_rule: std::mem::replace(&mut self.cursor_rule, false),
        };

        log::debug!(
            "effects unmounted: {} listeners removed, {} elements reset",
            teardown.listeners.len(),
            teardown.reset.len()
        );

        #[cfg(feature = "events")]
        self.emit(Event::Unmounted(PayloadUnmounted {
            reset: teardown.reset.len(),
        }));

        teardown
    }

    fn inputs(&self, now: Instant) -> CompositorInputs {
        CompositorInputs {
            theme: self.theme.theme(),
            section: self.sections.active(),
            pointer: self.pointer.state(),
            class: self.pointer.class(),
            just_touched: self.pointer.just_touched(now),
            touch_fade: self.pointer.touch_fade(now),
        }
    }

    fn reset_if_inactive(&mut self) -> Vec<ScaleChange> {
        if self.scaling_active() {
            return Vec::new();
        }

        let changes = self.scaler.reset_all();

        #[cfg(feature = "events")]
        self.report(&changes);

        changes
    }

    #[cfg(feature = "events")]
    fn emit(&self, event: Event) {
        if let Some(sink) = &self.sink {
            sink.send(event);
        }
    }

    #[cfg(feature = "events")]
    fn report(&self, changes: &[ScaleChange]) {
        for change in changes {
            let event = if change.is_reset() {
                Event::ElementReset(PayloadElementReset { id: change.id })
            } else {
                Event::ElementScaled(PayloadElementScaled {
                    id: change.id,
                    scale: change.scale,
                })
            };
            self.emit(event);
        }
    }
}
