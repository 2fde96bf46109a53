use egui::Id;

use crate::theme::ThemeStore;

const KEY: &str = "egui_spotlight_store";

/// [`ThemeStore`] backed by egui persisted memory.
///
/// Values survive restarts when the app persists egui memory (eframe `persistence`).
#[derive(Clone)]
pub struct EguiThemeStore {
    ctx: egui::Context,
}

impl EguiThemeStore {
    pub fn new(ctx: &egui::Context) -> Self {
        Self { ctx: ctx.clone() }
    }

    fn id(key: &str) -> Id {
        Id::new(KEY).with(key)
    }
}

impl ThemeStore for EguiThemeStore {
    fn get(&self, key: &str) -> Option<String> {
        self.ctx
            .data_mut(|data| data.get_persisted::<String>(Self::id(key)))
    }

    fn set(&mut self, key: &str, value: &str) {
        self.ctx.data_mut(|data| {
            data.insert_persisted(Self::id(key), value.to_owned());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{SharedTheme, Theme, ThemeToggle, THEME_KEY};

    #[test]
    fn test_roundtrip_through_memory() {
        let ctx = egui::Context::default();
        let mut store = EguiThemeStore::new(&ctx);
        assert_eq!(store.get(THEME_KEY), None);

        store.set(THEME_KEY, "dark");
        assert_eq!(EguiThemeStore::new(&ctx).get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn test_toggle_persists() {
        let ctx = egui::Context::default();
        let flag = SharedTheme::new(Theme::Light);
        let mut toggle = ThemeToggle::load(EguiThemeStore::new(&ctx), flag.clone());
        assert_eq!(toggle.theme(), Theme::Light);

        toggle.toggle();
        let reloaded = ThemeToggle::load(EguiThemeStore::new(&ctx), flag);
        assert_eq!(reloaded.theme(), Theme::Dark);
    }
}
