use std::{
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
};

use serde::{Deserialize, Serialize};

/// Key under which the theme preference is persisted.
pub const THEME_KEY: &str = "theme";

/// Page color theme. Also used as the trigger mode of a spotlight layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only provider of the current theme.
///
/// Whoever owns the flag notifies watchers of mutations; the provider is only read.
pub trait ThemeSource {
    fn theme(&self) -> Theme;
}

impl<F: Fn() -> Theme> ThemeSource for F {
    fn theme(&self) -> Theme {
        self()
    }
}

/// Shared theme flag, the equivalent of the dark marker on the document root.
///
/// Clones observe the same flag. Every write bumps a generation counter, even when the value
/// doesn't change, so hosts can forward each mutation to watchers.
#[derive(Debug, Clone, Default)]
pub struct SharedTheme {
    dark: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
}

impl SharedTheme {
    pub fn new(theme: Theme) -> Self {
        let flag = Self::default();
        flag.dark.store(theme.is_dark(), Ordering::Relaxed);
        flag
    }

    pub fn set(&self, theme: Theme) {
        self.dark.store(theme.is_dark(), Ordering::Relaxed);
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of writes so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }
}

impl ThemeSource for SharedTheme {
    fn theme(&self) -> Theme {
        Theme::from_dark(self.dark.load(Ordering::Relaxed))
    }
}

/// Passive observer of a [`ThemeSource`].
pub struct ThemeWatcher {
    source: Box<dyn ThemeSource>,
    current: Theme,
}

impl fmt::Debug for ThemeWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeWatcher")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl ThemeWatcher {
    /// Reads the theme once.
    pub fn new(source: Box<dyn ThemeSource>) -> Self {
        let current = source.theme();
        Self { source, current }
    }

    pub fn theme(&self) -> Theme {
        self.current
    }

    /// Re-reads the source after a mutation. Returns true if the theme changed.
    pub fn on_mutation(&mut self) -> bool {
        let next = self.source.theme();
        let changed = next != self.current;
        self.current = next;
        changed
    }
}

/// Key/value storage for the persisted theme preference.
pub trait ThemeStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// [`ThemeStore`] kept in memory, for tests and hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    values: HashMap<String, String>,
}

impl ThemeStore for MemoryThemeStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Writes the shared theme flag and persists the preference.
///
/// The page starts light unless the store explicitly holds `"dark"`.
#[derive(Debug)]
pub struct ThemeToggle<S: ThemeStore> {
    store: S,
    flag: SharedTheme,
}

impl<S: ThemeStore> ThemeToggle<S> {
    /// Applies the stored preference to `flag`.
    pub fn load(store: S, flag: SharedTheme) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|v| Theme::parse(&v))
            .unwrap_or_default();
        flag.set(theme);

        log::debug!("theme loaded: {theme}");

        Self { store, flag }
    }

    pub fn theme(&self) -> Theme {
        self.flag.theme()
    }

    pub fn flag(&self) -> &SharedTheme {
        &self.flag
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Flips the theme and persists the new value.
    pub fn toggle(&mut self) -> Theme {
        let next = self.flag.theme().toggled();
        self.flag.set(next);
        self.store.set(THEME_KEY, next.as_str());

        log::debug!("theme toggled to {next}");

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watcher_reads_on_mutation_only() {
        let flag = SharedTheme::new(Theme::Light);
        let mut watcher = ThemeWatcher::new(Box::new(flag.clone()));
        assert_eq!(watcher.theme(), Theme::Light);

        flag.set(Theme::Dark);
        assert_eq!(watcher.theme(), Theme::Light);

        assert!(watcher.on_mutation());
        assert_eq!(watcher.theme(), Theme::Dark);

        assert!(!watcher.on_mutation());
        assert_eq!(watcher.theme(), Theme::Dark);
    }

    #[test]
    fn test_closure_source() {
        let watcher = ThemeWatcher::new(Box::new(|| Theme::Dark));
        assert_eq!(watcher.theme(), Theme::Dark);
    }

    #[test]
    fn test_generation_counts_every_write() {
        let flag = SharedTheme::new(Theme::Dark);
        let start = flag.generation();
        flag.set(Theme::Dark);
        flag.set(Theme::Dark);
        assert_eq!(flag.generation(), start + 2);
    }

    #[test]
    fn test_toggle_defaults_to_light() {
        let toggle = ThemeToggle::load(MemoryThemeStore::default(), SharedTheme::default());
        assert_eq!(toggle.theme(), Theme::Light);

        let mut store = MemoryThemeStore::default();
        store.set(THEME_KEY, "sepia");
        let toggle = ThemeToggle::load(store, SharedTheme::default());
        assert_eq!(toggle.theme(), Theme::Light);
    }

    #[test]
    fn test_toggle_restores_and_persists() {
        let mut store = MemoryThemeStore::default();
        store.set(THEME_KEY, "dark");

        let flag = SharedTheme::default();
        let mut toggle = ThemeToggle::load(store, flag.clone());
        assert_eq!(flag.theme(), Theme::Dark);

        assert_eq!(toggle.toggle(), Theme::Light);
        assert_eq!(flag.theme(), Theme::Light);
        assert_eq!(toggle.store().get(THEME_KEY).as_deref(), Some("light"));

        assert_eq!(toggle.toggle(), Theme::Dark);
        assert_eq!(toggle.store().get(THEME_KEY).as_deref(), Some("dark"));
    }
}
