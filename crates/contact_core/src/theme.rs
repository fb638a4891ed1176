/// Preference key the theme flag is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Reads a stored flag. Anything other than `"light"` or `"dark"` falls back to dark.
    pub fn from_preference(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggle(self) -> Self {
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

    /// Icon offered by the toggle: the sun switches away from dark, the moon away from light.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "fas fa-sun",
            Theme::Light => "fas fa-moon",
        }
    }
}

/// Key-value store holding the theme flag across sessions.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Loads the stored theme, defaulting to dark.
pub fn load_theme(store: &dyn PreferenceStore) -> Theme {
    Theme::from_preference(store.get(THEME_KEY).as_deref())
}

pub fn save_theme(store: &mut dyn PreferenceStore, theme: Theme) {
    store.set(THEME_KEY, theme.as_str());
}
