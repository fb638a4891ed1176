use std::collections::BTreeMap;
use std::path::PathBuf;

use contact_core::PreferenceStore;
use contact_engine::AtomicFileWriter;
use serde::{Deserialize, Serialize};
use site_logging::{site_error, site_info, site_warn};

const PREFS_FILENAME: &str = ".contact_prefs.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedPrefs {
    values: BTreeMap<String, String>,
}

/// Preference store backed by a RON file in the state directory.
///
/// Read and write failures are logged and otherwise ignored; a missing or
/// unreadable file behaves like an empty store.
pub(crate) struct PreferenceFile {
    writer: AtomicFileWriter,
    prefs: PersistedPrefs,
}

impl PreferenceFile {
    pub(crate) fn load(state_dir: PathBuf) -> Self {
        let writer = AtomicFileWriter::new(state_dir);
        let prefs = match writer.read(PREFS_FILENAME) {
            Ok(Some(text)) => match ron::from_str(&text) {
                Ok(prefs) => {
                    site_info!("Loaded preferences from {:?}", writer.path_of(PREFS_FILENAME));
                    prefs
                }
                Err(err) => {
                    site_warn!("Failed to parse preferences: {}", err);
                    PersistedPrefs::default()
                }
            },
            Ok(None) => PersistedPrefs::default(),
            Err(err) => {
                site_warn!("Failed to read preferences: {}", err);
                PersistedPrefs::default()
            }
        };
        Self { writer, prefs }
    }

    fn save(&self) {
        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(&self.prefs, pretty) {
            Ok(text) => text,
            Err(err) => {
                site_error!("Failed to serialize preferences: {}", err);
                return;
            }
        };
        if let Err(err) = self.writer.write(PREFS_FILENAME, &content) {
            site_error!("Failed to write preferences: {}", err);
        }
    }
}

impl PreferenceStore for PreferenceFile {
    fn get(&self, key: &str) -> Option<String> {
        self.prefs.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.prefs.values.insert(key.to_string(), value.to_string());
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_core::{load_theme, save_theme, Theme};
    use tempfile::TempDir;

    #[test]
    fn theme_survives_reload() {
        let temp = TempDir::new().unwrap();
        let mut prefs = PreferenceFile::load(temp.path().to_path_buf());
        assert_eq!(load_theme(&prefs), Theme::Dark);

        save_theme(&mut prefs, Theme::Light);
        let reloaded = PreferenceFile::load(temp.path().to_path_buf());
        assert_eq!(load_theme(&reloaded), Theme::Light);
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(PREFS_FILENAME), "not ron {").unwrap();
        let prefs = PreferenceFile::load(temp.path().to_path_buf());
        assert_eq!(prefs.get("theme"), None);
    }
}
