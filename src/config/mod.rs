use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    rc::Rc,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::map::Entry;
use tracing::{info, warn};

pub mod tablet;

pub use tablet::{ActiveArea, Rotation, TabletConfig};

use crate::input::buttons::{self, ButtonMapper};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize default config: {0}")]
    Defaults(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tablet: TabletConfig,
}

impl Config {
    /// Layers `content` over the defaults. Tables are merged key by key, so a file
    /// only needs to name what it changes.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut merged = toml::Value::try_from(Self::default())?;
        let mut overrides = content.parse::<toml::Value>()?;
        sanitize_button_map(&mut overrides);
        merge_value(&mut merged, overrides);

        let mut config: Config = merged.try_into()?;
        config.tablet.rebuild_button_lookup();
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

fn merge_value(base: &mut toml::Value, overrides: toml::Value) {
    match (base, overrides) {
        (toml::Value::Table(base_map), toml::Value::Table(override_map)) => {
            for (key, override_value) in override_map {
                match base_map.entry(key) {
                    Entry::Occupied(mut entry) => merge_value(entry.get_mut(), override_value),
                    Entry::Vacant(entry) => {
                        entry.insert(override_value);
                    }
                }
            }
        }
        (base_value, override_value) => {
            *base_value = override_value;
        }
    }
}

/// Rewrites `[tablet.map]` keys to one spelling per button, so `tip` in a file
/// replaces the default `Tip` during the merge instead of sitting next to it.
fn sanitize_button_map(value: &mut toml::Value) {
    let Some(toml::Value::Table(tablet)) = value.get_mut("tablet") else {
        return;
    };
    match tablet.get_mut("map") {
        Some(toml::Value::Table(map)) => {
            for (key, target) in std::mem::take(map) {
                if !matches!(target, toml::Value::String(_)) {
                    warn!(key = %key, "ignoring tablet map entry with non-string target");
                    continue;
                }
                let canonical =
                    buttons::parse_tool_button(&key).and_then(buttons::tool_button_name);
                let key = match canonical {
                    Some(name) => name.to_string(),
                    None => key,
                };
                if map.insert(key.clone(), target).is_some() {
                    warn!(key = %key, "duplicate tablet map entry; last value wins");
                }
            }
        }
        Some(_) => {
            warn!("ignoring malformed tablet.map table");
            tablet.remove("map");
        }
        None => {}
    }
}

/// Live configuration shared with the input handlers.
///
/// Clones share the same values; a reload is seen by the very next event.
/// Confined to the event thread.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    inner: Rc<RefCell<Config>>,
}

impl ConfigStore {
    pub fn new(config: Config) -> Self {
        Self {
            inner: Rc::new(RefCell::new(config)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&Config) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub fn replace(&self, config: Config) -> Config {
        self.inner.replace(config)
    }

    /// Re-reads `path`. On failure the current values stay in place.
    pub fn reload(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        match Config::load(path) {
            Ok(config) => {
                info!(path = %path.display(), "reloaded config");
                self.replace(config);
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), "keeping current config: {err}");
                Err(err)
            }
        }
    }
}

impl ButtonMapper for ConfigStore {
    fn mapped_button(&self, raw: u32) -> Option<u32> {
        self.with(|config| config.tablet.mapped_button(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::buttons::{
        BTN_BACK, BTN_LEFT, BTN_MIDDLE, BTN_RIGHT, BTN_STYLUS, BTN_STYLUS2, BTN_TOOL_PEN,
    };

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert!(config.tablet.area.is_unset());
        assert_eq!(config.tablet.rotation, Rotation::None);
        assert_eq!(config.tablet.mapped_button(BTN_TOOL_PEN), Some(BTN_LEFT));
    }

    #[test]
    fn tablet_section_overrides_defaults() {
        let overrides = r#"
            [tablet]
            rotate = 270

            [tablet.area]
            x = 10
            width = 80.5

            [tablet.map]
            Stylus2 = "Back"
            Stylus = "none"
        "#;

        let config = Config::from_toml_str(overrides).expect("config should deserialize");
        assert_eq!(config.tablet.rotation, Rotation::Rotate270);
        assert_eq!(config.tablet.area, ActiveArea::new(10.0, 0.0, 80.5, 0.0));
        assert_eq!(config.tablet.mapped_button(BTN_STYLUS2), Some(BTN_BACK));
        assert_eq!(config.tablet.mapped_button(BTN_STYLUS), None);
        // untouched defaults survive the merge
        assert_eq!(config.tablet.mapped_button(BTN_TOOL_PEN), Some(BTN_LEFT));
    }

    #[test]
    fn unsupported_rotation_falls_back_to_none() {
        for rotate in ["45", "-90", "90.5", "\"ninety\""] {
            let config = Config::from_toml_str(&format!("[tablet]\nrotate = {rotate}")).unwrap();
            assert_eq!(config.tablet.rotation, Rotation::None, "rotate = {rotate}");
        }
        let config = Config::from_toml_str("[tablet]\nrotate = 90.0").unwrap();
        assert_eq!(config.tablet.rotation, Rotation::Rotate90);
    }

    #[test]
    fn lowercase_none_disables_a_default_mapping() {
        let overrides = r#"
            [tablet.map]
            tip = "None"
            STYLUS = "none"
        "#;

        let config = Config::from_toml_str(overrides).unwrap();
        assert_eq!(config.tablet.mapped_button(BTN_TOOL_PEN), None);
        assert_eq!(config.tablet.mapped_button(BTN_STYLUS), None);
        assert_eq!(config.tablet.mapped_button(BTN_STYLUS2), Some(BTN_MIDDLE));
        assert!(config.tablet.map.keys().all(|key| key != "tip" && key != "STYLUS"));
    }

    #[test]
    fn lowercase_key_remaps_a_default() {
        let config = Config::from_toml_str("[tablet.map]\nstylus = \"Back\"").unwrap();
        assert_eq!(config.tablet.mapped_button(BTN_STYLUS), Some(BTN_BACK));
        assert_eq!(config.tablet.map.get("Stylus").map(String::as_str), Some("Back"));
    }

    #[test]
    fn non_string_map_targets_are_skipped() {
        let overrides = r#"
            [tablet.map]
            Stylus = ["Left", "Right"]
            Stylus2 = "Left"
        "#;

        let config = Config::from_toml_str(overrides).unwrap();
        assert_eq!(config.tablet.mapped_button(BTN_STYLUS), Some(BTN_RIGHT));
        assert_eq!(config.tablet.mapped_button(BTN_STYLUS2), Some(BTN_LEFT));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(
            Config::from_toml_str("[tablet\nrotate = 90"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn store_clones_share_values() {
        let store = ConfigStore::default();
        let reader = store.clone();

        let mut config = Config::default();
        config.tablet.rotation = Rotation::Rotate180;
        store.replace(config);

        assert_eq!(reader.with(|c| c.tablet.rotation), Rotation::Rotate180);
    }

    #[test]
    fn failed_reload_keeps_current_values() {
        let mut config = Config::default();
        config.tablet.rotation = Rotation::Rotate90;
        let store = ConfigStore::new(config);

        let err = store.reload("/nonexistent/otto-tablet.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert_eq!(store.with(|c| c.tablet.rotation), Rotation::Rotate90);
    }

    #[test]
    fn reload_picks_up_file_changes() {
        let path = std::env::temp_dir().join(format!("otto-tablet-{}.toml", std::process::id()));
        std::fs::write(&path, "[tablet]\nrotate = 180\n").unwrap();

        let store = ConfigStore::default();
        store.reload(&path).unwrap();
        assert_eq!(store.with(|c| c.tablet.rotation), Rotation::Rotate180);

        std::fs::remove_file(&path).unwrap();
    }
}
