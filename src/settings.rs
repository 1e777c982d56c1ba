//! Persisted user choices (toggles, initials, end date)
//!
//! Only the calling layer reads or writes these. The transformation itself
//! receives plain [`TransformOptions`].

use crate::core::TransformOptions;
use crate::error::FormatterResult;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that overrides the settings file location
pub const SETTINGS_ENV: &str = "INVENTORY_FORMATTER_SETTINGS";

const SETTINGS_DIR: &str = "inventory-formatter";
const SETTINGS_FILE: &str = "settings.yaml";

/// Last-used form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub remove_author: bool,
    pub remove_location: bool,
    pub remove_isbn: bool,
    pub remove_edition: bool,
    pub remove_availability: bool,
    pub initials: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Settings {
    pub fn to_options(&self) -> TransformOptions {
        TransformOptions {
            remove_author: self.remove_author,
            remove_location: self.remove_location,
            remove_isbn: self.remove_isbn,
            remove_edition: self.remove_edition,
            remove_availability: self.remove_availability,
            initials: self.initials.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

/// Storage for [`Settings`], read once at startup and written on change
pub trait SettingsStore {
    fn load(&self) -> FormatterResult<Settings>;
    fn save(&self, settings: &Settings) -> FormatterResult<()>;
}

/// Settings kept in a YAML file. A missing file reads as defaults.
#[derive(Debug, Clone)]
pub struct YamlSettingsStore {
    path: PathBuf,
}

impl YamlSettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<config dir>/inventory-formatter/settings.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for YamlSettingsStore {
    fn load(&self) -> FormatterResult<Settings> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    fn save(&self, settings: &Settings) -> FormatterResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_yaml::to_string(settings)?)?;
        debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }
}

/// Non-persistent store, for callers that must not touch disk
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: RefCell<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RefCell::new(settings),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> FormatterResult<Settings> {
        Ok(self.settings.borrow().clone())
    }

    fn save(&self, settings: &Settings) -> FormatterResult<()> {
        *self.settings.borrow_mut() = settings.clone();
        Ok(())
    }
}
