pub mod models;
#[cfg(test)]
mod tests;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    ApplyModeConfigItem, CascadeModeConfigItem, ConfigItem, DayWidthConfigItem,
    FileLoggingConfigItem, PaddingConfigItem, TodayConfigItem,
};
use crate::core::types::{ApplyMode, CascadeMode};
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use chrono::{Local, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    DayWidth,
    PaddingBefore,
    PaddingAfter,
    CascadeMode,
    ApplyMode,
    Today,
    FileLoggingEnabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub day_width: DayWidthConfigItem,
    #[serde(default = "PaddingConfigItem::before")]
    pub padding_before: PaddingConfigItem,
    #[serde(default = "PaddingConfigItem::after")]
    pub padding_after: PaddingConfigItem,
    #[serde(default)]
    pub cascade_mode: CascadeModeConfigItem,
    #[serde(default)]
    pub apply_mode: ApplyModeConfigItem,
    #[serde(default)]
    pub today: TodayConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            day_width: DayWidthConfigItem::default(),
            padding_before: PaddingConfigItem::before(),
            padding_after: PaddingConfigItem::after(),
            cascade_mode: CascadeModeConfigItem::default(),
            apply_mode: ApplyModeConfigItem::default(),
            today: TodayConfigItem::default(),
            file_logging_enabled: FileLoggingConfigItem::default(),
        }
    }
}

/// One row of the `config` listing: key, description, current value.
pub type ConfigRow = (String, String, String);

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    last_change: Option<ConfigRow>,
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    /// Defaults bound to `path`; nothing is read or written until a setter runs.
    pub fn with_defaults<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            data: ConfigFile::default(),
            last_change: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn view(&self) -> &ConfigFile {
        &self.data
    }

    pub fn day_width(&self) -> u32 {
        *self.data.day_width.get_value()
    }
    pub fn padding_before(&self) -> u32 {
        *self.data.padding_before.get_value()
    }
    pub fn padding_after(&self) -> u32 {
        *self.data.padding_after.get_value()
    }
    pub fn cascade_mode(&self) -> CascadeMode {
        *self.data.cascade_mode.get_value()
    }
    pub fn apply_mode(&self) -> ApplyMode {
        *self.data.apply_mode.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    /// The configured override, else the local calendar day.
    pub fn today(&self) -> NaiveDate {
        self.data
            .today
            .get_value()
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn describe(&self, key: ConfigKey) -> (&str, String) {
        let d = &self.data;
        match key {
            ConfigKey::DayWidth => (d.day_width.description(), d.day_width.value.to_string()),
            ConfigKey::PaddingBefore => (
                d.padding_before.description(),
                d.padding_before.value.to_string(),
            ),
            ConfigKey::PaddingAfter => (
                d.padding_after.description(),
                d.padding_after.value.to_string(),
            ),
            ConfigKey::CascadeMode => (
                d.cascade_mode.description(),
                d.cascade_mode.value.to_string(),
            ),
            ConfigKey::ApplyMode => (d.apply_mode.description(), d.apply_mode.value.to_string()),
            ConfigKey::Today => (
                d.today.description(),
                d.today
                    .value
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ConfigKey::FileLoggingEnabled => (
                d.file_logging_enabled.description(),
                d.file_logging_enabled.value.to_string(),
            ),
        }
    }

    pub fn rows(&self) -> Vec<ConfigRow> {
        ConfigKey::iter()
            .map(|key| {
                let (description, value) = self.describe(key);
                (key.to_string(), description.to_string(), value)
            })
            .collect()
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = ConfigKey::from_str(key_str.trim()).map_err(|_| {
            Error::Parse(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key_str,
                valid_csv::<ConfigKey>()
            ))
        })?;
        self.set_key(key, new_value)
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let (_, old) = self.describe(key);
        self.edit(|cfg| match key {
            ConfigKey::DayWidth => cfg.day_width.set_value(new_value),
            ConfigKey::PaddingBefore => cfg.padding_before.set_value(new_value),
            ConfigKey::PaddingAfter => cfg.padding_after.set_value(new_value),
            ConfigKey::CascadeMode => cfg.cascade_mode.set_value(new_value),
            ConfigKey::ApplyMode => cfg.apply_mode.set_value(new_value),
            ConfigKey::Today => cfg.today.set_value(new_value),
            ConfigKey::FileLoggingEnabled => cfg.file_logging_enabled.set_value(new_value),
        })?;
        let (_, new) = self.describe(key);
        // stash for the caller to log
        self.last_change = Some((key.to_string(), old, new));
        Ok(())
    }

    pub fn take_last_change(&mut self) -> Option<ConfigRow> {
        self.last_change.take()
    }

    /// Apply `f` to a copy and persist; the in-memory config only changes if both succeed.
    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> Result<()>,
    {
        let mut draft = self.data.clone();
        f(&mut draft)?;
        Self::save(&self.path, &draft)?;
        self.data = draft;
        Ok(())
    }

    fn save(path: &Path, data: &ConfigFile) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| Error::Config(format!("Failed to encode config: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| Error::Config(format!("Failed to write {}: {}", path.display(), e)))
    }
}
