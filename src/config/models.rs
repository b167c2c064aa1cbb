use crate::core::types::{ApplyMode, Bool, CascadeMode, Date};
use crate::errors::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<(), Error>;
    fn description(&self) -> &str;
}

fn parse_count(new_value: &str, what: &str, min: u32) -> Result<u32, Error> {
    let n: u32 = new_value
        .trim()
        .parse()
        .map_err(|_| Error::Parse(format!("Invalid {what}: '{}'.", new_value.trim())))?;
    if n < min {
        return Err(Error::Parse(format!("{what} must be at least {min}.")));
    }
    Ok(n)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayWidthConfigItem {
    pub value: u32,
    pub description: String,
}

impl Default for DayWidthConfigItem {
    fn default() -> Self {
        Self {
            value: 40,
            description: "Timeline width of one day in pixels.".into(),
        }
    }
}

impl ConfigItem<u32> for DayWidthConfigItem {
    fn get_value(&self) -> &u32 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = parse_count(new_value, "day width", 1)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaddingConfigItem {
    pub value: u32,
    pub description: String,
}

impl PaddingConfigItem {
    pub fn before() -> Self {
        Self {
            value: 7,
            description: "Days shown before the earliest booking.".into(),
        }
    }

    pub fn after() -> Self {
        Self {
            value: 14,
            description: "Days shown after the latest booking.".into(),
        }
    }
}

impl ConfigItem<u32> for PaddingConfigItem {
    fn get_value(&self) -> &u32 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = parse_count(new_value, "padding", 0)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeModeConfigItem {
    pub value: CascadeMode,
    pub description: String,
}

impl Default for CascadeModeConfigItem {
    fn default() -> Self {
        Self {
            value: CascadeMode::Chain,
            description: "How a dragged booking displaces others (chain, supplier).".into(),
        }
    }
}

impl ConfigItem<CascadeMode> for CascadeModeConfigItem {
    fn get_value(&self) -> &CascadeMode {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = CascadeMode::try_from(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyModeConfigItem {
    pub value: ApplyMode,
    pub description: String,
}

impl Default for ApplyModeConfigItem {
    fn default() -> Self {
        Self {
            value: ApplyMode::Atomic,
            description: "How confirmed changes are written (atomic, sequential).".into(),
        }
    }
}

impl ConfigItem<ApplyMode> for ApplyModeConfigItem {
    fn get_value(&self) -> &ApplyMode {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = ApplyMode::try_from(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayConfigItem {
    pub value: Option<NaiveDate>,
    pub description: String,
}

impl Default for TodayConfigItem {
    fn default() -> Self {
        Self {
            value: None,
            description: "Fixed 'today' for status derivation; empty uses the clock.".into(),
        }
    }
}

impl ConfigItem<Option<NaiveDate>> for TodayConfigItem {
    fn get_value(&self) -> &Option<NaiveDate> {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        if new_value.trim().is_empty() || new_value.trim() == "-" {
            self.value = None;
            return Ok(());
        }
        self.value = Some(Date::try_from_str(new_value)?.0);
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = Bool::try_from_str(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}
