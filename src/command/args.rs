use crate::core::types::Date;
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumString};

/// Options that take no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Flag {
    Help,
    Yes,
    Delete,
}

/// Tokens after the command name: positionals, `--name value` options and bare flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandArgs {
    positional: Vec<String>,
    options: Vec<(String, String)>,
    flags: Vec<Flag>,
}

impl CommandArgs {
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let mut parsed = Self::default();
        let mut iter = tokens.iter().map(|t| t.as_ref());
        while let Some(token) = iter.next() {
            let Some(name) = token.strip_prefix("--") else {
                parsed.positional.push(token.to_string());
                continue;
            };
            if let Ok(flag) = Flag::from_str(name) {
                parsed.flags.push(flag);
                continue;
            }
            let value = iter
                .next()
                .filter(|v| !v.starts_with("--"))
                .ok_or_else(|| Error::parse(format!("Missing value for --{name}")))?;
            parsed.options.push((name.to_ascii_lowercase(), value.to_string()));
        }
        Ok(parsed)
    }

    pub fn has(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn positional_count(&self) -> usize {
        self.positional.len()
    }

    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|(k, _)| k.as_str())
    }

    pub fn positional(&self, idx: usize) -> Option<&str> {
        self.positional.get(idx).map(String::as_str)
    }

    pub fn require(&self, idx: usize, what: &str) -> Result<&str> {
        self.positional(idx)
            .ok_or_else(|| Error::parse(format!("Missing {what}.")))
    }

    /// Last occurrence wins.
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn int_at(&self, idx: usize, what: &str) -> Result<i32> {
        parse_int(self.require(idx, what)?, what)
    }

    pub fn date_at(&self, idx: usize, what: &str) -> Result<NaiveDate> {
        Ok(Date::try_from_str(self.require(idx, what)?)?.0)
    }

    pub fn int_option(&self, name: &str) -> Result<Option<i32>> {
        self.option(name).map(|v| parse_int(v, name)).transpose()
    }

    pub fn float_option(&self, name: &str) -> Result<Option<f64>> {
        self.option(name)
            .map(|v| {
                v.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|x| x.is_finite())
                    .ok_or_else(|| Error::parse(format!("Invalid {name}: '{v}'.")))
            })
            .transpose()
    }

    pub fn date_option(&self, name: &str) -> Result<Option<NaiveDate>> {
        self.option(name)
            .map(|v| Date::try_from_str(v).map(|d| d.0))
            .transpose()
    }
}

fn parse_int(raw: &str, what: &str) -> Result<i32> {
    raw.trim()
        .parse()
        .map_err(|_| Error::parse(format!("Invalid {what}: '{}'.", raw.trim())))
}
