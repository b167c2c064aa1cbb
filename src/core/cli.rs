use crate::errors::{Error, Result};
use std::path::PathBuf;

/// Process arguments: global options first, then the command and its own tokens.
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub config_path: PathBuf,
    pub data_path: PathBuf,
    pub logs_dir: PathBuf,
    /// Username the command acts as.
    pub actor: Option<String>,
    pub command: Vec<String>,
}

impl CliArgs {
    pub fn from_env() -> Result<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::defaults();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config_path = Self::next_value(&mut args, "--config")?.into(),
                "--data" => parsed.data_path = Self::next_value(&mut args, "--data")?.into(),
                "--logs" => parsed.logs_dir = Self::next_value(&mut args, "--logs")?.into(),
                "--as" => parsed.actor = Some(Self::next_value(&mut args, "--as")?),
                _ => {
                    parsed.command.push(arg);
                    parsed.command.extend(args);
                    break;
                }
            }
        }
        Ok(parsed)
    }

    fn next_value<I>(args: &mut I, flag: &str) -> Result<String>
    where
        I: Iterator<Item = String>,
    {
        args.next()
            .filter(|v| !v.starts_with("--"))
            .ok_or_else(|| Error::parse(format!("Missing value for {flag}")))
    }

    fn defaults() -> Self {
        Self {
            config_path: PathBuf::from("config.json"),
            data_path: PathBuf::from("data.json"),
            logs_dir: PathBuf::from("logs"),
            actor: None,
            command: Vec::new(),
        }
    }
}
