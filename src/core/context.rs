use crate::config::Config;
use crate::core::aliases::UserId;
use crate::core::models::{Article, Schedule, Supplier, User};
use crate::core::repository::{Repository, Sort};
use crate::errors::{Error, Result};
use crate::logging::Logger;
use std::path::PathBuf;

#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub schedules: Repository<Schedule>,
    pub suppliers: Repository<Supplier>,
    pub articles: Repository<Article>,
    pub users: Repository<User>,
    pub logger: Logger,
    pub data_path: PathBuf,
    pub logs_dir: PathBuf,
    /// Username given with `--as`; commands that write resolve it through `acting_user`.
    pub actor: Option<String>,
}

impl AppContext {
    /// Loads the config file and wires the logger; repositories start empty.
    pub fn new_with_paths(
        config_path: PathBuf,
        data_path: PathBuf,
        logs_dir: PathBuf,
    ) -> Result<Self> {
        let config = Config::load_from(&config_path)?;
        let logger = Logger::new();
        Ok(Self::with_parts(config, logger, data_path, logs_dir))
    }

    /// Context around an already built config and logger.
    pub fn with_parts(
        config: Config,
        logger: Logger,
        data_path: PathBuf,
        logs_dir: PathBuf,
    ) -> Self {
        logger.set_log_dir(&logs_dir);
        logger.set_file_logging_enabled(config.file_logging_enabled());
        Self {
            config,
            schedules: Repository::new(),
            suppliers: Repository::new(),
            articles: Repository::new(),
            users: Repository::new(),
            logger,
            data_path,
            logs_dir,
            actor: None,
        }
    }

    /// Owned copy of every schedule, in id order, for cascade computation.
    pub fn snapshot(&self) -> Vec<Schedule> {
        self.schedules
            .values(Sort::IdAsc)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn user(&self, id: UserId) -> Result<&User> {
        self.users
            .get(id)
            .map_err(|_| Error::not_found(format!("user {id}")))
    }

    pub fn user_by_name(&self, username: &str) -> Result<&User> {
        let wanted = username.trim();
        self.users
            .values(Sort::IdAsc)
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::not_found(format!("user '{wanted}'")))
    }

    pub fn acting_user(&self) -> Result<User> {
        let name = self
            .actor
            .as_deref()
            .ok_or_else(|| Error::validation("No acting user; pass --as <username>."))?;
        self.user_by_name(name).cloned()
    }

    pub fn schedule(&self, id: i32) -> Result<&Schedule> {
        self.schedules
            .get(id)
            .map_err(|_| Error::not_found(format!("schedule {id}")))
    }
}
