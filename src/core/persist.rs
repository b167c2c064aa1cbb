use crate::core::context::AppContext;
use crate::core::models::{Article, BaseEntity, Schedule, Supplier, User};
use crate::core::repository::{Repository, Sort};
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk working snapshot: every repository, ids preserved.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

fn owned<T: BaseEntity + Clone>(repo: &Repository<T>) -> Vec<T> {
    repo.values(Sort::IdAsc).into_iter().cloned().collect()
}

fn refill<T: BaseEntity>(repo: &mut Repository<T>, items: Vec<T>) -> Result<()> {
    repo.clear();
    for item in items {
        repo.insert_with_id(item)?;
    }
    Ok(())
}

pub fn build_data_file(ctx: &AppContext) -> DataFile {
    DataFile {
        suppliers: owned(&ctx.suppliers),
        articles: owned(&ctx.articles),
        users: owned(&ctx.users),
        schedules: owned(&ctx.schedules),
    }
}

pub fn save_data(ctx: &AppContext, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let contents = serde_json::to_string_pretty(&build_data_file(ctx))?;
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}

fn read_data_file(path: &Path) -> Result<DataFile> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Replace every repository with the file's contents. Nothing changes if the file is unreadable;
/// a duplicate id leaves the repositories cleared.
pub fn load_data(ctx: &mut AppContext, path: &Path) -> Result<()> {
    let file = read_data_file(path)?;
    refill(&mut ctx.suppliers, file.suppliers)?;
    refill(&mut ctx.articles, file.articles)?;
    refill(&mut ctx.users, file.users)?;
    refill(&mut ctx.schedules, file.schedules)?;
    Ok(())
}
