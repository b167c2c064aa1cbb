pub mod access;
pub mod aliases;
pub mod booking;
pub mod cli;
pub mod context;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod models;
pub mod persist;
pub mod repository;
pub mod status;
pub mod transaction;
pub mod types;
