mod common;

mod command;
mod config;
mod planning;
mod persist;
