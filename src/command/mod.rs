pub mod args;
pub mod command_parser;
pub mod commands;
mod policies;
