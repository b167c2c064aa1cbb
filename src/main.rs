use anyhow::{Context, Result};
use stitchplan::command::command_parser::CommandParser;
use stitchplan::core::cli::CliArgs;
use stitchplan::core::context::AppContext;
use stitchplan::core::persist::load_data;
use stitchplan::logging::LogTarget;

/// Parse arguments, load config and the working data; the command tokens are returned untouched.
fn start() -> Result<(AppContext, Vec<String>)> {
    let args = CliArgs::from_env()?;
    let mut ctx = AppContext::new_with_paths(args.config_path, args.data_path, args.logs_dir)
        .context("Failed to start stitchplan")?;
    ctx.actor = args.actor;

    let data_path = ctx.data_path.clone();
    if data_path.exists() {
        load_data(&mut ctx, &data_path)
            .with_context(|| format!("Failed to load working data from {}", data_path.display()))?;
    }
    Ok((ctx, args.command))
}

fn main() {
    let (mut ctx, command) = match start() {
        Ok(started) => started,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    };

    if let Err(err) = CommandParser::new().run(&mut ctx, &command) {
        ctx.logger.error(err.to_string(), LogTarget::ConsoleAndFile);
        std::process::exit(1);
    }
}
