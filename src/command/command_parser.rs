use crate::command::args::CommandArgs;
use crate::command::commands::{
    BookCommand, CancelCommand, CheckCommand, CommandDyn, ConfigCommand, LanesCommand,
    ListCommand, MoveCommand, MoveKind, SummaryCommand,
};
use crate::core::context::AppContext;
use crate::core::types::GlobalCommand;
use crate::errors::Result;
use crate::logging::LogTarget;
use strum::IntoEnumIterator;

#[derive(Debug, Default)]
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse<'a>(&self, command: &str, args: &'a CommandArgs) -> Result<CommandDyn<'a>> {
        Ok(match GlobalCommand::try_from(command)? {
            GlobalCommand::List => Box::new(ListCommand::new(args)),
            GlobalCommand::Summary => Box::new(SummaryCommand::new(args)),
            GlobalCommand::Lanes => Box::new(LanesCommand::new(args)),
            GlobalCommand::Check => Box::new(CheckCommand::new(args)),
            GlobalCommand::Move => Box::new(MoveCommand::new(args, MoveKind::ToDate)),
            GlobalCommand::Drop => Box::new(MoveCommand::new(args, MoveKind::Pointer)),
            GlobalCommand::Book => Box::new(BookCommand::new(args)),
            GlobalCommand::Cancel => Box::new(CancelCommand::new(args)),
            GlobalCommand::Config => Box::new(ConfigCommand::new(args)),
        })
    }

    /// One usage line per command.
    pub fn overview(&self) -> String {
        let empty = CommandArgs::default();
        GlobalCommand::iter()
            .filter_map(|c| self.parse(c.as_ref(), &empty).ok())
            .map(|cmd| format!("  {}", cmd.usage()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Run `tokens[0]` with the remaining tokens; no tokens prints the overview.
    pub fn run<S: AsRef<str>>(&self, ctx: &mut AppContext, tokens: &[S]) -> Result<()> {
        let Some((name, rest)) = tokens.split_first() else {
            ctx.logger.info(
                format!(
                    "Usage: stitchplan [--config <path>] [--data <path>] [--logs <dir>] [--as <user>] <command>\n{}",
                    self.overview()
                ),
                LogTarget::ConsoleOnly,
            );
            return Ok(());
        };
        let args = CommandArgs::parse(rest)?;
        let command = self.parse(name.as_ref(), &args)?;
        command.execute(ctx)
    }
}
