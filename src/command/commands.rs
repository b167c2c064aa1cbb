use crate::command::args::{CommandArgs, Flag};
use crate::command::policies::flag_policy::{FlagDecision, FlagPolicy};
use crate::core::booking::{BookingDesk, BookingRequest};
use crate::core::context::AppContext;
use crate::core::models::{ChangeSet, Schedule};
use crate::core::persist::save_data;
use crate::core::repository::Sort;
use crate::core::types::{DateRange, Stage};
use crate::errors::{Error, Result, require_parse};
use crate::logging::LogTarget;
use crate::scheduler::Planner;
use crate::scheduler::availability::{SlotQuery, conflicts};
use crate::scheduler::drag::DropPoint;
use crate::scheduler::summary::Summary;
use crate::scheduler::timeline::{self, group_by_supplier};
use crate::ui::table_printer::TablePrinter;
use crate::ui::views;
use std::io::IsTerminal;

pub struct CommandCore<'a> {
    pub args: &'a CommandArgs,
    pub flag_policy: FlagPolicy,
}

impl<'a> CommandCore<'a> {
    pub fn new(args: &'a CommandArgs, flag_policy: FlagPolicy) -> Self {
        Self { args, flag_policy }
    }
}

mod sealed {
    use super::CommandCore;

    pub trait Sealed<'a> {
        fn core(&self) -> &CommandCore<'a>;
    }
}

pub trait Command<'a>: sealed::Sealed<'a> {
    fn usage(&self) -> String;
    fn perform(&self, ctx: &mut AppContext) -> Result<()>;

    fn execute(&self, ctx: &mut AppContext) -> Result<()> {
        let core = self.core();
        match core.flag_policy.evaluate(core.args) {
            FlagDecision::ShortCircuitUsage => {
                ctx.logger.info(self.usage(), LogTarget::ConsoleOnly);
                Ok(())
            }
            FlagDecision::Continue => self.perform(ctx),
            FlagDecision::Error(e) => Err(e),
        }
    }
}

pub type CommandDyn<'a> = Box<dyn Command<'a> + 'a>;

macro_rules! impl_sealed {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl<'a> sealed::Sealed<'a> for $ty<'a> {
                fn core(&self) -> &CommandCore<'a> {
                    &self.core
                }
            }
        )+
    };
}

fn persist(ctx: &AppContext) -> Result<()> {
    let path = save_data(ctx, &ctx.data_path)?;
    ctx.logger
        .debug(format!("Saved working data to {}", path.display()));
    Ok(())
}

fn colour_output() -> bool {
    std::io::stdout().is_terminal()
}

// ---- list -------------------------------------------------------------------

pub struct ListCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ListCommand<'a> {
    pub fn new(args: &'a CommandArgs) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::standard(&["stage", "supplier"], 0)),
        }
    }
}

impl<'a> Command<'a> for ListCommand<'a> {
    fn usage(&self) -> String {
        "list [--stage <stage>] [--supplier <id>]   # Schedules by start date".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let stage = self.core.args.option("stage").map(Stage::try_from).transpose()?;
        let supplier = self.core.args.int_option("supplier")?;

        let shown: Vec<Schedule> = ctx
            .schedules
            .query()
            .r#where(move |s| stage.is_none_or(|st| s.stage == st))
            .r#where(move |s| supplier.is_none_or(|id| s.supplier_id == id))
            .order_with(|a, b| (a.start(), a.id).cmp(&(b.start(), b.id)))
            .collect()
            .into_iter()
            .cloned()
            .collect();

        TablePrinter::new().print(&views::schedules_table(&shown, ctx.config.today()));
        Ok(())
    }
}

// ---- summary ----------------------------------------------------------------

pub struct SummaryCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> SummaryCommand<'a> {
    pub fn new(args: &'a CommandArgs) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::standard(&[], 0)),
        }
    }
}

impl<'a> Command<'a> for SummaryCommand<'a> {
    fn usage(&self) -> String {
        "summary   # Counts of active schedules per stage".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let summary = Summary::of(&ctx.snapshot(), ctx.config.today());
        TablePrinter::new().print(&views::summary_table(&summary));
        Ok(())
    }
}

// ---- lanes ------------------------------------------------------------------

pub struct LanesCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> LanesCommand<'a> {
    pub fn new(args: &'a CommandArgs) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::standard(&[], 1)),
        }
    }
}

impl<'a> Command<'a> for LanesCommand<'a> {
    fn usage(&self) -> String {
        "lanes [<supplier id>]   # Timeline with overlapping bookings stacked into lanes".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let supplier = match self.core.args.positional(0) {
            Some(_) => Some(self.core.args.int_at(0, "supplier id")?),
            None => None,
        };
        let shown: Vec<Schedule> = ctx
            .schedules
            .query()
            .r#where(move |s| supplier.is_none_or(|id| s.supplier_id == id))
            .order(Sort::IdAsc)
            .collect()
            .into_iter()
            .cloned()
            .collect();

        // Same window `drop` measures from, so the X column can be fed back to it.
        let range = timeline::visible_range(
            &ctx.snapshot(),
            ctx.config.padding_before(),
            ctx.config.padding_after(),
            ctx.config.today(),
        );
        let lines = views::timeline_lines(&shown, &range, colour_output());
        ctx.logger.info(lines.join("\n"), LogTarget::ConsoleOnly);

        let printer = TablePrinter::new();
        let day_width = f64::from(ctx.config.day_width());
        for row in group_by_supplier(&shown) {
            printer.print(&views::lanes_table(&row, range.start(), day_width));
        }
        Ok(())
    }
}

// ---- check ------------------------------------------------------------------

pub struct CheckCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> CheckCommand<'a> {
    pub fn new(args: &'a CommandArgs) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::standard(&["exclude"], 4)),
        }
    }
}

impl<'a> Command<'a> for CheckCommand<'a> {
    fn usage(&self) -> String {
        "check <supplier id> <stage> <start> <end> [--exclude <schedule id>]   # Is the supplier free?"
            .into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let args = self.core.args;
        let supplier_id = args.int_at(0, "supplier id")?;
        let stage = Stage::try_from(args.require(1, "stage")?)?;
        let range = DateRange::new(args.date_at(2, "start date")?, args.date_at(3, "end date")?)?;

        let mut query = SlotQuery::new(supplier_id, stage, range);
        if let Some(id) = args.int_option("exclude")? {
            query = query.excluding(id);
        }
        let booked = ctx
            .schedules
            .query()
            .r#where(move |s| s.supplier_id == supplier_id)
            .order(Sort::IdAsc)
            .collect();
        let clashing = conflicts(booked, &query);
        if clashing.is_empty() {
            ctx.logger.info(
                format!("Supplier {supplier_id} is available for {stage} on {range}."),
                LogTarget::ConsoleOnly,
            );
        } else {
            let ids: Vec<String> = clashing.iter().map(|s| s.id.to_string()).collect();
            ctx.logger.warn(
                format!(
                    "Supplier {supplier_id} is busy for {stage} on {range}: conflicts with {}.",
                    ids.join(", ")
                ),
                LogTarget::ConsoleOnly,
            );
        }
        Ok(())
    }
}

// ---- move / drop ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// `move <id> <date>`
    ToDate,
    /// `drop <id> --x <px>`: pointer position on the timeline.
    Pointer,
}

pub struct MoveCommand<'a> {
    core: CommandCore<'a>,
    kind: MoveKind,
}

impl<'a> MoveCommand<'a> {
    pub fn new(args: &'a CommandArgs, kind: MoveKind) -> Self {
        let policy = match kind {
            MoveKind::ToDate => FlagPolicy::standard(&[], 2),
            MoveKind::Pointer => FlagPolicy::standard(&["x", "grab"], 1),
        };
        Self {
            core: CommandCore::new(args, policy),
            kind,
        }
    }

    fn plan(&self, ctx: &mut AppContext) -> Result<ChangeSet> {
        let args = self.core.args;
        let actor = ctx.acting_user()?;
        let id = args.int_at(0, "schedule id")?;

        match self.kind {
            MoveKind::ToDate => {
                let new_start = args.date_at(1, "new start date")?;
                Planner::new(ctx).plan_move(&actor, id, new_start)
            }
            MoveKind::Pointer => {
                let x = require_parse(args.float_option("x")?, "Missing --x <px>.")?;
                let grab = args.float_option("grab")?.unwrap_or(0.0);
                let snapshot = ctx.snapshot();
                let origin = timeline::visible_range(
                    &snapshot,
                    ctx.config.padding_before(),
                    ctx.config.padding_after(),
                    ctx.config.today(),
                )
                .start();
                let drop = DropPoint::new(origin, f64::from(ctx.config.day_width()), x, grab);
                Planner::new(ctx).plan_drop(&actor, id, &drop)
            }
        }
    }
}

impl<'a> Command<'a> for MoveCommand<'a> {
    fn usage(&self) -> String {
        match self.kind {
            MoveKind::ToDate => {
                "move <schedule id> <new start> [--yes]   # Preview, then apply with --yes".into()
            }
            MoveKind::Pointer => {
                "drop <schedule id> --x <px> [--grab <px>] [--yes]   # Drop on the timeline".into()
            }
        }
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let changes = self.plan(ctx)?;
        TablePrinter::new().print(&views::change_set_table(&changes));
        if changes.is_empty() {
            return Ok(());
        }
        if !self.core.args.has(Flag::Yes) {
            ctx.logger.info(
                format!(
                    "{} {}",
                    ctx.config.cascade_mode().help(),
                    ctx.config.apply_mode().help()
                ),
                LogTarget::ConsoleOnly,
            );
            ctx.logger.info(
                "Preview only; re-run with --yes to apply.",
                LogTarget::ConsoleOnly,
            );
            return Ok(());
        }

        let actor = ctx.acting_user()?;
        let written = Planner::new(ctx).commit(&actor, &changes)?;
        persist(ctx)?;
        ctx.logger.info(
            format!("Rescheduled {written} schedule(s)."),
            LogTarget::ConsoleOnly,
        );
        Ok(())
    }
}

// ---- book -------------------------------------------------------------------

const BOOK_OPTIONS: &[&str] = &[
    "article",
    "qty",
    "assignee",
    "week",
    "supplier",
    "start",
    "end",
    "description",
    "notes",
];

pub struct BookCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> BookCommand<'a> {
    pub fn new(args: &'a CommandArgs) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::standard(BOOK_OPTIONS, 1)),
        }
    }

    fn request(&self, ctx: &AppContext) -> Result<BookingRequest> {
        let args = self.core.args;
        let quantity = match args.int_option("qty")? {
            Some(q) if q < 0 => {
                return Err(Error::validation("Quantity must be positive."));
            }
            other => other.map(|q| q as u32),
        };
        let assignee_id = match args.int_option("assignee")? {
            Some(id) => Some(id),
            None => ctx.acting_user().ok().map(|u| u.id),
        };
        Ok(BookingRequest {
            article_id: args.int_option("article")?,
            quantity,
            assignee_id,
            delivery_week: args.option("week").map(str::to_string),
            supplier_id: args.int_option("supplier")?,
            start: args.date_option("start")?,
            end: args.date_option("end")?,
            description: args.option("description").map(str::to_string),
            notes: args.option("notes").map(str::to_string),
            status: None,
        })
    }
}

impl<'a> Command<'a> for BookCommand<'a> {
    fn usage(&self) -> String {
        "book <stage> --article <id> --qty <n> --week <label> --supplier <id> --start <date> --end <date> [--assignee <id>] [--description <text>] [--notes <text>]"
            .into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let stage = Stage::try_from(self.core.args.require(0, "stage")?)?;
        let req = self.request(ctx)?;
        let actor = ctx.acting_user()?;
        let id = BookingDesk::new(ctx).book(&actor, stage, &req)?;
        persist(ctx)?;
        ctx.logger.info(
            format!("Booked {} schedule with id {id}.", stage.label()),
            LogTarget::ConsoleOnly,
        );
        Ok(())
    }
}

// ---- cancel -----------------------------------------------------------------

pub struct CancelCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> CancelCommand<'a> {
    pub fn new(args: &'a CommandArgs) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::standard(&[], 1)),
        }
    }
}

impl<'a> Command<'a> for CancelCommand<'a> {
    fn usage(&self) -> String {
        "cancel <schedule id> [--delete]   # Cancel, or remove entirely with --delete".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let id = self.core.args.int_at(0, "schedule id")?;
        let actor = ctx.acting_user()?;
        let msg = if self.core.args.has(Flag::Delete) {
            BookingDesk::new(ctx).delete(&actor, id)?;
            format!("Deleted schedule {id}.")
        } else {
            BookingDesk::new(ctx).cancel(&actor, id)?;
            format!("Cancelled schedule {id}.")
        };
        persist(ctx)?;
        ctx.logger.info(msg, LogTarget::ConsoleOnly);
        Ok(())
    }
}

// ---- config -----------------------------------------------------------------

pub struct ConfigCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ConfigCommand<'a> {
    pub fn new(args: &'a CommandArgs) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::standard(&[], 2)),
        }
    }
}

impl<'a> Command<'a> for ConfigCommand<'a> {
    fn usage(&self) -> String {
        "config [<key> <value>]   # Show configuration, or change one key".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let args = self.core.args;
        if args.positional_count() == 0 {
            TablePrinter::new().print(&views::config_table(&ctx.config.rows()));
            return Ok(());
        }

        let key = args.require(0, "config key")?;
        let value = args.require(1, "config value")?;
        ctx.config.set(key, value)?;
        ctx.logger
            .set_file_logging_enabled(ctx.config.file_logging_enabled());
        if let Some((key, old, new)) = ctx.config.take_last_change() {
            ctx.logger.info(
                format!("Changed {key} from '{old}' to '{new}'."),
                LogTarget::ConsoleAndFile,
            );
        }
        Ok(())
    }
}

impl_sealed!(
    ListCommand,
    SummaryCommand,
    LanesCommand,
    CheckCommand,
    MoveCommand,
    BookCommand,
    CancelCommand,
    ConfigCommand,
);
