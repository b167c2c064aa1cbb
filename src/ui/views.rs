use crate::config::ConfigRow;
use crate::core::models::{ChangeSet, Schedule};
use crate::core::status::effective_status;
use crate::core::types::{DateRange, Stage};
use crate::extensions::chrono::NaiveDateExt;
use crate::scheduler::lanes::layout_lanes;
use crate::scheduler::summary::Summary;
use crate::scheduler::timeline::{self, SupplierRow};
use crate::ui::ansi;
use crate::ui::table_printer::Table;
use crate::ui::width_util::WidthUtil;
use chrono::NaiveDate;
use strum::IntoEnumIterator;

const NAME_COLUMN: usize = 18;

pub fn schedules_table(schedules: &[Schedule], today: NaiveDate) -> Table {
    let mut table = Table::new(
        "Schedules",
        &["ID", "STAGE", "ARTICLE", "WEEK", "SUPPLIER", "START", "END", "DAYS", "STATUS"],
    )
    .empty_message("No schedules booked.");
    let util = WidthUtil;
    for s in schedules {
        table.row(vec![
            s.id.to_string(),
            s.stage.to_string(),
            util.truncate(&s.article_name, 24),
            s.delivery_week.clone(),
            util.truncate(&s.supplier_name, 20),
            s.start().to_string(),
            s.end().to_string(),
            s.duration().to_string(),
            effective_status(s, today).to_string(),
        ]);
    }
    table
}

pub fn change_set_table(changes: &ChangeSet) -> Table {
    let title = format!("Reschedule preview ({:+} days)", changes.delta_days());
    let mut table = Table::new(title, &["ID", "STAGE", "SUPPLIER", "FROM", "TO", "SHIFT"])
        .empty_message("Nothing to change.");
    for c in changes {
        table.row(vec![
            c.schedule_id.to_string(),
            c.stage.to_string(),
            c.supplier_id.to_string(),
            c.original.to_string(),
            c.new.to_string(),
            format!("{:+}", c.delta_days()),
        ]);
    }
    table
}

pub fn summary_table(summary: &Summary) -> Table {
    let mut table = Table::new("Active schedules", &["STAGE", "COUNT"]);
    for stage in Stage::iter() {
        table.row(vec![stage.label().to_string(), summary.for_stage(stage).to_string()]);
    }
    table.row(vec!["Scheduled".into(), summary.scheduled.to_string()]);
    table.row(vec!["In progress".into(), summary.in_progress.to_string()]);
    table.row(vec!["Total".into(), summary.total.to_string()]);
    table
}

/// Lanes of one supplier with each bar's pixel placement, the coordinates `drop --x` takes.
pub fn lanes_table(row: &SupplierRow<'_>, origin: NaiveDate, day_width: f64) -> Table {
    let owned: Vec<Schedule> = row.schedules.iter().map(|s| (*s).clone()).collect();
    let layout = layout_lanes(&owned);
    let title = format!("{} ({} lane(s))", row.supplier_name, layout.max_lanes());
    let mut table = Table::new(title, &["LANE", "ID", "STAGE", "RANGE", "X", "WIDTH"])
        .empty_message("No schedules at this supplier.");
    for bar in layout.bars() {
        let geo = timeline::bar_geometry(origin, &bar.schedule.range, day_width);
        table.row(vec![
            (bar.lane + 1).to_string(),
            bar.schedule.id.to_string(),
            bar.schedule.stage.to_string(),
            bar.schedule.range.to_string(),
            format!("{:.0}", geo.left),
            format!("{:.0}", geo.width),
        ]);
    }
    table
}

pub fn config_table(rows: &[ConfigRow]) -> Table {
    let mut table = Table::new("Config", &["KEY", "DESCRIPTION", "VALUE"])
        .empty_message("No config items found.");
    for (key, description, value) in rows {
        table.row(vec![key.clone(), description.clone(), value.clone()]);
    }
    table
}

/// One character per day: stage initial for booked days, `.` for free weekdays,
/// `:` for free weekends.
fn lane_cells(days: &[NaiveDate], bars: &[&Schedule], colour: bool) -> String {
    days.iter()
        .map(|day| match bars.iter().find(|s| s.range.contains(*day)) {
            Some(s) => {
                let mark = s.stage.to_string().chars().next().unwrap_or('#').to_ascii_uppercase();
                if colour {
                    s.stage.paint(mark.to_string())
                } else {
                    mark.to_string()
                }
            }
            None if day.is_weekend() => {
                if colour { ansi::dim(":") } else { ":".into() }
            }
            None => ".".into(),
        })
        .collect()
}

/// Text gantt: a month header, then one line per supplier lane.
pub fn timeline_lines(schedules: &[Schedule], range: &DateRange, colour: bool) -> Vec<String> {
    let util = WidthUtil;
    let days = timeline::days(range);
    let mut lines = Vec::new();

    let mut header = " ".repeat(NAME_COLUMN + 1);
    for span in timeline::month_spans(&days) {
        let label = util.truncate(&span.label(), span.days);
        header.push_str(&util.pad_visible(&label, span.days));
    }
    lines.push(if colour { ansi::bold(header.trim_end()) } else { header.trim_end().to_string() });

    for row in timeline::group_by_supplier(schedules) {
        let owned: Vec<Schedule> = row.schedules.iter().map(|s| (*s).clone()).collect();
        let layout = layout_lanes(&owned);
        for lane in 0..layout.max_lanes() {
            let bars: Vec<&Schedule> = layout
                .bars()
                .iter()
                .filter(|b| b.lane == lane)
                .map(|b| b.schedule)
                .collect();
            let name = if lane == 0 {
                util.truncate(&row.supplier_name, NAME_COLUMN)
            } else {
                String::new()
            };
            lines.push(format!(
                "{} {}",
                util.pad_visible(&name, NAME_COLUMN),
                lane_cells(&days, &bars, colour)
            ));
        }
    }
    lines
}
