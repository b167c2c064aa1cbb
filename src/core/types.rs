use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use crate::extensions::string::ToDashSeparators;
use crate::scheduler::calendar;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum GlobalCommand {
    #[strum(serialize = "list", to_string = "list")]
    List,
    #[strum(serialize = "summary", to_string = "summary")]
    Summary,
    #[strum(serialize = "lanes", to_string = "lanes")]
    Lanes,
    #[strum(serialize = "check", to_string = "check")]
    Check,
    #[strum(serialize = "move", to_string = "move")]
    Move,
    #[strum(serialize = "drop", to_string = "drop")]
    Drop,
    #[strum(serialize = "book", to_string = "book")]
    Book,
    #[strum(serialize = "cancel", to_string = "cancel")]
    Cancel,
    #[strum(serialize = "config", to_string = "config")]
    Config,
}

impl GlobalCommand {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::UnknownCommand(format!(
                "'{}'. Valid commands: {}",
                s.trim(),
                valid_csv::<GlobalCommand>()
            ))
        })
    }
}

/// Production stage. Declaration order is the pipeline order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[strum(serialize = "cutting", serialize = "potong", to_string = "cutting")]
    #[serde(alias = "potong")]
    Cutting,
    #[strum(serialize = "sewing", serialize = "jahit", to_string = "sewing")]
    #[serde(alias = "jahit")]
    Sewing,
    #[strum(serialize = "printing", serialize = "sablon", to_string = "printing")]
    #[serde(alias = "sablon")]
    Printing,
    #[strum(serialize = "embroidery", serialize = "bordir", to_string = "embroidery")]
    #[serde(alias = "bordir")]
    Embroidery,
}

impl Stage {
    /// Position in the cutting → sewing → printing → embroidery pipeline.
    pub fn rank(self) -> u8 {
        match self {
            Stage::Cutting => 0,
            Stage::Sewing => 1,
            Stage::Printing => 2,
            Stage::Embroidery => 3,
        }
    }

    pub fn is_downstream_of(self, other: Stage) -> bool {
        self.rank() > other.rank()
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Cutting => "Cutting",
            Stage::Sewing => "Sewing",
            Stage::Printing => "Screen printing",
            Stage::Embroidery => "Embroidery",
        }
    }

    /// Foreground colour used when painting bars in the terminal.
    pub fn ansi_fg(self) -> &'static str {
        match self {
            Stage::Cutting => crate::csi!("34m"),
            Stage::Sewing => crate::csi!("32m"),
            Stage::Printing => crate::csi!("35m"),
            Stage::Embroidery => crate::csi!("33m"),
        }
    }

    pub fn paint<S: AsRef<str>>(self, s: S) -> String {
        format!(
            "{}{}{}",
            self.ansi_fg(),
            s.as_ref(),
            crate::ui::ansi::STYLE_RESET
        )
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Parse(format!(
                "Invalid stage: '{}'. Valid stages: {}",
                s.trim(),
                valid_csv::<Stage>()
            ))
        })
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl Status {
    /// Terminal bookings are ignored by availability checks and never rippled.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Completed | Status::Cancelled)
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Parse(format!(
                "Invalid status: '{}'. Valid statuses: {}",
                s.trim(),
                valid_csv::<Status>()
            ))
        })
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Staff,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "kebab-case")]
pub enum CascadeMode {
    #[strum(serialize = "chain", to_string = "chain")]
    Chain,
    #[strum(serialize = "supplier", to_string = "supplier")]
    Supplier,
}

impl CascadeMode {
    pub fn help(&self) -> &'static str {
        match self {
            CascadeMode::Chain => {
                "Shift downstream stages of the same article and delivery week."
            }
            CascadeMode::Supplier => {
                "Push later bookings at the same supplier until the first gap."
            }
        }
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Parse(format!(
                "Invalid cascade mode: '{}'. Allowed modes: {}",
                s.trim(),
                valid_csv::<CascadeMode>()
            ))
        })
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "kebab-case")]
pub enum ApplyMode {
    #[strum(serialize = "atomic", to_string = "atomic")]
    Atomic,
    #[strum(serialize = "sequential", to_string = "sequential")]
    Sequential,
}

impl ApplyMode {
    pub fn help(&self) -> &'static str {
        match self {
            ApplyMode::Atomic => "Commit every change of a cascade or none of them.",
            ApplyMode::Sequential => {
                "Write changes one by one and report how many landed on failure."
            }
        }
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Parse(format!(
                "Invalid apply mode: '{}'. Allowed modes: {}",
                s.trim(),
                valid_csv::<ApplyMode>()
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(pub NaiveDate);

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum DateFormat {
    #[strum(serialize = "%Y-%m-%d", to_string = "%Y-%m-%d")]
    YmdDash,
    #[strum(serialize = "%d-%m-%Y", to_string = "%d-%m-%Y")]
    DmYDash,
    #[strum(serialize = "%Y/%m/%d", to_string = "%Y/%m/%d")]
    YmdSlash,
    #[strum(serialize = "%d/%m/%Y", to_string = "%d/%m/%Y")]
    DmYSlash,
    #[strum(serialize = "%d-%m", to_string = "%d-%m")]
    DmDash,
}

#[derive(Debug, Clone)]
struct DateParseSpec {
    input: String,
    date_format: DateFormat,
}

impl DateFormat {
    fn build_parse_spec(self, input: &str) -> DateParseSpec {
        let current_year = Local::now().date_naive().year();
        match self {
            DateFormat::YmdDash | DateFormat::YmdSlash => DateParseSpec {
                input: input.to_owned(),
                date_format: DateFormat::YmdDash,
            },
            DateFormat::DmYDash | DateFormat::DmYSlash => DateParseSpec {
                input: input.to_owned(),
                date_format: DateFormat::DmYDash,
            },
            DateFormat::DmDash => DateParseSpec {
                input: format!("{input}-{current_year}"),
                date_format: DateFormat::DmYDash,
            },
        }
    }
}

impl Date {
    pub fn usage() -> String {
        let today = Local::now().date_naive();
        let formats = DateFormat::iter()
            .map(|df| today.format(df.as_ref()).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Supported formats: {}", formats)
    }

    pub fn try_from_str(input: &str) -> Result<Self> {
        let input = input.to_dash_separators();

        for f in DateFormat::iter() {
            let spec = f.build_parse_spec(&input);
            if let Ok(date) = NaiveDate::parse_from_str(&spec.input, spec.date_format.as_ref()) {
                return Ok(Date(date));
            }
        }

        Err(Error::Parse(format!(
            "Invalid date format: '{}'. {}",
            input,
            Self::usage()
        )))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Inclusive calendar-day interval; `start <= end` holds for every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = Error;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::Validation(format!(
                "Start date {} must not be after end date {}.",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Smallest range containing both dates, in whichever order they come.
    pub fn covering(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive day count; a single-day range lasts 1.
    pub fn duration(&self) -> i64 {
        calendar::duration(self.start, self.end)
    }

    /// Same duration, starting at `start`.
    pub fn starting_at(&self, start: NaiveDate) -> Self {
        let span = calendar::day_diff(self.start, self.end);
        Self {
            start,
            end: calendar::add_days(start, span),
        }
    }

    pub fn shifted(&self, days: i64) -> Self {
        self.starting_at(calendar::add_days(self.start, days))
    }

    /// Closed-interval overlap: touching on a shared day counts.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "yes", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", serialize = "no", to_string = "False")]
    TextFalse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s.trim()) {
            Ok(fmt) => Ok(Bool(matches!(fmt, BoolFormat::TextTrue))),
            Err(_) => Err(Error::Parse(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Bool, <D as Deserializer<'de>>::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}
