mod app;
mod calendar;
mod help;
mod logging;
mod theme;
use crate::app::App;
use crate::calendar::{CalendarModel, WeekCalendar};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use thiserror::Error;
use time::{
    format_description::FormatItem, macros::format_description, Date, OffsetDateTime, Weekday,
};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        first_weekday: Weekday,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut first_weekday = Weekday::Sunday;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('w') | Arg::Long("first-weekday") => {
                    first_weekday = parser.value()?.parse_with(parse_weekday)?;
                }
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            first_weekday,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                first_weekday,
                log_file,
            } => {
                let _logger = logging::init(log_file.as_deref())?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let model =
                    CalendarModel::new(date.unwrap_or(today), WeekCalendar::new(first_weekday))
                        .context("failed to lay out calendar")?;
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(today, model).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: weekstrip [<options>] [YYYY-MM-DD]");
                println!();
                println!("Swipeable week-by-week calendar strip");
                println!();
                println!("Options:");
                println!("  -w, --first-weekday <DAY>");
                println!("                    Start weeks on the given day [default: sunday]");
                println!();
                println!("      --log-file <PATH>");
                println!("                    Write log messages to the given file");
                println!();
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid weekday name: {0:?}")]
struct WeekdayParseError(String);

fn parse_weekday(s: &str) -> Result<Weekday, WeekdayParseError> {
    match s.to_ascii_lowercase().as_str() {
        "su" | "sun" | "sunday" => Ok(Weekday::Sunday),
        "mo" | "mon" | "monday" => Ok(Weekday::Monday),
        "tu" | "tue" | "tuesday" => Ok(Weekday::Tuesday),
        "we" | "wed" | "wednesday" => Ok(Weekday::Wednesday),
        "th" | "thu" | "thursday" => Ok(Weekday::Thursday),
        "fr" | "fri" | "friday" => Ok(Weekday::Friday),
        "sa" | "sat" | "saturday" => Ok(Weekday::Saturday),
        _ => Err(WeekdayParseError(s.to_owned())),
    }
}
