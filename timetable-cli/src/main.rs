mod commands;
mod render;
mod utils;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use timetable_core::catalog::Catalog;
use timetable_core::config::TimetableConfig;
use timetable_core::month::Month;
use timetable_core::state::TimetableState;

use crate::utils::dates::parse_date;

#[derive(Parser)]
#[command(name = "timetable")]
#[command(about = "View your class timetable, mark missed lessons and add your own")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List groups (the active one is marked with *)
    Groups,
    /// Set the active group
    Use {
        /// Group id (e.g. "bn-3-2"); prompts when omitted
        group: Option<String>,
    },
    /// Show a month of lessons
    Month {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long, conflicts_with_all = ["prev", "next"])]
        month: Option<String>,

        /// Go back this many months from the current one
        #[arg(long, conflicts_with = "next")]
        prev: Option<u32>,

        /// Go forward this many months from the current one
        #[arg(long)]
        next: Option<u32>,

        /// Only operate on this group
        #[arg(short, long)]
        group: Option<String>,

        /// Expand the lessons of this day (repeatable)
        #[arg(short, long)]
        expand: Vec<String>,

        /// Expand every day
        #[arg(short, long, conflicts_with = "expand")]
        all: bool,

        /// Hide the add-lesson hint
        #[arg(long)]
        compact: bool,
    },
    /// Show one day's lessons
    Day {
        /// Date (YYYY-MM-DD or e.g. "tomorrow"), defaults to today
        date: Option<String>,

        /// Only operate on this group
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Mark a lesson as missed, or unmark it
    Miss {
        /// Date of the lesson
        date: String,

        /// Lesson id as shown by `timetable day`
        lesson: String,

        /// Only operate on this group
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Add your own lesson to one or more dates
    Add {
        /// Subject; prompts when omitted
        subject: Option<String>,

        /// Date to add the lesson to (repeatable)
        #[arg(short, long = "date")]
        dates: Vec<String>,

        #[arg(short, long)]
        room: Option<String>,

        #[arg(short, long)]
        teacher: Option<String>,

        /// Lesson number; defaults to one after the last lesson of the day
        #[arg(short, long)]
        index: Option<i64>,

        /// Only operate on this group
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Remove a lesson you added
    Remove {
        /// Date (YYYY-MM-DD) or weekday (day-1..day-5) it is filed under
        source: String,

        /// Lesson id
        lesson: String,

        /// Only operate on this group
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Show or change configuration
    Config {
        /// Group used before one is chosen with `timetable use`
        #[arg(long)]
        default_group: Option<String>,
    },
}

fn main() -> Result<()> {
    // Set RUST_LOG (e.g. RUST_LOG=debug) to see storage diagnostics.
    env_logger::init();

    let cli = Cli::parse();

    let cfg = TimetableConfig::load().unwrap_or_else(|e| {
        log::warn!("Using default configuration: {e}");
        TimetableConfig::default()
    });
    let mut state = TimetableState::load_with_default_group(
        cfg.storage(),
        Catalog::builtin().clone(),
        cfg.default_group.as_deref(),
    );

    match cli.command {
        Commands::Groups => commands::groups::run(&state),
        Commands::Use { group } => commands::use_group::run(&mut state, group),
        Commands::Month {
            month,
            prev,
            next,
            group,
            expand,
            all,
            compact,
        } => {
            let month = match (month, prev, next) {
                (Some(m), _, _) => m.parse::<Month>()?,
                (None, Some(n), _) => shift_month(-i64::from(n))?,
                (None, None, Some(n)) => shift_month(i64::from(n))?,
                (None, None, None) => Month::current(),
            };
            let expand = expand
                .iter()
                .map(|d| parse_date(d))
                .collect::<Result<Vec<_>>>()?;
            commands::month::run(
                &state,
                commands::month::MonthArgs {
                    month,
                    group,
                    expand,
                    all,
                    compact,
                },
            )
        }
        Commands::Day { date, group } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };
            commands::day::run(&state, date, group)
        }
        Commands::Miss { date, lesson, group } => {
            let date = parse_date(&date)?;
            commands::miss::run(&mut state, date, &lesson, group)
        }
        Commands::Add {
            subject,
            dates,
            room,
            teacher,
            index,
            group,
        } => commands::add::run(
            &mut state,
            commands::add::AddArgs {
                subject,
                dates,
                room,
                teacher,
                index,
                group,
            },
        ),
        Commands::Remove {
            source,
            lesson,
            group,
        } => commands::remove::run(&mut state, &source, &lesson, group),
        Commands::Config { default_group } => commands::config::run(&state, cfg, default_group),
    }
}

/// The month `months` away from the current one.
fn shift_month(months: i64) -> Result<Month> {
    Month::current()
        .offset(months)
        .ok_or_else(|| anyhow::anyhow!("{} months from now is out of range", months))
}
