use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::Input;
use owo_colors::OwoColorize;
use timetable_core::state::NewLesson;

use super::{State, resolve_group};
use crate::utils::dates::{parse_date, parse_dates};

pub struct AddArgs {
    pub subject: Option<String>,
    pub dates: Vec<String>,
    pub room: Option<String>,
    pub teacher: Option<String>,
    pub index: Option<i64>,
    pub group: Option<String>,
}

pub fn run(state: &mut State, args: AddArgs) -> Result<()> {
    let group_id = resolve_group(state, args.group.as_deref())?.id.clone();
    let interactive = args.subject.is_none() || args.dates.is_empty();

    // --- Subject ---
    let subject = match args.subject {
        Some(s) => s,
        None => Input::<String>::new()
            .with_prompt("  Subject")
            .allow_empty(true)
            .interact_text()?,
    };

    // --- Dates ---
    let dates = if args.dates.is_empty() {
        prompt_dates()?
    } else {
        args.dates
            .iter()
            .map(|d| parse_date(d))
            .collect::<Result<Vec<_>>>()?
    };

    // --- Index ---
    let index = match args.index {
        Some(i) => Some(i),
        None if interactive => prompt_index(state, &group_id, &dates)?,
        None => None,
    };

    // --- Room / Teacher ---
    let room = optional_field(args.room, "  Room (skip)", interactive)?;
    let teacher = optional_field(args.teacher, "  Teacher (skip)", interactive)?;

    let added = state.add_custom_lesson(&NewLesson {
        group: group_id,
        dates,
        subject,
        room,
        teacher,
        index,
    });

    if interactive {
        println!();
    }
    if added.is_empty() {
        println!("{}", "  Nothing added".dimmed());
        return Ok(());
    }
    for lesson in &added {
        println!("{}", format!("  Added: {}", lesson).green());
        println!("    {}", lesson.id.dimmed());
    }
    Ok(())
}

/// Prompt for comma-separated dates, retrying on parse errors.
fn prompt_dates() -> Result<Vec<NaiveDate>> {
    loop {
        let input: String = Input::new()
            .with_prompt("  Dates (comma-separated)")
            .interact_text()?;
        match parse_dates(&input) {
            Ok(dates) => return Ok(dates),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

fn prompt_index(state: &State, group_id: &str, dates: &[NaiveDate]) -> Result<Option<i64>> {
    let hint = dates
        .first()
        .map(|d| format!(" (e.g. {})", state.next_index(group_id, *d)))
        .unwrap_or_default();

    loop {
        let input: String = Input::new()
            .with_prompt(format!("  Lesson №{hint}"))
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.trim().is_empty() {
            return Ok(None);
        }
        match input.trim().parse::<i64>() {
            Ok(i) => return Ok(Some(i)),
            Err(_) => eprintln!("  {}", format!("Not a number: \"{}\"", input).red()),
        }
    }
}

fn optional_field(value: Option<String>, prompt: &str, interactive: bool) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if interactive => Ok(Input::new()
            .with_prompt(prompt)
            .default(String::new())
            .show_default(false)
            .interact_text()?),
        None => Ok(String::new()),
    }
}
