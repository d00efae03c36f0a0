use anyhow::Result;
use chrono::{Local, NaiveDate};
use timetable_core::disclosure::Panels;
use timetable_core::month::Month;

use super::{State, resolve_group};
use crate::render::render_month;

pub struct MonthArgs {
    pub month: Month,
    pub group: Option<String>,
    pub expand: Vec<NaiveDate>,
    pub all: bool,
    pub compact: bool,
}

pub fn run(state: &State, args: MonthArgs) -> Result<()> {
    let group = resolve_group(state, args.group.as_deref())?;
    let Some(view) = state.month_view(&group.id, args.month) else {
        anyhow::bail!("Group '{}' not found", group.id);
    };

    let mut panels = Panels::default();
    if args.compact {
        panels.toggle_form();
    }
    if args.all {
        panels.days.extend(view.days.iter().map(|d| d.date));
    } else {
        panels.days.extend(args.expand);
    }

    let today = Local::now().date_naive();
    let hint_date = if args.month.contains(today) {
        today
    } else {
        args.month.first_day()
    };
    let next_index = view
        .days
        .iter()
        .find(|d| d.date >= hint_date)
        .map(|d| state.next_index(&group.id, d.date));

    println!(
        "{}",
        render_month(&view, &panels, today, state.group_missed_total(&group.id), next_index)
    );
    Ok(())
}
