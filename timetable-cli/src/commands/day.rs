use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::{State, resolve_group};
use crate::render::{Render, render_lessons};

pub fn run(state: &State, date: NaiveDate, group: Option<String>) -> Result<()> {
    let group = resolve_group(state, group.as_deref())?;

    let Some(day) = state.day_view(&group.id, date) else {
        println!("{}", format!("{} is a weekend, no lessons", date).dimmed());
        return Ok(());
    };

    println!("{}", day.render());
    for line in render_lessons(&day) {
        println!("{line}");
    }
    println!(
        "{}",
        format!("Наступний № пари: {}", state.next_index(&group.id, date)).dimmed()
    );
    Ok(())
}
