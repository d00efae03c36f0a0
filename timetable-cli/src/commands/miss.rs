use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::{State, resolve_group};

pub fn run(state: &mut State, date: NaiveDate, lesson_id: &str, group: Option<String>) -> Result<()> {
    let group_id = resolve_group(state, group.as_deref())?.id.clone();

    let Some(day) = state.day_view(&group_id, date) else {
        anyhow::bail!("{} is a weekend, there are no lessons to mark", date);
    };
    let Some(lesson) = day.find(lesson_id) else {
        let available: Vec<_> = day.lessons.iter().map(|l| l.lesson.id.as_str()).collect();
        anyhow::bail!(
            "Lesson '{}' not found on {}. Available: {}",
            lesson_id,
            date,
            available.join(", ")
        );
    };
    let subject = lesson.lesson.subject.clone();

    let missed = state.toggle_lesson(&group_id, date, lesson_id);
    let count = state
        .day_view(&group_id, date)
        .map(|d| d.missed_count())
        .unwrap_or(0);

    if missed {
        println!("{}", format!("  Missed: {subject} ({date})").red());
    } else {
        println!("{}", format!("  Attended: {subject} ({date})").green());
    }
    println!("{}", format!("  Missed that day: {count}").dimmed());
    Ok(())
}
