use anyhow::Result;
use owo_colors::OwoColorize;

use super::State;
use crate::render::Render;

pub fn run(state: &State) -> Result<()> {
    let active = state.active_group_id();

    for group in state.catalog().groups() {
        let marker = if Some(group.id.as_str()) == active {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        let missed = state.group_missed_total(&group.id);
        println!(
            "{} {}  {}",
            marker,
            group.render(),
            format!("пропуски: {missed}").dimmed()
        );
    }

    Ok(())
}
