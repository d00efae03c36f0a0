use anyhow::Result;
use dialoguer::Select;
use owo_colors::OwoColorize;

use super::{State, resolve_group};

pub fn run(state: &mut State, group: Option<String>) -> Result<()> {
    let group_id = match group {
        Some(id) => resolve_group(state, Some(&id))?.id.clone(),
        None => select_group(state)?,
    };

    state.set_active_group(&group_id)?;

    let label = resolve_group(state, Some(&group_id))?.label.clone();
    println!("{}", format!("Active group: {label}").green());
    Ok(())
}

fn select_group(state: &State) -> Result<String> {
    let groups = state.catalog().groups();
    let items: Vec<String> = groups.iter().map(|g| format!("{} ({})", g.label, g.id)).collect();
    let default = groups
        .iter()
        .position(|g| Some(g.id.as_str()) == state.active_group_id())
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("  Group")
        .items(&items)
        .default(default)
        .interact()?;

    Ok(groups[selection].id.clone())
}
