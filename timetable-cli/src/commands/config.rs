use anyhow::Result;
use owo_colors::OwoColorize;
use timetable_core::config::TimetableConfig;

use super::{State, resolve_group};

pub fn run(state: &State, mut cfg: TimetableConfig, default_group: Option<String>) -> Result<()> {
    if let Some(group) = default_group {
        let id = resolve_group(state, Some(&group))?.id.clone();
        cfg.default_group = Some(id);
        cfg.save()?;
        println!("{}", "  Saved default group".green());
    }

    println!("{} {}", "config:".dimmed(), TimetableConfig::config_path()?.display());
    println!("{} {}", "state_dir:".dimmed(), cfg.state_path().display());
    println!(
        "{} {}",
        "default_group:".dimmed(),
        cfg.default_group.as_deref().unwrap_or("(none)")
    );
    Ok(())
}
