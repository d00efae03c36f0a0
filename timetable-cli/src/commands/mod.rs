pub mod add;
pub mod config;
pub mod day;
pub mod groups;
pub mod miss;
pub mod month;
pub mod remove;
pub mod use_group;

use anyhow::Result;
use timetable_core::catalog::ScheduleGroup;
use timetable_core::state::TimetableState;
use timetable_core::storage::FileStorage;

pub type State = TimetableState<FileStorage>;

/// The group named by `--group`, or the active group.
pub fn resolve_group<'a>(state: &'a State, group: Option<&str>) -> Result<&'a ScheduleGroup> {
    let catalog = state.catalog();

    match group.or(state.active_group_id()) {
        Some(id) => catalog.group(id).ok_or_else(|| {
            let available: Vec<_> = catalog.group_ids().collect();
            anyhow::anyhow!(
                "Group '{}' not found. Available: {}",
                id,
                available.join(", ")
            )
        }),
        None => anyhow::bail!("No groups in the timetable"),
    }
}
