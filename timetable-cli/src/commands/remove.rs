use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use timetable_core::keys::SourceKey;

use super::{State, resolve_group};

pub fn run(state: &mut State, source: &str, lesson_id: &str, group: Option<String>) -> Result<()> {
    let group_id = resolve_group(state, group.as_deref())?.id.clone();

    let key = match SourceKey::from(source.trim()) {
        SourceKey::Other(raw) => {
            anyhow::bail!("'{}' is neither a date (YYYY-MM-DD) nor a weekday (day-1..day-5)", raw)
        }
        SourceKey::Date(date) => resolve_dated(state, &group_id, date, lesson_id)?,
        legacy => legacy,
    };

    match state.remove_custom_lesson(&group_id, &key, lesson_id) {
        Some(lesson) => {
            println!("{}", format!("  Removed: {} ({})", lesson.subject, key).green());
            Ok(())
        }
        None => anyhow::bail!(
            "No custom lesson '{}' under {} for group {}",
            lesson_id,
            key,
            group_id
        ),
    }
}

/// A lesson shown on `date` may be filed under the date or under its weekday.
fn resolve_dated(state: &State, group_id: &str, date: NaiveDate, lesson_id: &str) -> Result<SourceKey> {
    let Some(shown) = state.day_view(group_id, date).and_then(|day| day.find(lesson_id).cloned()) else {
        return Ok(SourceKey::Date(date));
    };
    shown
        .source_key(date)
        .ok_or_else(|| anyhow::anyhow!("'{}' is part of the fixed timetable and cannot be removed", lesson_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_core::catalog::Catalog;
    use timetable_core::keys::DayId;
    use timetable_core::storage::{CUSTOM_LESSONS_KEY, FileStorage, Storage};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn state_with(dir: &tempfile::TempDir, custom: &str) -> State {
        let mut storage = FileStorage::new(dir.path());
        storage.set(CUSTOM_LESSONS_KEY, custom).unwrap();
        State::load(storage, Catalog::builtin().clone())
    }

    #[test]
    fn date_resolves_to_legacy_weekday_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(
            &dir,
            r#"{"bn-3-2":{"day-1":[{"id":"custom-old","subject":"Стара","room":"—","teacher":"—","index":5}]}}"#,
        );

        run(&mut state, "2024-03-04", "custom-old", Some("bn-3-2".into())).unwrap();
        assert!(state.custom().lessons("bn-3-2", &SourceKey::Legacy(DayId::Day1)).is_empty());
        assert!(state.day_view("bn-3-2", monday()).unwrap().find("custom-old").is_none());
    }

    #[test]
    fn catalog_lessons_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, "{}");

        let err = run(&mut state, "2024-03-04", "bn32-d1-l1", Some("bn-3-2".into())).unwrap_err();
        assert!(err.to_string().contains("fixed timetable"));
        assert_eq!(state.day_view("bn-3-2", monday()).unwrap().lessons.len(), 3);
    }

    #[test]
    fn unknown_source_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, "{}");
        assert!(run(&mut state, "monday", "custom-x", Some("bn-3-2".into())).is_err());
    }
}
