//! Durable timetable state: missed marks, custom lessons and the active group.
//!
//! State is loaded once from a `Storage` and written back after every
//! mutation. Loading never fails: a missing, unreadable or malformed value
//! yields the empty default. Write failures are logged and otherwise ignored,
//! leaving the in-memory state authoritative for the session.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::catalog::{Catalog, ScheduleGroup};
use crate::custom::CustomLessonStore;
use crate::error::{TimetableError, TimetableResult};
use crate::keys::{DayId, MissedKey, SourceKey};
use crate::lesson::Lesson;
use crate::missed::MissedSet;
use crate::storage::{ACTIVE_GROUP_KEY, CUSTOM_LESSONS_KEY, MISSED_LESSONS_KEY, Storage};

/// Input for adding a lesson to one or more dates.
#[derive(Debug, Clone, Default)]
pub struct NewLesson {
    pub group: String,
    pub dates: Vec<NaiveDate>,
    pub subject: String,
    pub room: String,
    pub teacher: String,
    /// Used when positive; otherwise the next free index is computed per date.
    pub index: Option<i64>,
}

pub struct TimetableState<S: Storage> {
    storage: S,
    catalog: Catalog,
    missed: MissedSet,
    custom: CustomLessonStore,
    active_group: Option<String>,
}

impl<S: Storage> TimetableState<S> {
    pub fn load(storage: S, catalog: Catalog) -> Self {
        Self::load_with_default_group(storage, catalog, None)
    }

    /// Load, preferring `default_group` when no valid active group is persisted.
    pub fn load_with_default_group(storage: S, catalog: Catalog, default_group: Option<&str>) -> Self {
        let missed = load_missed(&storage);
        let custom = load_custom(&storage, &catalog);
        let active_group = load_active_group(&storage, &catalog, default_group);

        log::debug!(
            "Loaded {} missed marks, custom lessons for {} groups, active group {:?}",
            missed.len(),
            custom.group_ids().count(),
            active_group
        );

        TimetableState {
            storage,
            catalog,
            missed,
            custom,
            active_group,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn missed(&self) -> &MissedSet {
        &self.missed
    }

    pub fn custom(&self) -> &CustomLessonStore {
        &self.custom
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn active_group_id(&self) -> Option<&str> {
        self.active_group.as_deref()
    }

    pub fn active_group(&self) -> Option<&ScheduleGroup> {
        self.catalog.group(self.active_group.as_deref()?)
    }

    pub fn set_active_group(&mut self, group_id: &str) -> TimetableResult<()> {
        if !self.catalog.is_known_group(group_id) {
            return Err(TimetableError::UnknownGroup(group_id.to_string()));
        }
        self.active_group = Some(group_id.to_string());
        self.persist(ACTIVE_GROUP_KEY, group_id.to_string());
        Ok(())
    }

    /// If either key is marked, clear both; otherwise mark `primary`.
    /// Returns whether the lesson is missed afterwards.
    pub fn toggle_missed(&mut self, primary: MissedKey, legacy: Option<MissedKey>) -> bool {
        let missed = self.missed.toggle(primary, legacy);
        self.save_missed();
        missed
    }

    /// Toggle the mark for `lesson_id` on `date`, honoring the legacy date key.
    pub fn toggle_lesson(&mut self, group_id: &str, date: NaiveDate, lesson_id: &str) -> bool {
        self.toggle_missed(
            MissedKey::current(group_id, date, lesson_id),
            Some(MissedKey::legacy(date, lesson_id)),
        )
    }

    pub fn is_missed(&self, group_id: &str, date: NaiveDate, lesson_id: &str) -> bool {
        self.missed.is_missed(
            &MissedKey::current(group_id, date, lesson_id),
            Some(&MissedKey::legacy(date, lesson_id)),
        )
    }

    /// One past the highest index among the fixed, date-keyed and legacy
    /// weekday-keyed lessons for `date`. Saturates at `u32::MAX`.
    pub fn next_index(&self, group_id: &str, date: NaiveDate) -> u32 {
        let day = DayId::of(date);
        let fixed: &[Lesson] = match (self.catalog.group(group_id), day) {
            (Some(group), Some(day)) => group.lessons(day),
            _ => &[],
        };
        let dated = self.custom.lessons(group_id, &SourceKey::Date(date));
        let legacy: &[Lesson] = match day {
            Some(day) => self.custom.lessons(group_id, &SourceKey::Legacy(day)),
            None => &[],
        };

        let max = fixed
            .iter()
            .chain(dated)
            .chain(legacy)
            .map(|l| l.index)
            .max()
            .unwrap_or(0);
        max.saturating_add(1)
    }

    /// Add the lesson to every weekday in `new.dates`. Returns the lessons
    /// created; empty when the input is rejected (blank subject, no dates,
    /// unknown group).
    pub fn add_custom_lesson(&mut self, new: &NewLesson) -> Vec<Lesson> {
        if new.subject.trim().is_empty() || new.dates.is_empty() {
            return Vec::new();
        }
        if !self.catalog.is_known_group(&new.group) {
            log::debug!("Ignoring custom lesson for unknown group '{}'", new.group);
            return Vec::new();
        }

        let explicit = new
            .index
            .filter(|i| *i > 0)
            .and_then(|i| u32::try_from(i).ok());

        let dates: BTreeSet<NaiveDate> = new.dates.iter().copied().collect();
        let mut added = Vec::new();

        for date in dates {
            if DayId::of(date).is_none() {
                log::debug!("Skipping weekend date {date} for custom lesson");
                continue;
            }
            let index = explicit.unwrap_or_else(|| self.next_index(&new.group, date));
            let lesson = Lesson::custom(&new.group, date, &new.subject, &new.room, &new.teacher, index);
            self.custom.push(&new.group, SourceKey::Date(date), lesson.clone());
            added.push(lesson);
        }

        if !added.is_empty() {
            self.save_custom();
        }
        added
    }

    /// Remove a custom lesson and every missed mark that refers to it.
    pub fn remove_custom_lesson(&mut self, group_id: &str, key: &SourceKey, lesson_id: &str) -> Option<Lesson> {
        let removed = self.custom.remove(group_id, key, lesson_id)?;
        self.save_custom();

        if self.missed.purge_lesson(lesson_id) > 0 {
            self.save_missed();
        }
        Some(removed)
    }

    fn save_missed(&mut self) {
        match serde_json::to_string(&self.missed) {
            Ok(json) => self.persist(MISSED_LESSONS_KEY, json),
            Err(e) => log::warn!("Could not serialize missed lessons: {e}"),
        }
    }

    fn save_custom(&mut self) {
        match serde_json::to_string(&self.custom) {
            Ok(json) => self.persist(CUSTOM_LESSONS_KEY, json),
            Err(e) => log::warn!("Could not serialize custom lessons: {e}"),
        }
    }

    fn persist(&mut self, key: &str, value: String) {
        if let Err(e) = self.storage.set(key, &value) {
            log::warn!("Could not save '{key}': {e}");
        }
    }
}

fn read(storage: &impl Storage, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Could not read '{key}': {e}");
            None
        }
    }
}

fn load_missed(storage: &impl Storage) -> MissedSet {
    let Some(raw) = read(storage, MISSED_LESSONS_KEY) else {
        return MissedSet::default();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed '{MISSED_LESSONS_KEY}': {e}");
        MissedSet::default()
    })
}

fn load_custom(storage: &impl Storage, catalog: &Catalog) -> CustomLessonStore {
    let Some(raw) = read(storage, CUSTOM_LESSONS_KEY) else {
        return CustomLessonStore::default();
    };
    serde_json::from_str(&raw)
        .map_err(TimetableError::from)
        .and_then(|value| CustomLessonStore::from_persisted(value, catalog))
        .unwrap_or_else(|e| {
            log::warn!("Ignoring malformed '{CUSTOM_LESSONS_KEY}': {e}");
            CustomLessonStore::default()
        })
}

fn load_active_group(storage: &impl Storage, catalog: &Catalog, default_group: Option<&str>) -> Option<String> {
    read(storage, ACTIVE_GROUP_KEY)
        .map(|s| s.trim().to_string())
        .filter(|id| catalog.is_known_group(id))
        .or_else(|| default_group.filter(|id| catalog.is_known_group(id)).map(String::from))
        .or_else(|| catalog.first_group().map(|g| g.id.clone()))
}
