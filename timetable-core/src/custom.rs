//! User-added lessons, filed per group and per source key.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::error::TimetableResult;
use crate::keys::SourceKey;
use crate::lesson::Lesson;

/// Lessons for one group, keyed by date (or legacy weekday).
pub type SourceLessons = BTreeMap<SourceKey, Vec<Lesson>>;

/// group id -> source key -> lessons, persisted as nested JSON objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomLessonStore {
    groups: BTreeMap<String, SourceLessons>,
}

impl CustomLessonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a persisted payload, upgrading the single-group shape.
    ///
    /// If any top-level key names a known group, the payload is already
    /// `group -> source -> lessons`. Otherwise the whole payload is a
    /// `source -> lessons` map from before groups existed, and it is filed
    /// under the first catalog group.
    pub fn from_persisted(value: Value, catalog: &Catalog) -> TimetableResult<Self> {
        let is_grouped = value
            .as_object()
            .is_some_and(|obj| obj.keys().any(|k| catalog.is_known_group(k)));

        if is_grouped {
            let groups: BTreeMap<String, SourceLessons> = serde_json::from_value(value)?;
            return Ok(CustomLessonStore { groups }.compacted());
        }

        let legacy: SourceLessons = serde_json::from_value(value)?;
        let mut store = CustomLessonStore::new();
        match catalog.first_group() {
            Some(first) if !legacy.is_empty() => {
                log::debug!(
                    "Migrating {} single-group custom lesson entries under '{}'",
                    legacy.len(),
                    first.id
                );
                store.groups.insert(first.id.clone(), legacy);
            }
            _ => {}
        }
        Ok(store.compacted())
    }

    pub fn group(&self, group_id: &str) -> Option<&SourceLessons> {
        self.groups.get(group_id)
    }

    pub fn lessons(&self, group_id: &str, key: &SourceKey) -> &[Lesson] {
        self.groups
            .get(group_id)
            .and_then(|sources| sources.get(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn push(&mut self, group_id: &str, key: SourceKey, lesson: Lesson) {
        self.groups
            .entry(group_id.to_string())
            .or_default()
            .entry(key)
            .or_default()
            .push(lesson);
    }

    /// Remove one lesson. Emptied source keys (and groups) are dropped
    /// rather than kept as empty containers.
    pub fn remove(&mut self, group_id: &str, key: &SourceKey, lesson_id: &str) -> Option<Lesson> {
        let sources = self.groups.get_mut(group_id)?;
        let list = sources.get_mut(key)?;
        let pos = list.iter().position(|l| l.id == lesson_id)?;
        let removed = list.remove(pos);

        if list.is_empty() {
            sources.remove(key);
        }
        if sources.is_empty() {
            self.groups.remove(group_id);
        }
        Some(removed)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_ids(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    fn compacted(mut self) -> Self {
        for sources in self.groups.values_mut() {
            sources.retain(|_, lessons| !lessons.is_empty());
        }
        self.groups.retain(|_, sources| !sources.is_empty());
        self
    }
}
