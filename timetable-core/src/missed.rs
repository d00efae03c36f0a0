//! The set of lesson occurrences marked as missed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::keys::MissedKey;

/// Missed marks, persisted as a JSON array of key strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissedSet {
    keys: BTreeSet<MissedKey>,
}

impl MissedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// If either key is present, remove both; otherwise add `primary`.
    /// Returns whether the lesson is missed afterwards.
    pub fn toggle(&mut self, primary: MissedKey, legacy: Option<MissedKey>) -> bool {
        if self.is_missed(&primary, legacy.as_ref()) {
            self.keys.remove(&primary);
            if let Some(legacy) = legacy {
                self.keys.remove(&legacy);
            }
            false
        } else {
            self.keys.insert(primary);
            true
        }
    }

    pub fn is_missed(&self, primary: &MissedKey, legacy: Option<&MissedKey>) -> bool {
        self.keys.contains(primary) || legacy.is_some_and(|k| self.keys.contains(k))
    }

    pub fn contains(&self, key: &MissedKey) -> bool {
        self.keys.contains(key)
    }

    /// Drop every mark for `lesson_id`, current or legacy. Returns how many were removed.
    pub fn purge_lesson(&mut self, lesson_id: &str) -> usize {
        let before = self.keys.len();
        self.keys.retain(|k| !k.refers_to(lesson_id));
        before - self.keys.len()
    }

    /// Marks belonging to `group`. Legacy marks predate groups and are
    /// counted only when `include_legacy` is set.
    pub fn count_for_group(&self, group: &str, include_legacy: bool) -> usize {
        self.keys
            .iter()
            .filter(|k| k.group() == Some(group) || (include_legacy && k.is_legacy()))
            .count()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MissedKey> {
        self.keys.iter()
    }
}

impl FromIterator<MissedKey> for MissedSet {
    fn from_iter<I: IntoIterator<Item = MissedKey>>(iter: I) -> Self {
        MissedSet {
            keys: iter.into_iter().collect(),
        }
    }
}
