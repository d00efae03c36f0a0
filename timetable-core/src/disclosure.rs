//! Open/closed state for collapsible panels.
//!
//! Each panel toggles independently; any number may be open at once.

use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disclosure<K: Ord> {
    open: BTreeSet<K>,
}

impl<K: Ord> Default for Disclosure<K> {
    fn default() -> Self {
        Disclosure { open: BTreeSet::new() }
    }
}

impl<K: Ord> Disclosure<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `key`; returns whether it is open afterwards.
    pub fn toggle(&mut self, key: K) -> bool {
        if self.open.remove(&key) {
            false
        } else {
            self.open.insert(key);
            true
        }
    }

    pub fn open(&mut self, key: K) {
        self.open.insert(key);
    }

    pub fn close(&mut self, key: &K) {
        self.open.remove(key);
    }

    pub fn is_open(&self, key: &K) -> bool {
        self.open.contains(key)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}

impl<K: Ord> Extend<K> for Disclosure<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.open.extend(iter);
    }
}

/// Panels of the month screen: the add-lesson form and one per day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panels {
    pub form_open: bool,
    pub days: Disclosure<NaiveDate>,
}

impl Default for Panels {
    fn default() -> Self {
        Panels {
            form_open: true,
            days: Disclosure::new(),
        }
    }
}

impl Panels {
    pub fn toggle_form(&mut self) -> bool {
        self.form_open = !self.form_open;
        self.form_open
    }
}
