//! Merged per-day lesson lists for a month.
//!
//! For each weekday date the fixed lessons, the lessons filed under that
//! exact date and the lessons filed under the legacy weekday key are merged,
//! de-duplicated by id (date-keyed wins over weekday-keyed) and stably
//! sorted by index. Weekends have no catalog entry and are left out.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::catalog::ScheduleGroup;
use crate::custom::CustomLessonStore;
use crate::keys::{DayId, MissedKey, SourceKey};
use crate::lesson::Lesson;
use crate::missed::MissedSet;
use crate::month::Month;
use crate::state::TimetableState;
use crate::storage::Storage;

/// Where a displayed lesson comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonSource {
    Catalog,
    Dated,
    LegacyWeekday,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonView {
    pub lesson: Lesson,
    pub source: LessonSource,
    pub missed: bool,
}

impl LessonView {
    /// The key a removal must use; `None` for catalog lessons.
    pub fn source_key(&self, date: NaiveDate) -> Option<SourceKey> {
        match self.source {
            LessonSource::Catalog => None,
            LessonSource::Dated => Some(SourceKey::Date(date)),
            LessonSource::LegacyWeekday => DayId::of(date).map(SourceKey::Legacy),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.source != LessonSource::Catalog || self.lesson.is_custom()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub date: NaiveDate,
    pub day: DayId,
    pub day_name: String,
    pub lessons: Vec<LessonView>,
}

impl DayView {
    pub fn missed_count(&self) -> usize {
        self.lessons.iter().filter(|l| l.missed).count()
    }

    pub fn find(&self, lesson_id: &str) -> Option<&LessonView> {
        self.lessons.iter().find(|l| l.lesson.id == lesson_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub group_id: String,
    pub group_label: String,
    pub month: Month,
    pub days: Vec<DayView>,
}

impl MonthView {
    pub fn missed_count(&self) -> usize {
        self.days.iter().map(DayView::missed_count).sum()
    }

    pub fn lesson_count(&self) -> usize {
        self.days.iter().map(|d| d.lessons.len()).sum()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayView> {
        self.days.iter().find(|d| d.date == date)
    }
}

/// Merge one date's lessons for `group`. `None` on weekends.
pub fn day_view(
    group: &ScheduleGroup,
    custom: &CustomLessonStore,
    missed: &MissedSet,
    date: NaiveDate,
) -> Option<DayView> {
    let day = DayId::of(date)?;
    let schedule = group.day(day)?;

    let dated = custom.lessons(&group.id, &SourceKey::Date(date));
    let dated_ids: HashSet<&str> = dated.iter().map(|l| l.id.as_str()).collect();
    let legacy = custom
        .lessons(&group.id, &SourceKey::Legacy(day))
        .iter()
        .filter(|l| !dated_ids.contains(l.id.as_str()));

    let tagged = schedule
        .lessons
        .iter()
        .map(|l| (l, LessonSource::Catalog))
        .chain(dated.iter().map(|l| (l, LessonSource::Dated)))
        .chain(legacy.map(|l| (l, LessonSource::LegacyWeekday)));

    let mut lessons: Vec<LessonView> = tagged
        .map(|(lesson, source)| LessonView {
            missed: missed.is_missed(
                &MissedKey::current(&group.id, date, &lesson.id),
                Some(&MissedKey::legacy(date, &lesson.id)),
            ),
            lesson: lesson.clone(),
            source,
        })
        .collect();
    lessons.sort_by_key(|l| l.lesson.index);

    Some(DayView {
        date,
        day,
        day_name: schedule.day_name.clone(),
        lessons,
    })
}

/// Every weekday of `month` with its merged lessons.
pub fn month_view(group: &ScheduleGroup, custom: &CustomLessonStore, missed: &MissedSet, month: Month) -> MonthView {
    MonthView {
        group_id: group.id.clone(),
        group_label: group.label.clone(),
        month,
        days: month
            .days()
            .filter_map(|date| day_view(group, custom, missed, date))
            .collect(),
    }
}

impl<S: Storage> TimetableState<S> {
    pub fn day_view(&self, group_id: &str, date: NaiveDate) -> Option<DayView> {
        let group = self.catalog().group(group_id)?;
        day_view(group, self.custom(), self.missed(), date)
    }

    pub fn month_view(&self, group_id: &str, month: Month) -> Option<MonthView> {
        let group = self.catalog().group(group_id)?;
        Some(month_view(group, self.custom(), self.missed(), month))
    }

    /// Missed marks attributed to `group_id`. Marks from before groups
    /// existed count toward the first group.
    pub fn group_missed_total(&self, group_id: &str) -> usize {
        let is_first = self.catalog().first_group().is_some_and(|g| g.id == group_id);
        self.missed().count_for_group(group_id, is_first)
    }
}
