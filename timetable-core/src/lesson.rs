//! Lesson type shared by the catalog and user-added lessons.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown for room/teacher when a custom lesson leaves them blank.
pub const PLACEHOLDER: &str = "—";

const CUSTOM_ID_PREFIX: &str = "custom-";

/// A single lesson (one "pair") within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub subject: String,
    pub room: String,
    pub teacher: String,
    /// Order in the day (1, 2, 3...). Not guaranteed unique or contiguous.
    pub index: u32,
}

impl Lesson {
    /// Build a user-added lesson for `date`, trimming inputs and substituting
    /// the placeholder for blank room/teacher.
    pub fn custom(
        group_id: &str,
        date: NaiveDate,
        subject: &str,
        room: &str,
        teacher: &str,
        index: u32,
    ) -> Self {
        Lesson {
            id: Self::generate_custom_id(group_id, date),
            subject: subject.trim().to_string(),
            room: or_placeholder(room),
            teacher: or_placeholder(teacher),
            index,
        }
    }

    /// `custom-<group>-<YYYY-MM-DD>-<unix millis>-<4 random digits>`
    pub fn generate_custom_id(group_id: &str, date: NaiveDate) -> String {
        let millis = Utc::now().timestamp_millis();
        let random = uuid::Uuid::new_v4().as_u128() % 10_000;
        format!(
            "{}{}-{}-{}-{:04}",
            CUSTOM_ID_PREFIX,
            group_id,
            date.format("%Y-%m-%d"),
            millis,
            random
        )
    }

    /// Whether this lesson was added by the user rather than the catalog.
    pub fn is_custom(&self) -> bool {
        self.id.starts_with(CUSTOM_ID_PREFIX)
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.index, self.subject)
    }
}

fn or_placeholder(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}
