//! Composite keys: weekday tags, missed-lesson keys and custom-lesson source keys.
//!
//! All of these persist as plain strings. Older payloads used shorter key
//! formats; they are parsed into their own variants so lookups can consult
//! them, while new writes always use the current format.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{TimetableError, TimetableResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a zero-padded `YYYY-MM-DD` date key.
pub fn parse_date_key(s: &str) -> TimetableResult<NaiveDate> {
    if s.len() != 10 {
        return Err(TimetableError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| TimetableError::InvalidDate(s.to_string()))
}

/// Format a date as a `YYYY-MM-DD` key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// One of the five teaching weekdays, persisted as `day-1`..`day-5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayId {
    Day1,
    Day2,
    Day3,
    Day4,
    Day5,
}

impl DayId {
    pub const ALL: [DayId; 5] = [DayId::Day1, DayId::Day2, DayId::Day3, DayId::Day4, DayId::Day5];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayId::Day1 => "day-1",
            DayId::Day2 => "day-2",
            DayId::Day3 => "day-3",
            DayId::Day4 => "day-4",
            DayId::Day5 => "day-5",
        }
    }

    /// Weekends have no day id.
    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(DayId::Day1),
            Weekday::Tue => Some(DayId::Day2),
            Weekday::Wed => Some(DayId::Day3),
            Weekday::Thu => Some(DayId::Day4),
            Weekday::Fri => Some(DayId::Day5),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    pub fn of(date: NaiveDate) -> Option<Self> {
        Self::from_weekday(date.weekday())
    }

    /// Display name of the weekday.
    pub fn name(&self) -> &'static str {
        match self {
            DayId::Day1 => "Понеділок",
            DayId::Day2 => "Вівторок",
            DayId::Day3 => "Середа",
            DayId::Day4 => "Четвер",
            DayId::Day5 => "П'ятниця",
        }
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayId {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayId::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| TimetableError::InvalidKey(format!("not a day id: {s}")))
    }
}

/// Where a custom lesson is filed: a calendar date, or (legacy) a weekday.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKey {
    Date(NaiveDate),
    Legacy(DayId),
    /// Persisted key matching neither format. Kept so saving doesn't drop it.
    Other(String),
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKey::Date(d) => f.write_str(&date_key(*d)),
            SourceKey::Legacy(day) => f.write_str(day.as_str()),
            SourceKey::Other(s) => f.write_str(s),
        }
    }
}

impl From<&str> for SourceKey {
    fn from(s: &str) -> Self {
        if let Ok(date) = parse_date_key(s) {
            SourceKey::Date(date)
        } else if let Ok(day) = s.parse::<DayId>() {
            SourceKey::Legacy(day)
        } else {
            SourceKey::Other(s.to_string())
        }
    }
}

impl Serialize for SourceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SourceKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SourceKey::from(s.as_str()))
    }
}

/// Identifies one lesson occurrence marked as missed.
///
/// Current marks are `<group>:<YYYY-MM-DD>:<lesson>`. Single-group payloads
/// used `<YYYY-MM-DD>:<lesson>` or `<day-N>:<lesson>`; these are only read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MissedKey {
    Current {
        group: String,
        date: NaiveDate,
        lesson: String,
    },
    LegacyDate {
        date: NaiveDate,
        lesson: String,
    },
    LegacyDay {
        day: DayId,
        lesson: String,
    },
    /// Persisted entry matching no known format.
    Opaque(String),
}

impl MissedKey {
    pub fn current(group: &str, date: NaiveDate, lesson: &str) -> Self {
        MissedKey::Current {
            group: group.to_string(),
            date,
            lesson: lesson.to_string(),
        }
    }

    /// The pre-multi-group key for the same lesson occurrence.
    pub fn legacy(date: NaiveDate, lesson: &str) -> Self {
        MissedKey::LegacyDate {
            date,
            lesson: lesson.to_string(),
        }
    }

    pub fn lesson_id(&self) -> Option<&str> {
        match self {
            MissedKey::Current { lesson, .. }
            | MissedKey::LegacyDate { lesson, .. }
            | MissedKey::LegacyDay { lesson, .. } => Some(lesson.as_str()),
            MissedKey::Opaque(_) => None,
        }
    }

    pub fn group(&self) -> Option<&str> {
        match self {
            MissedKey::Current { group, .. } => Some(group.as_str()),
            _ => None,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, MissedKey::LegacyDate { .. } | MissedKey::LegacyDay { .. })
    }

    /// Whether this key refers to `lesson_id`, under any day prefix.
    pub fn refers_to(&self, lesson_id: &str) -> bool {
        match self.lesson_id() {
            Some(id) => id == lesson_id,
            None => match self {
                MissedKey::Opaque(raw) => raw
                    .strip_suffix(lesson_id)
                    .is_some_and(|head| head.ends_with(':')),
                _ => false,
            },
        }
    }
}

impl fmt::Display for MissedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissedKey::Current { group, date, lesson } => {
                write!(f, "{}:{}:{}", group, date_key(*date), lesson)
            }
            MissedKey::LegacyDate { date, lesson } => write!(f, "{}:{}", date_key(*date), lesson),
            MissedKey::LegacyDay { day, lesson } => write!(f, "{}:{}", day, lesson),
            MissedKey::Opaque(raw) => f.write_str(raw),
        }
    }
}

impl From<&str> for MissedKey {
    fn from(s: &str) -> Self {
        let Some((head, rest)) = s.split_once(':') else {
            return MissedKey::Opaque(s.to_string());
        };
        if rest.is_empty() {
            return MissedKey::Opaque(s.to_string());
        }

        if let Ok(date) = parse_date_key(head) {
            return MissedKey::LegacyDate {
                date,
                lesson: rest.to_string(),
            };
        }
        if let Ok(day) = head.parse::<DayId>() {
            return MissedKey::LegacyDay {
                day,
                lesson: rest.to_string(),
            };
        }

        match rest.split_once(':') {
            Some((date, lesson)) if !head.is_empty() && !lesson.is_empty() => {
                match parse_date_key(date) {
                    Ok(date) => MissedKey::Current {
                        group: head.to_string(),
                        date,
                        lesson: lesson.to_string(),
                    },
                    Err(_) => MissedKey::Opaque(s.to_string()),
                }
            }
            _ => MissedKey::Opaque(s.to_string()),
        }
    }
}

impl Serialize for MissedKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MissedKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(MissedKey::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_id_from_dates() {
        assert_eq!(DayId::of(d(2024, 3, 4)), Some(DayId::Day1));
        assert_eq!(DayId::of(d(2024, 3, 8)), Some(DayId::Day5));
        assert_eq!(DayId::of(d(2024, 3, 9)), None);
        assert_eq!(DayId::of(d(2024, 3, 10)), None);
    }

    #[test]
    fn day_id_parse() {
        assert_eq!("day-3".parse::<DayId>().unwrap(), DayId::Day3);
        assert!("day-6".parse::<DayId>().is_err());
        assert_eq!(DayId::Day4.to_string(), "day-4");
    }

    #[test]
    fn date_key_requires_padding() {
        assert!(parse_date_key("2024-3-4").is_err());
        assert_eq!(parse_date_key("2024-03-04").unwrap(), d(2024, 3, 4));
        assert_eq!(date_key(d(2024, 3, 4)), "2024-03-04");
    }

    #[test]
    fn parse_current_key() {
        let key = MissedKey::from("bn-3-2:2024-03-04:bn32-d1-l1");
        assert_eq!(key, MissedKey::current("bn-3-2", d(2024, 3, 4), "bn32-d1-l1"));
        assert_eq!(key.to_string(), "bn-3-2:2024-03-04:bn32-d1-l1");
    }

    #[test]
    fn parse_legacy_keys() {
        assert_eq!(
            MissedKey::from("2024-03-04:d1-l1"),
            MissedKey::legacy(d(2024, 3, 4), "d1-l1")
        );
        assert_eq!(
            MissedKey::from("day-2:d2-l3"),
            MissedKey::LegacyDay {
                day: DayId::Day2,
                lesson: "d2-l3".into()
            }
        );
    }

    #[test]
    fn unknown_formats_are_kept_verbatim() {
        for raw in ["d1-l1", "bn-3-2:monday:x", "a:", ":b"] {
            let key = MissedKey::from(raw);
            assert_eq!(key, MissedKey::Opaque(raw.to_string()));
            assert_eq!(key.to_string(), raw);
        }
    }

    #[test]
    fn refers_to_matches_any_prefix() {
        let id = "custom-bn-3-2-2024-03-04-1-0001";
        assert!(MissedKey::current("bn-3-2", d(2024, 3, 4), id).refers_to(id));
        assert!(MissedKey::legacy(d(2024, 3, 4), id).refers_to(id));
        assert!(MissedKey::from(format!("day-1:{id}").as_str()).refers_to(id));
        assert!(MissedKey::Opaque(format!("weird:{id}")).refers_to(id));
        assert!(!MissedKey::Opaque(format!("x{id}")).refers_to(id));
        assert!(!MissedKey::current("bn-3-2", d(2024, 3, 4), "other").refers_to(id));
    }

    #[test]
    fn source_key_parse() {
        assert_eq!(SourceKey::from("2024-03-04"), SourceKey::Date(d(2024, 3, 4)));
        assert_eq!(SourceKey::from("day-1"), SourceKey::Legacy(DayId::Day1));
        assert_eq!(SourceKey::from("junk"), SourceKey::Other("junk".into()));
    }

    #[test]
    fn keys_serialize_as_strings() {
        let keys = vec![
            MissedKey::current("bn-2-1", d(2024, 1, 2), "l"),
            MissedKey::legacy(d(2024, 1, 2), "l"),
        ];
        let json = serde_json::to_string(&keys).unwrap();
        assert_eq!(json, r#"["bn-2-1:2024-01-02:l","2024-01-02:l"]"#);
        let back: Vec<MissedKey> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, keys);
    }
}
