use chrono::NaiveDate;
use serde_json::json;
use timetable_core::catalog::Catalog;
use timetable_core::keys::{DayId, MissedKey, SourceKey};
use timetable_core::lesson::Lesson;
use timetable_core::month::Month;
use timetable_core::state::{NewLesson, TimetableState};
use timetable_core::storage::{
    CUSTOM_LESSONS_KEY, FileStorage, MISSED_LESSONS_KEY, MemoryStorage, Storage, UnavailableStorage,
};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

fn load(storage: MemoryStorage) -> TimetableState<MemoryStorage> {
    TimetableState::load(storage, Catalog::builtin().clone())
}

fn add_test_lesson(state: &mut TimetableState<MemoryStorage>, date: NaiveDate) -> Lesson {
    let added = state.add_custom_lesson(&NewLesson {
        group: "bn-3-2".into(),
        dates: vec![date],
        subject: "Test".into(),
        ..Default::default()
    });
    assert_eq!(added.len(), 1);
    added.into_iter().next().unwrap()
}

#[test]
fn malformed_or_absent_values_load_as_empty() {
    let payloads = ["", "not json", "{", "42", "null", "[1,2,3]", r#"{"day-1": "x"}"#];
    for raw in payloads {
        let state = load(
            MemoryStorage::new()
                .with(MISSED_LESSONS_KEY, raw)
                .with(CUSTOM_LESSONS_KEY, raw),
        );
        assert!(state.missed().is_empty(), "missed payload {raw:?}");
        assert!(state.custom().is_empty(), "custom payload {raw:?}");
    }

    let state = load(MemoryStorage::new());
    assert!(state.missed().is_empty());
    assert!(state.custom().is_empty());

    let state = TimetableState::load(UnavailableStorage, Catalog::builtin().clone());
    assert!(state.missed().is_empty());
    assert_eq!(state.active_group_id(), Some("bn-3-2"));
}

#[test]
fn legacy_custom_payload_is_filed_under_first_group() {
    let lessons = json!([{ "id": "custom-1", "subject": "Old", "room": "1", "teacher": "T", "index": 4 }]);
    let payload = json!({ "day-1": lessons.clone() }).to_string();
    let state = load(MemoryStorage::new().with(CUSTOM_LESSONS_KEY, &payload));

    assert_eq!(
        serde_json::to_value(state.custom()).unwrap(),
        json!({ "bn-3-2": { "day-1": lessons } })
    );
}

#[test]
fn monday_scenario_new_lesson_gets_next_index_and_sorts_last() {
    let mut state = load(MemoryStorage::new());
    assert_eq!(state.next_index("bn-3-2", monday()), 4);

    let lesson = add_test_lesson(&mut state, monday());
    assert_eq!(lesson.index, 4);
    assert_eq!(lesson.room, "—");

    let day = state.day_view("bn-3-2", monday()).unwrap();
    assert_eq!(day.lessons.last().unwrap().lesson.id, lesson.id);
    assert!(day.lessons.last().unwrap().is_custom());

    let persisted = state.storage().get(CUSTOM_LESSONS_KEY).unwrap().unwrap();
    assert!(persisted.contains(r#""2024-03-04""#));
}

#[test]
fn next_index_considers_dated_and_legacy_lessons() {
    let legacy = json!({
        "bn-3-2": {
            "day-1": [{ "id": "custom-w", "subject": "W", "room": "—", "teacher": "—", "index": 7 }]
        }
    })
    .to_string();
    let mut state = load(MemoryStorage::new().with(CUSTOM_LESSONS_KEY, &legacy));
    assert_eq!(state.next_index("bn-3-2", monday()), 8);

    let first = add_test_lesson(&mut state, monday());
    assert_eq!(first.index, 8);
    let second = add_test_lesson(&mut state, monday());
    assert_eq!(second.index, 9);

    // Tuesday is unaffected by Monday's lessons.
    let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    assert_eq!(state.next_index("bn-3-2", tuesday), 4);
}

#[test]
fn missed_scenario_counts_and_toggles_back() {
    let mut state = load(MemoryStorage::new());
    let month = Month::new(2024, 3).unwrap();

    assert!(state.toggle_lesson("bn-3-2", monday(), "bn32-d1-l1"));
    let view = state.month_view("bn-3-2", month).unwrap();
    assert_eq!(view.day(monday()).unwrap().missed_count(), 1);
    assert_eq!(view.missed_count(), 1);
    assert_eq!(
        state.storage().get(MISSED_LESSONS_KEY).unwrap().as_deref(),
        Some(r#"["bn-3-2:2024-03-04:bn32-d1-l1"]"#)
    );

    assert!(!state.toggle_lesson("bn-3-2", monday(), "bn32-d1-l1"));
    let view = state.month_view("bn-3-2", month).unwrap();
    assert_eq!(view.day(monday()).unwrap().missed_count(), 0);
    assert_eq!(state.storage().get(MISSED_LESSONS_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn legacy_missed_mark_shows_and_clears_through_current_key() {
    let storage = MemoryStorage::new().with(MISSED_LESSONS_KEY, r#"["2024-03-04:bn32-d1-l2"]"#);
    let mut state = load(storage);

    assert!(state.is_missed("bn-3-2", monday(), "bn32-d1-l2"));
    assert_eq!(state.group_missed_total("bn-3-2"), 1);
    assert_eq!(state.group_missed_total("bn-2-1"), 0);

    assert!(!state.toggle_missed(
        MissedKey::current("bn-3-2", monday(), "bn32-d1-l2"),
        Some(MissedKey::legacy(monday(), "bn32-d1-l2")),
    ));
    assert!(state.missed().is_empty());
}

#[test]
fn removing_last_lesson_drops_source_key_and_marks() {
    let mut state = load(MemoryStorage::new().with(MISSED_LESSONS_KEY, r#"["unrelated"]"#));
    let lesson = add_test_lesson(&mut state, monday());
    state.toggle_lesson("bn-3-2", monday(), &lesson.id);
    assert_eq!(state.missed().len(), 2);

    let removed = state.remove_custom_lesson("bn-3-2", &SourceKey::Date(monday()), &lesson.id);
    assert_eq!(removed.map(|l| l.id), Some(lesson.id.clone()));
    assert!(state.custom().group("bn-3-2").is_none());
    assert_eq!(state.storage().get(CUSTOM_LESSONS_KEY).unwrap().as_deref(), Some("{}"));
    assert_eq!(state.missed().len(), 1);

    assert!(
        state
            .remove_custom_lesson("bn-3-2", &SourceKey::Date(monday()), &lesson.id)
            .is_none()
    );
}

#[test]
fn removing_legacy_weekday_lesson() {
    let payload = json!({
        "day-1": [
            { "id": "custom-a", "subject": "A", "room": "—", "teacher": "—", "index": 4 },
            { "id": "custom-b", "subject": "B", "room": "—", "teacher": "—", "index": 5 }
        ]
    })
    .to_string();
    let mut state = load(
        MemoryStorage::new()
            .with(CUSTOM_LESSONS_KEY, &payload)
            .with(MISSED_LESSONS_KEY, r#"["day-1:custom-a","2024-03-04:custom-a"]"#),
    );

    let key = SourceKey::Legacy(DayId::Day1);
    assert!(state.remove_custom_lesson("bn-3-2", &key, "custom-a").is_some());
    assert!(state.missed().is_empty());
    assert_eq!(state.custom().lessons("bn-3-2", &key).len(), 1);
}

#[test]
fn dated_lesson_wins_over_legacy_with_same_id() {
    let payload = json!({
        "bn-3-2": {
            "day-1": [{ "id": "custom-same", "subject": "Legacy", "room": "1", "teacher": "A", "index": 5 }],
            "2024-03-04": [{ "id": "custom-same", "subject": "Dated", "room": "2", "teacher": "B", "index": 5 }]
        }
    })
    .to_string();
    let state = load(MemoryStorage::new().with(CUSTOM_LESSONS_KEY, &payload));

    let day = state.day_view("bn-3-2", monday()).unwrap();
    let shown = day.find("custom-same").unwrap();
    assert_eq!(shown.lesson.subject, "Dated");
    assert_eq!(shown.lesson.room, "2");
    assert_eq!(day.lessons.iter().filter(|l| l.lesson.id == "custom-same").count(), 1);

    // The following Monday only has the weekly entry.
    let next_monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
    let day = state.day_view("bn-3-2", next_monday).unwrap();
    assert_eq!(day.find("custom-same").unwrap().lesson.subject, "Legacy");
}

#[test]
fn state_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::builtin().clone();

    let mut state = TimetableState::load(FileStorage::new(dir.path()), catalog.clone());
    state.set_active_group("bn-2-1").unwrap();
    state.toggle_lesson("bn-2-1", monday(), "bn21-d1-l1");
    let added = state.add_custom_lesson(&NewLesson {
        group: "bn-2-1".into(),
        dates: vec![monday()],
        subject: "Лабораторна".into(),
        room: "105".into(),
        teacher: "Савчук".into(),
        index: Some(2),
    });
    drop(state);

    let state = TimetableState::load(FileStorage::new(dir.path()), catalog);
    assert_eq!(state.active_group_id(), Some("bn-2-1"));
    assert!(state.is_missed("bn-2-1", monday(), "bn21-d1-l1"));
    let day = state.day_view("bn-2-1", monday()).unwrap();
    let ids: Vec<_> = day.lessons.iter().map(|l| l.lesson.id.as_str()).collect();
    assert_eq!(ids, ["bn21-d1-l1", "bn21-d1-l2", added[0].id.as_str(), "bn21-d1-l3"]);
}
