//! Compiled-in weekly schedule for each group.

use std::sync::LazyLock;

use crate::keys::DayId;
use crate::lesson::Lesson;

/// One weekday's fixed lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    pub id: DayId,
    pub day_name: String,
    pub lessons: Vec<Lesson>,
}

/// A cohort with its own five-day schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleGroup {
    pub id: String,
    pub label: String,
    pub days: Vec<DaySchedule>,
}

impl ScheduleGroup {
    pub fn day(&self, day: DayId) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.id == day)
    }

    /// Fixed lessons for `day`, empty if the group has none.
    pub fn lessons(&self, day: DayId) -> &[Lesson] {
        self.day(day).map(|d| d.lessons.as_slice()).unwrap_or(&[])
    }
}

/// The ordered list of groups. The first group is the one legacy
/// single-group data belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<ScheduleGroup>,
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog::new(vec![bn_3_2(), bn_2_1()]));

impl Catalog {
    pub fn new(groups: Vec<ScheduleGroup>) -> Self {
        Catalog { groups }
    }

    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn groups(&self) -> &[ScheduleGroup] {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Option<&ScheduleGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn is_known_group(&self, id: &str) -> bool {
        self.group(id).is_some()
    }

    pub fn first_group(&self) -> Option<&ScheduleGroup> {
        self.groups.first()
    }

    pub fn group_ids(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.id.as_str())
    }
}

fn lesson(id: &str, index: u32, subject: &str, room: &str, teacher: &str) -> Lesson {
    Lesson {
        id: id.to_string(),
        subject: subject.to_string(),
        room: room.to_string(),
        teacher: teacher.to_string(),
        index,
    }
}

fn day(id: DayId, lessons: Vec<Lesson>) -> DaySchedule {
    DaySchedule {
        id,
        day_name: id.name().to_string(),
        lessons,
    }
}

fn bn_3_2() -> ScheduleGroup {
    ScheduleGroup {
        id: "bn-3-2".to_string(),
        label: "БН-ІІІ-2".to_string(),
        days: vec![
            day(
                DayId::Day1,
                vec![
                    lesson("bn32-d1-l1", 1, "Технічна механіка", "302", "Волинець"),
                    lesson("bn32-d1-l2", 2, "Іноземна мова (ЗПС)", "316", "Почтакова"),
                    lesson("bn32-d1-l3", 3, "Буріння свердловин", "103", "Агейчева"),
                ],
            ),
            day(
                DayId::Day2,
                vec![
                    lesson("bn32-d2-l1", 1, "Охорона праці", "317", "Шкіль"),
                    lesson("bn32-d2-l2", 2, "МОБ", "301", "Вирста"),
                    lesson("bn32-d2-l3", 3, "Економіка та організація виробництва", "408", "Марченко"),
                ],
            ),
            day(
                DayId::Day3,
                vec![
                    lesson("bn32-d3-l1", 1, "МОБ", "301", "Вирста"),
                    lesson("bn32-d3-l2", 2, "Фізичне виховання", "с/з", "Кошель"),
                    lesson("bn32-d3-l3", 3, "Економіка та організація виробництва", "408", "Марченко"),
                ],
            ),
            day(
                DayId::Day4,
                vec![
                    lesson("bn32-d4-l1", 1, "Буріння свердловин", "103", "Агейчева"),
                    lesson("bn32-d4-l2", 2, "Технічна механіка", "302", "Волинець"),
                    lesson("bn32-d4-l3", 3, "Гідравлічні машини", "310", "Чмихун"),
                    lesson("bn32-d4-l4", 4, "Гідравлічні машини", "310", "Чмихун"),
                ],
            ),
            day(
                DayId::Day5,
                vec![
                    lesson("bn32-d5-l1", 1, "Охорона праці", "317", "Шкіль"),
                    lesson("bn32-d5-l2", 2, "Економіка та організація виробництва", "408", "Марченко"),
                    lesson("bn32-d5-l3", 3, "МОБ", "301", "Вирста"),
                ],
            ),
        ],
    }
}

fn bn_2_1() -> ScheduleGroup {
    ScheduleGroup {
        id: "bn-2-1".to_string(),
        label: "БН-ІІ-1".to_string(),
        days: vec![
            day(
                DayId::Day1,
                vec![
                    lesson("bn21-d1-l1", 1, "Вища математика", "204", "Гончаренко"),
                    lesson("bn21-d1-l2", 2, "Геологія", "105", "Савчук"),
                    lesson("bn21-d1-l3", 3, "Іноземна мова (ЗПС)", "316", "Почтакова"),
                ],
            ),
            day(
                DayId::Day2,
                vec![
                    lesson("bn21-d2-l1", 1, "Інженерна графіка", "209", "Литвин"),
                    lesson("bn21-d2-l2", 2, "Фізика", "211", "Кравець"),
                ],
            ),
            day(
                DayId::Day3,
                vec![
                    lesson("bn21-d3-l1", 1, "Геологія", "105", "Савчук"),
                    lesson("bn21-d3-l2", 2, "Вища математика", "204", "Гончаренко"),
                    lesson("bn21-d3-l3", 3, "Фізичне виховання", "с/з", "Кошель"),
                ],
            ),
            day(
                DayId::Day4,
                vec![
                    lesson("bn21-d4-l2", 2, "Хімія", "114", "Олійник"),
                    lesson("bn21-d4-l3", 3, "Фізика", "211", "Кравець"),
                    lesson("bn21-d4-l4", 4, "Інженерна графіка", "209", "Литвин"),
                ],
            ),
            day(
                DayId::Day5,
                vec![
                    lesson("bn21-d5-l1", 1, "Хімія", "114", "Олійник"),
                    lesson("bn21-d5-l2", 2, "Історія України", "402", "Бондар"),
                ],
            ),
        ],
    }
}
