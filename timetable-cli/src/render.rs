//! Terminal rendering for timetable views.
//!
//! Extension traits that add colored output to timetable-core types using
//! owo_colors.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use timetable_core::catalog::ScheduleGroup;
use timetable_core::disclosure::Panels;
use timetable_core::view::{DayView, LessonView, MonthView};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for LessonView {
    fn render(&self) -> String {
        let lesson = &self.lesson;
        let subject = if self.missed {
            lesson.subject.dimmed().strikethrough().to_string()
        } else {
            lesson.subject.bold().to_string()
        };
        let mark = if self.missed {
            "✗".red().to_string()
        } else {
            "✓".green().to_string()
        };
        let custom = if self.is_custom() {
            format!(" {}", "[своя пара]".green())
        } else {
            String::new()
        };

        format!(
            "{} {:>2}. {}{}  {} {}  {} {}  {}",
            mark,
            lesson.index,
            subject,
            custom,
            "ауд.".dimmed(),
            lesson.room,
            "викл.".dimmed(),
            lesson.teacher,
            lesson.id.dimmed()
        )
    }
}

impl Render for DayView {
    fn render(&self) -> String {
        let title = format!("{} {}", self.day_name, self.date.format("%d.%m"));
        let mut line = format!("{}  {}", title.bold(), format!("({})", pluralize_lessons(self.lessons.len())).dimmed());
        let missed = self.missed_count();
        if missed > 0 {
            line.push_str(&format!("  {}", format!("пропуски: {missed}").red()));
        }
        line
    }
}

impl Render for ScheduleGroup {
    fn render(&self) -> String {
        format!("{} {}", self.label, format!("({})", self.id).dimmed())
    }
}

/// Header line, day sections and (optionally) the add-lesson hint.
pub fn render_month(view: &MonthView, panels: &Panels, today: NaiveDate, group_total: usize, next_index: Option<u32>) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} {}   {} {}",
        "Розклад".bold(),
        format!("· Група {}", view.group_label).dimmed(),
        "Пропуски".red(),
        group_total.to_string().red().bold()
    ));

    let mut title = format!("‹ {} ›", view.month.title()).bold().to_string();
    if view.month.is_current(today) {
        title.push_str(&format!("  {}", "Поточний місяць".green()));
    }
    lines.push(title);
    lines.push(format!(
        "{}",
        format!("{} пар, пропущено за місяць: {}", view.lesson_count(), view.missed_count()).dimmed()
    ));

    for day in &view.days {
        lines.push(String::new());
        let mut header = day.render();
        if day.date == today {
            header.push_str(&format!("  {}", "сьогодні".cyan()));
        }
        lines.push(header);

        if panels.days.is_open(&day.date) {
            lines.extend(render_lessons(day));
        }
    }

    if panels.form_open {
        lines.push(String::new());
        let hint = next_index
            .map(|i| format!(" (наступний № пари: {i})"))
            .unwrap_or_default();
        lines.push(
            format!("Додати свою пару: timetable add <предмет> --date YYYY-MM-DD{hint}")
                .dimmed()
                .to_string(),
        );
    }

    lines.join("\n")
}

/// Lesson lines for one day, or a placeholder when it has none.
pub fn render_lessons(day: &DayView) -> Vec<String> {
    if day.lessons.is_empty() {
        return vec![format!("   {}", "Пар немає".dimmed().italic())];
    }
    day.lessons.iter().map(|l| format!("   {}", l.render())).collect()
}

/// "1 пара", "3 пари", "5 пар"
fn pluralize_lessons(count: usize) -> String {
    let word = match (count % 10, count % 100) {
        (1, n) if n != 11 => "пара",
        (2..=4, n) if !(12..=14).contains(&n) => "пари",
        _ => "пар",
    };
    format!("{count} {word}")
}
