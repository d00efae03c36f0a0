use anyhow::Result;
use chrono::NaiveDate;
use timetable_core::keys::parse_date_key;

/// Weekday and month names fuzzydate understands, for expanding prefixes.
const NAMES: [&str; 17] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "january", "february", "march", "april",
    "may", "june", "july", "august", "september", "october", "november", "december",
];

/// Expand "fri", "thurs", "sept" and other name prefixes of three or more
/// letters, which fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let word = word.to_lowercase();
            let full = match word.len() {
                0..=2 => None,
                _ => NAMES.iter().find(|name| name.starts_with(word.as_str())),
            };
            full.map_or(word, |name| name.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse `YYYY-MM-DD` or a natural language date ("tomorrow", "next fri").
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = parse_date_key(trimmed) {
        return Ok(date);
    }

    let expanded = expand_abbreviations(trimmed);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;
    Ok(dt.date())
}

/// Parse a comma-separated list of dates.
pub fn parse_dates(input: &str) -> Result<Vec<NaiveDate>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_date)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates_parse_directly() {
        assert_eq!(
            parse_date("2024-03-04").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
        assert_eq!(
            parse_date(" 2024-12-31 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_date("definitely not a date").is_err());
    }

    #[test]
    fn expand_day_abbreviations() {
        assert_eq!(expand_abbreviations("next fri"), "next friday");
        assert_eq!(expand_abbreviations("Mon"), "monday");
        assert_eq!(expand_abbreviations("thurs"), "thursday");
    }

    #[test]
    fn expand_month_abbreviations() {
        assert_eq!(expand_abbreviations("sep 5"), "september 5");
        assert_eq!(expand_abbreviations("sept  5"), "september 5");
    }

    #[test]
    fn short_and_unrelated_words_are_kept() {
        assert_eq!(expand_abbreviations("in 3 days"), "in 3 days");
        assert_eq!(expand_abbreviations("next Friday"), "next friday");
        assert_eq!(expand_abbreviations("sat"), "sat");
    }

    #[test]
    fn comma_separated_dates() {
        let dates = parse_dates("2024-03-04, 2024-03-06,").unwrap();
        assert_eq!(
            dates,
            [
                NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
            ]
        );
        assert!(parse_dates("2024-03-04, nonsense words").is_err());
    }
}
