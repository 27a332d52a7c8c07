//! Russian labels for dates, month headers and tooltips

use chrono::{Locale, NaiveDate};

/// Long date pattern: "weekday, day month year"
const LONG_DATE_FORMAT: &str = "%A, %-d %B %Y";

/// Calendar-unit suffix some formatters append after the year
const YEAR_SUFFIX: &str = " г.";

/// Header labels keyed by two-digit month
const MONTH_LABELS: [(&str, &str); 12] = [
    ("01", "Янв."),
    ("02", "Февр."),
    ("03", "Март"),
    ("04", "Апр."),
    ("05", "Май"),
    ("06", "Июнь"),
    ("07", "Июль"),
    ("08", "Авг."),
    ("09", "Сент."),
    ("10", "Окт."),
    ("11", "Нояб."),
    ("12", "Дек."),
];

/// Format an ISO date as a capitalized Russian long date.
/// Empty or unparseable input gives an empty string.
pub fn format_local_date(iso_date: &str) -> String {
    if iso_date.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(iso_date, "%Y-%m-%d") {
        Ok(date) => format_date(date),
        Err(_) => String::new(),
    }
}

/// Capitalized Russian long date for `date`
pub fn format_date(date: NaiveDate) -> String {
    let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
        return String::new();
    };
    let formatted = midnight
        .and_utc()
        .format_localized(LONG_DATE_FORMAT, Locale::ru_RU)
        .to_string();
    capitalize_words(&formatted.replacen(YEAR_SUFFIX, "", 1))
}

/// Uppercase the first letter of every space-separated word
pub fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Month header label for a "YYYY-MM" key (empty if the month is unknown)
pub fn month_label(key: &str) -> &'static str {
    let suffix = key.get(key.len().saturating_sub(2)..).unwrap_or("");
    MONTH_LABELS
        .iter()
        .find(|(month, _)| *month == suffix)
        .map(|(_, label)| *label)
        .unwrap_or("")
}

/// Tooltip headline for a day's count
pub fn tooltip_text(count: u64) -> String {
    if count == 0 {
        "No contributions".to_string()
    } else {
        format!("{} contributions", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== format_local_date tests ==========

    #[test]
    fn test_format_local_date_empty() {
        assert_eq!(format_local_date(""), "");
    }

    #[test]
    fn test_format_local_date_invalid() {
        assert_eq!(format_local_date("not-a-date"), "");
        assert_eq!(format_local_date("2024-02-30"), "");
    }

    #[test]
    fn test_format_local_date_russian_long_form() {
        assert_eq!(format_local_date("2024-03-08"), "Пятница, 8 Марта 2024");
    }

    #[test]
    fn test_format_local_date_every_word_capitalized() {
        let formatted = format_local_date("2024-03-08");
        for word in formatted.split(' ') {
            let first = word.chars().next().unwrap();
            assert!(
                !first.is_lowercase(),
                "word {word:?} in {formatted:?} is not capitalized"
            );
        }
    }

    #[test]
    fn test_format_date_matches_iso_variant() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(format_date(date), format_local_date("2023-12-31"));
        assert!(format_date(date).starts_with("Воскресенье, 31 "));
    }

    // ========== capitalize_words tests ==========

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("пятница, 8 марта 2024"), "Пятница, 8 Марта 2024");
        assert_eq!(capitalize_words(""), "");
        assert_eq!(capitalize_words("a  b"), "A  B");
    }

    // ========== month_label tests ==========

    #[test]
    fn test_month_label_lookup() {
        assert_eq!(month_label("2024-01"), "Янв.");
        assert_eq!(month_label("2024-02"), "Февр.");
        assert_eq!(month_label("2023-05"), "Май");
        assert_eq!(month_label("2023-09"), "Сент.");
        assert_eq!(month_label("2023-12"), "Дек.");
    }

    #[test]
    fn test_month_label_unknown() {
        assert_eq!(month_label("2024-13"), "");
        assert_eq!(month_label(""), "");
    }

    // ========== tooltip_text tests ==========

    #[test]
    fn test_tooltip_text() {
        assert_eq!(tooltip_text(0), "No contributions");
        assert_eq!(tooltip_text(1), "1 contributions");
        assert_eq!(tooltip_text(42), "42 contributions");
    }
}
