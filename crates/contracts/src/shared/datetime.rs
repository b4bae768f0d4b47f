//! Даты из полей `<input type="datetime-local">` и `<input type="date">`
//!
//! Значения полей трактуются как UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const INPUT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Разобрать значение поля ввода. Принимает datetime-local, дату или RFC 3339.
pub fn parse_input(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in INPUT_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Значение для `<input type="datetime-local">`
pub fn to_input(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%dT%H:%M").to_string()
}

/// Значение для `<input type="date">`
pub fn to_date_input(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Для таблиц: `дд.мм.гггг чч:мм`
pub fn format_display(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 8, 10, 30, 0).unwrap();
        assert_eq!(parse_input("2024-03-08T10:30"), Some(expected));
        assert_eq!(parse_input("2024-03-08T10:30:00"), Some(expected));
        assert_eq!(parse_input("2024-03-08T10:30:00.000Z"), Some(expected));
        assert_eq!(
            parse_input("2024-03-08"),
            Some(Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_input(""), None);
        assert_eq!(parse_input("08/03/2024"), None);
    }

    #[test]
    fn test_to_input_round_trip() {
        let value = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(to_input(&value), "2024-12-31T23:59");
        assert_eq!(parse_input(&to_input(&value)), Some(value));
        assert_eq!(format_display(&value), "31.12.2024 23:59");
    }
}
