//! Форматирование значений для таблиц

use chrono::{DateTime, Utc};
use contracts::shared::datetime::format_display;

/// Сумма с разделителем тысяч (пробел) и двумя знаками
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

pub fn format_optional_date(value: Option<DateTime<Utc>>) -> String {
    value.as_ref().map(format_display).unwrap_or_else(|| "—".to_string())
}

pub fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "—".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.5), "1 234.50");
        assert_eq!(format_money(1234567.891), "1 234 567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-999.0), "-999.00");
        assert_eq!(format_money(-1500.25), "-1 500.25");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash("  "), "—");
        assert_eq!(or_dash("x"), "x");
    }
}
