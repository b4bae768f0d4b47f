//! Синхронизация цены, цены со скидкой и процента скидки
//!
//! Используется формой товара и позициями флеш-распродажи. Поля формы хранятся
//! строками (как их вводит пользователь); пересчёт выполняется только когда
//! оба исходных значения корректны.

use serde::{Deserialize, Serialize};

/// Округление до 2 знаков, как `Math.round(v * 100) / 100` в браузере.
///
/// Умножение идёт в двоичной арифметике, поэтому значения вида `1.005`
/// (хранятся как `1.00499...`) округляются вниз: `round2(1.005) == 1.0`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Процент скидки по цене и цене со скидкой.
///
/// `None`, если `price <= 0`, `discounted_price <= 0` или `discounted_price >= price`.
pub fn discount_percent(price: f64, discounted_price: f64) -> Option<f64> {
    if price > 0.0 && discounted_price > 0.0 && discounted_price < price {
        Some(round2((price - discounted_price) / price * 100.0))
    } else {
        None
    }
}

/// Цена со скидкой по цене и проценту скидки.
///
/// `None`, если `price <= 0` или процент вне `(0, 100]`.
pub fn discounted_price(price: f64, discount: f64) -> Option<f64> {
    if price > 0.0 && discount > 0.0 && discount <= 100.0 {
        Some(round2(price - price * discount / 100.0))
    } else {
        None
    }
}

/// Разобрать число из поля ввода. Запятая принимается как десятичный разделитель.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Число для поля ввода: не больше 2 знаков, без хвостовых нулей
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Тройка связанных ценовых полей формы
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceFields {
    pub price: String,
    pub discounted_price: String,
    pub discount: String,
}

impl PriceFields {
    pub fn from_values(price: f64, discounted_price: f64, discount: f64) -> Self {
        Self {
            price: format_amount(price),
            discounted_price: format_amount(discounted_price),
            discount: format_amount(discount),
        }
    }

    /// Изменение цены пересчитывает процент скидки
    pub fn set_price(&mut self, raw: String) {
        self.price = raw;
        self.sync_discount();
    }

    /// Изменение цены со скидкой пересчитывает процент скидки
    pub fn set_discounted_price(&mut self, raw: String) {
        self.discounted_price = raw;
        self.sync_discount();
    }

    /// Изменение процента пересчитывает цену со скидкой
    pub fn set_discount(&mut self, raw: String) {
        self.discount = raw;
        let (Some(price), Some(discount)) = (parse_amount(&self.price), parse_amount(&self.discount))
        else {
            return;
        };
        if let Some(value) = discounted_price(price, discount) {
            self.discounted_price = format_amount(value);
        }
    }

    /// Введённый процент пуст или лежит в `[0, 100]`
    pub fn discount_in_range(&self) -> bool {
        match parse_amount(&self.discount) {
            Some(value) => (0.0..=100.0).contains(&value),
            None => self.discount.trim().is_empty(),
        }
    }

    fn sync_discount(&mut self) {
        let (Some(price), Some(discounted)) = (
            parse_amount(&self.price),
            parse_amount(&self.discounted_price),
        ) else {
            return;
        };
        if let Some(value) = discount_percent(price, discounted) {
            self.discount = format_amount(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_follows_binary_float() {
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(2.675), 2.67);
    }

    #[test]
    fn test_discount_range_check() {
        let mut fields = PriceFields::from_values(100.0, 80.0, 20.0);
        assert!(fields.discount_in_range());
        fields.set_discount("150".into());
        assert!(!fields.discount_in_range());
        assert_eq!(fields.discounted_price, "80");
        fields.set_discount("-5".into());
        assert!(!fields.discount_in_range());
        fields.set_discount("abc".into());
        assert!(!fields.discount_in_range());
        fields.set_discount(" ".into());
        assert!(fields.discount_in_range());
    }

    #[test]
    fn test_discount_percent_formula() {
        assert_eq!(discount_percent(200.0, 150.0), Some(25.0));
        assert_eq!(discount_percent(3.0, 2.0), Some(33.33));
        assert_eq!(discount_percent(999.0, 1.0), Some(round2(998.0 / 999.0 * 100.0)));
    }

    #[test]
    fn test_discount_percent_guards() {
        assert_eq!(discount_percent(0.0, 10.0), None);
        assert_eq!(discount_percent(100.0, 0.0), None);
        assert_eq!(discount_percent(100.0, 100.0), None);
        assert_eq!(discount_percent(100.0, 120.0), None);
        assert_eq!(discount_percent(-5.0, -10.0), None);
    }

    #[test]
    fn test_discounted_price_formula() {
        assert_eq!(discounted_price(200.0, 25.0), Some(150.0));
        assert_eq!(discounted_price(99.99, 15.0), Some(round2(99.99 - 99.99 * 15.0 / 100.0)));
        assert_eq!(discounted_price(10.0, 100.0), Some(0.0));
    }

    #[test]
    fn test_discounted_price_guards() {
        assert_eq!(discounted_price(0.0, 10.0), None);
        assert_eq!(discounted_price(100.0, 0.0), None);
        assert_eq!(discounted_price(100.0, 100.5), None);
    }

    #[test]
    fn test_directions_follow_formula_not_roundtrip() {
        // 3 -> 2 gives 33.33%; applying 33.33% to 3 gives 2.0001 -> 2.0
        let pct = discount_percent(3.0, 2.0).unwrap();
        assert_eq!(discounted_price(3.0, pct), Some(round2(3.0 - 3.0 * pct / 100.0)));
    }

    #[test]
    fn test_parse_and_format_amount() {
        assert_eq!(parse_amount(" 12,5 "), Some(12.5));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(90.0), "90");
        assert_eq!(format_amount(33.333), "33.33");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn test_fields_recompute_discount_on_price_edit() {
        let mut fields = PriceFields::default();
        fields.set_price("200".into());
        assert_eq!(fields.discount, "");
        fields.set_discounted_price("150".into());
        assert_eq!(fields.discount, "25");
        fields.set_price("300".into());
        assert_eq!(fields.discount, "50");
    }

    #[test]
    fn test_fields_recompute_discounted_price_on_discount_edit() {
        let mut fields = PriceFields::default();
        fields.set_price("80".into());
        fields.set_discount("12.5".into());
        assert_eq!(fields.discounted_price, "70");
    }

    #[test]
    fn test_fields_no_update_outside_guards() {
        let mut fields = PriceFields::from_values(100.0, 80.0, 20.0);
        fields.set_discounted_price("120".into());
        assert_eq!(fields.discount, "20");
        fields.set_discount("150".into());
        assert_eq!(fields.discounted_price, "120");
        fields.set_price("abc".into());
        assert_eq!(fields.discount, "150");
    }
}
