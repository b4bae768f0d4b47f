use crate::domain::common::{AggregateRoot, EntityId, EntityRef};
use crate::shared::datetime;
use crate::shared::field_errors::FieldErrors;
use crate::shared::list::ListResponse;
use crate::shared::pricing::parse_amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    Percentage,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "fixed" => DiscountType::Fixed,
            _ => DiscountType::Percentage,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "Процент",
            DiscountType::Fixed => "Фиксированная сумма",
        }
    }
}

/// Вид ограничения купона
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestrictionKind {
    Users,
    Products,
    Categories,
    Occasions,
    Recipients,
}

impl RestrictionKind {
    pub const ALL: [RestrictionKind; 5] = [
        RestrictionKind::Users,
        RestrictionKind::Products,
        RestrictionKind::Categories,
        RestrictionKind::Occasions,
        RestrictionKind::Recipients,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RestrictionKind::Users => "Пользователи",
            RestrictionKind::Products => "Товары",
            RestrictionKind::Categories => "Категории",
            RestrictionKind::Occasions => "Поводы",
            RestrictionKind::Recipients => "Получатели",
        }
    }
}

/// Области действия купона. Пустой список означает «применяется ко всем».
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponScope {
    #[serde(default, alias = "applicableUsers")]
    pub users: Vec<EntityId>,
    #[serde(default, alias = "applicableProducts")]
    pub products: Vec<EntityId>,
    #[serde(default, alias = "applicableCategories")]
    pub categories: Vec<EntityId>,
    #[serde(default, alias = "applicableOccasions")]
    pub occasions: Vec<EntityId>,
    #[serde(default, alias = "applicableRecipients")]
    pub recipients: Vec<EntityId>,
}

impl CouponScope {
    pub fn list(&self, kind: RestrictionKind) -> &[EntityId] {
        match kind {
            RestrictionKind::Users => &self.users,
            RestrictionKind::Products => &self.products,
            RestrictionKind::Categories => &self.categories,
            RestrictionKind::Occasions => &self.occasions,
            RestrictionKind::Recipients => &self.recipients,
        }
    }

    fn list_mut(&mut self, kind: RestrictionKind) -> &mut Vec<EntityId> {
        match kind {
            RestrictionKind::Users => &mut self.users,
            RestrictionKind::Products => &mut self.products,
            RestrictionKind::Categories => &mut self.categories,
            RestrictionKind::Occasions => &mut self.occasions,
            RestrictionKind::Recipients => &mut self.recipients,
        }
    }

    pub fn applies_to_all(&self, kind: RestrictionKind) -> bool {
        self.list(kind).is_empty()
    }

    pub fn applies_to(&self, kind: RestrictionKind, id: &EntityId) -> bool {
        let list = self.list(kind);
        list.is_empty() || list.contains(id)
    }

    pub fn is_selected(&self, kind: RestrictionKind, id: &EntityId) -> bool {
        self.list(kind).contains(id)
    }

    /// Добавить или убрать id из ограничения
    pub fn toggle(&mut self, kind: RestrictionKind, id: EntityId) {
        let list = self.list_mut(kind);
        if let Some(pos) = list.iter().position(|x| x == &id) {
            list.remove(pos);
        } else {
            list.push(id);
        }
    }

    /// Сбросить ограничение (снова «для всех»)
    pub fn clear(&mut self, kind: RestrictionKind) {
        self.list_mut(kind).clear();
    }

    pub fn summary(&self, kind: RestrictionKind) -> String {
        match self.list(kind).len() {
            0 => "Все".to_string(),
            n => format!("Выбрано: {}", n),
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Купон на скидку
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: f64,
    #[serde(default)]
    pub min_order_amount: Option<f64>,
    #[serde(default)]
    pub max_discount: Option<f64>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default, alias = "usageCount")]
    pub used_count: u32,
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, alias = "applicableUsers")]
    pub users: Vec<EntityRef>,
    #[serde(default, alias = "applicableProducts")]
    pub products: Vec<EntityRef>,
    #[serde(default, alias = "applicableCategories")]
    pub categories: Vec<EntityRef>,
    #[serde(default, alias = "applicableOccasions")]
    pub occasions: Vec<EntityRef>,
    #[serde(default, alias = "applicableRecipients")]
    pub recipients: Vec<EntityRef>,
}

impl Coupon {
    pub fn scope(&self) -> CouponScope {
        let ids = |refs: &[EntityRef]| -> Vec<EntityId> { refs.iter().map(|r| r.id().clone()).collect() };
        CouponScope {
            users: ids(&self.users),
            products: ids(&self.products),
            categories: ids(&self.categories),
            occasions: ids(&self.occasions),
            recipients: ids(&self.recipients),
        }
    }

    /// Подпись величины скидки для таблицы
    pub fn value_label(&self) -> String {
        match self.discount_type {
            DiscountType::Percentage => format!("{}%", self.discount_value),
            DiscountType::Fixed => format!("{:.2}", self.discount_value),
        }
    }
}

impl AggregateRoot for Coupon {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.code
    }

    fn aggregate_index() -> &'static str {
        "a008"
    }

    fn collection_name() -> &'static str {
        "coupon"
    }

    fn element_name() -> &'static str {
        "Купон"
    }

    fn list_name() -> &'static str {
        "Купоны"
    }
}

pub type CouponListResponse = ListResponse<Coupon>;

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Состояние формы купона
#[derive(Debug, Clone, PartialEq)]
pub struct CouponForm {
    pub id: Option<EntityId>,
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: String,
    pub min_order_amount: String,
    pub max_discount: String,
    pub usage_limit: String,
    /// Значение `<input type="date">`
    pub valid_from: String,
    pub valid_until: String,
    pub is_active: bool,
    pub scope: CouponScope,
}

impl Default for CouponForm {
    fn default() -> Self {
        Self {
            id: None,
            code: String::new(),
            description: String::new(),
            discount_type: DiscountType::Percentage,
            discount_value: String::new(),
            min_order_amount: String::new(),
            max_discount: String::new(),
            usage_limit: String::new(),
            valid_from: String::new(),
            valid_until: String::new(),
            is_active: true,
            scope: CouponScope::default(),
        }
    }
}

/// Тело `POST coupons` / `PUT coupons/:id`. Списки ограничений отправляются всегда.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPayload {
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_order_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    pub is_active: bool,
    #[serde(flatten)]
    pub scope: CouponScope,
}

/// Код купона: верхний регистр, без пробелов по краям
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn optional_amount(raw: &str, field: &str, errors: &mut FieldErrors) -> Option<f64> {
    if raw.trim().is_empty() {
        return None;
    }
    match parse_amount(raw) {
        Some(v) if v >= 0.0 => Some(v),
        _ => {
            errors.add(field, "Введите неотрицательное число");
            None
        }
    }
}

fn optional_date(raw: &str, field: &str, errors: &mut FieldErrors) -> Option<DateTime<Utc>> {
    if raw.trim().is_empty() {
        return None;
    }
    let parsed = datetime::parse_input(raw);
    if parsed.is_none() {
        errors.add(field, "Некорректная дата");
    }
    parsed
}

impl CouponForm {
    pub fn from_coupon(coupon: &Coupon) -> Self {
        let amount = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
        let date = |v: &Option<DateTime<Utc>>| {
            v.as_ref().map(datetime::to_date_input).unwrap_or_default()
        };
        Self {
            id: Some(coupon.id.clone()),
            code: coupon.code.clone(),
            description: coupon.description.clone(),
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value.to_string(),
            min_order_amount: amount(coupon.min_order_amount),
            max_discount: amount(coupon.max_discount),
            usage_limit: coupon.usage_limit.map(|v| v.to_string()).unwrap_or_default(),
            valid_from: date(&coupon.valid_from),
            valid_until: date(&coupon.valid_until),
            is_active: coupon.is_active,
            scope: coupon.scope(),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.is_some()
    }

    pub fn validate(&self) -> Result<CouponPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let code = normalize_code(&self.code);
        if code.is_empty() {
            errors.add("code", "Введите код купона");
        } else if code.chars().any(char::is_whitespace) {
            errors.add("code", "Код не должен содержать пробелов");
        }

        let value = parse_amount(&self.discount_value);
        match value {
            Some(v) if v > 0.0 => {
                if self.discount_type == DiscountType::Percentage && v > 100.0 {
                    errors.add("discountValue", "Процент скидки не может быть больше 100");
                }
            }
            _ => errors.add("discountValue", "Скидка должна быть больше 0"),
        }

        let min_order_amount = optional_amount(&self.min_order_amount, "minOrderAmount", &mut errors);
        let max_discount = optional_amount(&self.max_discount, "maxDiscount", &mut errors);

        let usage_limit = if self.usage_limit.trim().is_empty() {
            None
        } else {
            let parsed = self.usage_limit.trim().parse::<u32>().ok();
            if parsed.is_none() {
                errors.add("usageLimit", "Лимит должен быть целым неотрицательным числом");
            }
            parsed
        };

        let valid_from = optional_date(&self.valid_from, "validFrom", &mut errors);
        let valid_until = optional_date(&self.valid_until, "validUntil", &mut errors);
        if let (Some(from), Some(until)) = (valid_from, valid_until) {
            if until <= from {
                errors.add("validUntil", "Дата окончания должна быть позже даты начала");
            }
        }

        errors.into_result(())?;

        Ok(CouponPayload {
            code,
            description: self.description.trim().to_string(),
            discount_type: self.discount_type,
            discount_value: value.unwrap_or_default(),
            min_order_amount,
            max_discount,
            usage_limit,
            valid_from,
            valid_until,
            is_active: self.is_active,
            scope: self.scope.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_form() -> CouponForm {
        CouponForm {
            code: " gift10 ".into(),
            discount_value: "10".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_restrictions_default_to_all() {
        let form = CouponForm::default();
        for kind in RestrictionKind::ALL {
            assert!(form.scope.applies_to_all(kind));
            assert!(form.scope.applies_to(kind, &EntityId::from("any")));
            assert_eq!(form.scope.summary(kind), "Все");
        }

        let payload = valid_form().validate().unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        for key in ["users", "products", "categories", "occasions", "recipients"] {
            assert_eq!(value[key], json!([]), "{} should be an empty array", key);
        }
    }

    #[test]
    fn test_missing_lists_decode_as_all() {
        let coupon: Coupon = serde_json::from_value(json!({
            "_id": "c1",
            "code": "GIFT",
            "discountType": "fixed",
            "discountValue": 50,
            "applicableProducts": [{"_id": "p1", "name": "Mug"}]
        }))
        .unwrap();
        let scope = coupon.scope();
        assert!(scope.applies_to_all(RestrictionKind::Users));
        assert!(!scope.applies_to_all(RestrictionKind::Products));
        assert!(scope.applies_to(RestrictionKind::Products, &EntityId::from("p1")));
        assert!(!scope.applies_to(RestrictionKind::Products, &EntityId::from("p2")));
    }

    #[test]
    fn test_toggle_restriction() {
        let mut scope = CouponScope::default();
        scope.toggle(RestrictionKind::Categories, EntityId::from("c1"));
        assert_eq!(scope.summary(RestrictionKind::Categories), "Выбрано: 1");
        scope.toggle(RestrictionKind::Categories, EntityId::from("c1"));
        assert!(scope.applies_to_all(RestrictionKind::Categories));
    }

    #[test]
    fn test_code_is_upper_cased() {
        assert_eq!(valid_form().validate().unwrap().code, "GIFT10");

        let mut form = valid_form();
        form.code = "GIFT 10".into();
        assert!(form.validate().unwrap_err().contains("code"));
        form.code = "   ".into();
        assert!(form.validate().unwrap_err().contains("code"));
    }

    #[test]
    fn test_discount_value_rules() {
        let mut form = valid_form();
        form.discount_value = "0".into();
        assert!(form.validate().unwrap_err().contains("discountValue"));

        form.discount_value = "120".into();
        assert!(form.validate().unwrap_err().contains("discountValue"));

        form.discount_type = DiscountType::Fixed;
        assert_eq!(form.validate().unwrap().discount_value, 120.0);
    }

    #[test]
    fn test_valid_until_after_valid_from() {
        let mut form = valid_form();
        form.valid_from = "2024-05-10".into();
        form.valid_until = "2024-05-01".into();
        assert!(form.validate().unwrap_err().contains("validUntil"));

        form.valid_until = "2024-06-01".into();
        let payload = form.validate().unwrap();
        assert!(payload.valid_until > payload.valid_from);

        form.valid_from.clear();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_optional_numbers() {
        let mut form = valid_form();
        form.usage_limit = "-1".into();
        form.min_order_amount = "abc".into();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("usageLimit"));
        assert!(errors.contains("minOrderAmount"));

        form.usage_limit = "100".into();
        form.min_order_amount = "499,5".into();
        let payload = form.validate().unwrap();
        assert_eq!(payload.usage_limit, Some(100));
        assert_eq!(payload.min_order_amount, Some(499.5));
    }
}
