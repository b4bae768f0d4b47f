use crate::domain::a001_product::aggregate::Product;
use crate::domain::common::{AggregateRoot, EntityId, EntityRef};
use crate::shared::datetime;
use crate::shared::field_errors::FieldErrors;
use crate::shared::list::ListResponse;
use crate::shared::pricing::{discount_percent, parse_amount, PriceFields};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Aggregate Root
// ============================================================================

/// Позиция флеш-распродажи, как её присылает сервер
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashSaleItem {
    #[serde(alias = "productId")]
    pub product: EntityRef,
    #[serde(default, alias = "name")]
    pub product_name: String,
    #[serde(default, alias = "price")]
    pub original_price: f64,
    #[serde(default, alias = "flashPrice")]
    pub sale_price: f64,
    #[serde(default)]
    pub discount: f64,
}

/// Флеш-распродажа: окно времени и набор товаров со сниженной ценой
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashSale {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "startDate", alias = "startTime")]
    pub starts_at: DateTime<Utc>,
    #[serde(alias = "endDate", alias = "endTime")]
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, alias = "products")]
    pub items: Vec<FlashSaleItem>,
}

/// Положение распродажи относительно текущего момента
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalePhase {
    Upcoming,
    Live,
    Ended,
}

impl SalePhase {
    pub fn label(&self) -> &'static str {
        match self {
            SalePhase::Upcoming => "Запланирована",
            SalePhase::Live => "Идёт",
            SalePhase::Ended => "Завершена",
        }
    }
}

impl FlashSale {
    pub fn phase(&self, now: DateTime<Utc>) -> SalePhase {
        if now < self.starts_at {
            SalePhase::Upcoming
        } else if now < self.ends_at {
            SalePhase::Live
        } else {
            SalePhase::Ended
        }
    }
}

impl AggregateRoot for FlashSale {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a009"
    }

    fn collection_name() -> &'static str {
        "flash_sale"
    }

    fn element_name() -> &'static str {
        "Флеш-распродажа"
    }

    fn list_name() -> &'static str {
        "Флеш-распродажи"
    }
}

pub type FlashSaleListResponse = ListResponse<FlashSale>;

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Позиция в «корзине» формы. Исходная цена берётся из цены товара.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashSaleItemDraft {
    pub key: Uuid,
    pub product_id: EntityId,
    pub product_name: String,
    /// `price` – исходная цена, `discounted_price` – цена распродажи
    pub prices: PriceFields,
}

impl FlashSaleItemDraft {
    pub fn from_product(product: &Product) -> Self {
        let mut prices = PriceFields::default();
        prices.set_price(product.price.to_string());
        Self {
            key: Uuid::new_v4(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            prices,
        }
    }

    fn from_item(item: &FlashSaleItem) -> Self {
        Self {
            key: Uuid::new_v4(),
            product_id: item.product.id().clone(),
            product_name: if item.product_name.is_empty() {
                item.product.name().unwrap_or_default().to_string()
            } else {
                item.product_name.clone()
            },
            prices: PriceFields::from_values(item.original_price, item.sale_price, item.discount),
        }
    }

    pub fn original_price(&self) -> f64 {
        parse_amount(&self.prices.price).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlashSaleForm {
    pub id: Option<EntityId>,
    pub name: String,
    pub description: String,
    /// Значение `<input type="datetime-local">`
    pub starts_at: String,
    pub ends_at: String,
    pub is_active: bool,
    pub items: Vec<FlashSaleItemDraft>,
}

impl Default for FlashSaleForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            starts_at: String::new(),
            ends_at: String::new(),
            is_active: true,
            items: Vec::new(),
        }
    }
}

/// Заголовок распродажи (`POST flash-sales`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashSaleHeader {
    pub name: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashSaleItemPayload {
    pub product_id: EntityId,
    pub original_price: f64,
    pub sale_price: f64,
    pub discount: f64,
}

/// Тело `POST flash-sales/:id/products`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlashSaleProductsRequest {
    pub products: Vec<FlashSaleItemPayload>,
}

/// Тело `PUT flash-sales/:id`: заголовок и товары вместе
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateFlashSaleRequest {
    #[serde(flatten)]
    pub header: FlashSaleHeader,
    pub products: Vec<FlashSaleItemPayload>,
}

/// Тело `PATCH flash-sales/:id/toggle`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFlashSaleRequest {
    pub is_active: bool,
}

impl ToggleFlashSaleRequest {
    /// Запрос, инвертирующий текущий флаг
    pub fn inverse_of(current: bool) -> Self {
        Self { is_active: !current }
    }
}

/// Проверенные данные формы
#[derive(Debug, Clone, PartialEq)]
pub struct FlashSalePayload {
    pub header: FlashSaleHeader,
    pub items: Vec<FlashSaleItemPayload>,
}

impl FlashSalePayload {
    pub fn products_request(&self) -> FlashSaleProductsRequest {
        FlashSaleProductsRequest {
            products: self.items.clone(),
        }
    }

    pub fn into_update_request(self) -> UpdateFlashSaleRequest {
        UpdateFlashSaleRequest {
            header: self.header,
            products: self.items,
        }
    }
}

impl FlashSaleForm {
    pub fn from_sale(sale: &FlashSale) -> Self {
        Self {
            id: Some(sale.id.clone()),
            name: sale.name.clone(),
            description: sale.description.clone(),
            starts_at: datetime::to_input(&sale.starts_at),
            ends_at: datetime::to_input(&sale.ends_at),
            is_active: sale.is_active,
            items: sale.items.iter().map(FlashSaleItemDraft::from_item).collect(),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.is_some()
    }

    pub fn contains_product(&self, id: &EntityId) -> bool {
        self.items.iter().any(|i| &i.product_id == id)
    }

    /// Добавить товар в распродажу. Повторное добавление ничего не меняет.
    pub fn add_product(&mut self, product: &Product) -> bool {
        if self.contains_product(&product.id) {
            return false;
        }
        self.items.push(FlashSaleItemDraft::from_product(product));
        true
    }

    pub fn remove_product(&mut self, id: &EntityId) {
        self.items.retain(|i| &i.product_id != id);
    }

    /// Цена распродажи пересчитывает процент скидки
    pub fn set_sale_price(&mut self, id: &EntityId, raw: String) {
        if let Some(item) = self.items.iter_mut().find(|i| &i.product_id == id) {
            item.prices.set_discounted_price(raw);
        }
    }

    /// Процент скидки пересчитывает цену распродажи
    pub fn set_discount(&mut self, id: &EntityId, raw: String) {
        if let Some(item) = self.items.iter_mut().find(|i| &i.product_id == id) {
            item.prices.set_discount(raw);
        }
    }

    pub fn validate(&self) -> Result<FlashSalePayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", "Введите название распродажи");
        }

        let starts_at = datetime::parse_input(&self.starts_at);
        if starts_at.is_none() {
            errors.add("startsAt", "Укажите дату начала");
        }
        let ends_at = datetime::parse_input(&self.ends_at);
        match (starts_at, ends_at) {
            (_, None) => errors.add("endsAt", "Укажите дату окончания"),
            (Some(start), Some(end)) if end <= start => {
                errors.add("endsAt", "Окончание должно быть позже начала")
            }
            _ => {}
        }

        if self.items.is_empty() {
            errors.add("items", "Добавьте хотя бы один товар");
        }

        let mut items = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            let original = item.original_price();
            if !item.prices.discount_in_range() {
                errors.add(format!("items.{index}.discount"), "Скидка должна быть от 0 до 100%");
            }
            match parse_amount(&item.prices.discounted_price) {
                Some(sale) if sale > 0.0 && sale < original => {
                    let discount = discount_percent(original, sale).unwrap_or_default();
                    items.push(FlashSaleItemPayload {
                        product_id: item.product_id.clone(),
                        original_price: original,
                        sale_price: sale,
                        discount,
                    });
                }
                _ => errors.add(
                    format!("items.{index}.salePrice"),
                    "Цена распродажи должна быть больше 0 и меньше исходной",
                ),
            }
        }

        let (Some(starts_at), Some(ends_at), true) = (starts_at, ends_at, errors.is_empty()) else {
            return Err(errors);
        };

        Ok(FlashSalePayload {
            header: FlashSaleHeader {
                name: self.name.trim().to_string(),
                description: self.description.trim().to_string(),
                starts_at,
                ends_at,
                is_active: self.is_active,
            },
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn product(id: &str, price: f64) -> Product {
        serde_json::from_value(json!({ "_id": id, "name": format!("P {}", id), "price": price }))
            .unwrap()
    }

    fn valid_form() -> FlashSaleForm {
        let mut form = FlashSaleForm {
            name: "Weekend".into(),
            starts_at: "2024-05-01T10:00".into(),
            ends_at: "2024-05-03T10:00".into(),
            ..Default::default()
        };
        form.add_product(&product("p1", 200.0));
        form.set_sale_price(&EntityId::from("p1"), "150".into());
        form
    }

    #[test]
    fn test_add_product_is_idempotent() {
        let mut form = FlashSaleForm::default();
        assert!(form.add_product(&product("p1", 100.0)));
        assert!(!form.add_product(&product("p1", 100.0)));
        assert_eq!(form.items.len(), 1);
        assert_eq!(form.items[0].original_price(), 100.0);
    }

    #[test]
    fn test_item_price_sync() {
        let mut form = valid_form();
        let id = EntityId::from("p1");
        assert_eq!(form.items[0].prices.discount, "25");

        form.set_discount(&id, "10".into());
        assert_eq!(form.items[0].prices.discounted_price, "180");

        form.set_sale_price(&id, "250".into());
        assert_eq!(form.items[0].prices.discount, "10");
    }

    #[test]
    fn test_valid_form_payload() {
        let payload = valid_form().validate().unwrap();
        assert_eq!(
            payload.header.starts_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(payload.items[0].sale_price, 150.0);
        assert_eq!(payload.items[0].discount, 25.0);

        let body = serde_json::to_value(payload.clone().into_update_request()).unwrap();
        assert_eq!(body["name"], "Weekend");
        assert_eq!(body["products"][0]["productId"], "p1");
        assert_eq!(
            serde_json::to_value(payload.products_request()).unwrap()["products"][0]["salePrice"],
            json!(150.0)
        );
    }

    #[test]
    fn test_validation_rules() {
        let mut form = valid_form();
        form.name = " ".into();
        form.ends_at = "2024-04-30T10:00".into();
        form.set_sale_price(&EntityId::from("p1"), "200".into());
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("endsAt"));
        assert!(errors.contains("items.0.salePrice"));

        let mut empty = valid_form();
        empty.remove_product(&EntityId::from("p1"));
        assert!(empty.validate().unwrap_err().contains("items"));
    }

    #[test]
    fn test_out_of_range_item_discount_rejected() {
        let mut form = valid_form();
        let id = EntityId::from("p1");
        form.set_discount(&id, "150".into());
        assert_eq!(form.items[0].prices.discounted_price, "150");
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("items.0.discount"));
        assert!(!errors.contains("items.0.salePrice"));

        form.set_discount(&id, "10".into());
        form.items[0].prices.discount = "99".into();
        assert_eq!(form.validate().unwrap().items[0].discount, 10.0);
    }

    #[test]
    fn test_zero_sale_price_rejected() {
        let mut form = valid_form();
        form.set_sale_price(&EntityId::from("p1"), "0".into());
        assert!(form.validate().unwrap_err().contains("items.0.salePrice"));
    }

    #[test]
    fn test_toggle_request_inverts() {
        assert_eq!(
            serde_json::to_value(ToggleFlashSaleRequest::inverse_of(true)).unwrap(),
            json!({ "isActive": false })
        );
    }

    #[test]
    fn test_sale_decodes_and_edits() {
        let sale: FlashSale = serde_json::from_value(json!({
            "_id": "f1",
            "name": "Summer",
            "startDate": "2024-06-01T00:00:00Z",
            "endDate": "2024-06-10T00:00:00Z",
            "isActive": true,
            "products": [{ "productId": { "_id": "p1", "name": "Mug" }, "originalPrice": 100, "salePrice": 80, "discount": 20 }]
        }))
        .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 5, 0, 0, 0).unwrap();
        assert_eq!(sale.phase(now), SalePhase::Live);

        let form = FlashSaleForm::from_sale(&sale);
        assert!(form.is_edit_mode());
        assert_eq!(form.items[0].product_name, "Mug");
        assert_eq!(form.starts_at, "2024-06-01T00:00");
        assert!(form.validate().is_ok());
    }
}
