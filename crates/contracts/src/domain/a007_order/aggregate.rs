use crate::domain::common::{AggregateRoot, EntityId, EntityRef};
use crate::shared::pagination::PageInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Statuses
// ============================================================================

/// Статус заказа. Неизвестные значения сервера сохраняются как есть.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub const KNOWN: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(value) => value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Pending => "Ожидает",
            OrderStatus::Confirmed => "Подтверждён",
            OrderStatus::Processing => "В обработке",
            OrderStatus::Shipped => "Отправлен",
            OrderStatus::Delivered => "Доставлен",
            OrderStatus::Cancelled => "Отменён",
            OrderStatus::Other(value) => value,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "confirmed" => OrderStatus::Confirmed,
            "processing" => OrderStatus::Processing,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// Статус доставки
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeliveryStatus {
    #[default]
    NotDispatched,
    InTransit,
    OutForDelivery,
    Delivered,
    Failed,
    Other(String),
}

impl DeliveryStatus {
    pub const KNOWN: [DeliveryStatus; 5] = [
        DeliveryStatus::NotDispatched,
        DeliveryStatus::InTransit,
        DeliveryStatus::OutForDelivery,
        DeliveryStatus::Delivered,
        DeliveryStatus::Failed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            DeliveryStatus::NotDispatched => "not_dispatched",
            DeliveryStatus::InTransit => "in_transit",
            DeliveryStatus::OutForDelivery => "out_for_delivery",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Failed => "failed",
            DeliveryStatus::Other(value) => value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DeliveryStatus::NotDispatched => "Не отправлен",
            DeliveryStatus::InTransit => "В пути",
            DeliveryStatus::OutForDelivery => "Передан курьеру",
            DeliveryStatus::Delivered => "Доставлен",
            DeliveryStatus::Failed => "Не доставлен",
            DeliveryStatus::Other(value) => value,
        }
    }
}

impl From<String> for DeliveryStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "not_dispatched" => DeliveryStatus::NotDispatched,
            "in_transit" => DeliveryStatus::InTransit,
            "out_for_delivery" => DeliveryStatus::OutForDelivery,
            "delivered" => DeliveryStatus::Delivered,
            "failed" => DeliveryStatus::Failed,
            _ => DeliveryStatus::Other(value),
        }
    }
}

impl From<DeliveryStatus> for String {
    fn from(status: DeliveryStatus) -> Self {
        match status {
            DeliveryStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Краткие данные покупателя в заказе
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    #[serde(flatten, with = "crate::domain::common::record_id::optional")]
    pub id: Option<EntityId>,
    #[serde(default, alias = "fullName")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "phoneNumber")]
    pub phone: String,
}

/// Позиция заказа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product: Option<EntityRef>,
    /// Название товара на момент заказа
    #[serde(default, alias = "name")]
    pub product_name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
    /// Загруженные покупателем изображения персонализации
    #[serde(default, alias = "customizedImages", alias = "customImages")]
    pub customization_images: Vec<String>,
}

impl OrderItem {
    pub fn title(&self) -> &str {
        if !self.product_name.is_empty() {
            &self.product_name
        } else {
            self.product.as_ref().and_then(|p| p.name()).unwrap_or("—")
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Адрес доставки
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default, alias = "name")]
    pub full_name: String,
    #[serde(default, alias = "street", alias = "address")]
    pub address_line: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, alias = "pincode", alias = "zip")]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub phone: String,
}

impl ShippingAddress {
    /// Адрес одной строкой (пустые части пропускаются)
    pub fn one_line(&self) -> String {
        [
            &self.address_line,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Заказ покупателя
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    #[serde(default, alias = "orderId")]
    pub order_number: Option<String>,
    #[serde(default, alias = "user")]
    pub customer: Option<CustomerSummary>,
    #[serde(default, alias = "products")]
    pub items: Vec<OrderItem>,
    #[serde(default, alias = "total")]
    pub total_amount: f64,
    #[serde(default, alias = "orderStatus")]
    pub status: OrderStatus,
    #[serde(default)]
    pub delivery_status: DeliveryStatus,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Номер для отображения: номер заказа или хвост id
    pub fn display_number(&self) -> String {
        match &self.order_number {
            Some(number) if !number.is_empty() => number.clone(),
            _ => {
                let id = self.id.as_str();
                let tail = id.len().saturating_sub(8);
                format!("#{}", id.get(tail..).unwrap_or(id))
            }
        }
    }

    pub fn customer_name(&self) -> &str {
        self.customer
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("—")
    }
}

impl AggregateRoot for Order {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        self.order_number.as_deref().unwrap_or(self.id.as_str())
    }

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "order"
    }

    fn element_name() -> &'static str {
        "Заказ"
    }

    fn list_name() -> &'static str {
        "Заказы"
    }
}

// ============================================================================
// Queries / DTOs
// ============================================================================

/// Параметры `GET orders`. Пустые фильтры в строку запроса не попадают.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Номер страницы с 1
    pub page: usize,
    pub limit: usize,
}

impl OrderListQuery {
    /// Собрать запрос из значений фильтров UI (`page` с нуля)
    pub fn from_filter(status: &str, search: &str, zero_based_page: usize, limit: usize) -> Self {
        let keep = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        Self {
            status: keep(status),
            search: keep(search),
            page: zero_based_page + 1,
            limit,
        }
    }
}

/// Ответ `GET orders`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListResponse {
    #[serde(alias = "data")]
    pub orders: Vec<Order>,
    #[serde(default, alias = "meta")]
    pub pagination: Option<PageInfo>,
}

/// Ответ `GET orders/:id`: сам заказ или обёртка `{ order }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrderDetailsResponse {
    Wrapped {
        #[serde(alias = "data")]
        order: Order,
    },
    Plain(Order),
}

impl OrderDetailsResponse {
    pub fn into_order(self) -> Order {
        match self {
            OrderDetailsResponse::Wrapped { order } => order,
            OrderDetailsResponse::Plain(order) => order,
        }
    }
}

/// Тело `PUT orders/:id/status`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Тело `PUT orders/:id/delivery`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeliveryStatusRequest {
    pub delivery_status: DeliveryStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_status_is_preserved() {
        let status: OrderStatus = serde_json::from_value(json!("on_hold")).unwrap();
        assert_eq!(status, OrderStatus::Other("on_hold".into()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("on_hold"));

        let known: DeliveryStatus = serde_json::from_value(json!("out_for_delivery")).unwrap();
        assert_eq!(known, DeliveryStatus::OutForDelivery);
    }

    #[test]
    fn test_filter_query_omits_empty_filters() {
        let query = OrderListQuery::from_filter("", "   ", 0, 20);
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, json!({ "page": 1, "limit": 20 }));

        let query = OrderListQuery::from_filter("shipped", " Anna ", 2, 10);
        assert_eq!(query.status.as_deref(), Some("shipped"));
        assert_eq!(query.search.as_deref(), Some("Anna"));
        assert_eq!(query.page, 3);
    }

    #[test]
    fn test_order_list_decodes() {
        let body = json!({
            "orders": [{
                "_id": "64f0c0ffee1234567890abcd",
                "user": { "_id": "u1", "name": "Anna", "email": "a@x.io" },
                "items": [{ "productName": "Mug", "quantity": 2, "price": 250,
                            "customizedImages": ["https://cdn/c.png"] }],
                "totalAmount": 500,
                "status": "pending",
                "deliveryStatus": "not_dispatched",
                "shippingAddress": { "street": "1 Main st", "city": "Pune", "pincode": "411001" }
            }],
            "pagination": { "total": 1, "page": 1, "totalPages": 1, "limit": 20 }
        });
        let response: OrderListResponse = serde_json::from_value(body).unwrap();
        let order = &response.orders[0];
        assert_eq!(order.customer_name(), "Anna");
        assert_eq!(order.display_number(), "#7890abcd");
        assert_eq!(order.items[0].line_total(), 500.0);
        assert_eq!(order.items[0].customization_images.len(), 1);
        assert_eq!(
            order.shipping_address.as_ref().unwrap().one_line(),
            "1 Main st, Pune, 411001"
        );
        assert_eq!(response.pagination.unwrap().pages(), 1);
    }

    #[test]
    fn test_status_requests() {
        let body = serde_json::to_value(UpdateDeliveryStatusRequest {
            delivery_status: DeliveryStatus::InTransit,
        })
        .unwrap();
        assert_eq!(body, json!({ "deliveryStatus": "in_transit" }));

        let body = serde_json::to_value(UpdateOrderStatusRequest {
            status: OrderStatus::Cancelled,
        })
        .unwrap();
        assert_eq!(body, json!({ "status": "cancelled" }));
    }

    #[test]
    fn test_details_response_shapes() {
        let wrapped: OrderDetailsResponse =
            serde_json::from_value(json!({ "order": { "_id": "o1" } })).unwrap();
        assert_eq!(wrapped.into_order().id.as_str(), "o1");
        let plain: OrderDetailsResponse = serde_json::from_value(json!({ "_id": "o2" })).unwrap();
        assert_eq!(plain.into_order().id.as_str(), "o2");
    }
}
