use crate::domain::common::{AggregateRoot, EntityId};
use crate::shared::list::ListResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Покупатель магазина
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    #[serde(default, alias = "fullName")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "phoneNumber")]
    pub phone: String,
    #[serde(default, alias = "blocked")]
    pub is_blocked: bool,
    #[serde(default, alias = "totalOrders")]
    pub orders_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AggregateRoot for Customer {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a012"
    }

    fn collection_name() -> &'static str {
        "customer"
    }

    fn element_name() -> &'static str {
        "Покупатель"
    }

    fn list_name() -> &'static str {
        "Покупатели"
    }
}

pub type CustomerListResponse = ListResponse<Customer>;

/// Ответ `GET customers/:id`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CustomerDetailsResponse {
    Wrapped {
        #[serde(alias = "data", alias = "user")]
        customer: Customer,
    },
    Plain(Customer),
}

impl CustomerDetailsResponse {
    pub fn into_customer(self) -> Customer {
        match self {
            CustomerDetailsResponse::Wrapped { customer } => customer,
            CustomerDetailsResponse::Plain(customer) => customer,
        }
    }
}

/// Параметры `GET customers`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub page: usize,
    pub limit: usize,
}

impl CustomerListQuery {
    pub fn new(search: &str, zero_based_page: usize, limit: usize) -> Self {
        let search = search.trim();
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            page: zero_based_page + 1,
            limit,
        }
    }
}

/// Тело `PUT customers/:id/block`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockCustomerRequest {
    pub is_blocked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_customer_page() {
        let body = json!({
            "customers": [{ "_id": "c1", "name": "Ivan", "email": "i@x.io", "isBlocked": true, "totalOrders": 3 }],
            "pagination": { "total": 1, "page": 1, "limit": 20 }
        });
        let (items, info) = serde_json::from_value::<CustomerListResponse>(body)
            .unwrap()
            .into_page();
        assert!(items[0].is_blocked);
        assert_eq!(items[0].orders_count, 3);
        assert_eq!(info.pages(), 1);
    }

    #[test]
    fn test_query_and_block_body() {
        let q = CustomerListQuery::new("  ", 1, 20);
        assert_eq!(serde_json::to_value(&q).unwrap(), json!({ "page": 2, "limit": 20 }));
        assert_eq!(
            serde_json::to_value(BlockCustomerRequest { is_blocked: false }).unwrap(),
            json!({ "isBlocked": false })
        );
    }

    #[test]
    fn test_details_wrapped() {
        let r: CustomerDetailsResponse =
            serde_json::from_value(json!({ "user": { "_id": "c9", "name": "Ivan" } })).unwrap();
        assert_eq!(r.into_customer().id.as_str(), "c9");
    }
}
