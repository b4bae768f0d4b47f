//! Order Details - Model Layer

use crate::shared::api::{ApiClient, ApiError, HttpTransport};
use contracts::domain::a007_order::aggregate::{
    DeliveryStatus, Order, OrderDetailsResponse, OrderStatus, UpdateDeliveryStatusRequest,
    UpdateOrderStatusRequest,
};
use contracts::domain::common::EntityId;

pub async fn fetch_order<T: HttpTransport>(api: &ApiClient<T>, id: &EntityId) -> Result<Order, ApiError> {
    let response: OrderDetailsResponse = api.get(&format!("orders/{}", id)).await?;
    Ok(response.into_order())
}

pub async fn update_status<T: HttpTransport>(
    api: &ApiClient<T>,
    id: &EntityId,
    status: OrderStatus,
) -> Result<(), ApiError> {
    api.put_json(&format!("orders/{}/status", id), &UpdateOrderStatusRequest { status })
        .await
}

pub async fn update_delivery<T: HttpTransport>(
    api: &ApiClient<T>,
    id: &EntityId,
    delivery_status: DeliveryStatus,
) -> Result<(), ApiError> {
    api.put_json(
        &format!("orders/{}/delivery", id),
        &UpdateDeliveryStatusRequest { delivery_status },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use crate::shared::api::HttpMethod;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_fetch_wrapped_order() {
        let api = MockTransport::new()
            .respond(
                HttpMethod::Get,
                "orders/o1",
                200,
                json!({ "order": { "_id": "o1", "orderNumber": "A-17", "status": "shipped", "totalAmount": 120.5 } }),
            )
            .client();
        let order = block_on(fetch_order(&api, &EntityId::from("o1"))).unwrap();
        assert_eq!(order.display_number(), "A-17");
        assert_eq!(order.status, OrderStatus::Shipped);
    }

    #[test]
    fn test_status_updates_are_independent() {
        let api = MockTransport::new().client();
        let id = EntityId::from("o1");
        block_on(async {
            update_status(&api, &id, OrderStatus::Cancelled).await.unwrap();
            update_delivery(&api, &id, DeliveryStatus::InTransit).await.unwrap();
        });
        let calls = api.transport().requests();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].path, "orders/o1/status");
        assert_eq!(calls[0].json(), Some(&json!({ "status": "cancelled" })));
        assert_eq!(calls[1].path, "orders/o1/delivery");
        assert_eq!(calls[1].json(), Some(&json!({ "deliveryStatus": "in_transit" })));
    }
}
