//! Flash Sale Details - Model Layer

use crate::shared::api::{ApiClient, ApiError, ApiRequest, HttpTransport};
use contracts::domain::a009_flash_sale::aggregate::FlashSaleForm;
use contracts::domain::common::{EntityId, IdResponse};

/// Создание в два шага: заголовок (`POST flash-sales`), затем товары
/// (`POST flash-sales/:id/products`). Если второй шаг упал, распродажа
/// остаётся созданной без товаров.
async fn create_flash_sale<T: HttpTransport>(api: &ApiClient<T>, form: &FlashSaleForm) -> Result<EntityId, ApiError> {
    let payload = form.validate()?;
    let created: IdResponse = api.fetch(ApiRequest::post_json("flash-sales", &payload.header)?).await?;
    let id = created.into_id();
    log::debug!("flash sale {} created, adding {} products", id, payload.items.len());

    api.execute(ApiRequest::post_json(
        format!("flash-sales/{}/products", id),
        &payload.products_request(),
    )?)
    .await?;
    Ok(id)
}

/// Изменение одним запросом `PUT flash-sales/:id` (заголовок и товары)
async fn update_flash_sale<T: HttpTransport>(
    api: &ApiClient<T>,
    id: &EntityId,
    form: &FlashSaleForm,
) -> Result<EntityId, ApiError> {
    let payload = form.validate()?;
    api.put_json(&format!("flash-sales/{}", id), &payload.into_update_request())
        .await?;
    Ok(id.clone())
}

pub async fn save_flash_sale<T: HttpTransport>(api: &ApiClient<T>, form: &FlashSaleForm) -> Result<EntityId, ApiError> {
    match &form.id {
        Some(id) => update_flash_sale(api, id, form).await,
        None => create_flash_sale(api, form).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use crate::shared::api::HttpMethod;
    use contracts::domain::a001_product::aggregate::Product;
    use futures::executor::block_on;
    use serde_json::json;

    fn valid_form() -> FlashSaleForm {
        let product: Product =
            serde_json::from_value(json!({ "_id": "p1", "name": "Mug", "price": 200 })).unwrap();
        let mut form = FlashSaleForm {
            name: "Weekend".into(),
            starts_at: "2024-05-01T10:00".into(),
            ends_at: "2024-05-03T10:00".into(),
            ..Default::default()
        };
        form.add_product(&product);
        form.set_sale_price(&EntityId::from("p1"), "150".into());
        form
    }

    #[test]
    fn test_create_posts_header_then_products() {
        let api = MockTransport::new()
            .respond(HttpMethod::Post, "flash-sales", 201, json!({ "flashSale": { "_id": "fs1" } }))
            .client();

        let id = block_on(save_flash_sale(&api, &valid_form())).unwrap();

        assert_eq!(id.as_str(), "fs1");
        let calls = api.transport().requests();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].path, "flash-sales");
        assert_eq!(calls[0].json().unwrap()["name"], json!("Weekend"));
        assert!(calls[0].json().unwrap().get("products").is_none());
        assert_eq!(calls[1].method, HttpMethod::Post);
        assert_eq!(calls[1].path, "flash-sales/fs1/products");
        assert_eq!(calls[1].json().unwrap()["products"][0]["salePrice"], json!(150.0));
    }

    #[test]
    fn test_products_failure_keeps_created_sale() {
        let api = MockTransport::new()
            .respond(HttpMethod::Post, "flash-sales", 201, json!({ "_id": "fs1" }))
            .respond(HttpMethod::Post, "flash-sales/*/products", 500, json!({ "message": "boom" }))
            .client();

        let err = block_on(save_flash_sale(&api, &valid_form())).unwrap_err();

        assert!(err.to_string().contains("boom"));
        assert_eq!(api.transport().total(), 2);
        assert_eq!(api.transport().count(HttpMethod::Delete, "flash-sales/fs1"), 0);
    }

    #[test]
    fn test_update_is_single_put() {
        let api = MockTransport::new().client();
        let mut form = valid_form();
        form.id = Some(EntityId::from("fs9"));

        block_on(save_flash_sale(&api, &form)).unwrap();

        let calls = api.transport().requests();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, HttpMethod::Put);
        assert_eq!(calls[0].path, "flash-sales/fs9");
        let body = calls[0].json().unwrap();
        assert_eq!(body["name"], json!("Weekend"));
        assert_eq!(body["products"][0]["productId"], json!("p1"));
    }

    #[test]
    fn test_empty_cart_blocks_request() {
        let api = MockTransport::new().client();
        let mut form = valid_form();
        form.remove_product(&EntityId::from("p1"));
        let err = block_on(save_flash_sale(&api, &form)).unwrap_err();
        assert!(err.field_errors().unwrap().contains("items"));
        assert_eq!(api.transport().total(), 0);
    }
}
