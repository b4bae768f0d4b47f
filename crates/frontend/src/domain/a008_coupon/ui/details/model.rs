//! Coupon Details - Model Layer

use crate::shared::api::{ApiClient, ApiError, ApiRequest, HttpTransport};
use contracts::domain::a008_coupon::aggregate::CouponForm;

/// Создание (`POST coupons`) или изменение (`PUT coupons/:id`)
pub async fn save_coupon<T: HttpTransport>(api: &ApiClient<T>, form: &CouponForm) -> Result<(), ApiError> {
    let payload = form.validate()?;
    match &form.id {
        Some(id) => api.put_json(&format!("coupons/{}", id), &payload).await,
        None => api.execute(ApiRequest::post_json("coupons", &payload)?).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use crate::shared::api::HttpMethod;
    use contracts::domain::a008_coupon::aggregate::RestrictionKind;
    use contracts::domain::common::EntityId;
    use futures::executor::block_on;
    use serde_json::json;

    fn valid_form() -> CouponForm {
        CouponForm {
            code: "spring".into(),
            discount_value: "15".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_sends_empty_lists_for_all() {
        let api = MockTransport::new().client();
        let mut form = valid_form();
        form.scope.toggle(RestrictionKind::Products, EntityId::from("p1"));

        block_on(save_coupon(&api, &form)).unwrap();

        let calls = api.transport().requests();
        assert_eq!(calls[0].method, HttpMethod::Post);
        assert_eq!(calls[0].path, "coupons");
        let body = calls[0].json().unwrap();
        assert_eq!(body["code"], json!("SPRING"));
        assert_eq!(body["products"], json!(["p1"]));
        assert_eq!(body["users"], json!([]));
        assert_eq!(body["recipients"], json!([]));
    }

    #[test]
    fn test_edit_uses_put() {
        let api = MockTransport::new().client();
        let mut form = valid_form();
        form.id = Some(EntityId::from("c5"));
        block_on(save_coupon(&api, &form)).unwrap();
        let calls = api.transport().requests();
        assert_eq!(calls[0].method, HttpMethod::Put);
        assert_eq!(calls[0].path, "coupons/c5");
    }

    #[test]
    fn test_invalid_coupon_sends_nothing() {
        let api = MockTransport::new().client();
        let mut form = valid_form();
        form.discount_value = "150".into();
        let err = block_on(save_coupon(&api, &form)).unwrap_err();
        assert!(err.field_errors().unwrap().contains("discountValue"));
        assert_eq!(api.transport().total(), 0);
    }
}
