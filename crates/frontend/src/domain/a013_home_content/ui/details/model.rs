//! Home Content Editor - Model Layer
//!
//! Banner images are uploaded one at a time; the content itself is saved as ids only

use crate::shared::api::{ApiClient, ApiError, ApiRequest, HttpMethod, HttpTransport, MultipartForm, UploadFile};
use contracts::domain::a013_home_content::aggregate::{HomeContent, HomeContentDraft, HomeContentResponse};
use contracts::shared::media::UploadImageResponse;

pub async fn fetch_home_content<T: HttpTransport>(api: &ApiClient<T>) -> Result<HomeContent, ApiError> {
    let response: HomeContentResponse = api.get("home-content").await?;
    Ok(response.into_content())
}

/// Загрузить изображение баннера, вернуть его URL
pub async fn upload_banner_image<T: HttpTransport>(api: &ApiClient<T>, file: UploadFile) -> Result<String, ApiError> {
    let form = MultipartForm::new().file("image", file);
    let response: UploadImageResponse = api
        .fetch(ApiRequest::multipart(HttpMethod::Post, "upload-s3-image", form))
        .await?;
    Ok(response.url)
}

pub async fn save_home_content<T: HttpTransport>(api: &ApiClient<T>, draft: &HomeContentDraft) -> Result<(), ApiError> {
    draft.validate()?;
    api.put_json("home-content", draft).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use contracts::domain::common::EntityId;
    use contracts::domain::a013_home_content::aggregate::FeaturedKind;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_upload_returns_url() {
        let api = MockTransport::new()
            .respond(HttpMethod::Post, "upload-s3-image", 200, json!({ "url": "https://cdn/b.jpg" }))
            .client();
        let file = UploadFile::from_bytes("b.jpg", "image/jpeg", vec![1, 2, 3]);
        let url = block_on(upload_banner_image(&api, file)).unwrap();
        assert_eq!(url, "https://cdn/b.jpg");
    }

    #[test]
    fn test_save_puts_ids_only() {
        let api = MockTransport::new().client();
        let mut draft = HomeContentDraft::default();
        draft.toggle_featured(FeaturedKind::Occasions, EntityId::from("o1"));
        draft.promo_text = "Free delivery".into();
        block_on(save_home_content(&api, &draft)).unwrap();

        let calls = api.transport().requests();
        assert_eq!(calls[0].method, HttpMethod::Put);
        assert_eq!(calls[0].path, "home-content");
        let body = calls[0].json().unwrap();
        assert_eq!(body["featuredOccasions"], json!(["o1"]));
        assert_eq!(body["promoText"], json!("Free delivery"));
    }

    #[test]
    fn test_banner_without_image_not_saved() {
        let api = MockTransport::new().client();
        let mut draft = HomeContentDraft::default();
        draft.add_banner();
        let err = block_on(save_home_content(&api, &draft)).unwrap_err();
        assert!(err.field_errors().unwrap().contains("banners.0.image"));
        assert_eq!(api.transport().total(), 0);
    }
}
