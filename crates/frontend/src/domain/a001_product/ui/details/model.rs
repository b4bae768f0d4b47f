//! Product Details - Model Layer
//!
//! Reference data for the selects and the multipart submit

use crate::shared::api::{ApiClient, ApiError, HttpMethod, HttpTransport, MultipartForm, UploadFile};
use crate::shared::hierarchy_page::{fetch_nodes, HierarchyKind};
use contracts::domain::a001_product::aggregate::ProductForm;
use contracts::shared::hierarchy::HierarchyNode;
use contracts::shared::media::ImageSlot;

/// Файлы, выбранные в форме и ещё не загруженные
#[derive(Debug, Clone, Default)]
pub struct ProductUploads {
    pub main_image: Option<UploadFile>,
    pub additional_images: Vec<UploadFile>,
}

/// Категории и разделы для выпадающих списков, загружаются параллельно
pub async fn fetch_reference<T: HttpTransport>(
    api: &ApiClient<T>,
) -> Result<(Vec<HierarchyNode>, Vec<HierarchyNode>), ApiError> {
    let (categories, sections) = futures::future::join(
        fetch_nodes(api, HierarchyKind::Category),
        fetch_nodes(api, HierarchyKind::Section),
    )
    .await;
    Ok((categories?, sections?))
}

fn build_form(form: &ProductForm, uploads: ProductUploads) -> Result<MultipartForm, ApiError> {
    let payload = form.validate()?;
    let mut multipart = MultipartForm::new();
    multipart.extend_text(payload.text_fields());

    if let (Some(ImageSlot::Pending(_)), Some(file)) = (&form.main_image, uploads.main_image) {
        multipart.push_file("mainImage", file);
    }

    // Отправляются только файлы, которые остались в списке формы
    let pending: Vec<&str> = form
        .additional_images
        .iter()
        .filter_map(|slot| match slot {
            ImageSlot::Pending(name) => Some(name.as_str()),
            ImageSlot::Existing(_) => None,
        })
        .collect();
    for file in uploads.additional_images {
        if pending.contains(&file.file_name.as_str()) {
            multipart.push_file("additionalImages", file);
        }
    }
    Ok(multipart)
}

/// Создание (`POST create-product`) или изменение (`PUT update-product/:id`)
pub async fn submit_product<T: HttpTransport>(
    api: &ApiClient<T>,
    form: &ProductForm,
    uploads: ProductUploads,
) -> Result<(), ApiError> {
    let multipart = build_form(form, uploads)?;
    let (method, path) = match &form.id {
        Some(id) => (HttpMethod::Put, format!("update-product/{}", id)),
        None => (HttpMethod::Post, "create-product".to_string()),
    };
    log::debug!("product submit: {} {}", method, path);
    api.send_multipart(method, &path, multipart).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use contracts::domain::common::EntityId;
    use contracts::shared::pricing::PriceFields;
    use futures::executor::block_on;
    use serde_json::json;

    fn png(name: &str) -> UploadFile {
        UploadFile::from_bytes(name, "image/png", vec![1, 2, 3])
    }

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Mug".into(),
            description: "Ceramic mug".into(),
            prices: PriceFields::from_values(500.0, 400.0, 20.0),
            stock: "10".into(),
            category_id: "c1".into(),
            main_image: Some(ImageSlot::Pending("main.png".into())),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_sends_multipart_with_files() {
        let api = MockTransport::new().client_with_token("tok");
        let mut form = valid_form();
        form.additional_images = vec![
            ImageSlot::Existing("https://cdn/a.png".into()),
            ImageSlot::Pending("b.png".into()),
        ];
        let uploads = ProductUploads {
            main_image: Some(png("main.png")),
            additional_images: vec![png("b.png"), png("dropped.png")],
        };

        block_on(submit_product(&api, &form, uploads)).unwrap();

        let calls = api.transport().requests();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, HttpMethod::Post);
        assert_eq!(calls[0].path, "create-product");
        assert_eq!(calls[0].token.as_deref(), Some("tok"));
        let body = calls[0].body.clone();
        let crate::shared::api::RequestBody::Multipart(multipart) = body else {
            panic!("expected multipart body");
        };
        assert_eq!(multipart.text_value("name"), Some("Mug"));
        assert_eq!(multipart.text_value("existingAdditionalImages"), Some("https://cdn/a.png"));
        assert_eq!(multipart.file_names(), vec!["mainImage", "additionalImages"]);
    }

    #[test]
    fn test_edit_uses_put() {
        let api = MockTransport::new().client();
        let mut form = valid_form();
        form.id = Some(EntityId::from("p7"));
        form.main_image = Some(ImageSlot::Existing("https://cdn/main.png".into()));

        block_on(submit_product(&api, &form, ProductUploads::default())).unwrap();

        let calls = api.transport().requests();
        assert_eq!(calls[0].method, HttpMethod::Put);
        assert_eq!(calls[0].path, "update-product/p7");
    }

    #[test]
    fn test_invalid_form_issues_no_request() {
        let api = MockTransport::new().client();
        let mut form = valid_form();
        form.prices.price = "abc".into();
        form.youtube_link = "https://vimeo.com/1".into();

        let err = block_on(submit_product(&api, &form, ProductUploads::default())).unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.contains("price"));
        assert!(fields.contains("youtubeLink"));
        assert_eq!(api.transport().total(), 0);
    }

    #[test]
    fn test_server_field_errors_surface() {
        let api = MockTransport::new()
            .respond(
                HttpMethod::Post,
                "create-product",
                422,
                json!({ "message": "Validation failed", "errors": { "name": "Name already taken" } }),
            )
            .client();
        let uploads = ProductUploads {
            main_image: Some(png("main.png")),
            additional_images: Vec::new(),
        };

        let err = block_on(submit_product(&api, &valid_form(), uploads)).unwrap_err();
        assert_eq!(err.field_errors().unwrap().get("name"), Some("Name already taken"));
        assert_eq!(err.to_string(), "Validation failed");
    }

    #[test]
    fn test_reference_loads_both_lists() {
        let api = MockTransport::new()
            .respond(HttpMethod::Get, "get-category", 200, json!([{ "_id": "c1", "name": "Mugs" }]))
            .respond(HttpMethod::Get, "get-sections", 200, json!({ "sections": [] }))
            .client();
        let (categories, sections) = block_on(fetch_reference(&api)).unwrap();
        assert_eq!(categories.len(), 1);
        assert!(sections.is_empty());
        assert_eq!(api.transport().total(), 2);
    }
}
