use crate::domain::common::{AggregateRoot, EntityId};
use crate::shared::field_errors::FieldErrors;
use crate::shared::list::ListResponse;
use crate::shared::media::ImageSlot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Отзыв покупателя для главной страницы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    #[serde(alias = "name")]
    pub customer_name: String,
    #[serde(default, alias = "text", alias = "review")]
    pub message: String,
    #[serde(default)]
    pub rating: u8,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Testimonial {
    /// Рейтинг звёздами: `★★★☆☆`
    pub fn stars(&self) -> String {
        let filled = self.rating.min(5) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

impl AggregateRoot for Testimonial {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.customer_name
    }

    fn aggregate_index() -> &'static str {
        "a010"
    }

    fn collection_name() -> &'static str {
        "testimonial"
    }

    fn element_name() -> &'static str {
        "Отзыв"
    }

    fn list_name() -> &'static str {
        "Отзывы"
    }
}

pub type TestimonialListResponse = ListResponse<Testimonial>;

#[derive(Debug, Clone, PartialEq)]
pub struct TestimonialForm {
    pub id: Option<EntityId>,
    pub customer_name: String,
    pub message: String,
    pub rating: u8,
    pub is_active: bool,
    pub image: Option<ImageSlot>,
}

impl Default for TestimonialForm {
    fn default() -> Self {
        Self {
            id: None,
            customer_name: String::new(),
            message: String::new(),
            rating: 5,
            is_active: true,
            image: None,
        }
    }
}

/// Проверенные поля multipart-запроса `POST testimonials` / `PUT testimonials/:id`
#[derive(Debug, Clone, PartialEq)]
pub struct TestimonialPayload {
    pub customer_name: String,
    pub message: String,
    pub rating: u8,
    pub is_active: bool,
    pub existing_image: Option<String>,
}

impl TestimonialPayload {
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("customerName", self.customer_name.clone()),
            ("message", self.message.clone()),
            ("rating", self.rating.to_string()),
            ("isActive", self.is_active.to_string()),
        ];
        if let Some(url) = &self.existing_image {
            fields.push(("existingImage", url.clone()));
        }
        fields
    }
}

impl TestimonialForm {
    pub fn from_testimonial(t: &Testimonial) -> Self {
        Self {
            id: Some(t.id.clone()),
            customer_name: t.customer_name.clone(),
            message: t.message.clone(),
            rating: t.rating,
            is_active: t.is_active,
            image: t.image.clone().map(ImageSlot::Existing),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.is_some()
    }

    pub fn validate(&self) -> Result<TestimonialPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.customer_name.trim().is_empty() {
            errors.add("customerName", "Введите имя покупателя");
        }
        if self.message.trim().is_empty() {
            errors.add("message", "Введите текст отзыва");
        }
        if !RATING_RANGE.contains(&self.rating) {
            errors.add("rating", "Оценка должна быть от 1 до 5");
        }
        errors.into_result(TestimonialPayload {
            customer_name: self.customer_name.trim().to_string(),
            message: self.message.trim().to_string(),
            rating: self.rating,
            is_active: self.is_active,
            existing_image: self
                .image
                .as_ref()
                .and_then(|s| s.existing_url())
                .map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        let mut form = TestimonialForm {
            customer_name: "Anna".into(),
            message: "Lovely mug".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
        form.rating = 0;
        assert!(form.validate().unwrap_err().contains("rating"));
        form.rating = 6;
        assert!(form.validate().unwrap_err().contains("rating"));
    }

    #[test]
    fn test_required_text() {
        let errors = TestimonialForm::default().validate().unwrap_err();
        assert!(errors.contains("customerName"));
        assert!(errors.contains("message"));
    }

    #[test]
    fn test_decode_and_stars() {
        let t: Testimonial = serde_json::from_str(
            r#"{"_id": "t1", "name": "Anna", "review": "Great", "rating": 4, "imageUrl": "https://cdn/a.jpg"}"#,
        )
        .unwrap();
        assert_eq!(t.stars(), "★★★★☆");
        let payload = TestimonialForm::from_testimonial(&t).validate().unwrap();
        assert!(payload
            .text_fields()
            .contains(&("existingImage", "https://cdn/a.jpg".to_string())));
    }
}
