use crate::domain::common::{AggregateRoot, EntityId, EntityRef};
use crate::shared::field_errors::FieldErrors;
use crate::shared::media::{ImageSlot, MAX_ADDITIONAL_IMAGES};
use crate::shared::pricing::{discount_percent, parse_amount, PriceFields};
use crate::shared::list::ListResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Подстроки хоста, по которым ссылка считается ссылкой на YouTube
pub const YOUTUBE_HOSTS: [&str; 2] = ["youtube.com", "youtu.be"];

// ============================================================================
// Aggregate Root
// ============================================================================

/// Товар каталога
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub discounted_price: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category: Option<EntityRef>,
    #[serde(default, alias = "subCategory")]
    pub subcategory: Option<EntityRef>,
    #[serde(default, alias = "subSection")]
    pub subsection: Option<EntityRef>,
    #[serde(default, alias = "tax", alias = "isTaxIncluded")]
    pub is_taxable: bool,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default)]
    pub additional_images: Vec<String>,
    #[serde(default, alias = "youtubeUrl")]
    pub youtube_link: Option<String>,
    #[serde(default, alias = "customerUploadRequirements")]
    pub upload_requirements: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AggregateRoot for Product {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn element_name() -> &'static str {
        "Товар"
    }

    fn list_name() -> &'static str {
        "Товары"
    }
}

/// Ответ `get-products`: массив или обёртка `{ products: [...] }`
pub type ProductListResponse = ListResponse<Product>;

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Состояние формы товара (значения полей ввода)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub id: Option<EntityId>,
    pub name: String,
    pub description: String,
    pub prices: PriceFields,
    pub stock: String,
    pub category_id: String,
    pub subcategory_id: String,
    pub subsection_id: String,
    pub is_taxable: bool,
    pub main_image: Option<ImageSlot>,
    pub additional_images: Vec<ImageSlot>,
    pub youtube_link: String,
    pub upload_requirements: String,
}

/// Проверенные данные формы, готовые к отправке
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub discounted_price: f64,
    pub discount: f64,
    pub stock: u32,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub subsection_id: Option<String>,
    pub is_taxable: bool,
    pub existing_main_image: Option<String>,
    pub existing_additional_images: Vec<String>,
    pub youtube_link: Option<String>,
    pub upload_requirements: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Проверка ссылки на YouTube по подстроке хоста
pub fn is_youtube_link(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    YOUTUBE_HOSTS.iter().any(|host| lower.contains(host))
}

impl ProductForm {
    /// Заполнить форму из записи (режим редактирования)
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            name: product.name.clone(),
            description: product.description.clone(),
            prices: PriceFields::from_values(
                product.price,
                product.discounted_price,
                product.discount,
            ),
            stock: product.stock.to_string(),
            category_id: product
                .category
                .as_ref()
                .map(|c| c.id().to_string())
                .unwrap_or_default(),
            subcategory_id: product
                .subcategory
                .as_ref()
                .map(|c| c.id().to_string())
                .unwrap_or_default(),
            subsection_id: product
                .subsection
                .as_ref()
                .map(|c| c.id().to_string())
                .unwrap_or_default(),
            is_taxable: product.is_taxable,
            main_image: product.main_image.clone().map(ImageSlot::Existing),
            additional_images: product
                .additional_images
                .iter()
                .cloned()
                .map(ImageSlot::Existing)
                .collect(),
            youtube_link: product.youtube_link.clone().unwrap_or_default(),
            upload_requirements: product.upload_requirements.clone().unwrap_or_default(),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.is_some()
    }

    /// Валидация формы. Ошибки возвращаются по полям; при ошибке запрос не отправляется.
    pub fn validate(&self) -> Result<ProductPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", "Введите название товара");
        }
        if self.description.trim().is_empty() {
            errors.add("description", "Введите описание товара");
        }

        let price = parse_amount(&self.prices.price);
        if price.is_none() {
            errors.add("price", "Цена должна быть числом");
        }
        let discounted_price = parse_amount(&self.prices.discounted_price);
        if discounted_price.is_none() {
            errors.add("discountedPrice", "Цена со скидкой должна быть числом");
        }
        if !self.prices.discount_in_range() {
            errors.add("discount", "Скидка должна быть от 0 до 100%");
        }
        let stock = self.stock.trim().parse::<u32>().ok();
        if stock.is_none() {
            errors.add("stock", "Остаток должен быть целым неотрицательным числом");
        }

        if self.category_id.trim().is_empty() {
            errors.add("category", "Выберите категорию");
        }
        if self.main_image.is_none() {
            errors.add("mainImage", "Добавьте основное изображение");
        }
        if self.additional_images.len() > MAX_ADDITIONAL_IMAGES {
            errors.add(
                "additionalImages",
                format!("Не больше {} дополнительных изображений", MAX_ADDITIONAL_IMAGES),
            );
        }

        let youtube_link = non_empty(&self.youtube_link);
        if let Some(link) = &youtube_link {
            if !is_youtube_link(link) {
                errors.add("youtubeLink", "Ссылка должна вести на YouTube");
            }
        }

        let (Some(price), Some(discounted_price), Some(stock), true) =
            (price, discounted_price, stock, errors.is_empty())
        else {
            return Err(errors);
        };

        // Отправляется процент, согласованный с ценами, а не введённый текст
        let discount = discount_percent(price, discounted_price).unwrap_or(0.0);

        Ok(ProductPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            discounted_price,
            discount,
            stock,
            category_id: self.category_id.trim().to_string(),
            subcategory_id: non_empty(&self.subcategory_id),
            subsection_id: non_empty(&self.subsection_id),
            is_taxable: self.is_taxable,
            existing_main_image: self
                .main_image
                .as_ref()
                .and_then(|s| s.existing_url())
                .map(str::to_string),
            existing_additional_images: self
                .additional_images
                .iter()
                .filter_map(|s| s.existing_url())
                .map(str::to_string)
                .collect(),
            youtube_link,
            upload_requirements: non_empty(&self.upload_requirements),
        })
    }
}

impl ProductPayload {
    /// Текстовые поля multipart-запроса (файлы добавляются отдельно)
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("price", self.price.to_string()),
            ("discountedPrice", self.discounted_price.to_string()),
            ("discount", self.discount.to_string()),
            ("stock", self.stock.to_string()),
            ("category", self.category_id.clone()),
            ("isTaxable", self.is_taxable.to_string()),
        ];
        if let Some(v) = &self.subcategory_id {
            fields.push(("subcategory", v.clone()));
        }
        if let Some(v) = &self.subsection_id {
            fields.push(("subsection", v.clone()));
        }
        if let Some(v) = &self.youtube_link {
            fields.push(("youtubeLink", v.clone()));
        }
        if let Some(v) = &self.upload_requirements {
            fields.push(("uploadRequirements", v.clone()));
        }
        if let Some(v) = &self.existing_main_image {
            fields.push(("existingMainImage", v.clone()));
        }
        for url in &self.existing_additional_images {
            fields.push(("existingAdditionalImages", url.clone()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Mug".into(),
            description: "Ceramic mug".into(),
            prices: PriceFields {
                price: "500".into(),
                discounted_price: "400".into(),
                discount: "20".into(),
            },
            stock: "10".into(),
            category_id: "cat1".into(),
            main_image: Some(ImageSlot::Pending("mug.png".into())),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_produces_payload() {
        let payload = valid_form().validate().unwrap();
        assert_eq!(payload.price, 500.0);
        assert_eq!(payload.discounted_price, 400.0);
        assert_eq!(payload.discount, 20.0);
        assert_eq!(payload.stock, 10);
        assert_eq!(payload.subcategory_id, None);
        assert_eq!(payload.existing_main_image, None);
    }

    #[test]
    fn test_each_required_field_is_reported() {
        let cases: Vec<(&str, Box<dyn Fn(&mut ProductForm)>)> = vec![
            ("name", Box::new(|f| f.name = "  ".into())),
            ("description", Box::new(|f| f.description.clear())),
            ("price", Box::new(|f| f.prices.price = "abc".into())),
            ("discountedPrice", Box::new(|f| f.prices.discounted_price = "".into())),
            ("stock", Box::new(|f| f.stock = "ten".into())),
            ("category", Box::new(|f| f.category_id.clear())),
            ("mainImage", Box::new(|f| f.main_image = None)),
        ];
        for (field, mutate) in cases {
            let mut form = valid_form();
            mutate(&mut form);
            let errors = form.validate().unwrap_err();
            assert!(errors.contains(field), "expected error for {}", field);
            assert_eq!(errors.len(), 1, "only {} should fail", field);
        }
    }

    #[test]
    fn test_youtube_link_host_check() {
        let mut form = valid_form();
        form.youtube_link = "https://vimeo.com/123".into();
        assert!(form.validate().unwrap_err().contains("youtubeLink"));

        form.youtube_link = "https://youtu.be/abc".into();
        assert_eq!(
            form.validate().unwrap().youtube_link.as_deref(),
            Some("https://youtu.be/abc")
        );

        form.youtube_link = "   ".into();
        assert_eq!(form.validate().unwrap().youtube_link, None);
    }

    #[test]
    fn test_too_many_additional_images() {
        let mut form = valid_form();
        form.additional_images = (0..6)
            .map(|i| ImageSlot::Pending(format!("{}.png", i)))
            .collect();
        assert!(form.validate().unwrap_err().contains("additionalImages"));
    }

    #[test]
    fn test_discount_derived_when_field_empty() {
        let mut form = valid_form();
        form.prices.discount.clear();
        assert_eq!(form.validate().unwrap().discount, 20.0);
    }

    #[test]
    fn test_out_of_range_discount_rejected() {
        let mut form = valid_form();
        form.prices = PriceFields::from_values(100.0, 80.0, 20.0);
        form.prices.set_discount("150".into());
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("discount"));
        assert_eq!(errors.len(), 1);

        form.prices.set_discount("-10".into());
        assert!(form.validate().unwrap_err().contains("discount"));
    }

    #[test]
    fn test_discount_follows_prices() {
        let mut form = valid_form();
        form.prices.discount = "35".into();
        let payload = form.validate().unwrap();
        assert_eq!((payload.price, payload.discounted_price, payload.discount), (500.0, 400.0, 20.0));
    }

    #[test]
    fn test_edit_mode_keeps_existing_images() {
        let json = r#"{
            "_id": "p1",
            "name": "Mug",
            "description": "Ceramic",
            "price": 500,
            "discountedPrice": 450,
            "discount": 10,
            "stock": 3,
            "category": {"_id": "cat1", "name": "Kitchen"},
            "mainImage": "https://cdn/main.png",
            "additionalImages": ["https://cdn/a.png"]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        let form = ProductForm::from_product(&product);
        assert!(form.is_edit_mode());
        assert_eq!(form.category_id, "cat1");
        assert_eq!(form.prices.discounted_price, "450");

        let payload = form.validate().unwrap();
        let fields = payload.text_fields();
        assert!(fields.contains(&("existingMainImage", "https://cdn/main.png".to_string())));
        assert!(fields.contains(&("existingAdditionalImages", "https://cdn/a.png".to_string())));
    }

    #[test]
    fn test_list_response_shapes() {
        let plain: ProductListResponse =
            serde_json::from_str(r#"[{"_id": "p1", "name": "A"}]"#).unwrap();
        assert_eq!(plain.into_items().len(), 1);
        let wrapped: ProductListResponse =
            serde_json::from_str(r#"{"products": [{"id": "p2", "name": "B"}]}"#).unwrap();
        assert_eq!(wrapped.into_items()[0].id.as_str(), "p2");
    }

    #[test]
    fn test_both_id_keys_decode() {
        let product: Product =
            serde_json::from_str(r#"{"_id":"p1","id":"p1","name":"Mug"}"#).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.name, "Mug");

        let list: ProductListResponse =
            serde_json::from_str(r#"{"products": [{"_id": "p1", "id": "p1", "name": "Mug"}]}"#)
                .unwrap();
        assert_eq!(list.into_items().len(), 1);

        let body = serde_json::to_value(&product).unwrap();
        assert_eq!(body["_id"], "p1");
        assert!(body.get("id").is_none());
    }
}
