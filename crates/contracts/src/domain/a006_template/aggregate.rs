use super::area::CustomizableArea;
use crate::domain::common::{AggregateRoot, EntityId, EntityRef};
use crate::shared::field_errors::FieldErrors;
use crate::shared::list::ListResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Шаблон персонализации: превью, SVG-основа и набор областей
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<EntityRef>,
    #[serde(default, alias = "thumbnail")]
    pub thumbnail_url: Option<String>,
    #[serde(default, alias = "svg", alias = "svgFile")]
    pub svg_url: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, alias = "customizableAreas")]
    pub areas: Vec<CustomizableArea>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AggregateRoot for Template {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "template"
    }

    fn element_name() -> &'static str {
        "Шаблон"
    }

    fn list_name() -> &'static str {
        "Шаблоны"
    }
}

/// Ответ `GET templates`
pub type TemplateListResponse = ListResponse<Template>;

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Основная информация шаблона (вкладка «Основное»)
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateForm {
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub is_active: bool,
    /// Имя выбранного файла превью
    pub thumbnail_name: Option<String>,
    /// Имя выбранного SVG-файла
    pub svg_name: Option<String>,
}

impl Default for TemplateForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category_id: String::new(),
            is_active: true,
            thumbnail_name: None,
            svg_name: None,
        }
    }
}

impl TemplateForm {
    /// Проверить форму вместе с областями
    pub fn validate(&self, areas: &[CustomizableArea]) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", "Введите название шаблона");
        }
        if self.thumbnail_name.is_none() {
            errors.add("thumbnail", "Выберите изображение превью");
        }
        match &self.svg_name {
            None => errors.add("svg", "Выберите SVG-файл"),
            Some(name) if !name.to_ascii_lowercase().ends_with(".svg") => {
                errors.add("svg", "Файл должен быть в формате SVG")
            }
            Some(_) => {}
        }

        if areas.is_empty() {
            errors.add("areas", "Добавьте хотя бы одну область");
        }
        for (index, area) in areas.iter().enumerate() {
            area.validate_into(index, &mut errors);
        }

        errors.into_result(())
    }

    pub fn to_create_request(&self, files: &TemplateUploadResponse) -> CreateTemplateRequest {
        let category = self.category_id.trim();
        CreateTemplateRequest {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            category: (!category.is_empty()).then(|| category.to_string()),
            thumbnail_url: files.thumbnail_url.clone(),
            svg_url: files.svg_url.clone(),
            is_active: self.is_active,
        }
    }
}

/// Ответ `POST templates/upload-files`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUploadResponse {
    #[serde(alias = "thumbnail")]
    pub thumbnail_url: String,
    #[serde(alias = "svg", alias = "svgFile")]
    pub svg_url: String,
}

/// Тело `POST templates`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub thumbnail_url: String,
    pub svg_url: String,
    pub is_active: bool,
}

/// Тело `PUT templates/:id` при переключении активности
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateStatusRequest {
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a006_template::AreaListEditor;

    fn valid_form() -> TemplateForm {
        TemplateForm {
            name: "Mug wrap".into(),
            thumbnail_name: Some("thumb.png".into()),
            svg_name: Some("mug.SVG".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_template_with_areas() {
        let mut editor = AreaListEditor::new();
        editor.add_area();
        assert!(valid_form().validate(editor.areas()).is_ok());
    }

    #[test]
    fn test_validate_reports_files_and_areas() {
        let form = TemplateForm {
            svg_name: Some("mug.png".into()),
            ..Default::default()
        };
        let errors = form.validate(&[]).unwrap_err();
        for field in ["name", "thumbnail", "svg", "areas"] {
            assert!(errors.contains(field), "missing {}", field);
        }
    }

    #[test]
    fn test_area_errors_are_indexed() {
        let mut editor = AreaListEditor::new();
        editor.add_area();
        editor.add_area();
        editor.update_at(1, |a| a.center_y = 101.0);
        let errors = valid_form().validate(editor.areas()).unwrap_err();
        assert!(errors.contains("areas.1.centerY"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_create_request_uses_uploaded_urls() {
        let files: TemplateUploadResponse =
            serde_json::from_str(r#"{"thumbnailUrl": "https://cdn/t.png", "svgUrl": "https://cdn/s.svg"}"#)
                .unwrap();
        let request = valid_form().to_create_request(&files);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["thumbnailUrl"], "https://cdn/t.png");
        assert_eq!(value["svgUrl"], "https://cdn/s.svg");
        assert_eq!(value["isActive"], true);
        assert!(value.get("category").is_none());
    }

    #[test]
    fn test_template_with_areas_decodes() {
        let json = r#"{
            "_id": "t1",
            "name": "Mug",
            "isActive": true,
            "customizableAreas": [
                {"name": "Front", "shape": "circle", "centerX": 50, "centerY": 50, "radius": 12}
            ]
        }"#;
        let list: TemplateListResponse =
            serde_json::from_str(&format!(r#"{{"data": [{}]}}"#, json)).unwrap();
        let template = &list.into_items()[0];
        assert_eq!(template.areas.len(), 1);
        assert_eq!(template.areas[0].geometry.radius(), Some(12.0));
    }
}
