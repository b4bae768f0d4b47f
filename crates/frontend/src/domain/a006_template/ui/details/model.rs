//! Template Details - Model Layer
//!
//! Creation runs in three steps: file upload, template record, one request
//! per area. Area requests run concurrently. Steps that already succeeded
//! are not undone when a later one fails.

use crate::shared::api::{ApiClient, ApiError, ApiRequest, HttpMethod, HttpTransport, MultipartForm, UploadFile};
use contracts::domain::a006_template::aggregate::{TemplateForm, TemplateUploadResponse};
use contracts::domain::a006_template::CustomizableArea;
use contracts::domain::common::{EntityId, IdResponse};
use contracts::shared::field_errors::FieldErrors;
use futures::future::join_all;

/// Files picked on the basic tab
#[derive(Debug, Clone, Default)]
pub struct TemplateFiles {
    pub thumbnail: Option<UploadFile>,
    pub svg: Option<UploadFile>,
}

/// Area that the server rejected
#[derive(Debug, Clone, PartialEq)]
pub struct FailedArea {
    pub name: String,
    pub error: ApiError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCreateReport {
    pub template_id: EntityId,
    pub created_areas: usize,
    pub failed_areas: Vec<FailedArea>,
}

impl TemplateCreateReport {
    pub fn is_complete(&self) -> bool {
        self.failed_areas.is_empty()
    }

    pub fn summary(&self) -> String {
        let failed = self
            .failed_areas
            .iter()
            .map(|f| format!("«{}»: {}", f.name, f.error))
            .collect::<Vec<_>>()
            .join("; ");
        format!(
            "Шаблон создан, областей сохранено: {}. Не удалось сохранить: {}",
            self.created_areas, failed
        )
    }
}

async fn upload_files<T: HttpTransport>(
    api: &ApiClient<T>,
    thumbnail: UploadFile,
    svg: UploadFile,
) -> Result<TemplateUploadResponse, ApiError> {
    let form = MultipartForm::new().file("thumbnail", thumbnail).file("svg", svg);
    api.fetch(ApiRequest::multipart(HttpMethod::Post, "templates/upload-files", form))
        .await
}

pub async fn create_template<T: HttpTransport>(
    api: &ApiClient<T>,
    form: &TemplateForm,
    files: TemplateFiles,
    areas: Vec<CustomizableArea>,
) -> Result<TemplateCreateReport, ApiError> {
    form.validate(&areas)?;
    let (Some(thumbnail), Some(svg)) = (files.thumbnail, files.svg) else {
        let mut errors = FieldErrors::new();
        errors.add("svg", "Выберите файлы заново");
        return Err(errors.into());
    };

    let uploaded = upload_files(api, thumbnail, svg).await?;
    log::debug!("template files uploaded: {}", uploaded.svg_url);

    let created: IdResponse = api
        .post_json("templates", &form.to_create_request(&uploaded))
        .await?;
    let template_id = created.into_id();
    log::info!("template created: {}", template_id);

    let path = format!("templates/{}/areas", template_id);
    let requests = areas.iter().map(|area| {
        let path = path.clone();
        async move {
            let result = match ApiRequest::post_json(path, area) {
                Ok(request) => api.execute(request).await,
                Err(e) => Err(e),
            };
            (area.name.clone(), result)
        }
    });

    let mut report = TemplateCreateReport {
        template_id,
        created_areas: 0,
        failed_areas: Vec::new(),
    };
    for (name, result) in join_all(requests).await {
        match result {
            Ok(()) => report.created_areas += 1,
            Err(error) => {
                log::error!("area «{}» was not created: {}", name, error);
                report.failed_areas.push(FailedArea { name, error });
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use contracts::domain::a006_template::AreaListEditor;
    use futures::executor::block_on;
    use serde_json::json;

    fn form() -> TemplateForm {
        TemplateForm {
            name: "Mug wrap".into(),
            thumbnail_name: Some("thumb.png".into()),
            svg_name: Some("mug.svg".into()),
            ..Default::default()
        }
    }

    fn files() -> TemplateFiles {
        TemplateFiles {
            thumbnail: Some(UploadFile::from_bytes("thumb.png", "image/png", vec![1])),
            svg: Some(UploadFile::from_bytes("mug.svg", "image/svg+xml", b"<svg/>".to_vec())),
        }
    }

    fn two_areas() -> Vec<CustomizableArea> {
        let mut editor = AreaListEditor::new();
        editor.add_area();
        editor.add_area();
        editor.into_areas()
    }

    fn mock() -> MockTransport {
        MockTransport::new()
            .respond(
                HttpMethod::Post,
                "templates/upload-files",
                200,
                json!({ "thumbnailUrl": "https://cdn/t.png", "svgUrl": "https://cdn/m.svg" }),
            )
            .respond(HttpMethod::Post, "templates", 201, json!({ "template": { "_id": "t1" } }))
    }

    #[test]
    fn test_two_areas_issue_four_requests() {
        let api = mock().client();
        let report = block_on(create_template(&api, &form(), files(), two_areas())).unwrap();

        let t = api.transport();
        assert_eq!(t.count(HttpMethod::Post, "templates/upload-files"), 1);
        assert_eq!(t.count(HttpMethod::Post, "templates"), 1);
        assert_eq!(t.count(HttpMethod::Post, "templates/t1/areas"), 2);
        assert_eq!(t.total(), 4);
        assert!(report.is_complete());
        assert_eq!(report.created_areas, 2);

        let created = t.requests()[1].json().cloned().unwrap();
        assert_eq!(created["svgUrl"], "https://cdn/m.svg");
        assert_eq!(created["thumbnailUrl"], "https://cdn/t.png");
    }

    #[test]
    fn test_area_failures_are_collected() {
        let api = mock()
            .respond(HttpMethod::Post, "templates/t1/areas", 500, json!({ "message": "db down" }))
            .client();
        let report = block_on(create_template(&api, &form(), files(), two_areas())).unwrap();

        assert_eq!(report.created_areas, 0);
        assert_eq!(report.failed_areas.len(), 2);
        assert!(report.summary().contains("db down"));
        assert_eq!(api.transport().total(), 4);
    }

    #[test]
    fn test_upload_failure_stops_sequence() {
        let api = MockTransport::new()
            .respond(HttpMethod::Post, "templates/upload-files", 413, json!({ "message": "too large" }))
            .client();
        let err = block_on(create_template(&api, &form(), files(), two_areas())).unwrap_err();
        assert_eq!(err.to_string(), "too large");
        assert_eq!(api.transport().total(), 1);
    }

    #[test]
    fn test_invalid_area_blocks_upload() {
        let api = mock().client();
        let mut areas = two_areas();
        areas[1].center_x = 150.0;
        let err = block_on(create_template(&api, &form(), files(), areas)).unwrap_err();
        assert!(err.field_errors().unwrap().contains("areas.1.centerX"));
        assert_eq!(api.transport().total(), 0);
    }
}
