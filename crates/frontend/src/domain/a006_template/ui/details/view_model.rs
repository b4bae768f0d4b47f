//! Template Details - ViewModel

use super::model::TemplateFiles;
use crate::shared::api::{FileSource, UploadFile};
use crate::shared::form_status::FormStatus;
use contracts::domain::a006_template::aggregate::TemplateForm;
use contracts::domain::a006_template::AreaListEditor;
use contracts::shared::hierarchy::HierarchyNode;
use leptos::prelude::*;

pub const TAB_BASIC: &str = "basic";
pub const TAB_AREAS: &str = "areas";
pub const TAB_PREVIEW: &str = "preview";

#[derive(Clone, Copy)]
pub struct TemplateDetailsVm {
    pub tab: RwSignal<String>,

    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub category_id: RwSignal<String>,
    pub is_active: RwSignal<bool>,
    pub thumbnail: RwSignal<Option<UploadFile>, LocalStorage>,
    pub svg: RwSignal<Option<UploadFile>, LocalStorage>,
    /// Object URL of the picked SVG for the preview tab
    pub svg_url: RwSignal<Option<String>>,

    pub editor: RwSignal<AreaListEditor>,
    pub categories: RwSignal<Vec<HierarchyNode>>,

    pub status: FormStatus,
    /// Result of the last submit when some areas were not saved
    pub partial: RwSignal<Option<String>>,
}

impl TemplateDetailsVm {
    pub fn new() -> Self {
        Self {
            tab: RwSignal::new(TAB_BASIC.to_string()),
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            category_id: RwSignal::new(String::new()),
            is_active: RwSignal::new(true),
            thumbnail: RwSignal::new_local(None),
            svg: RwSignal::new_local(None),
            svg_url: RwSignal::new(None),
            editor: RwSignal::new(AreaListEditor::new()),
            categories: RwSignal::new(Vec::new()),
            status: FormStatus::new(),
            partial: RwSignal::new(None),
        }
    }

    pub fn set_svg(&self, file: UploadFile) {
        if let Some(old) = self.svg_url.get_untracked() {
            let _ = web_sys::Url::revoke_object_url(&old);
        }
        let url = match &file.source {
            FileSource::Dom(dom) => web_sys::Url::create_object_url_with_blob(dom).ok(),
            FileSource::Bytes(_) => None,
        };
        self.svg_url.set(url);
        self.svg.set(Some(file));
    }

    pub fn to_form(&self) -> TemplateForm {
        TemplateForm {
            name: self.name.get_untracked(),
            description: self.description.get_untracked(),
            category_id: self.category_id.get_untracked(),
            is_active: self.is_active.get_untracked(),
            thumbnail_name: self.thumbnail.with_untracked(|f| f.as_ref().map(|f| f.file_name.clone())),
            svg_name: self.svg.with_untracked(|f| f.as_ref().map(|f| f.file_name.clone())),
        }
    }

    pub fn files(&self) -> TemplateFiles {
        TemplateFiles {
            thumbnail: self.thumbnail.get_untracked(),
            svg: self.svg.get_untracked(),
        }
    }

    /// Tab with the first reported error, so the user sees it after submit
    pub fn show_first_error(&self) {
        let tab = self.status.fields.with_untracked(|f| {
            let basic_failed = ["name", "thumbnail", "svg"].iter().any(|k| f.contains(k));
            let areas_failed = f.iter().any(|(key, _)| key.starts_with("areas"));
            if areas_failed && !basic_failed {
                TAB_AREAS
            } else {
                TAB_BASIC
            }
        });
        self.tab.set(tab.to_string());
    }
}

impl Default for TemplateDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}
