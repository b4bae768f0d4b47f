//! Product Details - ViewModel

use super::model::ProductUploads;
use crate::shared::api::UploadFile;
use crate::shared::form_status::FormStatus;
use contracts::domain::a001_product::aggregate::{Product, ProductForm};
use contracts::domain::common::EntityId;
use contracts::shared::hierarchy::{find_node, HierarchyLeaf, HierarchyNode};
use contracts::shared::media::{ImageSlot, MAX_ADDITIONAL_IMAGES};
use contracts::shared::pricing::PriceFields;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ProductDetailsVm {
    pub id: RwSignal<Option<EntityId>>,
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub prices: RwSignal<PriceFields>,
    pub stock: RwSignal<String>,
    pub category_id: RwSignal<String>,
    pub subcategory_id: RwSignal<String>,
    pub subsection_id: RwSignal<String>,
    pub is_taxable: RwSignal<bool>,
    pub youtube_link: RwSignal<String>,
    pub upload_requirements: RwSignal<String>,

    // Images: slots shown in the form, files waiting for upload
    pub main_image: RwSignal<Option<ImageSlot>>,
    pub additional_images: RwSignal<Vec<ImageSlot>>,
    pub main_file: RwSignal<Option<UploadFile>, LocalStorage>,
    pub additional_files: RwSignal<Vec<UploadFile>, LocalStorage>,

    // Reference data
    pub categories: RwSignal<Vec<HierarchyNode>>,
    pub sections: RwSignal<Vec<HierarchyNode>>,

    pub status: FormStatus,
}

impl ProductDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            prices: RwSignal::new(PriceFields::default()),
            stock: RwSignal::new(String::new()),
            category_id: RwSignal::new(String::new()),
            subcategory_id: RwSignal::new(String::new()),
            subsection_id: RwSignal::new(String::new()),
            is_taxable: RwSignal::new(false),
            youtube_link: RwSignal::new(String::new()),
            upload_requirements: RwSignal::new(String::new()),
            main_image: RwSignal::new(None),
            additional_images: RwSignal::new(Vec::new()),
            main_file: RwSignal::new_local(None),
            additional_files: RwSignal::new_local(Vec::new()),
            categories: RwSignal::new(Vec::new()),
            sections: RwSignal::new(Vec::new()),
            status: FormStatus::new(),
        }
    }

    /// Fill the form from an existing record (edit mode)
    pub fn load(&self, product: &Product) {
        let form = ProductForm::from_product(product);
        self.id.set(form.id);
        self.name.set(form.name);
        self.description.set(form.description);
        self.prices.set(form.prices);
        self.stock.set(form.stock);
        self.category_id.set(form.category_id);
        self.subcategory_id.set(form.subcategory_id);
        self.subsection_id.set(form.subsection_id);
        self.is_taxable.set(form.is_taxable);
        self.youtube_link.set(form.youtube_link);
        self.upload_requirements.set(form.upload_requirements);
        self.main_image.set(form.main_image);
        self.additional_images.set(form.additional_images);
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.with(Option::is_some)
    }

    pub fn to_form(&self) -> ProductForm {
        ProductForm {
            id: self.id.get_untracked(),
            name: self.name.get_untracked(),
            description: self.description.get_untracked(),
            prices: self.prices.get_untracked(),
            stock: self.stock.get_untracked(),
            category_id: self.category_id.get_untracked(),
            subcategory_id: self.subcategory_id.get_untracked(),
            subsection_id: self.subsection_id.get_untracked(),
            is_taxable: self.is_taxable.get_untracked(),
            main_image: self.main_image.get_untracked(),
            additional_images: self.additional_images.get_untracked(),
            youtube_link: self.youtube_link.get_untracked(),
            upload_requirements: self.upload_requirements.get_untracked(),
        }
    }

    pub fn uploads(&self) -> ProductUploads {
        ProductUploads {
            main_image: self.main_file.get_untracked(),
            additional_images: self.additional_files.get_untracked(),
        }
    }

    pub fn set_main_file(&self, file: UploadFile) {
        self.main_image.set(Some(ImageSlot::Pending(file.file_name.clone())));
        self.main_file.set(Some(file));
        self.status.fields.update(|f| f.clear_field("mainImage"));
    }

    /// Append picked files; the list is capped at the image limit
    pub fn add_additional_files(&self, files: Vec<UploadFile>) {
        let free = MAX_ADDITIONAL_IMAGES.saturating_sub(self.additional_images.with_untracked(Vec::len));
        for file in files.into_iter().take(free) {
            self.additional_images
                .update(|slots| slots.push(ImageSlot::Pending(file.file_name.clone())));
            self.additional_files.update(|files| files.push(file));
        }
    }

    pub fn remove_additional(&self, index: usize) {
        let mut removed = None;
        self.additional_images.update(|slots| {
            if index < slots.len() {
                removed = Some(slots.remove(index));
            }
        });
        if let Some(ImageSlot::Pending(name)) = removed {
            self.additional_files.update(|files| {
                if let Some(pos) = files.iter().position(|f| f.file_name == name) {
                    files.remove(pos);
                }
            });
        }
    }

    pub fn subcategories(&self) -> Vec<HierarchyLeaf> {
        let category = EntityId::from(self.category_id.get());
        self.categories
            .with(|list| find_node(list, &category).map(|n| n.children.clone()))
            .unwrap_or_default()
    }

    /// Subsections of all sections, labelled "Section / Subsection"
    pub fn subsection_options(&self) -> Vec<(String, String)> {
        self.sections.with(|sections| {
            sections
                .iter()
                .flat_map(|s| {
                    s.children
                        .iter()
                        .map(move |c| (c.id.to_string(), format!("{} / {}", s.name, c.name)))
                })
                .collect()
        })
    }
}

impl Default for ProductDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}
