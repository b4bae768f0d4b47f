//! Template Details UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: upload, template creation and parallel area creation
//! - view_model.rs: TemplateDetailsVm with RwSignals
//! - view.rs: TemplateDetails (three tabs) and TemplatePreview
//! - area_form.rs: editor of the selected area

mod area_form;
mod model;
mod view;
mod view_model;

pub use view::{TemplateDetails, TemplatePreview};
pub use view_model::TemplateDetailsVm;
