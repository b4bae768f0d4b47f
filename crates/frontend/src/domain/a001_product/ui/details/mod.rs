//! Product Details UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: reference data and multipart submit
//! - view_model.rs: ProductDetailsVm with RwSignals
//! - view.rs: Main component ProductDetails

mod model;
mod view;
mod view_model;

pub use view::ProductDetails;
pub use view_model::ProductDetailsVm;
