//! Flash Sale Details UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: two-step create, single-request update
//! - view_model.rs: FlashSaleDetailsVm (header fields and the item cart)
//! - view.rs: Main component FlashSaleDetails

mod model;
mod view;
mod view_model;

pub use view::FlashSaleDetails;
