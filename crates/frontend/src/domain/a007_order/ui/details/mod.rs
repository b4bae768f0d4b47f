//! Order Details UI Module
//!
//! - model.rs: order fetch and the two status updates
//! - view_model.rs: OrderDetailsVm
//! - view.rs: OrderDetails modal

mod model;
mod view;
mod view_model;

pub use view::OrderDetails;
