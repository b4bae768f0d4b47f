//! Coupon Details UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: create/update requests
//! - view_model.rs: CouponDetailsVm with RwSignals and restriction lists
//! - view.rs: Main component CouponDetails

mod model;
mod view;
mod view_model;

pub use view::CouponDetails;
