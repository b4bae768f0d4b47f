pub mod datetime;
pub mod field_errors;
pub mod hierarchy;
pub mod list;
pub mod media;
pub mod pagination;
pub mod pricing;
