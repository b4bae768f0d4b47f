pub mod api;
pub mod components;
pub mod config;
pub mod confirm;
pub mod form_status;
pub mod format;
pub mod hierarchy_page;
pub mod icons;
pub mod modal_stack;
pub mod page_frame;
pub mod picker_aggregate;
pub mod reference;
