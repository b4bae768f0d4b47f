pub mod date_input;
pub mod error_banner;
pub mod field_error;
pub mod file_picker;
pub mod pagination_controls;

pub use date_input::DateInput;
pub use error_banner::ErrorBanner;
pub use field_error::FieldError;
pub use file_picker::FilePicker;
pub use pagination_controls::PaginationControls;
