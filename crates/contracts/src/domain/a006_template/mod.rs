//! Шаблоны персонализации товара и их настраиваемые области

pub mod aggregate;
pub mod area;
pub mod editor;

pub use area::{AreaBox, AreaGeometry, AreaShape, CustomizableArea};
pub use editor::AreaListEditor;
