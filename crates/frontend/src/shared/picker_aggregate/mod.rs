//! Пикер справочных записей
//!
//! Таблица с поиском и отметками. Используется для ограничений купона,
//! товаров распродажи и подборок главной страницы.

pub mod component;
pub mod traits;

pub use component::AggregatePicker;
pub use traits::{filter_items, PickerItem};
