//! Редактор главной страницы магазина (MVVM)
//!
//! - model: загрузка, сохранение и загрузка изображений баннеров
//! - view_model: черновик содержимого и справочники пикеров
//! - view: страница редактора

mod model;
mod view;
mod view_model;

pub use view::HomeContentEditor;
