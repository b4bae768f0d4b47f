//! Общая страница для категорий, поводов, получателей и разделов
//!
//! - model.rs: эндпоинты справочника и вызовы API
//! - view.rs: страница «родители / дочерние элементы»

mod model;
mod view;

pub use model::{fetch_nodes, HierarchyKind};
pub use view::HierarchyPage;
