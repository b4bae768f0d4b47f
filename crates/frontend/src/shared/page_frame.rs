//! PageFrame: корневая обёртка страницы внутри таба.
//!
//! На корневом элементе всегда есть `id` вида `"{entity}--{category}"`
//! (например `"a001_product--list"`) и `data-page-category`.

use leptos::prelude::*;

/// Список записей
pub const PAGE_CAT_LIST: &str = "list";
/// Страница-редактор без списка (главная страница магазина)
pub const PAGE_CAT_EDITOR: &str = "editor";

#[component]
pub fn PageFrame(
    page_id: &'static str,
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_EDITOR => "page page--editor",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}

/// Заголовок страницы с кнопками действий справа
#[component]
pub fn PageHeader(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <div class="page__header header">
            <div class="header__content">
                <h1 class="header__title">{title}</h1>
            </div>
            <div class="header__actions">{children()}</div>
        </div>
    }
}
