use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use leptos::prelude::*;

/// Содержимое вкладки создаётся один раз при открытии
/// и скрывается классом, пока вкладка не активна.
#[component]
pub fn TabPage(tab: TabData, tabs_store: AppGlobalContext) -> impl IntoView {
    let key = StoredValue::new(tab.key.clone());
    let is_active = move || {
        let active = tabs_store.active.get();
        key.with_value(|k| active.as_deref() == Some(k.as_str()))
    };

    log::debug!("tab page created: '{}'", tab.key);
    let key_for_cleanup = tab.key.clone();
    on_cleanup(move || log::debug!("tab page dropped: '{}'", key_for_cleanup));

    let content = render_tab_content(&tab.key);

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !is_active()
            data-tab-key=tab.key
        >
            {content}
        </div>
    }
}
