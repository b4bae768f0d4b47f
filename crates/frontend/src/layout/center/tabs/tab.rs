use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn Tab(tab: TabData) -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let key = StoredValue::new(tab.key);
    let is_active = Memo::new(move |_| {
        let active = tabs_store.active.get();
        key.with_value(|k| active.as_deref() == Some(k.as_str()))
    });

    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        tabs_store.close_tab(&key.get_value());
    };

    view! {
        <div class="tab" class:active=is_active on:click=move |_| tabs_store.activate_tab(&key.get_value())>
            <span>{tab.title}</span>
            <button class="tab-close" title="Закрыть" on:click=on_close>{icon("close")}</button>
        </div>
    }
}
