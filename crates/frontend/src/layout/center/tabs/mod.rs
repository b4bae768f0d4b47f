mod tab;

use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::tabs::TabPage;
use leptos::prelude::*;
use tab::Tab as TabComponent;

#[component]
pub fn Tabs() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div class="tabs-container">
            <Show
                when=move || tabs_store.opened.with(|t| !t.is_empty())
                fallback=|| view! { <div class="tabs__empty">"Выберите раздел в меню слева"</div> }
            >
                <div class="tabs-bar">
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab| view! { <TabComponent tab=tab /> }
                    />
                </div>
            </Show>
            <div class="tab-content">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab: TabData| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                />
            </div>
        </div>
    }
}
