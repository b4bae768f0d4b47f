use crate::shared::icons::icon;
use leptos::prelude::*;

const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Постраничная навигация для серверных списков (заказы, клиенты).
///
/// Меняет `page` (с нуля) и `page_size`, затем вызывает `on_change`.
/// Смена размера страницы возвращает на первую страницу.
#[component]
pub fn PaginationControls(
    page: RwSignal<usize>,
    page_size: RwSignal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] total_count: Signal<usize>,
    on_change: Callback<()>,
) -> impl IntoView {
    let go_to = move |target: usize| {
        if target != page.get_untracked() {
            page.set(target);
            on_change.run(());
        }
    };

    let is_first = move || page.get() == 0;
    let is_last = move || page.get() + 1 >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button class="pagination-btn" title="Первая страница" disabled=is_first on:click=move |_| go_to(0)>
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                title="Предыдущая страница"
                disabled=is_first
                on:click=move |_| go_to(page.get_untracked().saturating_sub(1))
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    format!(
                        "Стр. {} из {} · всего {}",
                        page.get() + 1,
                        total_pages.get().max(1),
                        total_count.get(),
                    )
                }}
            </span>
            <button
                class="pagination-btn"
                title="Следующая страница"
                disabled=is_last
                on:click=move |_| {
                    let next = page.get_untracked() + 1;
                    if next < total_pages.get_untracked() {
                        go_to(next);
                    }
                }
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                title="Последняя страница"
                disabled=is_last
                on:click=move |_| go_to(total_pages.get_untracked().saturating_sub(1))
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                prop:value=move || page_size.get().to_string()
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        page_size.set(size);
                        page.set(0);
                        on_change.run(());
                    }
                }
            >
                {PAGE_SIZE_OPTIONS
                    .iter()
                    .map(|&size| view! { <option value=size.to_string()>{size.to_string()}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}
