use super::traits::{filter_items, PickerItem};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use thaw::*;

/// Таблица выбора с поиском
///
/// Клик по строке вызывает `on_pick`; что делать с выбором (переключить,
/// добавить), решает вызывающий. `selected` подсвечивает отмеченные строки.
#[component]
pub fn AggregatePicker<T>(
    #[prop(into)] items: Signal<Vec<T>>,
    #[prop(into)] selected: Signal<Vec<EntityId>>,
    on_pick: Callback<T>,
    /// Сброс выбора; без него кнопка не показывается
    #[prop(optional)]
    on_clear: Option<Callback<()>>,
    #[prop(optional, into)] title: Option<String>,
) -> impl IntoView
where
    T: PickerItem + Clone + PartialEq + Send + Sync + 'static,
{
    let query = RwSignal::new(String::new());
    let visible = Memo::new(move |_| items.with(|all| filter_items(all, &query.get())));

    view! {
        <div class="picker-container">
            <div class="picker-header">
                {title.map(|t| view! { <h4>{t}</h4> })}
                <Space>
                    <Input value=query placeholder="Поиск" />
                    {on_clear.map(|clear| view! {
                        <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle on_click=move |_| clear.run(())>
                            "Сбросить"
                        </Button>
                    })}
                </Space>
            </div>

            <div class="picker-content">
                <Show
                    when=move || visible.with(|v| !v.is_empty())
                    fallback=|| view! { <div class="picker-empty">"Нет доступных элементов"</div> }
                >
                    <table class="picker-table">
                        <tbody>
                            {move || visible.get().into_iter().map(|item| {
                                let id = item.picker_id().clone();
                                let label = item.picker_label();
                                let hint = item.picker_hint();
                                let is_selected = move || selected.with(|s| s.contains(&id));
                                let checked = is_selected.clone();
                                view! {
                                    <tr
                                        class=move || if is_selected() { "picker-row picker-row--selected" } else { "picker-row" }
                                        on:click=move |_| on_pick.run(item.clone())
                                    >
                                        <td class="picker-row__check">
                                            <input type="checkbox" prop:checked=checked tabindex="-1" />
                                        </td>
                                        <td>{label}</td>
                                        <td class="picker-row__hint">{hint}</td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                </Show>
            </div>
        </div>
    }
}
