use leptos::prelude::*;

/// Нативное поле даты, связанное с сигналом
///
/// `with_time` переключает `date` на `datetime-local`. Значение хранится
/// в формате поля ввода и разбирается при валидации формы.
#[component]
pub fn DateInput(
    value: RwSignal<String>,
    #[prop(optional)] with_time: bool,
    #[prop(optional)] style: Option<String>,
) -> impl IntoView {
    let default_style = "padding: 6px 8px; border: 1px solid #ced4da; border-radius: 4px; font-size: 0.875rem; background: #fff;";
    let final_style = style.unwrap_or_else(|| default_style.to_string());
    let kind = if with_time { "datetime-local" } else { "date" };

    view! {
        <input
            type=kind
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
            style=final_style
        />
    }
}
