use leptos::prelude::*;

/// Сообщение об ошибке под полем формы
#[component]
pub fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message
            .get()
            .map(|m| view! { <div class="field-error">{m}</div> })
    }
}
