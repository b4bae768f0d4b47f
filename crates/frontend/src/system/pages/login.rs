use contracts::shared::field_errors::FieldErrors;
use contracts::system::auth::SigninRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::{ApiClient, RequestContext};
use crate::shared::config::app_config;
use crate::system::auth::api;
use crate::system::auth::context::{do_login, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (field_errors, set_field_errors) = signal(FieldErrors::new());
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let request = SigninRequest {
            email: email.get(),
            password: password.get(),
        };

        set_is_loading.set(true);
        set_error_message.set(None);
        set_field_errors.set(FieldErrors::new());

        spawn_local(async move {
            let client = ApiClient::new(RequestContext::new(app_config().api_base.clone(), None));
            match api::signin(&client, &request).await {
                Ok(response) => {
                    // Переключает оболочку на MainLayout
                    do_login(set_auth_state, response.token, response.admin);
                }
                Err(e) => {
                    log::error!("signin failed: {}", e);
                    if let Some(fields) = e.field_errors() {
                        set_field_errors.set(fields.clone());
                    }
                    set_error_message.set(Some(e.to_string()));
                }
            }
            set_is_loading.set(false);
        });
    };

    let field_error = move |field: &'static str| {
        move || {
            field_errors
                .get()
                .get(field)
                .map(|m| view! { <div class="field-error">{m.to_string()}</div> })
        }
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Gifting Admin"</h1>
                <h2>"Вход в панель управления"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="admin@example.com"
                            value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                        {field_error("email")}
                    </div>

                    <div class="form-group">
                        <label for="password">"Пароль"</label>
                        <input
                            type="password"
                            id="password"
                            value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                        {field_error("password")}
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Вход..." } else { "Войти" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
