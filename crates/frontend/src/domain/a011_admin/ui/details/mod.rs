use crate::shared::api::{ApiClient, ApiError, ApiRequest, HttpTransport};
use crate::shared::components::{ErrorBanner, FieldError};
use crate::shared::form_status::FormStatus;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use contracts::domain::a011_admin::aggregate::{Admin, AdminForm, AdminRole, MIN_PASSWORD_LEN};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Новый администратор регистрируется через `POST register`,
/// существующий меняется через `PUT admins/:id`
pub async fn save_admin<T: HttpTransport>(api: &ApiClient<T>, form: &AdminForm) -> Result<(), ApiError> {
    match &form.id {
        Some(id) => {
            let body = form.validate_update()?;
            api.put_json(&format!("admins/{}", id), &body).await
        }
        None => {
            let body = form.validate_register()?;
            api.execute(ApiRequest::post_json("register", &body)?).await
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn AdminDetails(admin: Option<Admin>, on_saved: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let session = use_session();
    let initial = admin.as_ref().map(AdminForm::from_admin).unwrap_or_default();
    let is_edit = initial.is_edit_mode();

    let id = StoredValue::new(initial.id.clone());
    let name = RwSignal::new(initial.name);
    let email = RwSignal::new(initial.email);
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(initial.role.as_str().to_string());
    let status = FormStatus::new();

    let handle_save = move |_| {
        let form = AdminForm {
            id: id.get_value(),
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            role: AdminRole::parse(&role.get_untracked()),
        };
        status.begin();
        spawn_local(async move {
            match save_admin(&session.client(), &form).await {
                Ok(()) => {
                    log::info!("admin saved: {}", form.email.trim());
                    status.finish();
                    on_saved.run(());
                }
                Err(e) => status.fail(session, "admin save", e),
            }
        });
    };

    let password_hint = if is_edit {
        "Оставьте пустым, чтобы не менять".to_string()
    } else {
        format!("Не короче {} символов", MIN_PASSWORD_LEN)
    };

    view! {
        <div class="details-form">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-form__title">
                    {if is_edit { "Администратор" } else { "Новый администратор" }}
                </h2>
                <Space>
                    <Button appearance=ButtonAppearance::Primary disabled=status.busy on_click=handle_save>
                        {icon("save")}
                        " Сохранить"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        {icon("close")}
                        " Закрыть"
                    </Button>
                </Space>
            </Flex>

            <ErrorBanner error=status.error />

            <div class="form__group">
                <label class="form__label">"Имя"</label>
                <Input value=name />
                <FieldError message=status.field("name") />
            </div>
            <div class="form__group">
                <label class="form__label">"Email"</label>
                <Input value=email input_type=InputType::Email />
                <FieldError message=status.field("email") />
            </div>
            <div class="form__group">
                <label class="form__label">"Пароль"</label>
                <Input value=password input_type=InputType::Password placeholder=password_hint />
                <FieldError message=status.field("password") />
            </div>
            <div class="form__group">
                <label class="form__label">"Роль"</label>
                <Select value=role>
                    {AdminRole::ALL.into_iter().map(|r| view! {
                        <option value=r.as_str()>{r.label()}</option>
                    }).collect_view()}
                </Select>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use crate::shared::api::HttpMethod;
    use contracts::domain::common::EntityId;
    use futures::executor::block_on;
    use serde_json::json;

    fn form() -> AdminForm {
        AdminForm {
            name: "Olga".into(),
            email: "olga@shop.io".into(),
            password: "secret1".into(),
            role: AdminRole::SuperAdmin,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_goes_through_register() {
        let api = MockTransport::new().client();
        block_on(save_admin(&api, &form())).unwrap();
        let calls = api.transport().requests();
        assert_eq!(calls[0].method, HttpMethod::Post);
        assert_eq!(calls[0].path, "register");
        assert_eq!(calls[0].json().unwrap()["role"], json!("super_admin"));
    }

    #[test]
    fn test_update_without_password() {
        let api = MockTransport::new().client();
        let mut f = form();
        f.id = Some(EntityId::from("a1"));
        f.password.clear();
        block_on(save_admin(&api, &f)).unwrap();
        let calls = api.transport().requests();
        assert_eq!(calls[0].method, HttpMethod::Put);
        assert_eq!(calls[0].path, "admins/a1");
        assert!(calls[0].json().unwrap().get("password").is_none());
    }

    #[test]
    fn test_short_password_blocks_register() {
        let api = MockTransport::new().client();
        let mut f = form();
        f.password = "123".into();
        let err = block_on(save_admin(&api, &f)).unwrap_err();
        assert!(err.field_errors().unwrap().contains("password"));
        assert_eq!(api.transport().total(), 0);
    }
}
