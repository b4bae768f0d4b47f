use crate::domain::a011_admin::ui::details::AdminDetails;
use crate::shared::api::{ApiClient, ApiError, HttpTransport};
use crate::shared::components::ErrorBanner;
use crate::shared::confirm::confirm;
use crate::shared::form_status::FormStatus;
use crate::shared::format::format_optional_date;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::system::auth::context::{use_auth, use_session};
use contracts::domain::a011_admin::aggregate::{Admin, AdminListResponse};
use contracts::domain::common::{AggregateRoot, EntityId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub async fn fetch_admins<T: HttpTransport>(api: &ApiClient<T>) -> Result<Vec<Admin>, ApiError> {
    let list: AdminListResponse = api.get("admins").await?;
    Ok(list.into_items())
}

pub async fn delete_admin<T: HttpTransport>(api: &ApiClient<T>, id: &EntityId) -> Result<(), ApiError> {
    api.delete(&format!("admins/{}", id)).await
}

#[component]
#[allow(non_snake_case)]
pub fn AdminList() -> impl IntoView {
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let session = use_session();
    let (auth_state, _) = use_auth();
    let items = RwSignal::new(Vec::<Admin>::new());
    let status = FormStatus::new();

    // Свою учётную запись удалить нельзя
    let current_id = move || auth_state.with(|s| s.admin.as_ref().map(|a| a.id.clone()));

    let fetch = move || {
        status.begin();
        spawn_local(async move {
            match fetch_admins(&session.client()).await {
                Ok(v) => {
                    items.set(v);
                    status.finish();
                }
                Err(e) => status.fail(session, "admin list", e),
            }
        });
    };

    let open_details = move |admin: Option<Admin>| {
        modal_stack.open("600px", move |handle| {
            view! {
                <AdminDetails
                    admin=admin.clone()
                    on_saved=Callback::new(move |_| {
                        handle.close();
                        fetch();
                    })
                    on_cancel=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        });
    };

    let handle_delete = move |admin: Admin| {
        if !confirm(&format!("Удалить администратора {}?", admin.display_name())) {
            return;
        }
        spawn_local(async move {
            match delete_admin(&session.client(), &admin.id).await {
                Ok(()) => fetch(),
                Err(e) => status.fail(session, "admin delete", e),
            }
        });
    };

    fetch();

    view! {
        <PageFrame page_id="a011_admin--list" category=PAGE_CAT_LIST>
            <PageHeader title="Администраторы">
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " Добавить"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                        {icon("refresh")}
                        " Обновить"
                    </Button>
                </Space>
            </PageHeader>
            <ErrorBanner error=status.error />

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell resizable=true min_width=180.0>"Имя"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=200.0>"Email"</TableHeaderCell>
                        <TableHeaderCell min_width=160.0>"Роль"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"Создан"</TableHeaderCell>
                        <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|admin| {
                        let for_edit = admin.clone();
                        let for_delete = admin.clone();
                        let is_self = current_id().as_ref() == Some(&admin.id);
                        let display_name = admin.display_name().to_string();
                        let email = admin.email.clone();
                        let role_label = admin.role.label();
                        let created_at = format_optional_date(admin.created_at);
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout>
                                        <a
                                            href="#"
                                            on:click=move |e| {
                                                e.prevent_default();
                                                open_details(Some(for_edit.clone()));
                                            }
                                        >
                                            {display_name}
                                        </a>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout>{email}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{role_label}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{created_at}</TableCellLayout></TableCell>
                                <TableCell>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        disabled=is_self
                                        on_click=move |_| handle_delete(for_delete.clone())
                                    >
                                        {icon("delete")}
                                    </Button>
                                </TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use crate::shared::api::HttpMethod;
    use contracts::domain::a011_admin::aggregate::AdminRole;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_fetch_and_delete() {
        let api = MockTransport::new()
            .respond(
                HttpMethod::Get,
                "admins",
                200,
                json!({ "admins": [{ "_id": "a1", "email": "root@shop.io", "role": "superadmin" }] }),
            )
            .client();
        let admins = block_on(fetch_admins(&api)).unwrap();
        assert_eq!(admins[0].role, AdminRole::SuperAdmin);
        assert_eq!(admins[0].display_name(), "root@shop.io");

        block_on(delete_admin(&api, &admins[0].id)).unwrap();
        assert_eq!(api.transport().count(HttpMethod::Delete, "admins/a1"), 1);
    }
}
