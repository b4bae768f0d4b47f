use crate::domain::a006_template::ui::details::{TemplateDetails, TemplatePreview};
use crate::shared::api::{ApiClient, ApiError, HttpTransport};
use crate::shared::components::ErrorBanner;
use crate::shared::confirm::confirm;
use crate::shared::form_status::FormStatus;
use crate::shared::format::format_optional_date;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::system::auth::context::use_session;
use contracts::domain::a006_template::aggregate::{Template, TemplateListResponse, UpdateTemplateStatusRequest};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub async fn fetch_templates<T: HttpTransport>(api: &ApiClient<T>) -> Result<Vec<Template>, ApiError> {
    let list: TemplateListResponse = api.get("templates").await?;
    Ok(list.into_items())
}

pub async fn delete_template<T: HttpTransport>(api: &ApiClient<T>, id: &EntityId) -> Result<(), ApiError> {
    api.delete(&format!("templates/{}", id)).await
}

pub async fn set_template_active<T: HttpTransport>(
    api: &ApiClient<T>,
    id: &EntityId,
    is_active: bool,
) -> Result<(), ApiError> {
    api.put_json(&format!("templates/{}", id), &UpdateTemplateStatusRequest { is_active })
        .await
}

#[component]
#[allow(non_snake_case)]
pub fn TemplateList() -> impl IntoView {
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let session = use_session();
    let items = RwSignal::new(Vec::<Template>::new());
    let status = FormStatus::new();

    let fetch = move || {
        status.begin();
        spawn_local(async move {
            match fetch_templates(&session.client()).await {
                Ok(v) => {
                    items.set(v);
                    status.finish();
                }
                Err(e) => status.fail(session, "template list", e),
            }
        });
    };

    let handle_create = move || {
        modal_stack.open("1200px", move |handle| {
            view! {
                <TemplateDetails
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

    let handle_preview = move |template: Template| {
        modal_stack.open("900px", move |handle| {
            let svg_url = template.svg_url.clone();
            let areas = template.areas.clone();
            let name = template.name.clone();
            view! {
                <div class="details-form">
                    <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                        <h2 class="details-form__title">{name}</h2>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| handle.close()>
                            {icon("close")}
                        </Button>
                    </Flex>
                    <TemplatePreview
                        svg_url=Signal::derive(move || svg_url.clone())
                        areas=Signal::derive(move || areas.clone())
                    />
                </div>
            }
            .into_any()
        });
    };

    let handle_toggle = move |template: Template| {
        spawn_local(async move {
            match set_template_active(&session.client(), &template.id, !template.is_active).await {
                Ok(()) => fetch(),
                Err(e) => status.fail(session, "template toggle", e),
            }
        });
    };

    let handle_delete = move |template: Template| {
        if !confirm(&format!("Удалить шаблон «{}»?", template.name)) {
            return;
        }
        spawn_local(async move {
            match delete_template(&session.client(), &template.id).await {
                Ok(()) => fetch(),
                Err(e) => status.fail(session, "template delete", e),
            }
        });
    };

    fetch();

    view! {
        <PageFrame page_id="a006_template--list" category=PAGE_CAT_LIST>
            <PageHeader title="Шаблоны персонализации">
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| handle_create()>
                        {icon("plus")}
                        " Новый шаблон"
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
                        <TableHeaderCell min_width=64.0>""</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=220.0>"Название"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Областей"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Статус"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"Создан"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"Действия"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|template| {
                        let for_preview = template.clone();
                        let for_toggle = template.clone();
                        let for_delete = template.clone();
                        view! {
                            <TableRow>
                                <TableCell>
                                    {template.thumbnail_url.clone().map(|src| view! {
                                        <img class="table__thumb" src=src alt="" />
                                    })}
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <a
                                            href="#"
                                            on:click=move |e| {
                                                e.prevent_default();
                                                handle_preview(for_preview.clone());
                                            }
                                        >
                                            {template.name.clone()}
                                        </a>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout>{template.areas.len()}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {if template.is_active {
                                            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Активен"</Badge> }.into_any()
                                        } else {
                                            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>"Выключен"</Badge> }.into_any()
                                        }}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{format_optional_date(template.created_at)}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <Space>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| handle_toggle(for_toggle.clone())
                                        >
                                            {if template.is_active { "Выключить" } else { "Включить" }}
                                        </Button>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| handle_delete(for_delete.clone())
                                        >
                                            {icon("delete")}
                                        </Button>
                                    </Space>
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
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_toggle_sends_flag() {
        let api = MockTransport::new().client();
        block_on(set_template_active(&api, &EntityId::from("t1"), false)).unwrap();
        let calls = api.transport().requests();
        assert_eq!(calls[0].method, HttpMethod::Put);
        assert_eq!(calls[0].path, "templates/t1");
        assert_eq!(calls[0].json(), Some(&json!({ "isActive": false })));
    }

    #[test]
    fn test_list_decodes_areas() {
        let api = MockTransport::new()
            .respond(
                HttpMethod::Get,
                "templates",
                200,
                json!({ "templates": [{
                    "_id": "t1",
                    "name": "Mug",
                    "isActive": true,
                    "areas": [{
                        "name": "Front",
                        "shape": "hexagon",
                        "centerX": 50, "centerY": 40,
                        "radius": 12
                    }]
                }]}),
            )
            .client();
        let templates = block_on(fetch_templates(&api)).unwrap();
        assert_eq!(templates[0].areas.len(), 1);
        assert_eq!(templates[0].areas[0].geometry.radius(), Some(12.0));
    }
}
