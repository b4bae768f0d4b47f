use crate::domain::a010_testimonial::ui::details::TestimonialDetails;
use crate::shared::api::{ApiClient, ApiError, HttpTransport};
use crate::shared::components::ErrorBanner;
use crate::shared::confirm::confirm;
use crate::shared::form_status::FormStatus;
use crate::shared::format::format_optional_date;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::system::auth::context::use_session;
use contracts::domain::a010_testimonial::aggregate::{Testimonial, TestimonialListResponse};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub async fn fetch_testimonials<T: HttpTransport>(api: &ApiClient<T>) -> Result<Vec<Testimonial>, ApiError> {
    let list: TestimonialListResponse = api.get("testimonials").await?;
    Ok(list.into_items())
}

pub async fn delete_testimonial<T: HttpTransport>(api: &ApiClient<T>, id: &EntityId) -> Result<(), ApiError> {
    api.delete(&format!("testimonials/{}", id)).await
}

#[component]
#[allow(non_snake_case)]
pub fn TestimonialList() -> impl IntoView {
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let session = use_session();
    let items = RwSignal::new(Vec::<Testimonial>::new());
    let status = FormStatus::new();

    let fetch = move || {
        status.begin();
        spawn_local(async move {
            match fetch_testimonials(&session.client()).await {
                Ok(v) => {
                    items.set(v);
                    status.finish();
                }
                Err(e) => status.fail(session, "testimonial list", e),
            }
        });
    };

    let open_details = move |testimonial: Option<Testimonial>| {
        modal_stack.open("700px", move |handle| {
            view! {
                <TestimonialDetails
                    testimonial=testimonial.clone()
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

    let handle_delete = move |testimonial: Testimonial| {
        if !confirm(&format!("Удалить отзыв «{}»?", testimonial.customer_name)) {
            return;
        }
        spawn_local(async move {
            match delete_testimonial(&session.client(), &testimonial.id).await {
                Ok(()) => fetch(),
                Err(e) => status.fail(session, "testimonial delete", e),
            }
        });
    };

    fetch();

    view! {
        <PageFrame page_id="a010_testimonial--list" category=PAGE_CAT_LIST>
            <PageHeader title="Отзывы">
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " Новый отзыв"
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
                        <TableHeaderCell min_width=160.0>"Покупатель"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=280.0>"Отзыв"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Оценка"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Статус"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"Создан"</TableHeaderCell>
                        <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|t| {
                        let for_edit = t.clone();
                        let for_delete = t.clone();
                        let image = t.image.clone();
                        let customer_name = t.customer_name.clone();
                        let message = t.message.clone();
                        let stars = t.stars();
                        let is_active = t.is_active;
                        let created_at = format_optional_date(t.created_at);
                        view! {
                            <TableRow>
                                <TableCell>
                                    {image.map(|src| view! { <img class="table__thumb" src=src alt="" /> })}
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <a
                                            href="#"
                                            on:click=move |e| {
                                                e.prevent_default();
                                                open_details(Some(for_edit.clone()));
                                            }
                                        >
                                            {customer_name}
                                        </a>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout truncate=true>{message}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{stars}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {if is_active { "Показан" } else { "Скрыт" }}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout>{created_at}</TableCellLayout></TableCell>
                                <TableCell>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
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
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_list_and_delete() {
        let api = MockTransport::new()
            .respond(
                HttpMethod::Get,
                "testimonials",
                200,
                json!({ "testimonials": [{ "_id": "t1", "customerName": "Anna", "rating": 5 }] }),
            )
            .client();
        let list = block_on(fetch_testimonials(&api)).unwrap();
        assert_eq!(list[0].stars(), "★★★★★");

        block_on(delete_testimonial(&api, &list[0].id)).unwrap();
        assert_eq!(api.transport().count(HttpMethod::Delete, "testimonials/t1"), 1);
    }
}
