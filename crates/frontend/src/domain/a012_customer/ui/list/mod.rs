use crate::domain::a012_customer::ui::details::{set_blocked, CustomerDetails};
use crate::shared::api::{ApiClient, ApiError, ApiRequest, HttpTransport};
use crate::shared::components::{ErrorBanner, PaginationControls};
use crate::shared::config::app_config;
use crate::shared::form_status::FormStatus;
use crate::shared::format::{format_optional_date, or_dash};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::system::auth::context::use_session;
use contracts::domain::a012_customer::aggregate::{Customer, CustomerListQuery, CustomerListResponse};
use contracts::shared::pagination::PageInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub async fn fetch_customers<T: HttpTransport>(
    api: &ApiClient<T>,
    query: &CustomerListQuery,
) -> Result<(Vec<Customer>, PageInfo), ApiError> {
    let response: CustomerListResponse = api.fetch(ApiRequest::get("customers").with_query(query)?).await?;
    Ok(response.into_page())
}

#[component]
#[allow(non_snake_case)]
pub fn CustomerList() -> impl IntoView {
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let session = use_session();
    let items = RwSignal::new(Vec::<Customer>::new());
    let status = FormStatus::new();

    let search = RwSignal::new(String::new());
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(app_config().default_page_size);
    let total_pages = RwSignal::new(0usize);
    let total_count = RwSignal::new(0usize);

    let fetch = move || {
        let query = CustomerListQuery::new(&search.get_untracked(), page.get_untracked(), page_size.get_untracked());
        status.begin();
        spawn_local(async move {
            match fetch_customers(&session.client(), &query).await {
                Ok((customers, info)) => {
                    items.set(customers);
                    total_pages.set(info.pages());
                    total_count.set(info.total);
                    status.finish();
                }
                Err(e) => status.fail(session, "customer list", e),
            }
        });
    };

    let apply_search = move || {
        page.set(0);
        fetch();
    };

    let open_details = move |customer: Customer| {
        modal_stack.open("700px", move |handle| {
            view! {
                <CustomerDetails
                    id=customer.id.clone()
                    on_changed=Callback::new(move |_| fetch())
                    on_close=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        });
    };

    let toggle_block = move |customer: Customer| {
        spawn_local(async move {
            match set_blocked(&session.client(), &customer.id, !customer.is_blocked).await {
                Ok(()) => fetch(),
                Err(e) => status.fail(session, "customer block", e),
            }
        });
    };

    fetch();

    view! {
        <PageFrame page_id="a012_customer--list" category=PAGE_CAT_LIST>
            <PageHeader title="Покупатели">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    " Обновить"
                </Button>
            </PageHeader>
            <ErrorBanner error=status.error />

            <div class="filter-panel">
                <Space>
                    <Input value=search placeholder="Имя, email или телефон" />
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| apply_search()>
                        {icon("search")}
                        " Найти"
                    </Button>
                </Space>
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell resizable=true min_width=200.0>"Имя"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=200.0>"Email"</TableHeaderCell>
                        <TableHeaderCell min_width=130.0>"Телефон"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Заказов"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"Зарегистрирован"</TableHeaderCell>
                        <TableHeaderCell min_width=150.0>"Статус"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|customer| {
                        let for_open = customer.clone();
                        let for_block = customer.clone();
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout>
                                        <a
                                            href="#"
                                            on:click=move |e| {
                                                e.prevent_default();
                                                open_details(for_open.clone());
                                            }
                                        >
                                            {or_dash(&customer.name)}
                                        </a>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout>{customer.email.clone()}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{or_dash(&customer.phone)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{customer.orders_count}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_optional_date(customer.created_at)}</TableCellLayout></TableCell>
                                <TableCell>
                                    <Space>
                                        {if customer.is_blocked {
                                            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>"Заблокирован"</Badge> }.into_any()
                                        } else {
                                            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Активен"</Badge> }.into_any()
                                        }}
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| toggle_block(for_block.clone())
                                        >
                                            {if customer.is_blocked { "Разблокировать" } else { "Заблокировать" }}
                                        </Button>
                                    </Space>
                                </TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>

            <PaginationControls
                page=page
                page_size=page_size
                total_pages=total_pages
                total_count=total_count
                on_change=Callback::new(move |_| fetch())
            />
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
    fn test_search_query_and_page() {
        let api = MockTransport::new()
            .respond(
                HttpMethod::Get,
                "customers",
                200,
                json!({ "customers": [], "pagination": { "total": 55, "page": 2, "limit": 20 } }),
            )
            .client();
        let query = CustomerListQuery::new(" ivan ", 1, 20);
        let (items, info) = block_on(fetch_customers(&api, &query)).unwrap();
        assert!(items.is_empty());
        assert_eq!(info.pages(), 3);
        let calls = api.transport().requests();
        assert_eq!(calls[0].query.as_deref(), Some("search=ivan&page=2&limit=20"));
    }
}
