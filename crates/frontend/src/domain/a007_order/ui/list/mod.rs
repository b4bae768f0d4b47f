use crate::domain::a007_order::ui::details::OrderDetails;
use crate::shared::api::{ApiClient, ApiError, ApiRequest, HttpTransport};
use crate::shared::components::{ErrorBanner, PaginationControls};
use crate::shared::config::app_config;
use crate::shared::form_status::FormStatus;
use crate::shared::format::{format_money, format_optional_date};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::system::auth::context::use_session;
use contracts::domain::a007_order::aggregate::{Order, OrderListQuery, OrderListResponse, OrderStatus};
use contracts::shared::pagination::PageInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub async fn fetch_orders<T: HttpTransport>(
    api: &ApiClient<T>,
    query: &OrderListQuery,
) -> Result<(Vec<Order>, PageInfo), ApiError> {
    let response: OrderListResponse = api.fetch(ApiRequest::get("orders").with_query(query)?).await?;
    let page = response.pagination.unwrap_or_else(|| PageInfo {
        total: response.orders.len(),
        page: query.page,
        total_pages: 1,
        limit: query.limit,
    });
    Ok((response.orders, page))
}

fn status_badge(status: &OrderStatus) -> impl IntoView {
    let color = match status {
        OrderStatus::Delivered => BadgeColor::Success,
        OrderStatus::Cancelled => BadgeColor::Danger,
        OrderStatus::Pending => BadgeColor::Warning,
        _ => BadgeColor::Informative,
    };
    let label = status.label().to_string();
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{label}</Badge> }
}

#[component]
#[allow(non_snake_case)]
pub fn OrderList() -> impl IntoView {
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let session = use_session();
    let items = RwSignal::new(Vec::<Order>::new());
    let status = FormStatus::new();

    let status_filter = RwSignal::new(String::new());
    let search = RwSignal::new(String::new());
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(app_config().default_page_size);
    let total_pages = RwSignal::new(0usize);
    let total_count = RwSignal::new(0usize);

    let fetch = move || {
        let query = OrderListQuery::from_filter(
            &status_filter.get_untracked(),
            &search.get_untracked(),
            page.get_untracked(),
            page_size.get_untracked(),
        );
        status.begin();
        spawn_local(async move {
            match fetch_orders(&session.client(), &query).await {
                Ok((orders, info)) => {
                    items.set(orders);
                    total_pages.set(info.pages());
                    total_count.set(info.total);
                    page.set(info.zero_based_page());
                    status.finish();
                }
                Err(e) => status.fail(session, "order list", e),
            }
        });
    };

    let apply_filters = move || {
        page.set(0);
        fetch();
    };

    let open_details = move |order: Order| {
        modal_stack.open("1000px", move |handle| {
            view! {
                <OrderDetails
                    id=order.id.clone()
                    on_changed=Callback::new(move |_| fetch())
                    on_close=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        });
    };

    fetch();

    view! {
        <PageFrame page_id="a007_order--list" category=PAGE_CAT_LIST>
            <PageHeader title="Заказы">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    " Обновить"
                </Button>
            </PageHeader>
            <ErrorBanner error=status.error />

            <div class="filter-panel">
                <Space>
                    <select
                        class="filter-panel__select"
                        prop:value=move || status_filter.get()
                        on:change=move |ev| {
                            status_filter.set(event_target_value(&ev));
                            apply_filters();
                        }
                    >
                        <option value="">"Все статусы"</option>
                        {OrderStatus::KNOWN.iter().map(|s| view! {
                            <option value=s.as_str().to_string()>{s.label().to_string()}</option>
                        }).collect_view()}
                    </select>
                    <Input value=search placeholder="Номер заказа или покупатель" />
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| apply_filters()>
                        {icon("search")}
                        " Найти"
                    </Button>
                </Space>
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=120.0>"Номер"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=200.0>"Покупатель"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Позиций"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Сумма"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"Статус"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"Доставка"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"Создан"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|order| {
                        let for_open = order.clone();
                        let display_number = order.display_number();
                        let customer_name = order.customer_name().to_string();
                        let items_count = order.items.len();
                        let total_amount = format_money(order.total_amount);
                        let badge = status_badge(&order.status);
                        let delivery_label = order.delivery_status.label().to_string();
                        let created_at = format_optional_date(order.created_at);
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
                                            {display_number}
                                        </a>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout>{customer_name}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{items_count}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{total_amount}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{badge}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{delivery_label}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{created_at}</TableCellLayout></TableCell>
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
    fn test_query_skips_empty_filters() {
        let api = MockTransport::new()
            .respond(HttpMethod::Get, "orders", 200, json!({ "orders": [] }))
            .client();
        let query = OrderListQuery::from_filter("", "  ", 0, 20);
        block_on(fetch_orders(&api, &query)).unwrap();
        let calls = api.transport().requests();
        assert_eq!(calls[0].query.as_deref(), Some("page=1&limit=20"));
    }

    #[test]
    fn test_pagination_from_server() {
        let api = MockTransport::new()
            .respond(
                HttpMethod::Get,
                "orders",
                200,
                json!({
                    "orders": [{ "_id": "o1", "status": "pending", "totalAmount": 10 }],
                    "pagination": { "total": 41, "page": 3, "pages": 3, "limit": 20 }
                }),
            )
            .client();
        let query = OrderListQuery::from_filter("pending", "anna", 2, 20);
        let (orders, info) = block_on(fetch_orders(&api, &query)).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(info.pages(), 3);
        assert_eq!(info.zero_based_page(), 2);
        let calls = api.transport().requests();
        assert_eq!(
            calls[0].query.as_deref(),
            Some("status=pending&search=anna&page=3&limit=20")
        );
    }
}
