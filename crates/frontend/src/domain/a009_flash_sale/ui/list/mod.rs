use crate::domain::a009_flash_sale::ui::details::FlashSaleDetails;
use crate::shared::api::{ApiClient, ApiError, HttpTransport};
use crate::shared::components::ErrorBanner;
use crate::shared::form_status::FormStatus;
use crate::shared::format::format_optional_date;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::system::auth::context::use_session;
use chrono::Utc;
use contracts::domain::a009_flash_sale::aggregate::{FlashSale, FlashSaleListResponse, SalePhase, ToggleFlashSaleRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub async fn fetch_flash_sales<T: HttpTransport>(api: &ApiClient<T>) -> Result<Vec<FlashSale>, ApiError> {
    let list: FlashSaleListResponse = api.get("flash-sales").await?;
    Ok(list.into_items())
}

/// `PATCH flash-sales/:id/toggle` с обратным флагом, затем свежий список
pub async fn toggle_flash_sale<T: HttpTransport>(
    api: &ApiClient<T>,
    sale: &FlashSale,
) -> Result<Vec<FlashSale>, ApiError> {
    api.patch_json(
        &format!("flash-sales/{}/toggle", sale.id),
        &ToggleFlashSaleRequest::inverse_of(sale.is_active),
    )
    .await?;
    fetch_flash_sales(api).await
}

fn phase_badge(phase: SalePhase) -> impl IntoView {
    let color = match phase {
        SalePhase::Upcoming => BadgeColor::Informative,
        SalePhase::Live => BadgeColor::Success,
        SalePhase::Ended => BadgeColor::Subtle,
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{phase.label()}</Badge> }
}

#[component]
#[allow(non_snake_case)]
pub fn FlashSaleList() -> impl IntoView {
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let session = use_session();
    let items = RwSignal::new(Vec::<FlashSale>::new());
    let status = FormStatus::new();

    let fetch = move || {
        status.begin();
        spawn_local(async move {
            match fetch_flash_sales(&session.client()).await {
                Ok(v) => {
                    items.set(v);
                    status.finish();
                }
                Err(e) => status.fail(session, "flash sale list", e),
            }
        });
    };

    let open_details = move |sale: Option<FlashSale>| {
        modal_stack.open("1100px", move |handle| {
            view! {
                <FlashSaleDetails
                    sale=sale.clone()
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

    let handle_toggle = move |sale: FlashSale| {
        status.begin();
        spawn_local(async move {
            match toggle_flash_sale(&session.client(), &sale).await {
                Ok(v) => {
                    items.set(v);
                    status.finish();
                }
                Err(e) => status.fail(session, "flash sale toggle", e),
            }
        });
    };

    fetch();

    view! {
        <PageFrame page_id="a009_flash_sale--list" category=PAGE_CAT_LIST>
            <PageHeader title="Флеш-распродажи">
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " Новая распродажа"
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
                        <TableHeaderCell resizable=true min_width=200.0>"Название"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"Начало"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"Окончание"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Товаров"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"Период"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"Активна"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let now = Utc::now();
                        items.get().into_iter().map(|sale| {
                            let for_edit = sale.clone();
                            let for_toggle = sale.clone();
                            let name = sale.name.clone();
                            let starts_at = format_optional_date(Some(sale.starts_at));
                            let ends_at = format_optional_date(Some(sale.ends_at));
                            let items_count = sale.items.len();
                            let phase = phase_badge(sale.phase(now));
                            let is_active = sale.is_active;
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
                                                {name}
                                            </a>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell><TableCellLayout>{starts_at}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{ends_at}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{items_count}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{phase}</TableCellLayout></TableCell>
                                    <TableCell>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance={if is_active { ButtonAppearance::Primary } else { ButtonAppearance::Secondary }}
                                            disabled=status.busy
                                            on_click=move |_| handle_toggle(for_toggle.clone())
                                        >
                                            {if is_active { "Вкл" } else { "Выкл" }}
                                        </Button>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view()
                    }}
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

    fn sale(active: bool) -> FlashSale {
        serde_json::from_value(json!({
            "_id": "fs1",
            "name": "Weekend",
            "startsAt": "2024-05-01T10:00:00Z",
            "endsAt": "2024-05-03T10:00:00Z",
            "isActive": active
        }))
        .unwrap()
    }

    #[test]
    fn test_toggle_patches_inverse_then_refetches() {
        let api = MockTransport::new()
            .respond(
                HttpMethod::Get,
                "flash-sales",
                200,
                json!({ "flashSales": [{
                    "_id": "fs1", "name": "Weekend",
                    "startDate": "2024-05-01T10:00:00Z", "endDate": "2024-05-03T10:00:00Z",
                    "isActive": false
                }]}),
            )
            .client();

        let list = block_on(toggle_flash_sale(&api, &sale(true))).unwrap();

        let calls = api.transport().requests();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method, HttpMethod::Patch);
        assert_eq!(calls[0].path, "flash-sales/fs1/toggle");
        assert_eq!(calls[0].json(), Some(&json!({ "isActive": false })));
        assert_eq!(calls[1].method, HttpMethod::Get);
        assert_eq!(calls[1].path, "flash-sales");
        assert!(!list[0].is_active);
    }

    #[test]
    fn test_failed_toggle_skips_refetch() {
        let api = MockTransport::new()
            .respond(HttpMethod::Patch, "flash-sales/*/toggle", 404, json!({ "message": "not found" }))
            .client();
        assert!(block_on(toggle_flash_sale(&api, &sale(false))).is_err());
        assert_eq!(api.transport().count(HttpMethod::Get, "flash-sales"), 0);
    }
}
