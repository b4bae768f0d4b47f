use crate::domain::a008_coupon::ui::details::CouponDetails;
use crate::shared::api::{ApiClient, ApiError, HttpTransport};
use crate::shared::components::ErrorBanner;
use crate::shared::confirm::confirm;
use crate::shared::form_status::FormStatus;
use crate::shared::format::format_optional_date;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::system::auth::context::use_session;
use contracts::domain::a008_coupon::aggregate::{Coupon, CouponListResponse, RestrictionKind};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub async fn fetch_coupons<T: HttpTransport>(api: &ApiClient<T>) -> Result<Vec<Coupon>, ApiError> {
    let list: CouponListResponse = api.get("coupons").await?;
    Ok(list.into_items())
}

pub async fn delete_coupon<T: HttpTransport>(api: &ApiClient<T>, id: &EntityId) -> Result<(), ApiError> {
    api.delete(&format!("coupons/{}", id)).await
}

/// «Все» или перечень ограниченных списков
fn scope_label(coupon: &Coupon) -> String {
    let scope = coupon.scope();
    let limited: Vec<String> = RestrictionKind::ALL
        .into_iter()
        .filter(|k| !scope.applies_to_all(*k))
        .map(|k| format!("{}: {}", k.label(), scope.list(k).len()))
        .collect();
    if limited.is_empty() {
        "Все".to_string()
    } else {
        limited.join(", ")
    }
}

fn usage_label(coupon: &Coupon) -> String {
    match coupon.usage_limit {
        Some(limit) => format!("{} / {}", coupon.used_count, limit),
        None => coupon.used_count.to_string(),
    }
}

#[component]
#[allow(non_snake_case)]
pub fn CouponList() -> impl IntoView {
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let session = use_session();
    let items = RwSignal::new(Vec::<Coupon>::new());
    let status = FormStatus::new();

    let fetch = move || {
        status.begin();
        spawn_local(async move {
            match fetch_coupons(&session.client()).await {
                Ok(v) => {
                    items.set(v);
                    status.finish();
                }
                Err(e) => status.fail(session, "coupon list", e),
            }
        });
    };

    let open_details = move |coupon: Option<Coupon>| {
        modal_stack.open("1000px", move |handle| {
            view! {
                <CouponDetails
                    coupon=coupon.clone()
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

    let handle_delete = move |coupon: Coupon| {
        if !confirm(&format!("Удалить купон {}?", coupon.code)) {
            return;
        }
        spawn_local(async move {
            match delete_coupon(&session.client(), &coupon.id).await {
                Ok(()) => fetch(),
                Err(e) => status.fail(session, "coupon delete", e),
            }
        });
    };

    fetch();

    view! {
        <PageFrame page_id="a008_coupon--list" category=PAGE_CAT_LIST>
            <PageHeader title="Купоны">
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " Новый купон"
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
                        <TableHeaderCell min_width=130.0>"Код"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Скидка"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=200.0>"Действует для"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Использован"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"До"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Статус"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|coupon| {
                        let for_edit = coupon.clone();
                        let for_delete = coupon.clone();
                        let code = coupon.code.clone();
                        let value_label = coupon.value_label();
                        let scope = scope_label(&coupon);
                        let usage = usage_label(&coupon);
                        let valid_until = format_optional_date(coupon.valid_until);
                        let is_active = coupon.is_active;
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
                                            {code}
                                        </a>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout>{value_label}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{scope}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{usage}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{valid_until}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {if is_active {
                                            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Активен"</Badge> }.into_any()
                                        } else {
                                            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>"Выключен"</Badge> }.into_any()
                                        }}
                                    </TableCellLayout>
                                </TableCell>
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
    fn test_list_and_scope_label() {
        let api = MockTransport::new()
            .respond(
                HttpMethod::Get,
                "coupons",
                200,
                json!({ "coupons": [
                    { "_id": "c1", "code": "ALL10", "discountValue": 10 },
                    { "_id": "c2", "code": "MUGS", "discountValue": 5, "applicableProducts": ["p1", "p2"] }
                ]}),
            )
            .client();
        let coupons = block_on(fetch_coupons(&api)).unwrap();
        assert_eq!(scope_label(&coupons[0]), "Все");
        assert_eq!(scope_label(&coupons[1]), "Товары: 2");
        assert_eq!(usage_label(&coupons[0]), "0");
    }

    #[test]
    fn test_delete_path() {
        let api = MockTransport::new().client();
        block_on(delete_coupon(&api, &EntityId::from("c1"))).unwrap();
        assert_eq!(api.transport().count(HttpMethod::Delete, "coupons/c1"), 1);
    }
}
