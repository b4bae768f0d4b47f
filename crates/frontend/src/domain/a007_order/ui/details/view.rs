use super::model::{fetch_order, update_delivery, update_status};
use super::view_model::OrderDetailsVm;
use crate::shared::components::ErrorBanner;
use crate::shared::format::{format_money, format_optional_date, or_dash};
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use contracts::domain::a007_order::aggregate::{DeliveryStatus, Order, OrderStatus};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn order_summary(order: Order) -> impl IntoView {
    let customer = order.customer.clone().unwrap_or_default();
    let address = order
        .shipping_address
        .as_ref()
        .map(|a| a.one_line())
        .unwrap_or_default();

    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Покупатель"</h4>
            <div class="details-grid">
                <div><Label>"Имя"</Label><div>{or_dash(&customer.name)}</div></div>
                <div><Label>"Email"</Label><div>{or_dash(&customer.email)}</div></div>
                <div><Label>"Телефон"</Label><div>{or_dash(&customer.phone)}</div></div>
                <div><Label>"Адрес доставки"</Label><div>{or_dash(&address)}</div></div>
                <div><Label>"Создан"</Label><div>{format_optional_date(order.created_at)}</div></div>
            </div>
        </div>

        <div class="details-section">
            <h4 class="details-section__title">"Состав заказа"</h4>
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=220.0>"Товар"</TableHeaderCell>
                        <TableHeaderCell min_width=60.0>"Кол-во"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Цена"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>"Сумма"</TableHeaderCell>
                        <TableHeaderCell min_width=160.0>"Персонализация"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {order.items.into_iter().map(|item| {
                        let title = item.title().to_string();
                        let quantity = item.quantity;
                        let price = format_money(item.price);
                        let line_total = format_money(item.line_total());
                        let customization_images = item.customization_images;
                        view! {
                        <TableRow>
                            <TableCell><TableCellLayout>{title}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{quantity}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{price}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{line_total}</TableCellLayout></TableCell>
                            <TableCell>
                                <div class="image-slots">
                                    {customization_images.into_iter().map(|src| view! {
                                        <a href=src.clone() target="_blank">
                                            <img class="table__thumb" src=src.clone() alt="" />
                                        </a>
                                    }).collect_view()}
                                </div>
                            </TableCell>
                        </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
            <div class="details-total">{format!("Итого: {}", format_money(order.total_amount))}</div>
        </div>
    }
}

/// Заказ с выбором статуса и статуса доставки.
/// `on_changed` вызывается после каждого успешного обновления.
#[component]
#[allow(non_snake_case)]
pub fn OrderDetails(id: EntityId, on_changed: Callback<()>, on_close: Callback<()>) -> impl IntoView {
    let session = use_session();
    let vm = OrderDetailsVm::new();
    let id = StoredValue::new(id);

    let load = move || {
        spawn_local(async move {
            match fetch_order(&session.client(), &id.get_value()).await {
                Ok(order) => vm.load(order),
                Err(e) => vm.form.fail(session, "order load", e),
            }
        });
    };

    let save_status = move |_| {
        let status = OrderStatus::from(vm.status.get_untracked());
        vm.form.begin();
        spawn_local(async move {
            match update_status(&session.client(), &id.get_value(), status).await {
                Ok(()) => {
                    vm.form.finish();
                    on_changed.run(());
                    load();
                }
                Err(e) => vm.form.fail(session, "order status", e),
            }
        });
    };

    let save_delivery = move |_| {
        let delivery = DeliveryStatus::from(vm.delivery_status.get_untracked());
        vm.form.begin();
        spawn_local(async move {
            match update_delivery(&session.client(), &id.get_value(), delivery).await {
                Ok(()) => {
                    vm.form.finish();
                    on_changed.run(());
                    load();
                }
                Err(e) => vm.form.fail(session, "order delivery", e),
            }
        });
    };

    load();

    view! {
        <div class="details-form">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-form__title">
                    {move || vm.order.with(|o| o.as_ref().map(|o| format!("Заказ {}", o.display_number())).unwrap_or_default())}
                </h2>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    {icon("close")}
                    " Закрыть"
                </Button>
            </Flex>

            <ErrorBanner error=vm.form.error />

            {move || match vm.order.get() {
                None => view! { <Spinner /> }.into_any(),
                Some(order) => {
                let current_status = order.status.as_str().to_string();
                let current_delivery = order.delivery_status.as_str().to_string();
                view! {
                    <div class="details-section">
                        <h4 class="details-section__title">"Статусы"</h4>
                        <div class="details-grid">
                            <div class="form__group">
                                <label class="form__label">"Статус заказа"</label>
                                <Space>
                                    <Select value=vm.status>
                                        {status_options(OrderStatus::KNOWN.iter().map(|s| (s.as_str().to_string(), s.label().to_string())), current_status)}
                                    </Select>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Primary
                                        disabled=Signal::derive(move || !vm.status_changed() || vm.form.busy.get())
                                        on_click=save_status
                                    >
                                        "Применить"
                                    </Button>
                                </Space>
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Доставка"</label>
                                <Space>
                                    <Select value=vm.delivery_status>
                                        {status_options(DeliveryStatus::KNOWN.iter().map(|s| (s.as_str().to_string(), s.label().to_string())), current_delivery)}
                                    </Select>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Primary
                                        disabled=Signal::derive(move || !vm.delivery_changed() || vm.form.busy.get())
                                        on_click=save_delivery
                                    >
                                        "Применить"
                                    </Button>
                                </Space>
                            </div>
                        </div>
                    </div>
                    {order_summary(order)}
                }.into_any()
                }
            }}
        </div>
    }
}

/// Известные значения плюс текущее, если сервер прислал незнакомое
fn status_options<S: ToString>(
    known: impl Iterator<Item = (String, String)>,
    current: S,
) -> impl IntoView {
    let current = current.to_string();
    let mut options: Vec<(String, String)> = known.collect();
    if !options.iter().any(|(value, _)| *value == current) {
        options.push((current.clone(), current));
    }
    options
        .into_iter()
        .map(|(value, label)| view! { <option value=value>{label}</option> })
        .collect_view()
}
