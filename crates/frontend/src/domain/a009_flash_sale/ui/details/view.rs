//! Flash Sale Details - View Component

use super::model::save_flash_sale;
use super::view_model::FlashSaleDetailsVm;
use crate::domain::a001_product::ui::list::fetch_products;
use crate::shared::components::{DateInput, ErrorBanner, FieldError};
use crate::shared::format::format_money;
use crate::shared::icons::icon;
use crate::shared::picker_aggregate::AggregatePicker;
use crate::system::auth::context::use_session;
use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a009_flash_sale::aggregate::{FlashSale, FlashSaleItemDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Строка корзины: исходная цена, цена распродажи и скидка связаны
#[component]
fn CartRow(vm: FlashSaleDetailsVm, item: FlashSaleItemDraft) -> impl IntoView {
    let id = StoredValue::new(item.product_id.clone());
    let key = item.key;
    let read = move |f: fn(&FlashSaleItemDraft) -> String| {
        vm.cart.with(|c| c.items.iter().find(|i| i.key == key).map(f).unwrap_or_default())
    };
    let product_name = item.product_name.clone();
    let original_price = format_money(item.original_price());

    view! {
        <TableRow>
            <TableCell><TableCellLayout>{product_name}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{original_price}</TableCellLayout></TableCell>
            <TableCell>
                <input
                    class="form__input form__input--compact"
                    type="text"
                    inputmode="decimal"
                    prop:value=move || read(|i| i.prices.discounted_price.clone())
                    on:input=move |ev| vm.set_sale_price(&id.get_value(), event_target_value(&ev))
                />
                <FieldError message=vm.item_error(key) />
            </TableCell>
            <TableCell>
                <input
                    class="form__input form__input--compact"
                    type="text"
                    inputmode="decimal"
                    prop:value=move || read(|i| i.prices.discount.clone())
                    on:input=move |ev| vm.set_discount(&id.get_value(), event_target_value(&ev))
                />
            </TableCell>
            <TableCell>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| vm.remove_product(&id.get_value())
                >
                    {icon("delete")}
                </Button>
            </TableCell>
        </TableRow>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn FlashSaleDetails(
    sale: Option<FlashSale>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let vm = FlashSaleDetailsVm::new();
    if let Some(s) = &sale {
        vm.load(s);
    }

    spawn_local(async move {
        match fetch_products(&session.client()).await {
            Ok(list) => vm.products.set(list),
            Err(e) => vm.status.fail(session, "flash sale products", e),
        }
    });

    let handle_save = move |_| {
        let form = vm.to_form();
        vm.status.begin();
        spawn_local(async move {
            match save_flash_sale(&session.client(), &form).await {
                Ok(id) => {
                    log::info!("flash sale saved: {}", id);
                    vm.status.finish();
                    on_saved.run(());
                }
                Err(e) => vm.status.fail(session, "flash sale save", e),
            }
        });
    };

    let title = move || {
        if vm.is_edit_mode() {
            format!("Распродажа: {}", vm.name.get())
        } else {
            "Новая распродажа".to_string()
        }
    };

    view! {
        <div class="details-form">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-form__title">{title}</h2>
                <Space>
                    <Button appearance=ButtonAppearance::Primary disabled=vm.status.busy on_click=handle_save>
                        {icon("save")}
                        " Сохранить"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        {icon("close")}
                        " Закрыть"
                    </Button>
                </Space>
            </Flex>

            <ErrorBanner error=vm.status.error />

            <div class="details-section">
                <h4 class="details-section__title">"Основное"</h4>
                <div class="form__group">
                    <label class="form__label">"Название"</label>
                    <Input value=vm.name />
                    <FieldError message=vm.status.field("name") />
                </div>
                <div class="form__group">
                    <label class="form__label">"Описание"</label>
                    <Textarea value=vm.description attr:rows=2 />
                </div>
                <div class="details-grid">
                    <div class="form__group">
                        <label class="form__label">"Начало"</label>
                        <DateInput value=vm.starts_at with_time=true />
                        <FieldError message=vm.status.field("startsAt") />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Окончание"</label>
                        <DateInput value=vm.ends_at with_time=true />
                        <FieldError message=vm.status.field("endsAt") />
                    </div>
                </div>
                <Checkbox checked=vm.is_active label="Активна" />
            </div>

            <div class="details-section">
                <h4 class="details-section__title">
                    {move || format!("Товары ({})", vm.cart.with(|c| c.items.len()))}
                </h4>
                <FieldError message=vm.status.field("items") />
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=200.0>"Товар"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Цена"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Цена распродажи"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Скидка, %"</TableHeaderCell>
                            <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || vm.cart.with(|c| c.items.clone())
                            key=|item| item.key
                            children=move |item| view! { <CartRow vm=vm item=item /> }
                        />
                    </TableBody>
                </Table>

                <AggregatePicker
                    title="Добавить товар"
                    items=vm.products
                    selected=vm.selected_ids()
                    on_pick=Callback::new(move |product: Product| vm.toggle_product(product))
                />
            </div>
        </div>
    }
}
