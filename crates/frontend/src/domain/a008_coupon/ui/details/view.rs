//! Coupon Details - View Component

use super::model::save_coupon;
use super::view_model::{restriction_key, CouponDetailsVm};
use crate::shared::components::{DateInput, ErrorBanner, FieldError};
use crate::shared::icons::icon;
use crate::shared::picker_aggregate::{AggregatePicker, PickerItem};
use crate::shared::reference::fetch_reference_lists;
use crate::system::auth::context::use_session;
use contracts::domain::a008_coupon::aggregate::{Coupon, DiscountType, RestrictionKind};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn restriction_picker<T>(vm: CouponDetailsVm, kind: RestrictionKind, items: Signal<Vec<T>>) -> AnyView
where
    T: PickerItem + Clone + PartialEq + Send + Sync + 'static,
{
    view! {
        <AggregatePicker
            items=items
            selected=vm.selected_ids(kind)
            on_pick=Callback::new(move |item: T| vm.toggle(kind, item.picker_id().clone()))
            on_clear=Callback::new(move |_| vm.clear(kind))
        />
    }
    .into_any()
}

/// Текстовое поле формы с ошибкой по ключу
#[component]
fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    error: Signal<Option<String>>,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <Input value=value placeholder=placeholder />
            <FieldError message=error />
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn CouponDetails(
    coupon: Option<Coupon>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let vm = CouponDetailsVm::new();
    if let Some(c) = &coupon {
        vm.load(c);
    }

    spawn_local(async move {
        match fetch_reference_lists(&session.client()).await {
            Ok(lists) => vm.reference.set(lists),
            Err(e) => vm.status.fail(session, "coupon reference data", e),
        }
    });

    let handle_save = move |_| {
        let form = vm.to_form();
        vm.status.begin();
        spawn_local(async move {
            match save_coupon(&session.client(), &form).await {
                Ok(()) => {
                    log::info!("coupon saved: {}", form.code.trim());
                    vm.status.finish();
                    on_saved.run(());
                }
                Err(e) => vm.status.fail(session, "coupon save", e),
            }
        });
    };

    let title = move || {
        if vm.is_edit_mode() {
            format!("Купон {}", vm.code.get())
        } else {
            "Новый купон".to_string()
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
                <TextField label="Код" value=vm.code error=vm.status.field("code") placeholder="GIFT10" />
                <div class="form__group">
                    <label class="form__label">"Описание"</label>
                    <Textarea value=vm.description attr:rows=2 />
                </div>
                <Checkbox checked=vm.is_active label="Активен" />
            </div>

            <div class="details-section">
                <h4 class="details-section__title">"Скидка"</h4>
                <div class="details-grid">
                    <div class="form__group">
                        <label class="form__label">"Тип"</label>
                        <Select value=vm.discount_type>
                            {[DiscountType::Percentage, DiscountType::Fixed].into_iter().map(|t| view! {
                                <option value=t.as_str()>{t.label()}</option>
                            }).collect_view()}
                        </Select>
                    </div>
                    <TextField label="Размер скидки" value=vm.discount_value error=vm.status.field("discountValue") />
                    <TextField label="Мин. сумма заказа" value=vm.min_order_amount error=vm.status.field("minOrderAmount") />
                    <TextField label="Макс. скидка" value=vm.max_discount error=vm.status.field("maxDiscount") />
                    <TextField label="Лимит использований" value=vm.usage_limit error=vm.status.field("usageLimit") />
                </div>
            </div>

            <div class="details-section">
                <h4 class="details-section__title">"Срок действия"</h4>
                <div class="details-grid">
                    <div class="form__group">
                        <label class="form__label">"С"</label>
                        <DateInput value=vm.valid_from />
                        <FieldError message=vm.status.field("validFrom") />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"По"</label>
                        <DateInput value=vm.valid_until />
                        <FieldError message=vm.status.field("validUntil") />
                    </div>
                </div>
            </div>

            <div class="details-section">
                <h4 class="details-section__title">"Ограничения"</h4>
                <p class="details-section__hint">"Пустой список означает, что купон действует для всех."</p>
                <TabList selected_value=vm.restriction_tab>
                    {RestrictionKind::ALL.into_iter().map(|kind| view! {
                        <Tab value=restriction_key(kind)>
                            {move || format!("{} · {}", kind.label(), vm.scope.with(|s| s.summary(kind)))}
                        </Tab>
                    }).collect_view()}
                </TabList>
                {move || {
                    let kind = vm.active_restriction();
                    let reference = vm.reference;
                    match kind {
                        RestrictionKind::Users => restriction_picker(
                            vm, kind, Signal::derive(move || reference.with(|r| r.customers.clone())),
                        ),
                        RestrictionKind::Products => restriction_picker(
                            vm, kind, Signal::derive(move || reference.with(|r| r.products.clone())),
                        ),
                        RestrictionKind::Categories => restriction_picker(
                            vm, kind, Signal::derive(move || reference.with(|r| r.categories.clone())),
                        ),
                        RestrictionKind::Occasions => restriction_picker(
                            vm, kind, Signal::derive(move || reference.with(|r| r.occasions.clone())),
                        ),
                        RestrictionKind::Recipients => restriction_picker(
                            vm, kind, Signal::derive(move || reference.with(|r| r.recipients.clone())),
                        ),
                    }
                }}
            </div>
        </div>
    }
}
