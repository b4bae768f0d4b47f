//! Product Details - View Component

use super::model::{fetch_reference, submit_product};
use super::view_model::ProductDetailsVm;
use crate::shared::api::UploadFile;
use crate::shared::components::{ErrorBanner, FieldError, FilePicker};
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use contracts::domain::a001_product::aggregate::Product;
use contracts::shared::media::{ImageSlot, MAX_ADDITIONAL_IMAGES};
use contracts::shared::pricing::PriceFields;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn slot_preview(slot: &ImageSlot) -> AnyView {
    match slot {
        ImageSlot::Existing(url) => view! { <img class="image-slot__img" src=url.clone() alt="" /> }.into_any(),
        ImageSlot::Pending(name) => view! { <span class="image-slot__pending">{format!("Новый файл: {}", name)}</span> }.into_any(),
    }
}

/// Поле суммы; изменение пересчитывает связанное поле через `PriceFields`
#[component]
fn PriceInput(
    label: &'static str,
    prices: RwSignal<PriceFields>,
    read: fn(&PriceFields) -> String,
    write: fn(&mut PriceFields, String),
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <input
                class="form__input"
                type="text"
                inputmode="decimal"
                prop:value=move || prices.with(read)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    prices.update(|p| write(p, value));
                }
            />
            <FieldError message=error />
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ProductDetails(
    product: Option<Product>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let vm = ProductDetailsVm::new();
    if let Some(p) = &product {
        vm.load(p);
    }

    spawn_local(async move {
        match fetch_reference(&session.client()).await {
            Ok((categories, sections)) => {
                vm.categories.set(categories);
                vm.sections.set(sections);
            }
            Err(e) => vm.status.fail(session, "product reference data", e),
        }
    });

    let handle_save = move |_| {
        let form = vm.to_form();
        let uploads = vm.uploads();
        vm.status.begin();
        spawn_local(async move {
            match submit_product(&session.client(), &form, uploads).await {
                Ok(()) => {
                    log::info!("product saved: {}", form.name.trim());
                    vm.status.finish();
                    on_saved.run(());
                }
                Err(e) => vm.status.fail(session, "product save", e),
            }
        });
    };

    let title = move || {
        if vm.is_edit_mode() {
            format!("Товар: {}", vm.name.get())
        } else {
            "Новый товар".to_string()
        }
    };

    view! {
        <div class="details-form">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-form__title">{title}</h2>
                <Space>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=vm.status.busy
                        on_click=handle_save
                    >
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
                    <Input value=vm.name placeholder="Название товара" />
                    <FieldError message=vm.status.field("name") />
                </div>
                <div class="form__group">
                    <label class="form__label">"Описание"</label>
                    <Textarea value=vm.description attr:rows=4 />
                    <FieldError message=vm.status.field("description") />
                </div>
            </div>

            <div class="details-section">
                <h4 class="details-section__title">"Цена и остаток"</h4>
                <div class="details-grid">
                    <PriceInput
                        label="Цена"
                        prices=vm.prices
                        read=|p| p.price.clone()
                        write=PriceFields::set_price
                        error=vm.status.field("price")
                    />
                    <PriceInput
                        label="Цена со скидкой"
                        prices=vm.prices
                        read=|p| p.discounted_price.clone()
                        write=PriceFields::set_discounted_price
                        error=vm.status.field("discountedPrice")
                    />
                    <PriceInput
                        label="Скидка, %"
                        prices=vm.prices
                        read=|p| p.discount.clone()
                        write=PriceFields::set_discount
                        error=vm.status.field("discount")
                    />
                    <div class="form__group">
                        <label class="form__label">"Остаток"</label>
                        <Input value=vm.stock placeholder="0" />
                        <FieldError message=vm.status.field("stock") />
                    </div>
                </div>
                <Checkbox checked=vm.is_taxable label="Облагается налогом" />
            </div>

            <div class="details-section">
                <h4 class="details-section__title">"Классификация"</h4>
                <div class="details-grid">
                    <div class="form__group">
                        <label class="form__label">"Категория"</label>
                        <Select value=vm.category_id>
                            <option value="">"— выберите —"</option>
                            {move || vm.categories.get().into_iter().map(|c| {
                                view! { <option value=c.id.to_string()>{c.name}</option> }
                            }).collect_view()}
                        </Select>
                        <FieldError message=vm.status.field("category") />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Подкатегория"</label>
                        <Select value=vm.subcategory_id>
                            <option value="">"—"</option>
                            {move || vm.subcategories().into_iter().map(|c| {
                                view! { <option value=c.id.to_string()>{c.name}</option> }
                            }).collect_view()}
                        </Select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Подраздел"</label>
                        <Select value=vm.subsection_id>
                            <option value="">"—"</option>
                            {move || vm.subsection_options().into_iter().map(|(id, label)| {
                                view! { <option value=id>{label}</option> }
                            }).collect_view()}
                        </Select>
                    </div>
                </div>
            </div>

            <div class="details-section">
                <h4 class="details-section__title">"Изображения"</h4>
                <div class="form__group">
                    <label class="form__label">"Основное изображение"</label>
                    {move || vm.main_image.get().map(|slot| slot_preview(&slot))}
                    <FilePicker
                        label="Выбрать файл"
                        accept="image/*"
                        on_pick=Callback::new(move |files: Vec<UploadFile>| {
                            if let Some(file) = files.into_iter().next() {
                                vm.set_main_file(file);
                            }
                        })
                    />
                    <FieldError message=vm.status.field("mainImage") />
                </div>
                <div class="form__group">
                    <label class="form__label">
                        {move || format!(
                            "Дополнительные изображения ({} из {})",
                            vm.additional_images.with(Vec::len),
                            MAX_ADDITIONAL_IMAGES,
                        )}
                    </label>
                    <div class="image-slots">
                        {move || vm.additional_images.get().iter().enumerate().map(|(index, slot)| {
                            view! {
                                <div class="image-slot">
                                    {slot_preview(slot)}
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| vm.remove_additional(index)
                                    >
                                        {icon("delete")}
                                    </Button>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                    <Show when=move || vm.additional_images.with(Vec::len) < MAX_ADDITIONAL_IMAGES>
                        <FilePicker
                            label="Добавить"
                            accept="image/*"
                            multiple=true
                            on_pick=Callback::new(move |files| vm.add_additional_files(files))
                        />
                    </Show>
                    <FieldError message=vm.status.field("additionalImages") />
                </div>
            </div>

            <div class="details-section">
                <h4 class="details-section__title">"Дополнительно"</h4>
                <div class="form__group">
                    <label class="form__label">"Ссылка на YouTube"</label>
                    <Input value=vm.youtube_link placeholder="https://youtube.com/..." />
                    <FieldError message=vm.status.field("youtubeLink") />
                </div>
                <div class="form__group">
                    <label class="form__label">"Требования к загрузке от покупателя"</label>
                    <Textarea value=vm.upload_requirements attr:rows=3 />
                </div>
            </div>
        </div>
    }
}
