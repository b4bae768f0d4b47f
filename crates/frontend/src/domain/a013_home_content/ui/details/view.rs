use super::model::{fetch_home_content, save_home_content, upload_banner_image};
use super::view_model::{featured_key, HomeContentVm};
use crate::shared::api::UploadFile;
use crate::shared::components::{ErrorBanner, FieldError, FilePicker};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_EDITOR};
use crate::shared::picker_aggregate::{AggregatePicker, PickerItem};
use crate::shared::reference::fetch_reference_lists;
use crate::system::auth::context::use_session;
use contracts::domain::a013_home_content::aggregate::{FeaturedKind, HeroBanner};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

fn featured_picker<T>(vm: HomeContentVm, kind: FeaturedKind, items: Signal<Vec<T>>) -> AnyView
where
    T: PickerItem + Clone + PartialEq + Send + Sync + 'static,
{
    view! {
        <AggregatePicker
            items=items
            selected=vm.selected_ids(kind)
            on_pick=Callback::new(move |item: T| vm.toggle_featured(kind, item.picker_id().clone()))
        />
    }
    .into_any()
}

#[component]
fn BannerCard(vm: HomeContentVm, banner: Uuid) -> impl IntoView {
    let session = use_session();
    let key = banner;
    let field = move |read: fn(&HeroBanner) -> String| {
        move || vm.banner(key).map(|b| read(&b)).unwrap_or_default()
    };

    let on_image = Callback::new(move |files: Vec<UploadFile>| {
        let Some(file) = files.into_iter().next() else {
            return;
        };
        vm.uploading.set(Some(key));
        spawn_local(async move {
            match upload_banner_image(&session.client(), file).await {
                Ok(url) => vm.edit_banner(key, |b| b.image = url),
                Err(e) => vm.status.fail(session, "banner upload", e),
            }
            vm.uploading.set(None);
        });
    });

    view! {
        <div class="banner-card">
            <div class="banner-card__image">
                {move || {
                    let src = field(|b| b.image.clone())();
                    (!src.is_empty()).then(|| view! { <img class="banner-card__preview" src=src alt="" /> })
                }}
                <Show
                    when=move || vm.uploading.get() == Some(key)
                    fallback=move || view! { <FilePicker label="Изображение" accept="image/jpeg,image/png" on_pick=on_image /> }
                >
                    <Spinner size=SpinnerSize::Small />
                </Show>
                <FieldError message=vm.banner_error(key, "image") />
            </div>
            <div class="banner-card__fields">
                <input
                    class="form__input"
                    placeholder="Заголовок"
                    prop:value=field(|b| b.title.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.edit_banner(key, |b| b.title = value);
                    }
                />
                <input
                    class="form__input"
                    placeholder="Подзаголовок"
                    prop:value=field(|b| b.subtitle.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.edit_banner(key, |b| b.subtitle = value);
                    }
                />
                <input
                    class="form__input"
                    placeholder="Ссылка (/path или https://...)"
                    prop:value=field(|b| b.link.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.edit_banner(key, |b| b.link = value);
                    }
                />
                <FieldError message=vm.banner_error(key, "link") />
            </div>
            <Space>
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                    on_click=move |_| vm.draft.update(|d| d.move_banner(key, true))>
                    {icon("arrow-up")}
                </Button>
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                    on_click=move |_| vm.draft.update(|d| d.move_banner(key, false))>
                    {icon("arrow-down")}
                </Button>
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle
                    on_click=move |_| vm.draft.update(|d| d.remove_banner(key))>
                    {icon("delete")}
                </Button>
            </Space>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn HomeContentEditor() -> impl IntoView {
    let session = use_session();
    let vm = HomeContentVm::new();

    let load = move || {
        spawn_local(async move {
            let api = session.client();
            let (content, reference) = futures::join!(fetch_home_content(&api), fetch_reference_lists(&api));
            match content {
                Ok(content) => vm.load(&content),
                Err(e) => vm.status.fail(session, "home content load", e),
            }
            match reference {
                Ok(lists) => vm.reference.set(lists),
                Err(e) => vm.status.fail(session, "home content reference", e),
            }
        });
    };

    let handle_save = move |_| {
        let draft = vm.draft.get_untracked();
        vm.status.begin();
        spawn_local(async move {
            match save_home_content(&session.client(), &draft).await {
                Ok(()) => {
                    log::info!("home content saved: {} banners", draft.hero_banners.len());
                    vm.status.finish();
                }
                Err(e) => vm.status.fail(session, "home content save", e),
            }
        });
    };

    load();

    view! {
        <PageFrame page_id="a013_home_content--editor" category=PAGE_CAT_EDITOR>
            <PageHeader title="Главная страница">
                <Space>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || vm.status.busy.get() || !vm.loaded.get())
                        on_click=handle_save
                    >
                        {icon("save")}
                        " Сохранить"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                        {icon("refresh")}
                        " Обновить"
                    </Button>
                </Space>
            </PageHeader>
            <ErrorBanner error=vm.status.error />

            <Show when=move || vm.loaded.get() fallback=|| view! { <Spinner /> }>
                <div class="details-section">
                    <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                        <h4 class="details-section__title">"Баннеры"</h4>
                        <Button size=ButtonSize::Small on_click=move |_| {
                            vm.draft.update(|d| {
                                d.add_banner();
                            });
                        }>
                            {icon("plus")}
                            " Баннер"
                        </Button>
                    </Flex>
                    <For each=move || vm.banner_keys() key=|k| *k children=move |key| view! { <BannerCard vm=vm banner=key /> } />
                </div>

                <div class="details-section">
                    <h4 class="details-section__title">"Промо-строка"</h4>
                    <input
                        class="form__input"
                        prop:value=move || vm.draft.with(|d| d.promo_text.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.draft.update(|d| d.promo_text = value);
                        }
                    />
                </div>

                <div class="details-section">
                    <h4 class="details-section__title">"Избранное"</h4>
                    <TabList selected_value=vm.featured_tab>
                        {FeaturedKind::ALL.into_iter().map(|kind| view! {
                            <Tab value=featured_key(kind)>
                                {move || format!("{} · {}", kind.label(), vm.draft.with(|d| d.featured(kind).len()))}
                            </Tab>
                        }).collect_view()}
                    </TabList>
                    {move || {
                        let reference = vm.reference;
                        match vm.active_featured() {
                            kind @ FeaturedKind::Categories => featured_picker(
                                vm, kind, Signal::derive(move || reference.with(|r| r.categories.clone())),
                            ),
                            kind @ FeaturedKind::Occasions => featured_picker(
                                vm, kind, Signal::derive(move || reference.with(|r| r.occasions.clone())),
                            ),
                            kind @ FeaturedKind::Products => featured_picker(
                                vm, kind, Signal::derive(move || reference.with(|r| r.products.clone())),
                            ),
                        }
                    }}
                </div>
            </Show>
        </PageFrame>
    }
}
