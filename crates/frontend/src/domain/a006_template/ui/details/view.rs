//! Template Details - View Component
//!
//! Three tabs: basic info, area editor, preview over the SVG.

use super::area_form::AreaEditor;
use super::model::create_template;
use super::view_model::{TemplateDetailsVm, TAB_AREAS, TAB_BASIC, TAB_PREVIEW};
use crate::shared::api::UploadFile;
use crate::shared::components::{ErrorBanner, FieldError, FilePicker};
use crate::shared::hierarchy_page::{fetch_nodes, HierarchyKind};
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use contracts::domain::a006_template::{AreaShape, CustomizableArea};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn area_style(area: &CustomizableArea) -> String {
    let b = area.bounding_box();
    let mut style = format!(
        "left: {}%; top: {}%; width: {}%; height: {}%; transform: rotate({}deg);",
        b.left, b.top, b.width, b.height, area.default_rotation
    );
    if let Some(clip) = area.shape().clip_path() {
        style.push_str(&format!(" clip-path: {};", clip));
    }
    style
}

/// SVG шаблона с наложенными областями (позиции в процентах холста)
#[component]
pub fn TemplatePreview(
    #[prop(into)] svg_url: Signal<Option<String>>,
    #[prop(into)] areas: Signal<Vec<CustomizableArea>>,
) -> impl IntoView {
    view! {
        <div class="template-preview">
            {move || match svg_url.get() {
                Some(src) => view! { <img class="template-preview__svg" src=src alt="" /> }.into_any(),
                None => view! { <div class="template-preview__empty">"SVG не выбран"</div> }.into_any(),
            }}
            {move || areas.get().iter().map(|area| {
                let class = if area.shape() == AreaShape::Circle {
                    "template-preview__area template-preview__area--circle"
                } else {
                    "template-preview__area"
                };
                view! {
                    <div class=class style=area_style(area) title=area.name.clone()>
                        <span class="template-preview__label">{area.name.clone()}</span>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn TemplateDetails(on_saved: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let session = use_session();
    let vm = TemplateDetailsVm::new();

    spawn_local(async move {
        match fetch_nodes(&session.client(), HierarchyKind::Category).await {
            Ok(list) => vm.categories.set(list),
            Err(e) => vm.status.fail(session, "template categories", e),
        }
    });

    let handle_save = move |_| {
        let form = vm.to_form();
        let files = vm.files();
        let areas = vm.editor.with_untracked(|e| e.areas().to_vec());
        vm.status.begin();
        vm.partial.set(None);
        spawn_local(async move {
            match create_template(&session.client(), &form, files, areas).await {
                Ok(report) if report.is_complete() => {
                    vm.status.finish();
                    on_saved.run(());
                }
                Ok(report) => {
                    // Шаблон уже создан: форма остаётся открытой с отчётом
                    vm.status.finish();
                    vm.partial.set(Some(report.summary()));
                }
                Err(e) => {
                    vm.status.fail(session, "template create", e);
                    vm.show_first_error();
                }
            }
        });
    };

    view! {
        <div class="details-form">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-form__title">"Новый шаблон"</h2>
                <Space>
                    <Show when=move || vm.partial.with(Option::is_none)>
                        <Button appearance=ButtonAppearance::Primary disabled=vm.status.busy on_click=handle_save>
                            {icon("save")}
                            " Создать"
                        </Button>
                    </Show>
                    <Show when=move || vm.partial.with(Option::is_some)>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| on_saved.run(())>
                            "Готово"
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        {icon("close")}
                        " Закрыть"
                    </Button>
                </Space>
            </Flex>

            <ErrorBanner error=vm.status.error />
            <ErrorBanner error=vm.partial />

            <TabList selected_value=vm.tab>
                <Tab value=TAB_BASIC>"Основное"</Tab>
                <Tab value=TAB_AREAS>
                    {move || format!("Области ({})", vm.editor.with(|e| e.len()))}
                </Tab>
                <Tab value=TAB_PREVIEW>"Предпросмотр"</Tab>
            </TabList>

            <div class="details-tab-content">
                {move || match vm.tab.get().as_str() {
                    TAB_AREAS => view! { <AreaEditor editor=vm.editor status=vm.status /> }.into_any(),
                    TAB_PREVIEW => view! {
                        <TemplatePreview
                            svg_url=vm.svg_url
                            areas=Signal::derive(move || vm.editor.with(|e| e.areas().to_vec()))
                        />
                    }.into_any(),
                    _ => view! {
                        <div class="details-section">
                            <div class="form__group">
                                <label class="form__label">"Название"</label>
                                <Input value=vm.name placeholder="Название шаблона" />
                                <FieldError message=vm.status.field("name") />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Описание"</label>
                                <Textarea value=vm.description attr:rows=3 />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Категория"</label>
                                <Select value=vm.category_id>
                                    <option value="">"—"</option>
                                    {move || vm.categories.get().into_iter().map(|c| {
                                        view! { <option value=c.id.to_string()>{c.name}</option> }
                                    }).collect_view()}
                                </Select>
                            </div>
                            <Checkbox checked=vm.is_active label="Активен" />
                            <div class="form__group">
                                <label class="form__label">"Превью"</label>
                                <FilePicker
                                    label="Изображение превью"
                                    accept="image/png,image/jpeg"
                                    on_pick=Callback::new(move |files: Vec<UploadFile>| {
                                        vm.thumbnail.set(files.into_iter().next());
                                    })
                                />
                                {move || vm.thumbnail.with(|f| f.as_ref().map(|f| f.file_name.clone()))}
                                <FieldError message=vm.status.field("thumbnail") />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"SVG"</label>
                                <FilePicker
                                    label="Файл SVG"
                                    accept=".svg,image/svg+xml"
                                    on_pick=Callback::new(move |files: Vec<UploadFile>| {
                                        if let Some(file) = files.into_iter().next() {
                                            vm.set_svg(file);
                                        }
                                    })
                                />
                                {move || vm.svg.with(|f| f.as_ref().map(|f| f.file_name.clone()))}
                                <FieldError message=vm.status.field("svg") />
                            </div>
                        </div>
                    }.into_any(),
                }}
            </div>
        </div>
    }
}
