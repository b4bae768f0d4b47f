use crate::shared::components::FieldError;
use crate::shared::form_status::FormStatus;
use crate::shared::icons::icon;
use contracts::domain::a006_template::{AreaListEditor, AreaShape, CustomizableArea};
use contracts::shared::media::ImageFormat;
use contracts::shared::pricing::parse_amount;
use leptos::prelude::*;
use thaw::*;

#[component]
fn NumberField(
    label: &'static str,
    editor: RwSignal<AreaListEditor>,
    read: fn(&CustomizableArea) -> f64,
    write: fn(&mut CustomizableArea, f64),
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <input
                class="form__input"
                type="number"
                step="any"
                prop:value=move || editor.with(|e| e.active().map(read).map(|v| v.to_string()).unwrap_or_default())
                on:input=move |ev| {
                    if let Some(value) = parse_amount(&event_target_value(&ev)) {
                        editor.update(|e| e.update_active(|a| write(a, value)));
                    }
                }
            />
            <FieldError message=error />
        </div>
    }
}

/// Список областей и форма выбранной области
#[component]
pub fn AreaEditor(editor: RwSignal<AreaListEditor>, status: FormStatus) -> impl IntoView {
    let active = move || editor.with(|e| e.active_index());
    let err = move |field: &'static str| {
        let fields = status.fields;
        Signal::derive(move || {
            let index = active()?;
            fields.with(|f| f.get(&format!("areas.{index}.{field}")).map(str::to_string))
        })
    };
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());

    // Текстовые поля синхронизируются с выбранной областью в обе стороны
    Effect::new(move |_| {
        if let Some((n, d)) = editor.with(|e| e.active().map(|a| (a.name.clone(), a.description.clone()))) {
            if name.get_untracked() != n {
                name.set(n);
            }
            if description.get_untracked() != d {
                description.set(d);
            }
        }
    });
    Effect::new(move |_| {
        let value = name.get();
        if editor.with_untracked(|e| e.active().is_some_and(|a| a.name != value)) {
            editor.update(|e| e.update_active(|a| a.name = value));
        }
    });
    Effect::new(move |_| {
        let value = description.get();
        if editor.with_untracked(|e| e.active().is_some_and(|a| a.description != value)) {
            editor.update(|e| e.update_active(|a| a.description = value));
        }
    });

    view! {
        <div class="area-editor">
            <div class="area-editor__list">
                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                    <h4>"Области"</h4>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| editor.update(|e| {
                            e.add_area();
                        })
                    >
                        {icon("plus")}
                        " Добавить"
                    </Button>
                </Flex>
                <FieldError message=status.field("areas") />
                {move || {
                    let count = editor.with(AreaListEditor::len);
                    editor.with(|e| {
                        e.areas()
                            .iter()
                            .enumerate()
                            .map(|(index, area)| (index, area.name.clone(), area.shape().label()))
                            .collect::<Vec<_>>()
                    })
                    .into_iter()
                    .map(|(index, area_name, shape)| {
                        let is_active = move || active() == Some(index);
                        view! {
                            <div class={move || if is_active() { "area-editor__item area-editor__item--active" } else { "area-editor__item" }}>
                                <span class="area-editor__name" on:click=move |_| editor.update(|e| e.select(index))>{format!("{}. {}", index + 1, area_name)}</span>
                                <span class="area-editor__shape">{shape}</span>
                                <Space>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        disabled={index == 0}
                                        on_click=move |_| editor.update(|e| e.move_up(index))
                                    >
                                        {icon("arrow-up")}
                                    </Button>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        disabled={index + 1 >= count}
                                        on_click=move |_| editor.update(|e| e.move_down(index))
                                    >
                                        {icon("arrow-down")}
                                    </Button>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| editor.update(|e| e.remove_area(index))
                                    >
                                        {icon("delete")}
                                    </Button>
                                </Space>
                            </div>
                        }
                    })
                    .collect_view()
                }}
            </div>

            <div class="area-editor__form">
                <Show
                    when=move || active().is_some()
                    fallback=|| view! { <div class="area-editor__empty">"Выберите или добавьте область"</div> }
                >
                    <div class="form__group">
                        <label class="form__label">"Название"</label>
                        <Input value=name />
                        <FieldError message=err("name") />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Описание"</label>
                        <Textarea value=description attr:rows=2 />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Форма"</label>
                        <select
                            class="form__input"
                            prop:value=move || editor.with(|e| e.active().map(|a| a.shape().as_str()).unwrap_or_default())
                            on:change=move |ev| {
                                if let Some(shape) = AreaShape::parse(&event_target_value(&ev)) {
                                    editor.update(|e| e.update_active(|a| a.set_shape(shape)));
                                }
                            }
                        >
                            {AreaShape::ALL
                                .iter()
                                .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="details-grid">
                        <NumberField label="Центр X, %" editor=editor read=|a| a.center_x write=|a, v| a.center_x = v error=err("centerX") />
                        <NumberField label="Центр Y, %" editor=editor read=|a| a.center_y write=|a, v| a.center_y = v error=err("centerY") />
                        <Show
                            when=move || editor.with(|e| e.active().is_some_and(|a| a.shape().uses_radius()))
                            fallback=move || view! {
                                <NumberField
                                    label="Ширина, %"
                                    editor=editor
                                    read=|a| a.geometry.size().0
                                    write=|a, v| a.geometry = a.geometry.with_width(v)
                                    error=err("width")
                                />
                                <NumberField
                                    label="Высота, %"
                                    editor=editor
                                    read=|a| a.geometry.size().1
                                    write=|a, v| a.geometry = a.geometry.with_height(v)
                                    error=err("height")
                                />
                            }
                        >
                            <NumberField
                                label="Радиус, %"
                                editor=editor
                                read=|a| a.geometry.radius().unwrap_or_default()
                                write=|a, v| a.geometry = a.geometry.with_radius(v)
                                error=err("radius")
                            />
                        </Show>
                        <NumberField label="Масштаб" editor=editor read=|a| a.default_scale write=|a, v| a.default_scale = v error=err("defaultScale") />
                        <NumberField label="Поворот, °" editor=editor read=|a| a.default_rotation write=|a, v| a.default_rotation = v error=err("defaultRotation") />
                        <NumberField label="Смещение X" editor=editor read=|a| a.default_position_x write=|a, v| a.default_position_x = v error=err("defaultPositionX") />
                        <NumberField label="Смещение Y" editor=editor read=|a| a.default_position_y write=|a, v| a.default_position_y = v error=err("defaultPositionY") />
                        <NumberField label="Макс. размер файла, МБ" editor=editor read=|a| a.max_file_size_mb write=|a, v| a.max_file_size_mb = v error=err("maxFileSizeMB") />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Допустимые форматы"</label>
                        <div class="checkbox-row">
                            {ImageFormat::ALL
                                .into_iter()
                                .map(|format| {
                                    let checked = move || editor.with(|e| e.active().is_some_and(|a| a.allowed_formats.contains(&format)));
                                    view! {
                                        <label class="checkbox-row__item">
                                            <input
                                                type="checkbox"
                                                prop:checked=checked
                                                on:change=move |_| editor.update(|e| e.update_active(|a| a.toggle_format(format)))
                                            />
                                            {format.label()}
                                        </label>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <FieldError message=err("allowedFormats") />
                    </div>
                </Show>
            </div>
        </div>
    }
}
