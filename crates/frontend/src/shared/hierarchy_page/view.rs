use super::model::{delete_child, delete_parent, fetch_nodes, save_child, save_parent, HierarchyKind};
use crate::shared::api::UploadFile;
use crate::shared::components::{ErrorBanner, FieldError, FilePicker};
use crate::shared::confirm::confirm;
use crate::shared::form_status::FormStatus;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::system::auth::context::use_session;
use contracts::domain::common::EntityId;
use contracts::shared::hierarchy::{find_node, remove_child, remove_node, HierarchyItemForm, HierarchyNode};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Поля формы одного элемента (родителя или дочернего)
#[derive(Clone, Copy)]
struct ItemDraft {
    editing: RwSignal<Option<EntityId>>,
    name: RwSignal<String>,
    image: RwSignal<Option<UploadFile>, LocalStorage>,
    status: FormStatus,
}

impl ItemDraft {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            image: RwSignal::new_local(None),
            status: FormStatus::new(),
        }
    }

    fn edit(&self, id: EntityId, name: String) {
        self.editing.set(Some(id));
        self.name.set(name);
        self.image.set(None);
        self.status.fields.set(Default::default());
    }

    fn reset(&self) {
        self.editing.set(None);
        self.name.set(String::new());
        self.image.set(None);
        self.status.fields.set(Default::default());
        self.status.error.set(None);
    }

    fn form(&self) -> HierarchyItemForm {
        HierarchyItemForm {
            name: self.name.get_untracked(),
        }
    }
}

#[component]
fn ItemEditor(
    draft: ItemDraft,
    #[prop(into)] noun: String,
    on_submit: Callback<()>,
) -> impl IntoView {
    let is_edit = move || draft.editing.get().is_some();
    let submit_label = move || if is_edit() { "Сохранить" } else { "Добавить" };
    let heading = move || {
        if is_edit() {
            format!("{}: редактирование", noun)
        } else {
            format!("{}: новый элемент", noun)
        }
    };

    view! {
        <div class="details-section">
            <h4 class="details-section__title">{heading}</h4>
            <div class="form__group">
                <label class="form__label">"Название"</label>
                <Input value=draft.name placeholder="Название" />
                <FieldError message=draft.status.field("name") />
            </div>
            <div class="form__group">
                <FilePicker
                    label="Изображение"
                    accept="image/*"
                    on_pick=Callback::new(move |files: Vec<UploadFile>| {
                        draft.image.set(files.into_iter().next());
                    })
                />
                {move || draft.image.with(|f| f.as_ref().map(|f| f.file_name.clone())).map(|name| {
                    view! { <span class="file-name">{name}</span> }
                })}
            </div>
            <ErrorBanner error=draft.status.error />
            <Space>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=draft.status.busy
                    on_click=move |_| on_submit.run(())
                >
                    {icon("save")}
                    {submit_label}
                </Button>
                <Show when=is_edit>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| draft.reset()>
                        {icon("close")}
                        " Отмена"
                    </Button>
                </Show>
            </Space>
        </div>
    }
}

fn thumbnail(image: Option<String>) -> impl IntoView {
    image.map(|src| view! { <img class="hierarchy__thumb" src=src alt="" /> })
}

/// Страница двухуровневого справочника: список родителей слева,
/// дочерние элементы выбранного родителя справа
#[component]
pub fn HierarchyPage(kind: HierarchyKind) -> impl IntoView {
    let session = use_session();
    let labels = kind.labels();
    let nodes = RwSignal::new(Vec::<HierarchyNode>::new());
    let selected = RwSignal::new(None::<EntityId>);
    let page_status = FormStatus::new();
    let parent_draft = ItemDraft::new();
    let child_draft = ItemDraft::new();

    // Ошибка удаления остаётся видна после перезагрузки списка
    let fetch = move || {
        page_status.busy.set(true);
        spawn_local(async move {
            match fetch_nodes(&session.client(), kind).await {
                Ok(list) => {
                    log::debug!("{:?}: loaded {} items", kind, list.len());
                    nodes.set(list);
                    page_status.finish();
                }
                Err(e) => page_status.fail(session, "hierarchy load", e),
            }
        });
    };

    let selected_node = Memo::new(move |_| {
        let id = selected.get()?;
        nodes.with(|list| find_node(list, &id).cloned())
    });

    let submit_parent = Callback::new(move |_| {
        let id = parent_draft.editing.get_untracked();
        let form = parent_draft.form();
        let image = parent_draft.image.get_untracked();
        parent_draft.status.begin();
        spawn_local(async move {
            match save_parent(&session.client(), kind, id.as_ref(), &form, image).await {
                Ok(()) => {
                    parent_draft.status.finish();
                    parent_draft.reset();
                    fetch();
                }
                Err(e) => parent_draft.status.fail(session, "save parent", e),
            }
        });
    });

    let submit_child = Callback::new(move |_| {
        let Some(parent_id) = selected.get_untracked() else {
            return;
        };
        let id = child_draft.editing.get_untracked();
        let form = child_draft.form();
        let image = child_draft.image.get_untracked();
        child_draft.status.begin();
        spawn_local(async move {
            match save_child(&session.client(), kind, &parent_id, id.as_ref(), &form, image).await {
                Ok(()) => {
                    child_draft.status.finish();
                    child_draft.reset();
                    fetch();
                }
                Err(e) => child_draft.status.fail(session, "save child", e),
            }
        });
    });

    let handle_delete_parent = move |id: EntityId| {
        if !confirm(&format!("Удалить: {}?", labels.parent)) {
            return;
        }
        nodes.update(|list| {
            remove_node(list, &id);
        });
        if selected.get_untracked().as_ref() == Some(&id) {
            selected.set(None);
            child_draft.reset();
        }
        spawn_local(async move {
            if let Err(e) = delete_parent(&session.client(), kind, &id).await {
                page_status.fail(session, "delete parent", e);
            }
            fetch();
        });
    };

    let handle_delete_child = move |id: EntityId| {
        if !confirm(&format!("Удалить: {}?", labels.child)) {
            return;
        }
        nodes.update(|list| {
            remove_child(list, &id);
        });
        spawn_local(async move {
            if let Err(e) = delete_child(&session.client(), kind, &id).await {
                page_status.fail(session, "delete child", e);
            }
            fetch();
        });
    };

    fetch();

    view! {
        <PageFrame page_id=kind.page_id() category=PAGE_CAT_LIST>
            <PageHeader title=labels.title>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| {
                        page_status.error.set(None);
                        fetch();
                    }
                >
                    {icon("refresh")}
                    " Обновить"
                </Button>
            </PageHeader>
            <ErrorBanner error=page_status.error />

            <div class="hierarchy">
                <div class="hierarchy__column">
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=48.0>""</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=200.0>{labels.parent}</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>{labels.children}</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Действия"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || nodes.get()
                                key=|node| (node.id.clone(), node.name.clone(), node.children.len())
                                children=move |node| {
                                    let id = node.id.clone();
                                    let id_for_select = id.clone();
                                    let id_for_edit = id.clone();
                                    let id_for_delete = id.clone();
                                    let name = node.name.clone();
                                    let is_selected = move || selected.get().as_ref() == Some(&id);
                                    view! {
                                        <TableRow>
                                            <TableCell>{thumbnail(node.image.clone())}</TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        class=move || {
                                                            if is_selected() {
                                                                "hierarchy__link hierarchy__link--active"
                                                            } else {
                                                                "hierarchy__link"
                                                            }
                                                        }
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            selected.set(Some(id_for_select.clone()));
                                                            child_draft.reset();
                                                        }
                                                    >
                                                        {node.name.clone()}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{node.children.len()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Space>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| parent_draft.edit(id_for_edit.clone(), name.clone())
                                                    >
                                                        {icon("edit")}
                                                    </Button>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| handle_delete_parent(id_for_delete.clone())
                                                    >
                                                        {icon("delete")}
                                                    </Button>
                                                </Space>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <ItemEditor draft=parent_draft noun=labels.parent on_submit=submit_parent />
                </div>

                <div class="hierarchy__column">
                    {move || match selected_node.get() {
                        None => view! {
                            <div class="hierarchy__placeholder">
                                {format!("Выберите элемент «{}» слева", labels.parent)}
                            </div>
                        }.into_any(),
                        Some(node) => view! {
                            <h3 class="hierarchy__title">{format!("{}: {}", labels.children, node.name)}</h3>
                            <Table>
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell min_width=48.0>""</TableHeaderCell>
                                        <TableHeaderCell resizable=true min_width=200.0>{labels.child}</TableHeaderCell>
                                        <TableHeaderCell min_width=100.0>"Действия"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {node.children.into_iter().map(|leaf| {
                                        let id_for_edit = leaf.id.clone();
                                        let id_for_delete = leaf.id.clone();
                                        let name = leaf.name.clone();
                                        view! {
                                            <TableRow>
                                                <TableCell>{thumbnail(leaf.image)}</TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{leaf.name}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <Space>
                                                        <Button
                                                            size=ButtonSize::Small
                                                            appearance=ButtonAppearance::Subtle
                                                            on_click=move |_| child_draft.edit(id_for_edit.clone(), name.clone())
                                                        >
                                                            {icon("edit")}
                                                        </Button>
                                                        <Button
                                                            size=ButtonSize::Small
                                                            appearance=ButtonAppearance::Subtle
                                                            on_click=move |_| handle_delete_child(id_for_delete.clone())
                                                        >
                                                            {icon("delete")}
                                                        </Button>
                                                    </Space>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    }).collect_view()}
                                </TableBody>
                            </Table>
                            <ItemEditor draft=child_draft noun=labels.child on_submit=submit_child />
                        }.into_any(),
                    }}
                </div>
            </div>
        </PageFrame>
    }
}
