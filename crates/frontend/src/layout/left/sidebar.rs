//! Боковое меню со сворачиваемыми группами

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::tabs::tab_labels::HOME_CONTENT_KEY;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use contracts::domain::a011_admin::aggregate::AdminRole;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str)>, // (tab key, icon)
    super_admin_only: bool,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "catalog",
            label: "Каталог",
            icon: "catalog",
            items: vec![
                ("a001_product", "products"),
                ("a002_category", "folder"),
                ("a003_occasion", "gift"),
                ("a004_recipient", "users"),
                ("a005_section", "layout"),
                ("a006_template", "palette"),
            ],
            super_admin_only: false,
        },
        MenuGroup {
            id: "sales",
            label: "Продажи",
            icon: "orders",
            items: vec![
                ("a007_order", "orders"),
                ("a012_customer", "customers"),
                ("a008_coupon", "ticket"),
                ("a009_flash_sale", "zap"),
            ],
            super_admin_only: false,
        },
        MenuGroup {
            id: "content",
            label: "Витрина",
            icon: "home",
            items: vec![(HOME_CONTENT_KEY, "home"), ("a010_testimonial", "message-square")],
            super_admin_only: false,
        },
        MenuGroup {
            id: "settings",
            label: "Настройки",
            icon: "shield",
            items: vec![("a011_admin", "shield")],
            super_admin_only: true,
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    // Роль неизвестна, если сессия восстановлена из сохранённого токена
    let can_see = move |group: &MenuGroup| {
        !group.super_admin_only
            || auth_state.with(|s| {
                s.admin
                    .as_ref()
                    .map(|a| a.role == AdminRole::SuperAdmin)
                    .unwrap_or(true)
            })
    };

    let expanded_groups = RwSignal::new(vec!["catalog", "sales", "content"]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let group = StoredValue::new(group);
                let group_id = group.with_value(|g| g.id);
                let is_expanded = move || expanded_groups.with(|ids| ids.contains(&group_id));
                view! {
                    <Show when=move || group.with_value(|g| can_see(g))>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                expanded_groups.update(|ids| {
                                    if let Some(pos) = ids.iter().position(|x| *x == group_id) {
                                        ids.remove(pos);
                                    } else {
                                        ids.push(group_id);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.with_value(|g| g.icon))}
                                <span>{group.with_value(|g| g.label)}</span>
                            </div>
                            <div class="app-sidebar__chevron" class:app-sidebar__chevron--expanded=is_expanded>
                                {icon("chevron-right")}
                            </div>
                        </div>
                        <Show when=is_expanded>
                            <div class="app-sidebar__children">
                                {group.with_value(|g| g.items.clone()).into_iter().map(|(key, icon_name)| {
                                    let label = tab_label_for_key(key);
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || ctx.active.get().as_deref() == Some(key)
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_tab(key, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </Show>
                }
            }).collect_view()}
        </div>
    }
}
