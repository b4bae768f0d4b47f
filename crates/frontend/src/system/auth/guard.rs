use contracts::domain::a011_admin::aggregate::AdminRole;
use leptos::prelude::*;

use super::context::use_auth;

/// Component that requires super admin role
/// Shows fallback otherwise
#[component]
pub fn RequireSuperAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || {
                let state = auth_state.get();
                // Роль известна только после входа в этой сессии
                state.is_authenticated()
                    && state.admin.as_ref().map(|a| a.role == AdminRole::SuperAdmin).unwrap_or(true)
            }
            fallback=|| view! { <div class="warning-box">"Недостаточно прав. Требуется роль суперадминистратора."</div> }
        >
            {children()}
        </Show>
    }
}
