use contracts::domain::a011_admin::aggregate::Admin;
use leptos::prelude::*;

use super::storage;
use crate::shared::api::{ApiClient, ApiError, RequestContext};
use crate::shared::config::app_config;

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub token: Option<String>,
    pub admin: Option<Admin>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(app_config().api_base.clone(), self.token.clone())
    }

    pub fn display_name(&self) -> String {
        self.admin
            .as_ref()
            .map(|a| if a.name.is_empty() { a.email.clone() } else { a.name.clone() })
            .unwrap_or_else(|| "Администратор".to_string())
    }
}

/// Auth context provider component
///
/// The token is read from storage once, on start.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let initial = AuthState {
        token: storage::get_token(),
        admin: None,
    };
    let (auth_state, set_auth_state) = signal(initial);

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Session handle for view models: builds API clients and reacts to 401
#[derive(Clone, Copy)]
pub struct Session {
    state: ReadSignal<AuthState>,
    set_state: WriteSignal<AuthState>,
}

impl Session {
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.state.with_untracked(AuthState::request_context))
    }

    /// Expired session: clear it, the shell falls back to the sign-in page
    pub fn handle_error(&self, err: &ApiError) {
        if err.is_unauthorized() {
            log::warn!("session rejected by server, signing out");
            do_logout(self.set_state);
        }
    }
}

pub fn use_session() -> Session {
    let (state, set_state) = use_auth();
    Session { state, set_state }
}

/// Helper: Store a fresh session
pub fn do_login(set_auth_state: WriteSignal<AuthState>, token: String, admin: Option<Admin>) {
    storage::save_token(&token);
    log::info!("signed in");
    set_auth_state.set(AuthState {
        token: Some(token),
        admin,
    });
}

/// Helper: Perform logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_token();
    set_auth_state.set(AuthState::default());
}
