use contracts::system::auth::TOKEN_STORAGE_KEY;
use web_sys::window;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Save session token to localStorage
pub fn save_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        if storage.set_item(TOKEN_STORAGE_KEY, token).is_err() {
            log::warn!("failed to persist session token");
        }
    }
}

/// Get session token from localStorage
pub fn get_token() -> Option<String> {
    get_local_storage()?
        .get_item(TOKEN_STORAGE_KEY)
        .ok()?
        .filter(|t| !t.trim().is_empty())
}

/// Clear session token
pub fn clear_token() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(TOKEN_STORAGE_KEY);
    }
}
