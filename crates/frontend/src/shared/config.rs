//! Настройки клиента
//!
//! Базовый адрес API задаётся при сборке переменной `GIFT_ADMIN_API_BASE`
//! (Trunk пробрасывает окружение). Без неё используется `<origin>/api`.

use once_cell::sync::Lazy;

const API_BASE_ENV: Option<&str> = option_env!("GIFT_ADMIN_API_BASE");

/// Размер страницы списков по умолчанию
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: String,
    pub default_page_size: usize,
}

impl AppConfig {
    fn load() -> Self {
        let api_base = match API_BASE_ENV {
            Some(value) if !value.trim().is_empty() => normalize_base(value),
            _ => normalize_base(&format!("{}/api", window_origin())),
        };
        log::debug!("api base: {}", api_base);

        Self {
            api_base,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

pub static APP_CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::load);

pub fn app_config() -> &'static AppConfig {
    &APP_CONFIG
}

fn window_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_strips_trailing_slash() {
        assert_eq!(normalize_base(" https://api.example.com/v1/ "), "https://api.example.com/v1");
        assert_eq!(normalize_base("/api"), "/api");
    }
}
