use serde::{Deserialize, Serialize};

/// Блок пагинации в ответах списков (`page` начинается с 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default, alias = "totalItems", alias = "count")]
    pub total: usize,
    #[serde(default = "first_page", alias = "currentPage")]
    pub page: usize,
    #[serde(default, alias = "pages")]
    pub total_pages: usize,
    #[serde(default)]
    pub limit: usize,
}

fn first_page() -> usize {
    1
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            total_pages: 0,
            limit: 0,
        }
    }
}

impl PageInfo {
    /// Страница для UI-контролов пагинации (с нуля)
    pub fn zero_based_page(&self) -> usize {
        self.page.saturating_sub(1)
    }

    /// Количество страниц; если сервер его не прислал, считается по `total` и `limit`
    pub fn pages(&self) -> usize {
        if self.total_pages > 0 {
            self.total_pages
        } else if self.limit > 0 {
            self.total.div_ceil(self.limit)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_fallback() {
        let info: PageInfo = serde_json::from_str(r#"{"total": 41, "page": 2, "limit": 20}"#).unwrap();
        assert_eq!(info.pages(), 3);
        assert_eq!(info.zero_based_page(), 1);
    }

    #[test]
    fn test_pages_from_server() {
        let info: PageInfo = serde_json::from_str(r#"{"total": 10, "pages": 7}"#).unwrap();
        assert_eq!(info.pages(), 7);
        assert_eq!(info.page, 1);
    }
}
