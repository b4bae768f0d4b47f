use super::pagination::PageInfo;
use serde::Deserialize;

/// Ответ списочного эндпоинта: голый массив или обёртка с массивом
/// (`data`, `products`, `coupons`, ...) и необязательной пагинацией
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Plain(Vec<T>),
    Wrapped {
        #[serde(
            alias = "data",
            alias = "products",
            alias = "templates",
            alias = "categories",
            alias = "occasions",
            alias = "recipients",
            alias = "sections",
            alias = "coupons",
            alias = "flashSales",
            alias = "testimonials",
            alias = "admins",
            alias = "customers"
        )]
        items: Vec<T>,
        #[serde(default, alias = "meta")]
        pagination: Option<PageInfo>,
    },
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Plain(items) => items,
            ListResponse::Wrapped { items, .. } => items,
        }
    }

    /// Элементы и пагинация; для голого массива пагинация строится по его длине
    pub fn into_page(self) -> (Vec<T>, PageInfo) {
        match self {
            ListResponse::Plain(items) => {
                let info = PageInfo {
                    total: items.len(),
                    page: 1,
                    total_pages: 1,
                    limit: items.len(),
                };
                (items, info)
            }
            ListResponse::Wrapped { items, pagination } => {
                let info = pagination.unwrap_or_else(|| PageInfo {
                    total: items.len(),
                    page: 1,
                    total_pages: 1,
                    limit: items.len(),
                });
                (items, info)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    #[test]
    fn test_plain_and_wrapped() {
        let plain: ListResponse<Row> = serde_json::from_str(r#"[{"id": 1}]"#).unwrap();
        assert_eq!(plain.into_items(), vec![Row { id: 1 }]);

        let wrapped: ListResponse<Row> =
            serde_json::from_str(r#"{"success": true, "coupons": [{"id": 2}, {"id": 3}]}"#).unwrap();
        let (items, info) = wrapped.into_page();
        assert_eq!(items.len(), 2);
        assert_eq!(info.total, 2);
    }

    #[test]
    fn test_wrapped_with_pagination() {
        let body = r#"{"customers": [{"id": 1}], "pagination": {"total": 45, "page": 2, "limit": 20}}"#;
        let (_, info) = serde_json::from_str::<ListResponse<Row>>(body).unwrap().into_page();
        assert_eq!(info.pages(), 3);
        assert_eq!(info.zero_based_page(), 1);
    }
}
