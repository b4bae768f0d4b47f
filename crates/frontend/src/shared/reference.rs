//! Справочные списки для пикеров (купоны, главная страница)

use crate::domain::a001_product::ui::list::fetch_products;
use crate::domain::a012_customer::ui::list::fetch_customers;
use crate::shared::api::{ApiClient, ApiError, HttpTransport};
use crate::shared::hierarchy_page::{fetch_nodes, HierarchyKind};
use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a012_customer::aggregate::{Customer, CustomerListQuery};
use contracts::shared::hierarchy::HierarchyNode;

/// Сколько покупателей подгружать в пикер ограничений
const CUSTOMER_PICKER_LIMIT: usize = 200;

#[derive(Debug, Clone, Default)]
pub struct ReferenceLists {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub categories: Vec<HierarchyNode>,
    pub occasions: Vec<HierarchyNode>,
    pub recipients: Vec<HierarchyNode>,
}

/// Все справочники параллельно. Ошибка любого запроса возвращается целиком.
pub async fn fetch_reference_lists<T: HttpTransport>(api: &ApiClient<T>) -> Result<ReferenceLists, ApiError> {
    let customer_query = CustomerListQuery::new("", 0, CUSTOMER_PICKER_LIMIT);
    let (customers, products, categories, occasions, recipients) = futures::join!(
        fetch_customers(api, &customer_query),
        fetch_products(api),
        fetch_nodes(api, HierarchyKind::Category),
        fetch_nodes(api, HierarchyKind::Occasion),
        fetch_nodes(api, HierarchyKind::Recipient),
    );
    Ok(ReferenceLists {
        customers: customers?.0,
        products: products?,
        categories: categories?,
        occasions: occasions?,
        recipients: recipients?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use crate::shared::api::HttpMethod;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_loads_every_list() {
        let api = MockTransport::new()
            .respond(HttpMethod::Get, "customers", 200, json!({ "customers": [{ "_id": "u1", "name": "Anna" }] }))
            .respond(HttpMethod::Get, "get-products", 200, json!([{ "_id": "p1", "name": "Mug" }]))
            .respond(HttpMethod::Get, "get-category", 200, json!([]))
            .respond(HttpMethod::Get, "get-occasion", 200, json!([]))
            .respond(HttpMethod::Get, "get-recipient", 200, json!([]))
            .client();
        let lists = block_on(fetch_reference_lists(&api)).unwrap();
        assert_eq!(lists.customers.len(), 1);
        assert_eq!(lists.products[0].name, "Mug");
        assert_eq!(api.transport().total(), 5);
        let calls = api.transport().requests();
        let customers = calls.iter().find(|c| c.path == "customers").unwrap();
        assert_eq!(customers.query.as_deref(), Some("page=1&limit=200"));
    }
}
