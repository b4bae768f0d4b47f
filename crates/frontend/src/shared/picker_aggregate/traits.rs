use crate::shared::format::format_money;
use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a012_customer::aggregate::Customer;
use contracts::domain::common::EntityId;
use contracts::shared::hierarchy::HierarchyNode;

/// Элемент, который можно отметить в пикере
pub trait PickerItem {
    fn picker_id(&self) -> &EntityId;
    fn picker_label(&self) -> String;
    /// Вторая колонка таблицы
    fn picker_hint(&self) -> String {
        String::new()
    }
}

impl PickerItem for Customer {
    fn picker_id(&self) -> &EntityId {
        &self.id
    }

    fn picker_label(&self) -> String {
        if self.name.is_empty() {
            self.email.clone()
        } else {
            self.name.clone()
        }
    }

    fn picker_hint(&self) -> String {
        self.email.clone()
    }
}

impl PickerItem for Product {
    fn picker_id(&self) -> &EntityId {
        &self.id
    }

    fn picker_label(&self) -> String {
        self.name.clone()
    }

    fn picker_hint(&self) -> String {
        format_money(self.price)
    }
}

impl PickerItem for HierarchyNode {
    fn picker_id(&self) -> &EntityId {
        &self.id
    }

    fn picker_label(&self) -> String {
        self.name.clone()
    }
}

/// Элементы, в названии или подсказке которых есть `query` (без учёта регистра)
pub fn filter_items<T: PickerItem + Clone>(items: &[T], query: &str) -> Vec<T> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| {
            item.picker_label().to_lowercase().contains(&query)
                || item.picker_hint().to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_by_label_or_hint() {
        let customers: Vec<Customer> = serde_json::from_value(json!([
            { "_id": "c1", "name": "Anna", "email": "anna@mail.io" },
            { "_id": "c2", "name": "", "email": "boris@corp.io" }
        ]))
        .unwrap();
        assert_eq!(filter_items(&customers, "ANN").len(), 1);
        assert_eq!(filter_items(&customers, "corp")[0].picker_label(), "boris@corp.io");
        assert_eq!(filter_items(&customers, " ").len(), 2);
    }
}
