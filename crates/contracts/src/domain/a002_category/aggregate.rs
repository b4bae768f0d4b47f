use crate::domain::common::{AggregateRoot, EntityId};
use crate::shared::hierarchy::{HierarchyAggregate, HierarchyLeaf, HierarchyNode};
use serde::{Deserialize, Serialize};

/// Категория товаров с подкатегориями
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
    #[serde(default, alias = "subCategories", alias = "children")]
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
}

impl AggregateRoot for Category {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "category"
    }

    fn element_name() -> &'static str {
        "Категория"
    }

    fn list_name() -> &'static str {
        "Категории"
    }
}

impl HierarchyAggregate for Category {
    fn to_node(&self) -> HierarchyNode {
        HierarchyNode {
            id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            children: self
                .subcategories
                .iter()
                .map(|c| HierarchyLeaf {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    image: c.image.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_to_node() {
        let json = r#"{
            "_id": "c1",
            "name": "Flowers",
            "imageUrl": "https://cdn/flowers.png",
            "subCategories": [{"_id": "s1", "name": "Roses"}]
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        let node = category.to_node();
        assert_eq!(node.image.as_deref(), Some("https://cdn/flowers.png"));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].name, "Roses");
        assert_eq!(Category::full_name(), "a002_category");
    }
}
