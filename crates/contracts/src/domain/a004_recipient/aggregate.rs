use crate::domain::common::{AggregateRoot, EntityId};
use crate::shared::hierarchy::{HierarchyAggregate, HierarchyLeaf, HierarchyNode};
use serde::{Deserialize, Serialize};

/// Получатель подарка (мама, коллега, ...) с группами
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
    #[serde(default, alias = "recipientGroups", alias = "children")]
    pub groups: Vec<RecipientGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientGroup {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
}

impl AggregateRoot for Recipient {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "recipient"
    }

    fn element_name() -> &'static str {
        "Получатель"
    }

    fn list_name() -> &'static str {
        "Получатели"
    }
}

impl HierarchyAggregate for Recipient {
    fn to_node(&self) -> HierarchyNode {
        HierarchyNode {
            id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            children: self
                .groups
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
