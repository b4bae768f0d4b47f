use crate::domain::common::{AggregateRoot, EntityId};
use crate::shared::hierarchy::{HierarchyAggregate, HierarchyLeaf, HierarchyNode};
use serde::{Deserialize, Serialize};

/// Повод для подарка (день рождения, свадьба, ...) с под-поводами
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occasion {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
    #[serde(default, alias = "subOccasions", alias = "children")]
    pub suboccasions: Vec<SubOccasion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubOccasion {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
}

impl AggregateRoot for Occasion {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "occasion"
    }

    fn element_name() -> &'static str {
        "Повод"
    }

    fn list_name() -> &'static str {
        "Поводы"
    }
}

impl HierarchyAggregate for Occasion {
    fn to_node(&self) -> HierarchyNode {
        HierarchyNode {
            id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            children: self
                .suboccasions
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
