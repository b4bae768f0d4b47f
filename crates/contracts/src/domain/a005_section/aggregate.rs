use crate::domain::common::{AggregateRoot, EntityId};
use crate::shared::hierarchy::{HierarchyAggregate, HierarchyLeaf, HierarchyNode};
use serde::{Deserialize, Serialize};

/// Раздел витрины с подразделами
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
    #[serde(default, alias = "subSections", alias = "children")]
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsection {
    #[serde(flatten, with = "crate::domain::common::record_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
}

impl AggregateRoot for Section {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "section"
    }

    fn element_name() -> &'static str {
        "Раздел"
    }

    fn list_name() -> &'static str {
        "Разделы"
    }
}

impl HierarchyAggregate for Section {
    fn to_node(&self) -> HierarchyNode {
        HierarchyNode {
            id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            children: self
                .subsections
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
    fn test_section_without_children() {
        let section: Section = serde_json::from_str(r#"{"id": "s1", "name": "Top"}"#).unwrap();
        assert!(section.to_node().children.is_empty());
    }
}
