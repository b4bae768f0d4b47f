//! Двухуровневые справочники (категории, поводы, получатели, разделы)
//!
//! Каждый справочник приводится к `HierarchyNode`, чтобы одна страница
//! master-detail обслуживала все четыре.

use crate::domain::common::EntityId;
use crate::shared::field_errors::FieldErrors;
use serde::{Deserialize, Serialize};

/// Дочерний элемент (подкатегория, под-повод, группа получателей, подраздел)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyLeaf {
    pub id: EntityId,
    pub name: String,
    pub image: Option<String>,
}

/// Родительский элемент со списком дочерних
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub id: EntityId,
    pub name: String,
    pub image: Option<String>,
    pub children: Vec<HierarchyLeaf>,
}

pub trait HierarchyAggregate {
    fn to_node(&self) -> HierarchyNode;
}

pub fn find_node<'a>(nodes: &'a [HierarchyNode], id: &EntityId) -> Option<&'a HierarchyNode> {
    nodes.iter().find(|n| &n.id == id)
}

/// Убрать родителя из локального списка. `true`, если элемент был найден.
pub fn remove_node(nodes: &mut Vec<HierarchyNode>, id: &EntityId) -> bool {
    let before = nodes.len();
    nodes.retain(|n| &n.id != id);
    nodes.len() != before
}

/// Убрать дочерний элемент из любого родителя. `true`, если элемент был найден.
pub fn remove_child(nodes: &mut [HierarchyNode], id: &EntityId) -> bool {
    let mut removed = false;
    for node in nodes.iter_mut() {
        let before = node.children.len();
        node.children.retain(|c| &c.id != id);
        removed |= node.children.len() != before;
    }
    removed
}

/// Форма создания/переименования элемента справочника
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HierarchyItemForm {
    pub name: String,
}

impl HierarchyItemForm {
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let name = self.name.trim().to_string();
        let mut errors = FieldErrors::new();
        if name.is_empty() {
            errors.add("name", "Введите название");
        }
        errors.into_result(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> HierarchyLeaf {
        HierarchyLeaf {
            id: EntityId::from(id),
            name: id.to_uppercase(),
            image: None,
        }
    }

    fn sample() -> Vec<HierarchyNode> {
        vec![
            HierarchyNode {
                id: EntityId::from("p1"),
                name: "P1".into(),
                image: None,
                children: vec![leaf("c1"), leaf("c2")],
            },
            HierarchyNode {
                id: EntityId::from("p2"),
                name: "P2".into(),
                image: None,
                children: vec![leaf("c3")],
            },
        ]
    }

    #[test]
    fn test_remove_node() {
        let mut nodes = sample();
        assert!(remove_node(&mut nodes, &EntityId::from("p1")));
        assert_eq!(nodes.len(), 1);
        assert!(!remove_node(&mut nodes, &EntityId::from("missing")));
    }

    #[test]
    fn test_remove_child() {
        let mut nodes = sample();
        assert!(remove_child(&mut nodes, &EntityId::from("c2")));
        assert_eq!(nodes[0].children.len(), 1);
        assert_eq!(nodes[1].children.len(), 1);
        assert!(!remove_child(&mut nodes, &EntityId::from("c2")));
    }

    #[test]
    fn test_item_form_trims_name() {
        let form = HierarchyItemForm { name: "  Birthday ".into() };
        assert_eq!(form.validate().unwrap(), "Birthday");
        let empty = HierarchyItemForm { name: "   ".into() };
        assert!(empty.validate().unwrap_err().contains("name"));
    }
}
