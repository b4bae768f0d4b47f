//! Вызовы API для двухуровневых справочников

use crate::shared::api::{ApiClient, ApiError, ApiRequest, HttpMethod, HttpTransport, MultipartForm, UploadFile};
use contracts::domain::a002_category::aggregate::Category;
use contracts::domain::a003_occasion::aggregate::Occasion;
use contracts::domain::a004_recipient::aggregate::Recipient;
use contracts::domain::a005_section::aggregate::Section;
use contracts::domain::common::EntityId;
use contracts::shared::hierarchy::{HierarchyAggregate, HierarchyItemForm, HierarchyNode};
use contracts::shared::list::ListResponse;
use serde::de::DeserializeOwned;

/// Справочник «родитель → дочерние элементы»
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyKind {
    Category,
    Occasion,
    Recipient,
    Section,
}

#[derive(Clone, Copy)]
pub struct HierarchyLabels {
    pub title: &'static str,
    pub parent: &'static str,
    pub child: &'static str,
    pub children: &'static str,
}

impl HierarchyKind {
    /// Эндпоинт списка
    fn list_path(&self) -> &'static str {
        match self {
            HierarchyKind::Category => "get-category",
            HierarchyKind::Occasion => "get-occasion",
            HierarchyKind::Recipient => "get-recipient",
            HierarchyKind::Section => "get-sections",
        }
    }

    /// Сущности в путях `create-*`, `update-*`, `delete-*`
    fn entities(&self) -> (&'static str, &'static str) {
        match self {
            HierarchyKind::Category => ("category", "subcategory"),
            HierarchyKind::Occasion => ("occasion", "suboccasion"),
            HierarchyKind::Recipient => ("recipient", "recipient-group"),
            HierarchyKind::Section => ("section", "subsection"),
        }
    }

    pub fn page_id(&self) -> &'static str {
        match self {
            HierarchyKind::Category => "a002_category--list",
            HierarchyKind::Occasion => "a003_occasion--list",
            HierarchyKind::Recipient => "a004_recipient--list",
            HierarchyKind::Section => "a005_section--list",
        }
    }

    pub fn labels(&self) -> HierarchyLabels {
        match self {
            HierarchyKind::Category => HierarchyLabels {
                title: "Категории",
                parent: "Категория",
                child: "Подкатегория",
                children: "Подкатегории",
            },
            HierarchyKind::Occasion => HierarchyLabels {
                title: "Поводы",
                parent: "Повод",
                child: "Подповод",
                children: "Подповоды",
            },
            HierarchyKind::Recipient => HierarchyLabels {
                title: "Получатели",
                parent: "Получатель",
                child: "Группа",
                children: "Группы",
            },
            HierarchyKind::Section => HierarchyLabels {
                title: "Разделы",
                parent: "Раздел",
                child: "Подраздел",
                children: "Подразделы",
            },
        }
    }
}

async fn fetch_as<A, T>(api: &ApiClient<T>, path: &str) -> Result<Vec<HierarchyNode>, ApiError>
where
    A: DeserializeOwned + HierarchyAggregate,
    T: HttpTransport,
{
    let list: ListResponse<A> = api.get(path).await?;
    Ok(list.into_items().iter().map(HierarchyAggregate::to_node).collect())
}

pub async fn fetch_nodes<T: HttpTransport>(
    api: &ApiClient<T>,
    kind: HierarchyKind,
) -> Result<Vec<HierarchyNode>, ApiError> {
    let path = kind.list_path();
    match kind {
        HierarchyKind::Category => fetch_as::<Category, T>(api, path).await,
        HierarchyKind::Occasion => fetch_as::<Occasion, T>(api, path).await,
        HierarchyKind::Recipient => fetch_as::<Recipient, T>(api, path).await,
        HierarchyKind::Section => fetch_as::<Section, T>(api, path).await,
    }
}

fn item_form(name: String, image: Option<UploadFile>) -> MultipartForm {
    let mut form = MultipartForm::new().text("name", name);
    if let Some(file) = image {
        form.push_file("image", file);
    }
    form
}

/// Создать (`id == None`) или обновить родительский элемент
pub async fn save_parent<T: HttpTransport>(
    api: &ApiClient<T>,
    kind: HierarchyKind,
    id: Option<&EntityId>,
    form: &HierarchyItemForm,
    image: Option<UploadFile>,
) -> Result<(), ApiError> {
    let name = form.validate()?;
    let (parent, _) = kind.entities();
    let (method, path) = match id {
        Some(id) => (HttpMethod::Put, format!("update-{}/{}", parent, id)),
        None => (HttpMethod::Post, format!("create-{}", parent)),
    };
    api.send_multipart(method, &path, item_form(name, image)).await?;
    Ok(())
}

/// Создать дочерний элемент у `parent_id` или обновить существующий `child_id`
pub async fn save_child<T: HttpTransport>(
    api: &ApiClient<T>,
    kind: HierarchyKind,
    parent_id: &EntityId,
    child_id: Option<&EntityId>,
    form: &HierarchyItemForm,
    image: Option<UploadFile>,
) -> Result<(), ApiError> {
    let name = form.validate()?;
    let (_, child) = kind.entities();
    let (method, path) = match child_id {
        Some(id) => (HttpMethod::Put, format!("update-{}/{}", child, id)),
        None => (HttpMethod::Post, format!("create-{}/{}", child, parent_id)),
    };
    api.send_multipart(method, &path, item_form(name, image)).await?;
    Ok(())
}

pub async fn delete_parent<T: HttpTransport>(
    api: &ApiClient<T>,
    kind: HierarchyKind,
    id: &EntityId,
) -> Result<(), ApiError> {
    let (parent, _) = kind.entities();
    api.execute(ApiRequest::delete(format!("delete-{}/{}", parent, id))).await
}

pub async fn delete_child<T: HttpTransport>(
    api: &ApiClient<T>,
    kind: HierarchyKind,
    id: &EntityId,
) -> Result<(), ApiError> {
    let (_, child) = kind.entities();
    api.execute(ApiRequest::delete(format!("delete-{}/{}", child, id))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use crate::shared::api::RequestBody;
    use futures::executor::block_on;
    use serde_json::json;

    fn named(name: &str) -> HierarchyItemForm {
        HierarchyItemForm { name: name.into() }
    }

    #[test]
    fn test_fetch_recipient_groups() {
        let api = MockTransport::new()
            .respond(
                HttpMethod::Get,
                "get-recipient",
                200,
                json!({ "recipients": [
                    { "_id": "r1", "name": "Family", "groups": [{ "_id": "g1", "name": "Mom" }] }
                ]}),
            )
            .client();
        let nodes = block_on(fetch_nodes(&api, HierarchyKind::Recipient)).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].children[0].name, "Mom");
    }

    #[test]
    fn test_create_child_goes_under_parent() {
        let api = MockTransport::new().client();
        let parent = EntityId::from("c1");
        block_on(save_child(&api, HierarchyKind::Category, &parent, None, &named(" Roses "), None)).unwrap();

        let calls = api.transport().requests();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, HttpMethod::Post);
        assert_eq!(calls[0].path, "create-subcategory/c1");
        let RequestBody::Multipart(form) = &calls[0].body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.text_value("name"), Some("Roses"));
    }

    #[test]
    fn test_update_paths_per_kind() {
        let api = MockTransport::new().client();
        let id = EntityId::from("x9");
        block_on(async {
            save_parent(&api, HierarchyKind::Section, Some(&id), &named("Top"), None).await.unwrap();
            save_child(&api, HierarchyKind::Recipient, &id, Some(&id), &named("Kids"), None).await.unwrap();
            delete_child(&api, HierarchyKind::Occasion, &id).await.unwrap();
        });
        let paths: Vec<String> = api.transport().requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec!["update-section/x9", "update-recipient-group/x9", "delete-suboccasion/x9"]
        );
    }

    #[test]
    fn test_empty_name_not_sent() {
        let api = MockTransport::new().client();
        let err = block_on(save_parent(&api, HierarchyKind::Occasion, None, &named("  "), None)).unwrap_err();
        assert!(err.field_errors().unwrap().contains("name"));
        assert_eq!(api.transport().total(), 0);
    }
}
