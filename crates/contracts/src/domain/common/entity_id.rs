use serde::{Deserialize, Serialize};
use std::fmt;

/// Идентификатор записи на сервере (строка, в JSON поле `_id`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ключ идентификатора в теле записи.
///
/// Сервер присылает `_id`, `id` или оба ключа сразу. Поле записи подключается как
/// `#[serde(flatten, with = "record_id")]`: читается `_id`, при его отсутствии `id`;
/// пишется всегда `_id`.
pub mod record_id {
    use super::EntityId;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    struct IdKeys {
        #[serde(rename = "_id", default)]
        primary: Option<EntityId>,
        #[serde(default)]
        id: Option<EntityId>,
    }

    impl IdKeys {
        fn pick(self) -> Option<EntityId> {
            self.primary.or(self.id)
        }
    }

    #[derive(Serialize)]
    struct IdKey<'a> {
        #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
        id: Option<&'a EntityId>,
    }

    pub fn serialize<S: Serializer>(id: &EntityId, serializer: S) -> Result<S::Ok, S::Error> {
        IdKey { id: Some(id) }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EntityId, D::Error> {
        IdKeys::deserialize(deserializer)?
            .pick()
            .ok_or_else(|| D::Error::missing_field("_id"))
    }

    /// То же для необязательного идентификатора (запись ещё не сохранена)
    pub mod optional {
        use super::{IdKey, IdKeys};
        use crate::domain::common::EntityId;
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        pub fn serialize<S: Serializer>(
            id: &Option<EntityId>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            IdKey { id: id.as_ref() }.serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<EntityId>, D::Error> {
            Ok(IdKeys::deserialize(deserializer)?.pick())
        }
    }
}

/// Ссылка на связанную запись: сервер присылает либо id, либо вложенный объект
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(EntityId),
    Populated {
        #[serde(flatten, with = "record_id")]
        id: EntityId,
        #[serde(default)]
        name: String,
    },
}

impl EntityRef {
    pub fn id(&self) -> &EntityId {
        match self {
            EntityRef::Id(id) => id,
            EntityRef::Populated { id, .. } => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            EntityRef::Id(_) => None,
            EntityRef::Populated { name, .. } => Some(name.as_str()),
        }
    }
}

/// Ответ на создание записи: `{ "_id": ... }` или обёртка `{ "data" | "template" | ...: { "_id": ... } }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdResponse {
    Flat {
        #[serde(flatten, with = "record_id")]
        id: EntityId,
    },
    Wrapped {
        #[serde(
            alias = "template",
            alias = "flashSale",
            alias = "product",
            alias = "coupon",
            alias = "admin"
        )]
        data: Box<IdResponse>,
    },
}

impl IdResponse {
    pub fn into_id(self) -> EntityId {
        match self {
            IdResponse::Flat { id } => id,
            IdResponse::Wrapped { data } => data.into_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ref_variants() {
        let plain: EntityRef = serde_json::from_str(r#""c1""#).unwrap();
        assert_eq!(plain.id().as_str(), "c1");
        assert_eq!(plain.name(), None);

        let populated: EntityRef =
            serde_json::from_str(r#"{"_id": "c2", "name": "Flowers"}"#).unwrap();
        assert_eq!(populated.id().as_str(), "c2");
        assert_eq!(populated.name(), Some("Flowers"));
    }

    #[test]
    fn test_id_response_shapes() {
        let flat: IdResponse = serde_json::from_str(r#"{"_id": "t1", "name": "x"}"#).unwrap();
        assert_eq!(flat.into_id().as_str(), "t1");

        let wrapped: IdResponse =
            serde_json::from_str(r#"{"success": true, "template": {"id": "t2"}}"#).unwrap();
        assert_eq!(wrapped.into_id().as_str(), "t2");
    }

    #[test]
    fn test_both_id_keys_accepted() {
        let flat: IdResponse = serde_json::from_str(r#"{"_id": "t1", "id": "t1"}"#).unwrap();
        assert_eq!(flat.into_id().as_str(), "t1");

        let populated: EntityRef =
            serde_json::from_str(r#"{"_id": "c2", "id": "c2", "name": "Flowers"}"#).unwrap();
        assert_eq!(populated.id().as_str(), "c2");

        // `_id` wins when the keys disagree
        let flat: IdResponse = serde_json::from_str(r#"{"_id": "a", "id": "b"}"#).unwrap();
        assert_eq!(flat.into_id().as_str(), "a");
    }

    #[test]
    fn test_populated_ref_writes_underscore_id() {
        let populated = EntityRef::Populated { id: EntityId::from("c3"), name: "Toys".into() };
        assert_eq!(
            serde_json::to_value(&populated).unwrap(),
            serde_json::json!({ "_id": "c3", "name": "Toys" })
        );
    }
}
